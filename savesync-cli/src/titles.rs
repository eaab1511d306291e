//! Builds the full `TitleSource` set for this host and runs enumeration
//! (§4.6) against it.

use savesync_core::{MediaKind, Title};
use savesync_titles::{LooseFileScan, NamesResolver, RawSpiProbe, TitleSource, TreeTitleSource};

use crate::context::Context;
use crate::error::CliError;
use crate::sources::{DirTreeListing, HttpNamesResolver, InsertedImageProbe};

pub(crate) fn enumerate(ctx: &Context) -> Result<Vec<Title>, CliError> {
    let listing = DirTreeListing::new(ctx.archives_root());
    let tree_system = TreeTitleSource::new(&listing, MediaKind::SystemStorage);
    let tree_cart = TreeTitleSource::new(&listing, MediaKind::CartridgeTree);
    let probe = InsertedImageProbe::new(ctx.raw_spi_image_path());
    let raw_spi = RawSpiProbe::new(&probe);

    let roms_root = ctx.roms_root();
    let loose = roms_root.is_dir().then(|| LooseFileScan::new(roms_root, ctx.rom_extension.clone()));

    let mut sources: Vec<&dyn TitleSource> = vec![&tree_system, &tree_cart, &raw_spi];
    if let Some(loose) = &loose {
        sources.push(loose);
    }

    let resolver: Box<dyn NamesResolver> = Box::new(HttpNamesResolver { http: &ctx.http });
    Ok(savesync_titles::enumerate_titles(&sources, resolver.as_ref())?)
}

pub(crate) fn find<'a>(titles: &'a [Title], title_id_hex: &str) -> Option<&'a Title> {
    titles.iter().find(|t| t.title_id_hex().eq_ignore_ascii_case(title_id_hex))
}
