use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::context::Context;
use crate::error::CliError;

pub(crate) fn run_list(ctx: &Context) -> Result<(), CliError> {
    let titles = crate::titles::enumerate(ctx)?;

    if titles.is_empty() {
        log::info!("No titles found under {}", ctx.root.display());
        return Ok(());
    }

    log::info!("Titles ({}):", titles.len());
    log::info!("");
    for title in &titles {
        log::info!(
            "  {} [{}] {}",
            title.title_id_hex().if_supports_color(Stdout, |t| t.bold()),
            title.media_kind.name().if_supports_color(Stdout, |t| t.cyan()),
            title.display_name,
        );
        let save_state = if title.has_local_save {
            "has local save".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "no local save".if_supports_color(Stdout, |t| t.dimmed()).to_string()
        };
        log::info!("    product code: {}  ({})", title.product_code, save_state);
    }
    Ok(())
}
