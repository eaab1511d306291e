//! Title enumerator (C6): discovers installed titles across media sources
//! and assigns stable IDs. See §4.6.

pub mod error;
pub mod source;

pub use error::TitleError;
pub use source::{
    CartridgeProbe, LooseFileScan, NamesResolver, TitleSource, TreeArchiveListing,
};

use savesync_core::Title;

/// Scan every configured source, deduplicate by product code, resolve
/// display names, and return a stable, sorted title list.
///
/// Deduplication keeps the first title for a given product code and skips
/// later duplicates across sources (§4.6). Sorting is case-insensitive by
/// `display_name`, applied after the names-resolution round trip.
pub fn enumerate_titles(
    sources: &[&dyn TitleSource],
    names: &dyn NamesResolver,
) -> Result<Vec<Title>, TitleError> {
    let mut titles = Vec::new();
    let mut seen_codes = std::collections::HashSet::new();

    for source in sources {
        for title in source.scan()? {
            if !title.product_code.is_empty() && !seen_codes.insert(title.product_code.clone()) {
                continue;
            }
            titles.push(title);
        }
    }

    resolve_names(&mut titles, names);

    titles.sort_by_key(|t| t.display_name.to_lowercase());
    Ok(titles)
}

/// Resolve display names via a names-lookup round trip, falling back to
/// the product code or hex title ID on a miss (§3's `display_name`
/// resolution chain).
fn resolve_names(titles: &mut [Title], names: &dyn NamesResolver) {
    let codes: Vec<String> = titles
        .iter()
        .filter(|t| !t.product_code.is_empty())
        .map(|t| t.product_code.clone())
        .collect();

    let resolved = if codes.is_empty() {
        std::collections::HashMap::new()
    } else {
        names.resolve(&codes)
    };

    for title in titles.iter_mut() {
        title.display_name = resolved
            .get(&title.product_code)
            .cloned()
            .unwrap_or_else(|| title.fallback_name());
    }
}

#[cfg(test)]
#[path = "tests/enumerate_tests.rs"]
mod tests;
