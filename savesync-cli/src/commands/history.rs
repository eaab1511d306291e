use std::path::PathBuf;

use crate::context::Context;
use crate::error::CliError;

pub(crate) fn run_history(
    ctx: &Context,
    title_id_hex: &str,
    version: Option<u32>,
    out: Option<PathBuf>,
) -> Result<(), CliError> {
    match version {
        Some(timestamp) => {
            let bundle = ctx.http.fetch_history_version(title_id_hex, timestamp)?;
            let out = out.unwrap_or_else(|| PathBuf::from(format!("{title_id_hex}_{timestamp}.bundle")));
            std::fs::write(&out, &bundle)?;
            log::info!("Wrote {} bytes to {}", bundle.len(), out.display());
        }
        None => {
            let history = ctx.http.fetch_history(title_id_hex)?;
            if history.versions.is_empty() {
                log::info!("No history recorded for {title_id_hex}");
                return Ok(());
            }
            log::info!("History for {title_id_hex}:");
            for v in &history.versions {
                log::info!(
                    "  {}  {} bytes, {} file(s)",
                    v.timestamp, v.size, v.file_count
                );
            }
        }
    }
    Ok(())
}
