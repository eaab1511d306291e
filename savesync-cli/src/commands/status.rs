use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use savesync_core::save_hash;
use savesync_engine::{build_decision, build_details, SyncAction};
use savesync_http::{SaveMeta, SyncHttpError};
use savesync_state::SyncStateStore;

use crate::context::Context;
use crate::error::CliError;

/// Fetches the local save and the server's `meta` for `title_id_hex`,
/// returning both plus the last-synced hash — the common setup shared by
/// [`status_for`] and [`run_status`]'s richer detail view.
fn fetch_inputs(
    ctx: &Context,
    title_id_hex: &str,
) -> Result<(Vec<savesync_core::ArchiveFile>, Option<SaveMeta>, Option<String>), CliError> {
    let titles = crate::titles::enumerate(ctx)?;
    let title = crate::titles::find(&titles, title_id_hex).ok_or_else(|| CliError::UnknownTitle(title_id_hex.to_string()))?;

    let files = ctx.media().read(title)?;

    let meta = match ctx.http.fetch_meta(title_id_hex) {
        Ok(meta) => Some(meta),
        Err(SyncHttpError::Server { status: 404, .. }) => None,
        Err(e) => return Err(e.into()),
    };

    let last_synced_hash = ctx.state.load(title.title_id);
    Ok((files, meta, last_synced_hash))
}

/// Fetches the inputs `build_decision` needs and returns the resulting
/// decision, without performing any upload/download.
pub(crate) fn status_for(ctx: &Context, title_id_hex: &str) -> Result<SyncAction, CliError> {
    let (files, meta, last_synced_hash) = fetch_inputs(ctx, title_id_hex)?;
    let local_hash = (!files.is_empty()).then(|| save_hash(&files));
    let decision = build_decision(local_hash.as_deref(), None, meta.as_ref(), last_synced_hash.as_deref());
    Ok(decision.action)
}

pub(crate) fn run_status(ctx: &Context, title_id_hex: &str) -> Result<(), CliError> {
    let (files, meta, last_synced_hash) = fetch_inputs(ctx, title_id_hex)?;
    let local_hash = (!files.is_empty()).then(|| save_hash(&files));
    let action = build_decision(local_hash.as_deref(), None, meta.as_ref(), last_synced_hash.as_deref()).action;
    let details = build_details(&files, meta.as_ref(), last_synced_hash.as_deref());

    let label = match action {
        SyncAction::UpToDate => "up to date".if_supports_color(Stdout, |t| t.green()).to_string(),
        SyncAction::Upload => "local is ahead — would upload".if_supports_color(Stdout, |t| t.yellow()).to_string(),
        SyncAction::Download => "server is ahead — would download".if_supports_color(Stdout, |t| t.yellow()).to_string(),
        SyncAction::Conflict => "conflict — both sides changed".if_supports_color(Stdout, |t| t.red()).to_string(),
    };
    log::info!("{}: {}", title_id_hex, label);

    if details.has_local_save {
        log::info!(
            "  local:  {} files, {} bytes, hash {}",
            details.local_file_count,
            details.local_size,
            details.local_hash.as_deref().unwrap_or("-"),
        );
    } else {
        log::info!("  local:  no save data");
    }

    if details.has_server_save {
        log::info!(
            "  server: {} files, {} bytes, hash {}, last synced {} from console {}",
            details.server_file_count.unwrap_or(0),
            details.server_size.unwrap_or(0),
            details.server_hash.as_deref().unwrap_or("-"),
            details.server_last_sync.as_deref().unwrap_or("-"),
            details.server_console_id.as_deref().unwrap_or("-"),
        );
    } else {
        log::info!("  server: no save data");
    }

    log::info!(
        "  last-synced hash: {}",
        details.last_synced_hash.as_deref().unwrap_or("none"),
    );

    Ok(())
}
