use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use savesync_engine::{sync_title_upload, SyncAction};

use crate::context::Context;
use crate::error::CliError;
use crate::spinner::Spinner;

/// Uploads one title unconditionally (§9's first Open Question: the
/// executor never refuses a push on staleness grounds — the warning below
/// is the UI-level guard the design calls for).
pub(crate) fn run_push(ctx: &Context, title_id_hex: &str, force: bool, quiet: bool) -> Result<(), CliError> {
    let titles = crate::titles::enumerate(ctx)?;
    let title = crate::titles::find(&titles, title_id_hex).ok_or_else(|| CliError::UnknownTitle(title_id_hex.to_string()))?;

    if !force {
        match super::status::status_for(ctx, title_id_hex) {
            Ok(SyncAction::Upload) | Ok(SyncAction::UpToDate) => {}
            Ok(SyncAction::Download) => log::warn!(
                "{} the server has a newer save for {} — pushing will overwrite it (use --force to skip this check)",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                title_id_hex,
            ),
            Ok(SyncAction::Conflict) => log::warn!(
                "{} {} looks like a conflict (both sides changed) — pushing will overwrite the server's copy (use --force to skip this check)",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                title_id_hex,
            ),
            Err(e) => log::warn!(
                "{} could not check status before push ({e}) — proceeding anyway",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
            ),
        }
    }

    let spinner = Spinner::new(quiet);
    let callback = spinner.callback();
    sync_title_upload(title, &ctx.media(), &ctx.http, &ctx.state, &callback)?;
    spinner.finish();

    log::info!("Uploaded {}", title_id_hex);
    Ok(())
}
