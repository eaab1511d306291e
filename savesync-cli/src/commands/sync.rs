use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use savesync_engine::batch_sync;

use crate::context::Context;
use crate::error::CliError;
use crate::spinner::Spinner;

pub(crate) fn run_sync(ctx: &Context, quiet: bool) -> Result<(), CliError> {
    let titles = crate::titles::enumerate(ctx)?;
    if titles.is_empty() {
        log::info!("No titles found under {}", ctx.root.display());
        return Ok(());
    }

    let spinner = Spinner::new(quiet);
    let callback = spinner.callback();
    let summary = batch_sync(&titles, &ctx.console_id, &ctx.media(), &ctx.http, &ctx.state, &callback)?;
    spinner.finish();

    log::info!(
        "{} uploaded, {} downloaded, {} up to date, {} skipped (raw-SPI)",
        summary.uploaded.if_supports_color(Stdout, |t| t.green()),
        summary.downloaded.if_supports_color(Stdout, |t| t.cyan()),
        summary.up_to_date,
        summary.skipped,
    );

    if summary.conflict > 0 {
        log::warn!(
            "{} {} title(s) conflict and need manual resolution (`status`/`push`):",
            "warning:".if_supports_color(Stdout, |t| t.yellow()),
            summary.conflict,
        );
        for id in &summary.conflict_title_ids {
            log::warn!("  {id}");
        }
    }
    if summary.failed > 0 {
        log::warn!(
            "{} {} title(s) failed — see above for details",
            "warning:".if_supports_color(Stdout, |t| t.yellow()),
            summary.failed,
        );
    }

    Ok(())
}
