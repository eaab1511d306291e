use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::context::Context;
use crate::error::CliError;

pub(crate) fn run_config_show(ctx: &Context) -> Result<(), CliError> {
    let path = savesync_config::default_config_path(&ctx.config_dir);
    let config = savesync_config::load(&path)?;

    log::info!(
        "Config file: {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  server_url: {}", config.server_url);
    log::info!("  api_key: {}", mask(&config.api_key));
    log::info!(
        "  save_dir: {}",
        config.save_dir.as_deref().unwrap_or("(not set)")
    );
    log::info!(
        "  wifi_ssid: {}",
        config.wifi_ssid.as_deref().unwrap_or("(not set)")
    );
    Ok(())
}

pub(crate) fn run_config_console_id(ctx: &Context) -> Result<(), CliError> {
    log::info!("{}", ctx.console_id);
    Ok(())
}

pub(crate) fn run_config_path(ctx: &Context) {
    log::info!("{}", ctx.config_dir.display());
}

fn mask(s: &str) -> String {
    if s.len() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", &s[..2])
    }
}
