//! savesync CLI
//!
//! Command-line harness exercising the save-sync core: enumerate titles,
//! check reconciliation status, push/pull individual saves, or run the
//! full batch sync against a configured server.

mod cli_types;
mod commands;
mod context;
mod error;
mod sources;
mod spinner;
mod titles;

use std::fs;
use std::io::Write;
use std::sync::Mutex;

use clap::Parser;
use log::LevelFilter;

use cli_types::*;
use context::Context;
use error::CliError;

// -- Custom logger --

struct CliLogger {
    level: LevelFilter,
    logfile: Option<Mutex<fs::File>>,
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = record.args().to_string();

        if record.level() <= log::Level::Warn {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }

        if let Some(ref file) = self.logfile {
            let stripped = strip_ansi_escapes::strip(&msg);
            let text = String::from_utf8_lossy(&stripped);
            let mut guard = file.lock().unwrap();
            let _ = writeln!(guard, "{}", text);
        }
    }

    fn flush(&self) {
        if let Some(ref file) = self.logfile {
            let _ = std::io::Write::flush(&mut *file.lock().unwrap());
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    let logfile = cli.logfile.map(|p| {
        let file = fs::File::create(&p).unwrap_or_else(|e| {
            eprintln!("Error: could not create logfile {}: {}", p.display(), e);
            std::process::exit(1);
        });
        Mutex::new(file)
    });
    let logger = Box::new(CliLogger { level, logfile });
    log::set_boxed_logger(logger).expect("Failed to set logger");
    log::set_max_level(level);

    let ctx = match Context::load(cli.root, cli.config_dir, cli.rom_extension, cli.spi_device) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let result = run(&ctx, cli.command, quiet);
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(ctx: &Context, command: Commands, quiet: bool) -> Result<(), CliError> {
    match command {
        Commands::List => commands::list::run_list(ctx),
        Commands::Status { title_id } => commands::status::run_status(ctx, &title_id),
        Commands::Push { title_id, force } => commands::push::run_push(ctx, &title_id, force, quiet),
        Commands::Sync => commands::sync::run_sync(ctx, quiet),
        Commands::History { title_id, version, out } => {
            commands::history::run_history(ctx, &title_id, version, out)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(ctx),
            ConfigAction::ConsoleId => commands::config::run_config_console_id(ctx),
            ConfigAction::Path => {
                commands::config::run_config_path(ctx);
                Ok(())
            }
        },
    }
}
