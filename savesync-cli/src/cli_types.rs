//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "savesync")]
#[command(about = "Sync handheld console saves with a remote server", long_about = None)]
pub(crate) struct Cli {
    /// Titles root directory: holds the archive tree, loose-file ROMs,
    /// and the raw-SPI image, in the layout this build's adapters expect
    /// (defaults to current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Directory holding config.txt and console_id.txt (defaults to --root)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Extension (without the dot) identifying loose ROM files to scan
    /// for title enumeration
    #[arg(long, global = true, default_value = "bin")]
    pub rom_extension: String,

    /// Device file exposing a transparent SPI passthrough to an inserted
    /// foreign-family cartridge, for raw-SPI push/pull (omit if this host
    /// has no live SPI bus — raw-SPI titles will be enumerated from a
    /// previously-dumped image only)
    #[arg(long, global = true)]
    pub spi_device: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List every enumerated title and whether it has a local save
    List,

    /// Show one title's reconciliation status against the server
    Status {
        /// 16-char hex title ID
        title_id: String,
    },

    /// Upload one title's save unconditionally
    Push {
        /// 16-char hex title ID
        title_id: String,

        /// Skip the staleness warning when no prior status check ran
        #[arg(long)]
        force: bool,
    },

    /// Run the full batch reconciliation over every enumerated title
    Sync,

    /// Show or fetch a title's save history from the server
    History {
        /// 16-char hex title ID
        title_id: String,

        /// Fetch and write this specific version's bundle instead of
        /// listing the version table
        #[arg(long)]
        version: Option<u32>,

        /// Destination file for --version's fetched bundle
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// View or initialize local configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the resolved config.txt path and its parsed contents
    Show,

    /// Print this console's ID, generating and persisting one if absent
    ConsoleId,

    /// Print the config directory path
    Path,
}
