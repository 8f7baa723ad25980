//! CLI module - command-line interface
//!
//! - `cookiedump` - defaults to the export command
//! - `cookiedump export [OUTPUT]` - export browser cookies to a file

pub mod export;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Exit codes. The exit status is the only machine-readable signal;
/// everything printed is for humans.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// cookiedump - export browser cookies to Netscape cookies.txt
///
/// Reads the Chrome or Edge cookie store on Windows, decrypting values
/// with the profile master key, and writes a curl/wget-compatible
/// cookies.txt. Works while the browser is running. Defaults to the
/// export command when no subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "cookiedump")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // === Global flags ===

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", global = true, value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Top-level args for the default export command ===

    /// Output file path (default: cookies.txt)
    pub output: Option<PathBuf>,

    /// Browser whose cookie store to read first
    #[arg(short, long, default_value = "chrome", value_parser = ["chrome", "edge"])]
    pub browser: String,

    /// Chromium profile directory name
    #[arg(long, default_value = "Default")]
    pub profile: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export cookies to a Netscape cookies.txt file (default command)
    Export(export::ExportArgs),
}

impl Cli {
    /// Convert top-level args to ExportArgs for the default command
    pub fn to_export_args(&self) -> export::ExportArgs {
        export::ExportArgs {
            output: self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("cookies.txt")),
            browser: self.browser.clone(),
            profile: self.profile.clone(),
        }
    }
}
