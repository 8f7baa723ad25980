//! cookiedump - export Chrome/Edge cookies to Netscape cookies.txt
//!
//! Reads a Chromium cookie store on Windows and writes a curl/wget
//! compatible cookies.txt, decrypting values with the profile master key.
//! Works while the browser is running: the database is snapshotted
//! through a shared-mode file handle before anything opens it as SQLite.

mod browser;
mod cli;
mod logging;

use clap::Parser;
use cli::{exit_codes, Cli, Commands};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    // Initialize logging
    if let Err(e) = logging::init(cli.verbose, cli.log_level.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::FAILURE;
    }

    match cli.command {
        Some(Commands::Export(args)) => run_export(args),
        None => {
            // Default: run export command with args from top-level CLI
            let args = cli.to_export_args();
            run_export(args)
        }
    }
}

fn run_export(args: cli::export::ExportArgs) -> i32 {
    match cli::export::run(args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            exit_codes::FAILURE
        }
    }
}
