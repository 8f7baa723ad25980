//! Export command implementation
//!
//! Sequences the pipeline: resolve the store (with browser fallback),
//! unwrap the master key, snapshot the database, decrypt each row,
//! serialize, write the output file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::browser::detection::{self, Browser};
use crate::browser::decrypt::{self, ValueOutcome};
use crate::browser::netscape::{self, CookieRecord};
use crate::browser::snapshot::Snapshot;
use crate::browser::{master_key, store, ExportError};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    #[arg(default_value = "cookies.txt")]
    pub output: PathBuf,

    /// Browser whose cookie store to read first
    #[arg(short, long, default_value = "chrome", value_parser = ["chrome", "edge"])]
    pub browser: String,

    /// Chromium profile directory name
    #[arg(long, default_value = "Default")]
    pub profile: String,
}

/// Run the export command
pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    let preferred = Browser::from_name(&args.browser)
        .with_context(|| format!("unknown browser: {}", args.browser))?;

    // Ambient state is resolved once here; the pipeline below only sees
    // explicit paths.
    let local_app_data =
        dirs::data_local_dir().context("could not resolve the local application data directory")?;
    let temp_dir = std::env::temp_dir();

    let summary = export(preferred, &args, &local_app_data, &temp_dir)?;

    println!(
        "OK: {} cookies exported to {} (from {})",
        summary.count,
        args.output.display(),
        summary.browser.display_name()
    );
    Ok(())
}

struct ExportSummary {
    count: usize,
    browser: Browser,
}

fn export(
    preferred: Browser,
    args: &ExportArgs,
    local_app_data: &Path,
    temp_dir: &Path,
) -> Result<ExportSummary, ExportError> {
    let (browser, paths) = detection::resolve_store(preferred, local_app_data, &args.profile)?;
    tracing::debug!("cookie database: {}", paths.cookie_db.display());

    // The key must come from the browser actually selected; fallback
    // switches which Local State wraps it.
    let key = master_key::unwrap_key(&paths.local_state)?;

    let snapshot = Snapshot::capture(&paths.cookie_db, temp_dir)?;

    let rows = store::read_rows(snapshot.path())?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let value = decrypt::decrypt_value(&row.encrypted_value, &key);
        if value == ValueOutcome::Unavailable {
            tracing::debug!("could not decrypt cookie {} for {}", row.name, row.host_key);
        }
        records.push(CookieRecord {
            host: row.host_key,
            name: row.name,
            value,
            path: row.path,
            expires_unix: netscape::chrome_time_to_unix(row.expires_utc),
            secure: row.is_secure,
        });
    }

    std::fs::write(&args.output, netscape::serialize(&records))?;

    Ok(ExportSummary {
        count: records.len(),
        browser,
    })
    // The snapshot guard removes the temp copy here and on every early
    // return above.
}
