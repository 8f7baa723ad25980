//! Browser cookie extraction for Windows
//!
//! Chromium browsers keep cookies in an SQLite database whose values are
//! encrypted with a DPAPI-wrapped master key. The modules here snapshot
//! the database out from under a running browser, recover the key, and
//! decrypt each record.

pub mod decrypt;
pub mod detection;
pub mod dpapi;
pub mod master_key;
pub mod netscape;
pub mod snapshot;
pub mod store;

use thiserror::Error;

/// Errors that abort an export run. Per-record decryption failures are
/// not errors; they degrade that record's value to empty.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no cookie database found for either browser")]
    StoreNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encryption key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("cookie store unreadable: {0}")]
    StoreUnreadable(#[from] rusqlite::Error),
}
