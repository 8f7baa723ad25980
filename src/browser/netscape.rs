//! Netscape cookie file serialization
//!
//! The cookies.txt convention understood by curl and wget: two comment
//! lines, a blank line, then one tab-separated record per cookie.
//! Embedded tabs or newlines in values are not escaped; the format has
//! no way to express them.

use super::decrypt::ValueOutcome;

/// Seconds between the Windows FILETIME epoch (1601-01-01) and the Unix
/// epoch. Chromium stores `expires_utc` in microseconds on the former.
pub const FILETIME_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

/// One decrypted cookie ready for serialization
#[derive(Debug, Clone)]
pub struct CookieRecord {
    /// `host_key` as stored: domain-scoped entries keep their leading `.`
    pub host: String,
    pub name: String,
    pub value: ValueOutcome,
    pub path: String,
    /// Unix epoch seconds, already clamped to >= 0
    pub expires_unix: i64,
    pub secure: bool,
}

/// Convert a Chromium `expires_utc` timestamp to Unix epoch seconds.
/// Session cookies (0) and anything before the Unix epoch collapse to 0.
pub fn chrome_time_to_unix(expires_utc: i64) -> i64 {
    if expires_utc <= 0 {
        return 0;
    }
    (expires_utc / 1_000_000 - FILETIME_EPOCH_OFFSET_SECS).max(0)
}

/// Serialize records in input order. Deterministic for a given sequence.
pub fn serialize(records: &[CookieRecord]) -> String {
    let mut out = String::from("# Netscape HTTP Cookie File\n# Generated by cookiedump\n\n");

    for record in records {
        let domain_flag = if record.host.starts_with('.') { "TRUE" } else { "FALSE" };
        let secure_flag = if record.secure { "TRUE" } else { "FALSE" };
        let path = if record.path.is_empty() { "/" } else { record.path.as_str() };

        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            record.host,
            domain_flag,
            path,
            secure_flag,
            record.expires_unix,
            record.name,
            record.value.exported()
        ));
    }

    out
}
