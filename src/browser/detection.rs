//! Browser store locations for Windows
//!
//! Resolves the cookie database and `Local State` paths for Chrome and
//! Edge. Every path derives from an explicit base directory so callers
//! decide where lookups happen.

use std::path::{Path, PathBuf};

use super::ExportError;

/// Browsers with a supported cookie store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Edge,
}

impl Browser {
    /// Parse a browser name from the CLI
    pub fn from_name(name: &str) -> Option<Browser> {
        match name.to_ascii_lowercase().as_str() {
            "chrome" => Some(Browser::Chrome),
            "edge" => Some(Browser::Edge),
            _ => None,
        }
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Browser::Chrome => "Google Chrome",
            Browser::Edge => "Microsoft Edge",
        }
    }

    /// The browser tried when this one's store is missing
    pub fn alternate(&self) -> Browser {
        match self {
            Browser::Chrome => Browser::Edge,
            Browser::Edge => Browser::Chrome,
        }
    }

    /// `User Data` directory under the local application data root
    pub fn user_data_dir(&self, local_app_data: &Path) -> PathBuf {
        match self {
            Browser::Chrome => local_app_data
                .join("Google")
                .join("Chrome")
                .join("User Data"),
            Browser::Edge => local_app_data
                .join("Microsoft")
                .join("Edge")
                .join("User Data"),
        }
    }
}

/// Paths that make up one browser profile's cookie store
#[derive(Debug, Clone)]
pub struct StorePaths {
    /// The cookie SQLite database (`<profile>/Network/Cookies`)
    pub cookie_db: PathBuf,
    /// The `Local State` JSON holding the wrapped master key
    pub local_state: PathBuf,
}

/// Paths for a profile inside a browser's `User Data` directory.
/// The master key lives at the `User Data` level, shared by profiles.
pub fn store_paths(browser: Browser, local_app_data: &Path, profile: &str) -> StorePaths {
    let user_data = browser.user_data_dir(local_app_data);
    StorePaths {
        cookie_db: user_data.join(profile).join("Network").join("Cookies"),
        local_state: user_data.join("Local State"),
    }
}

/// Resolve the store to read: the preferred browser's if its database
/// exists, otherwise the alternate's. The master key must then come from
/// the browser this returns, not the one that was asked for.
pub fn resolve_store(
    preferred: Browser,
    local_app_data: &Path,
    profile: &str,
) -> Result<(Browser, StorePaths), ExportError> {
    let paths = store_paths(preferred, local_app_data, profile);
    if paths.cookie_db.exists() {
        return Ok((preferred, paths));
    }

    let alternate = preferred.alternate();
    let alt_paths = store_paths(alternate, local_app_data, profile);
    if alt_paths.cookie_db.exists() {
        tracing::debug!(
            "{} store missing, falling back to {}",
            preferred.display_name(),
            alternate.display_name()
        );
        return Ok((alternate, alt_paths));
    }

    Err(ExportError::StoreNotFound)
}
