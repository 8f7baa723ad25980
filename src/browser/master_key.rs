//! Chromium master key recovery
//!
//! Chromium keeps a base64 AES-256 key in the `User Data/Local State`
//! JSON, wrapped by DPAPI and tagged with a 5-byte `DPAPI` prefix. The
//! unwrapped key decrypts every v10/v20 cookie value in that profile.

use std::path::Path;

use base64::Engine;
use serde::Deserialize;
use zeroize::Zeroize;

use super::dpapi;
use super::ExportError;

const KEY_PREFIX: &[u8] = b"DPAPI";

/// Unwrapped AES-256 master key. Lives for one export run, zeroized on
/// drop, never written anywhere.
pub struct MasterKey(Vec<u8>);

impl MasterKey {
    pub(crate) fn from_raw(bytes: Vec<u8>) -> MasterKey {
        MasterKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Deserialize)]
struct LocalState {
    os_crypt: OsCrypt,
}

#[derive(Deserialize)]
struct OsCrypt {
    encrypted_key: String,
}

/// Recover the master key from a browser's `Local State` file.
pub fn unwrap_key(local_state_path: &Path) -> Result<MasterKey, ExportError> {
    let raw = std::fs::read_to_string(local_state_path).map_err(|e| {
        ExportError::KeyUnavailable(format!(
            "cannot read {}: {}",
            local_state_path.display(),
            e
        ))
    })?;

    let state: LocalState = serde_json::from_str(&raw)
        .map_err(|e| ExportError::KeyUnavailable(format!("invalid Local State JSON: {}", e)))?;

    let wrapped = base64::engine::general_purpose::STANDARD
        .decode(&state.os_crypt.encrypted_key)
        .map_err(|e| {
            ExportError::KeyUnavailable(format!("invalid base64 in encrypted_key: {}", e))
        })?;

    if !wrapped.starts_with(KEY_PREFIX) {
        return Err(ExportError::KeyUnavailable(
            "missing DPAPI prefix on encrypted_key".to_string(),
        ));
    }

    let key = dpapi::unprotect(&wrapped[KEY_PREFIX.len()..])
        .map_err(|e| ExportError::KeyUnavailable(e.to_string()))?;

    Ok(MasterKey(key))
}
