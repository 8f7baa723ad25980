//! Windows DPAPI binding
//!
//! `CryptUnprotectData` decrypts blobs wrapped for the current Windows
//! user. Chromium wraps its cookie master key this way, and cookie
//! values from before the v10 envelope format are raw DPAPI blobs.

use thiserror::Error;

/// Failure of the OS secret-protection primitive
#[derive(Debug, Error)]
pub enum DpapiError {
    #[error("CryptUnprotectData failed: {0}")]
    Unprotect(String),

    #[error("DPAPI is only available on Windows")]
    Unsupported,
}

/// Decrypt a DPAPI-wrapped blob in the current user context.
#[cfg(windows)]
pub fn unprotect(data: &[u8]) -> Result<Vec<u8>, DpapiError> {
    use windows::Win32::Foundation::HLOCAL;
    use windows::Win32::Security::Cryptography::{CryptUnprotectData, CRYPT_INTEGER_BLOB};
    use windows::Win32::System::Memory::LocalFree;

    unsafe {
        let mut input = CRYPT_INTEGER_BLOB {
            cbData: data.len() as u32,
            pbData: data.as_ptr() as *mut u8,
        };
        let mut output = CRYPT_INTEGER_BLOB::default();

        CryptUnprotectData(&mut input, None, None, None, None, 0, &mut output)
            .map_err(|e| DpapiError::Unprotect(e.to_string()))?;

        if output.pbData.is_null() {
            return Err(DpapiError::Unprotect("output buffer is null".to_string()));
        }

        let decrypted =
            std::slice::from_raw_parts(output.pbData, output.cbData as usize).to_vec();

        // The output buffer is allocated by the API and must be freed here.
        let _ = LocalFree(HLOCAL(output.pbData as *mut _));

        Ok(decrypted)
    }
}

#[cfg(not(windows))]
pub fn unprotect(_data: &[u8]) -> Result<Vec<u8>, DpapiError> {
    Err(DpapiError::Unsupported)
}
