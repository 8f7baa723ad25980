//! Per-record cookie value decryption
//!
//! A single store freely mixes encryption generations, distinguished
//! only by the first three bytes of each value. `v10`/`v20` values carry
//! an AES-256-GCM envelope keyed by the profile master key; anything
//! else is a raw DPAPI blob from before the envelope format existed.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use super::dpapi;
use super::master_key::MasterKey;

const V10_PREFIX: &[u8] = b"v10";
const V20_PREFIX: &[u8] = b"v20";
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Result of decrypting one stored value.
///
/// `Absent` and `Unavailable` both export as an empty field; they stay
/// separate so diagnostics can tell "no value stored" from "decryption
/// failed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueOutcome {
    Plaintext(String),
    Absent,
    Unavailable,
}

impl ValueOutcome {
    /// The exported representation: empty unless decryption succeeded.
    pub fn exported(&self) -> &str {
        match self {
            ValueOutcome::Plaintext(s) => s,
            ValueOutcome::Absent | ValueOutcome::Unavailable => "",
        }
    }
}

/// Decrypt a raw `encrypted_value` column. Never fails: anything that
/// cannot be verified and decrypted comes back `Unavailable`, and
/// partial plaintext never escapes.
pub fn decrypt_value(encrypted: &[u8], key: &MasterKey) -> ValueOutcome {
    if encrypted.is_empty() {
        return ValueOutcome::Absent;
    }

    if encrypted.starts_with(V10_PREFIX) || encrypted.starts_with(V20_PREFIX) {
        return decrypt_envelope(encrypted, key);
    }

    // Anything without a recognized marker is treated as a pre-envelope
    // raw DPAPI blob.
    match dpapi::unprotect(encrypted) {
        Ok(plain) => ValueOutcome::Plaintext(String::from_utf8_lossy(&plain).into_owned()),
        Err(e) => {
            tracing::debug!("legacy DPAPI decrypt failed: {}", e);
            ValueOutcome::Unavailable
        }
    }
}

/// v10/v20 layout: 3-byte marker, 12-byte nonce, ciphertext, 16-byte tag.
fn decrypt_envelope(encrypted: &[u8], key: &MasterKey) -> ValueOutcome {
    if encrypted.len() < V10_PREFIX.len() + NONCE_LEN + TAG_LEN {
        return ValueOutcome::Unavailable;
    }

    let nonce = Nonce::from_slice(&encrypted[V10_PREFIX.len()..V10_PREFIX.len() + NONCE_LEN]);
    let payload = &encrypted[V10_PREFIX.len() + NONCE_LEN..];

    let cipher = match Aes256Gcm::new_from_slice(key.as_bytes()) {
        Ok(cipher) => cipher,
        Err(_) => return ValueOutcome::Unavailable,
    };

    // The aead decrypt verifies the trailing tag before releasing any
    // plaintext.
    match cipher.decrypt(nonce, payload) {
        Ok(plain) => ValueOutcome::Plaintext(String::from_utf8_lossy(&plain).into_owned()),
        Err(_) => {
            tracing::debug!("AES-GCM tag verification failed");
            ValueOutcome::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> MasterKey {
        MasterKey::from_raw((0..32u8).collect())
    }

    fn encrypt_envelope(marker: &[u8], key: &MasterKey, nonce: &[u8; 12], plain: &[u8]) -> Vec<u8> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).unwrap();
        let sealed = cipher.encrypt(Nonce::from_slice(nonce), plain).unwrap();

        let mut out = marker.to_vec();
        out.extend_from_slice(nonce);
        out.extend_from_slice(&sealed);
        out
    }

    #[test]
    fn test_empty_value_is_absent() {
        assert_eq!(decrypt_value(b"", &test_key()), ValueOutcome::Absent);
    }

    #[test]
    fn test_v10_round_trip() {
        let key = test_key();
        let blob = encrypt_envelope(b"v10", &key, &[7u8; 12], b"session-token-abc123");
        assert_eq!(
            decrypt_value(&blob, &key),
            ValueOutcome::Plaintext("session-token-abc123".to_string())
        );
    }

    #[test]
    fn test_v20_round_trip() {
        let key = test_key();
        let blob = encrypt_envelope(b"v20", &key, &[9u8; 12], b"other-generation");
        assert_eq!(
            decrypt_value(&blob, &key),
            ValueOutcome::Plaintext("other-generation".to_string())
        );
    }

    #[test]
    fn test_corrupted_tag_is_unavailable() {
        let key = test_key();
        let mut blob = encrypt_envelope(b"v10", &key, &[1u8; 12], b"secret");
        let last = blob.len() - 1;
        blob[last] ^= 0xff;
        assert_eq!(decrypt_value(&blob, &key), ValueOutcome::Unavailable);
    }

    #[test]
    fn test_wrong_key_is_unavailable() {
        let key = test_key();
        let blob = encrypt_envelope(b"v10", &key, &[1u8; 12], b"secret");
        let other = MasterKey::from_raw(vec![0xaa; 32]);
        assert_eq!(decrypt_value(&blob, &other), ValueOutcome::Unavailable);
    }

    #[test]
    fn test_truncated_envelope_is_unavailable() {
        // Marker present but too short to hold nonce + tag.
        assert_eq!(
            decrypt_value(b"v10short", &test_key()),
            ValueOutcome::Unavailable
        );
    }

    #[test]
    fn test_empty_plaintext_round_trip() {
        let key = test_key();
        let blob = encrypt_envelope(b"v10", &key, &[3u8; 12], b"");
        assert_eq!(
            decrypt_value(&blob, &key),
            ValueOutcome::Plaintext(String::new())
        );
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let key = test_key();
        let blob = encrypt_envelope(b"v10", &key, &[5u8; 12], &[0x61, 0xff, 0x62]);
        match decrypt_value(&blob, &key) {
            ValueOutcome::Plaintext(s) => assert_eq!(s, "a\u{fffd}b"),
            other => panic!("expected plaintext, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_marker_falls_back_to_dpapi() {
        // "v30" is not a known envelope marker, so the bytes go to the
        // OS primitive; they were never DPAPI-wrapped, so the value
        // degrades to Unavailable rather than erroring.
        let blob = b"v30not-actually-wrapped".to_vec();
        assert_eq!(decrypt_value(&blob, &test_key()), ValueOutcome::Unavailable);
    }

    #[test]
    fn test_exported_collapses_to_empty() {
        assert_eq!(ValueOutcome::Absent.exported(), "");
        assert_eq!(ValueOutcome::Unavailable.exported(), "");
        assert_eq!(ValueOutcome::Plaintext("x".to_string()).exported(), "x");
    }
}
