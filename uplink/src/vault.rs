//! Secure-at-rest-in-memory password holder for login and registration forms.
//!
//! The vault keeps the password in an obfuscated, reversible encoding so that
//! nothing in a casual inspection of application state (devtools state trees,
//! debug dumps) shows the clear text, while the value stays recoverable for
//! submission. This is obfuscation, not confidentiality: the plaintext has to
//! cross the network on submit anyway, so a keyed XOR over the UTF-8 bytes
//! with a per-vault random key, base64-encoded, is the whole transform.
//!
//! Failure policy: codec failures are logged and degrade to an empty value.
//! A corrupted password must never crash an input form, so nothing here
//! returns an error across the component boundary. The plain-text character
//! count is tracked independently of the encoding so length-dependent UI
//! (masking) stays correct even when the stored value is unrecoverable.

use base64::{Engine as _, engine::general_purpose};
use rand::{Rng, thread_rng};

/// Character used for the masked rendering of the password.
pub const MASK_CHAR: char = '\u{2022}';

/// Per-form-instance password holder.
///
/// Created on form mount, discarded with the form. The obfuscation key is
/// random per instance, so two vaults never produce comparable encodings for
/// the same input.
#[derive(Debug, Clone)]
pub struct SecureSecretVault {
    key: [u8; 16],
    encoded: String,
    password_length: usize,
    visible: bool,
}

impl SecureSecretVault {
    pub fn new() -> Self {
        let mut key = [0u8; 16];
        thread_rng().fill(&mut key);
        Self {
            key,
            encoded: String::new(),
            password_length: 0,
            visible: false,
        }
    }

    /// Store an obfuscated encoding of `plain` and record its length.
    ///
    /// The length is recorded before encoding so masked-length UI stays
    /// consistent regardless of what happens to the stored value.
    pub fn set_password(&mut self, plain: &str) {
        self.password_length = plain.chars().count();
        self.encoded = obfuscate(&self.key, plain);
    }

    /// Recover the plain password.
    ///
    /// Returns an empty string if no password is stored or if the stored
    /// encoding cannot be reversed (logged, never propagated).
    pub fn password(&self) -> String {
        if self.encoded.is_empty() {
            return String::new();
        }
        match deobfuscate(&self.key, &self.encoded) {
            Ok(plain) => plain,
            Err(e) => {
                tracing::warn!("Failed to decode stored password value: {e}");
                String::new()
            }
        }
    }

    /// The value the form should render: the plain password when visible,
    /// otherwise a mask string of equal character length.
    pub fn display_value(&self) -> String {
        if self.visible {
            self.password()
        } else {
            std::iter::repeat(MASK_CHAR).take(self.password_length).collect()
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a non-empty value was ever set (and not cleared since).
    pub fn has_password(&self) -> bool {
        self.password_length > 0
    }

    pub fn password_length(&self) -> usize {
        self.password_length
    }

    /// Reset all fields. The obfuscation key is kept; it carries no secret.
    pub fn clear(&mut self) {
        self.encoded.clear();
        self.password_length = 0;
        self.visible = false;
    }
}

impl Default for SecureSecretVault {
    fn default() -> Self {
        Self::new()
    }
}

/// XOR the UTF-8 bytes with a repeating keystream and base64-encode.
///
/// Total over any UTF-8 input; reversal is where corruption surfaces.
fn obfuscate(key: &[u8], plain: &str) -> String {
    let bytes: Vec<u8> = plain
        .as_bytes()
        .iter()
        .zip(key.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect();
    general_purpose::STANDARD.encode(bytes)
}

fn deobfuscate(key: &[u8], encoded: &str) -> anyhow::Result<String> {
    let bytes = general_purpose::STANDARD.decode(encoded)?;
    let plain: Vec<u8> = bytes.iter().zip(key.iter().cycle()).map(|(b, k)| b ^ k).collect();
    Ok(String::from_utf8(plain)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut vault = SecureSecretVault::new();
        vault.set_password("hunter2");
        assert_eq!(vault.password(), "hunter2");
    }

    #[test]
    fn test_round_trip_unicode() {
        let mut vault = SecureSecretVault::new();
        vault.set_password("pässwörd-日本語-🔑");
        assert_eq!(vault.password(), "pässwörd-日本語-🔑");
    }

    #[test]
    fn test_stored_value_is_not_plaintext() {
        let mut vault = SecureSecretVault::new();
        vault.set_password("topsecret");
        assert!(!vault.encoded.contains("topsecret"));
        assert_ne!(vault.encoded, "topsecret");
    }

    #[test]
    fn test_masked_display_length_matches_character_count() {
        let mut vault = SecureSecretVault::new();
        vault.set_password("sécrét");
        let masked = vault.display_value();
        assert_eq!(masked.chars().count(), 6);
        assert!(masked.chars().all(|c| c == MASK_CHAR));
    }

    #[test]
    fn test_visible_display_returns_plaintext() {
        let mut vault = SecureSecretVault::new();
        vault.set_password("hunter2");
        vault.set_visible(true);
        assert_eq!(vault.display_value(), "hunter2");
        vault.set_visible(false);
        assert_ne!(vault.display_value(), "hunter2");
    }

    #[test]
    fn test_empty_vault() {
        let vault = SecureSecretVault::new();
        assert!(!vault.has_password());
        assert_eq!(vault.password(), "");
        assert_eq!(vault.display_value(), "");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut vault = SecureSecretVault::new();
        vault.set_password("hunter2");
        vault.set_visible(true);
        vault.clear();
        assert!(!vault.has_password());
        assert!(!vault.is_visible());
        assert_eq!(vault.password(), "");
        assert_eq!(vault.display_value(), "");
    }

    #[test]
    fn test_corrupted_encoding_fails_soft() {
        let mut vault = SecureSecretVault::new();
        vault.set_password("hunter2");
        vault.encoded = "not valid base64 !!!".to_string();

        // Reversal degrades to empty, never panics; length stays tracked so
        // masked UI is unaffected.
        assert_eq!(vault.password(), "");
        assert_eq!(vault.display_value().chars().count(), 7);
        assert!(vault.has_password());
    }

    #[test]
    fn test_overwriting_updates_length() {
        let mut vault = SecureSecretVault::new();
        vault.set_password("short");
        vault.set_password("much longer value");
        assert_eq!(vault.password_length(), 17);
        assert_eq!(vault.password(), "much longer value");
    }

    #[test]
    fn test_distinct_vaults_produce_distinct_encodings() {
        let mut a = SecureSecretVault::new();
        let mut b = SecureSecretVault::new();
        a.set_password("same input");
        b.set_password("same input");
        // Per-vault random keys make the encodings incomparable.
        assert_ne!(a.encoded, b.encoded);
    }
}
