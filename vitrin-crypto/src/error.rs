//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed.
    #[error(transparent)]
    Decrypt(#[from] DecryptError),
}

/// Why a stored identifier could not be decrypted.
///
/// The two variants must stay distinguishable: the surrounding layer picks
/// "value permanently unrecoverable" handling for [`DecryptError::KeyMismatch`]
/// and migration/repair handling for [`DecryptError::Malformed`]. Neither is
/// ever collapsed into an empty value.
#[derive(Debug, Error)]
pub enum DecryptError {
    /// Authentication failed: the value was encrypted under a different key
    /// or has been tampered with. `key_ephemeral` is true when this process
    /// runs on a synthesized key, in which case values written before the
    /// last restart are expected to land here.
    #[error(
        "authentication failed: value was encrypted under a different key{}",
        ephemeral_note(.key_ephemeral)
    )]
    KeyMismatch { key_ephemeral: bool },

    /// The stored value is not well-formed ciphertext: truncated, not
    /// base64, or not valid UTF-8 after decryption. Legacy plaintext values
    /// written before encryption was introduced also surface here.
    #[error("stored value is not well-formed ciphertext: {0}")]
    Malformed(String),
}

fn ephemeral_note(key_ephemeral: &bool) -> &'static str {
    if *key_ephemeral {
        " (current key is ephemeral; pre-restart values are unrecoverable)"
    } else {
        ""
    }
}

impl DecryptError {
    /// True when retrying with a different (correct) key could succeed.
    #[must_use]
    pub fn is_key_mismatch(&self) -> bool {
        matches!(self, Self::KeyMismatch { .. })
    }
}
