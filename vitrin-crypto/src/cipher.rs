//! Identifier encryption using ChaCha20-Poly1305.
//!
//! Authenticated encryption: a wrong key or a tampered value fails the
//! authentication check instead of decrypting to garbage. Each call draws a
//! fresh random nonce, so two encryptions of the same identifier produce
//! different ciphertexts; ciphertext equality says nothing about plaintext
//! equality.

use crate::error::{CryptoError, CryptoResult, DecryptError};
use crate::key::KeyMaterial;
use chacha20poly1305::{
    ChaCha20Poly1305, Nonce,
    aead::{Aead, KeyInit},
};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Size of nonce in bytes (96 bits for ChaCha20-Poly1305).
pub const NONCE_SIZE: usize = 12;

/// Size of authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// An encrypted identifier with the metadata needed for decryption.
///
/// Stored in the document store as an opaque base64 string of
/// nonce ‖ ciphertext (the ciphertext includes the auth tag).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedIdentifier {
    nonce: [u8; NONCE_SIZE],
    ciphertext: Vec<u8>,
}

impl EncryptedIdentifier {
    /// Encodes to the opaque storage form.
    #[must_use]
    pub fn to_base64(&self) -> String {
        use base64::{Engine, engine::general_purpose::STANDARD};
        let mut bytes = Vec::with_capacity(NONCE_SIZE + self.ciphertext.len());
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        STANDARD.encode(&bytes)
    }

    /// Decodes from the opaque storage form.
    ///
    /// Anything that is not base64, or decodes to fewer bytes than a nonce
    /// plus an auth tag, is [`DecryptError::Malformed`]. Legacy plaintext
    /// values stored before encryption was introduced land here too; there
    /// is deliberately no third state for them.
    pub fn from_base64(encoded: &str) -> Result<Self, DecryptError> {
        use base64::{Engine, engine::general_purpose::STANDARD};
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| DecryptError::Malformed(format!("invalid base64: {e}")))?;

        if bytes.len() < NONCE_SIZE + TAG_SIZE {
            return Err(DecryptError::Malformed(format!(
                "value too short: {} bytes",
                bytes.len()
            )));
        }

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[..NONCE_SIZE]);
        let ciphertext = bytes[NONCE_SIZE..].to_vec();

        Ok(Self { nonce, ciphertext })
    }
}

/// Encrypts and decrypts the national-identifier field.
///
/// Holds the resolved key and its durability; key rotation means
/// constructing a new cipher from new material, never mutating this one.
pub struct IdentityCipher {
    cipher: ChaCha20Poly1305,
    key_ephemeral: bool,
}

impl IdentityCipher {
    /// Creates a cipher over the resolved key material.
    #[must_use]
    pub fn new(material: &KeyMaterial) -> Self {
        Self {
            cipher: ChaCha20Poly1305::new(material.key().as_bytes().into()),
            key_ephemeral: !material.is_durable(),
        }
    }

    /// Whether this cipher runs on a synthesized, restart-lossy key.
    #[must_use]
    pub fn key_ephemeral(&self) -> bool {
        self.key_ephemeral
    }

    /// Encrypts an identifier under the process key.
    pub fn encrypt(&self, identifier: &str) -> CryptoResult<EncryptedIdentifier> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, identifier.as_bytes())
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        Ok(EncryptedIdentifier {
            nonce: nonce_bytes,
            ciphertext,
        })
    }

    /// Encrypts an identifier straight to the base64 storage form.
    pub fn encrypt_to_string(&self, identifier: &str) -> CryptoResult<String> {
        Ok(self.encrypt(identifier)?.to_base64())
    }

    /// Decrypts a stored identifier.
    ///
    /// Fails with [`DecryptError::KeyMismatch`] when authentication fails
    /// (wrong key or tampering) and [`DecryptError::Malformed`] when the
    /// value is not well-formed ciphertext. Never returns wrong plaintext.
    pub fn decrypt(&self, value: &EncryptedIdentifier) -> Result<String, DecryptError> {
        let nonce = Nonce::from_slice(&value.nonce);
        let plaintext = self
            .cipher
            .decrypt(nonce, value.ciphertext.as_ref())
            .map_err(|_| DecryptError::KeyMismatch {
                key_ephemeral: self.key_ephemeral,
            })?;

        String::from_utf8(plaintext)
            .map_err(|e| DecryptError::Malformed(format!("invalid UTF-8: {e}")))
    }

    /// Decrypts from the base64 storage form.
    pub fn decrypt_from_string(&self, encoded: &str) -> Result<String, DecryptError> {
        self.decrypt(&EncryptedIdentifier::from_base64(encoded)?)
    }
}

/// Irreversible lookup hash of an identifier (SHA-256, lowercase hex).
///
/// Stored alongside the ciphertext so uniqueness checks never need to
/// decrypt. Deterministic by design, unlike [`IdentityCipher::encrypt`].
#[must_use]
pub fn hash_identifier(identifier: &str) -> String {
    use std::fmt::Write;
    let digest = Sha256::digest(identifier.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
