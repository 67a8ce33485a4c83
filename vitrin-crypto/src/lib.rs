//! Identifier encryption layer for vitrin.
//!
//! Guards the national-identifier field at rest:
//! - [`resolve_key`] turns the configured secret (or its absence) into
//!   explicitly durable or ephemeral key material
//! - [`IdentityCipher`] encrypts/decrypts the identifier with
//!   ChaCha20-Poly1305, so tampering and wrong-key use are detected rather
//!   than producing garbage plaintext
//! - [`hash_identifier`] produces the irreversible lookup hash stored next
//!   to the ciphertext for uniqueness checks

mod cipher;
mod error;
mod key;

pub use cipher::{EncryptedIdentifier, IdentityCipher, NONCE_SIZE, TAG_SIZE, hash_identifier};
pub use error::{CryptoError, CryptoResult, DecryptError};
pub use key::{KEY_SIZE, KeyMaterial, MasterKey, generate_random_key, resolve_key};
