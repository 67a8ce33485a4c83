//! Master key resolution.
//!
//! One symmetric key is resolved at process start from the configured
//! secret. When no secret is configured a random key is synthesized so the
//! process can still run, but everything encrypted under it is lost on
//! restart. The result type makes that durability explicit so deployment
//! code can refuse to start production on an ephemeral key.

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the master key in bytes (256 bits for ChaCha20).
pub const KEY_SIZE: usize = 32;

/// The process-wide symmetric key, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    bytes: [u8; KEY_SIZE],
}

impl MasterKey {
    /// Creates a master key from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Resolved key material, tagged with its durability.
///
/// `Durable` keys come from configuration and survive restarts. `Ephemeral`
/// keys were synthesized because no secret was configured; values encrypted
/// under one become unrecoverable when the process exits.
#[derive(Debug, Clone)]
pub enum KeyMaterial {
    Durable(MasterKey),
    Ephemeral(MasterKey),
}

impl KeyMaterial {
    /// The key itself, regardless of durability.
    #[must_use]
    pub fn key(&self) -> &MasterKey {
        match self {
            Self::Durable(key) | Self::Ephemeral(key) => key,
        }
    }

    /// Whether the key survives a process restart.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Durable(_))
    }
}

/// Resolves the master key from the configured secret.
///
/// A present, non-empty secret is digested with SHA-256 into the 32-byte
/// key, so the same secret always yields the same key across restarts. An
/// absent or blank secret synthesizes a random key and logs a warning for
/// operators; the synthesized key is never written back to configuration.
#[must_use]
pub fn resolve_key(secret: Option<&str>) -> KeyMaterial {
    match secret.map(str::trim).filter(|s| !s.is_empty()) {
        Some(secret) => {
            let digest = Sha256::digest(secret.as_bytes());
            let mut bytes = [0u8; KEY_SIZE];
            bytes.copy_from_slice(&digest);
            KeyMaterial::Durable(MasterKey::from_bytes(bytes))
        }
        None => {
            tracing::warn!(
                "no master-key secret configured; synthesized an ephemeral key. \
                 Identifiers encrypted by this process cannot be decrypted after \
                 a restart. Configure a persistent secret."
            );
            KeyMaterial::Ephemeral(generate_random_key())
        }
    }
}

/// Generates a random master key from the OS RNG.
#[must_use]
pub fn generate_random_key() -> MasterKey {
    let mut bytes = [0u8; KEY_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    MasterKey::from_bytes(bytes)
}
