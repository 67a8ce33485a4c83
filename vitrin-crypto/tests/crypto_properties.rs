//! Property-based tests for the identifier cipher.
//!
//! These tests verify security properties that must always hold:
//! - Encryption is reversible with the correct key
//! - Wrong keys fail authentication, never return a value
//! - The storage encoding round-trips
//! - The lookup hash is deterministic

use proptest::prelude::*;
use vitrin_crypto::{
    EncryptedIdentifier, IdentityCipher, KeyMaterial, generate_random_key, hash_identifier,
    resolve_key,
};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn identifier_strategy() -> impl Strategy<Value = String> {
    // National identifiers are digit strings, but the cipher must hold for
    // any UTF-8 content the application might route through it.
    prop_oneof![
        prop::string::string_regex("[1-9][0-9]{10}").unwrap(),
        prop::string::string_regex("[\\x20-\\x7E]{0,200}").unwrap(),
    ]
}

fn secret_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9!@#$%^&*()]{1,64}").unwrap()
}

fn random_cipher() -> IdentityCipher {
    IdentityCipher::new(&KeyMaterial::Durable(generate_random_key()))
}

// =============================================================================
// ENCRYPTION PROPERTIES
// =============================================================================

proptest! {
    /// Encryption followed by decryption with the same key returns the
    /// original identifier.
    #[test]
    fn roundtrip_preserves_identifier(identifier in identifier_strategy()) {
        let cipher = random_cipher();

        let encrypted = cipher.encrypt(&identifier).unwrap();
        let decrypted = cipher.decrypt(&encrypted).unwrap();

        prop_assert_eq!(decrypted, identifier);
    }

    /// The base64 storage form round-trips through encode/decode/decrypt.
    #[test]
    fn storage_form_roundtrips(identifier in identifier_strategy()) {
        let cipher = random_cipher();

        let stored = cipher.encrypt_to_string(&identifier).unwrap();
        let decrypted = cipher.decrypt_from_string(&stored).unwrap();

        prop_assert_eq!(decrypted, identifier);
    }

    /// Same key encrypting the same identifier twice produces different
    /// ciphertexts (fresh nonce per call), and both decrypt correctly.
    #[test]
    fn repeated_encryption_is_not_deterministic(identifier in identifier_strategy()) {
        let cipher = random_cipher();

        let first = cipher.encrypt(&identifier).unwrap();
        let second = cipher.encrypt(&identifier).unwrap();

        prop_assert_ne!(&first, &second);
        prop_assert_eq!(cipher.decrypt(&first).unwrap(), identifier.clone());
        prop_assert_eq!(cipher.decrypt(&second).unwrap(), identifier);
    }

    /// A different key never yields a value: authentication fails.
    #[test]
    fn wrong_key_fails_with_key_mismatch(identifier in identifier_strategy()) {
        let cipher = random_cipher();
        let other = random_cipher();

        let encrypted = cipher.encrypt(&identifier).unwrap();
        let result = other.decrypt(&encrypted);

        prop_assert!(result.is_err());
        prop_assert!(result.unwrap_err().is_key_mismatch());
    }

    /// Flipping any ciphertext byte is detected.
    #[test]
    fn tampering_is_detected(
        identifier in identifier_strategy(),
        corrupt_at in any::<prop::sample::Index>(),
    ) {
        let cipher = random_cipher();

        let stored = cipher.encrypt_to_string(&identifier).unwrap();
        let mut raw = {
            use base64::{Engine, engine::general_purpose::STANDARD};
            STANDARD.decode(&stored).unwrap()
        };
        let index = corrupt_at.index(raw.len());
        raw[index] ^= 0x01;
        let tampered = {
            use base64::{Engine, engine::general_purpose::STANDARD};
            STANDARD.encode(&raw)
        };

        prop_assert!(cipher.decrypt_from_string(&tampered).is_err());
    }
}

// =============================================================================
// KEY RESOLUTION PROPERTIES
// =============================================================================

proptest! {
    /// The same secret always resolves to the same key, so a restart with
    /// the same configuration can decrypt previously stored values.
    #[test]
    fn secret_resolution_is_deterministic(
        secret in secret_strategy(),
        identifier in identifier_strategy(),
    ) {
        let before_restart = IdentityCipher::new(&resolve_key(Some(&secret)));
        let after_restart = IdentityCipher::new(&resolve_key(Some(&secret)));

        let stored = before_restart.encrypt_to_string(&identifier).unwrap();
        let decrypted = after_restart.decrypt_from_string(&stored).unwrap();

        prop_assert_eq!(decrypted, identifier);
    }

    /// The lookup hash is deterministic and fixed-width hex.
    #[test]
    fn lookup_hash_is_stable(identifier in identifier_strategy()) {
        let first = hash_identifier(&identifier);
        let second = hash_identifier(&identifier);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), 64);
        prop_assert!(first.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    /// Garbage strings never decode into a decryptable value.
    #[test]
    fn arbitrary_strings_do_not_decrypt(garbage in "[\\x20-\\x7E]{0,64}") {
        let cipher = random_cipher();
        if let Ok(encrypted) = EncryptedIdentifier::from_base64(&garbage) {
            // Decoded by chance; authentication still rejects it.
            prop_assert!(cipher.decrypt(&encrypted).is_err());
        }
    }
}
