//! AES-256-CBC codec used for relational PII columns.
//!
//! The 32-byte key is `SHA-256(secret)` and the IV is the first 16 bytes of that same
//! digest, so the IV is constant for a given secret. That makes the scheme deterministic:
//! equal plaintexts produce equal ciphertexts, which leaks equality and weakens it against
//! chosen-plaintext analysis. Stored data depends on this derivation, so it is reproduced
//! exactly. New encrypted columns should use a random per-value nonce stored with the
//! ciphertext instead.

use base64::{engine::general_purpose::STANDARD, Engine};
use openssl::{
    sha::sha256,
    symm::{self, Cipher},
};

use super::{Codec, CryptoError, DecodeFailure, EncryptionScheme};

/// Codec for [`EncryptionScheme::DerivedCbc`].
#[derive(Clone)]
pub struct DerivedCbcCodec {
    key: [u8; 32],
    iv: [u8; 16],
}

impl DerivedCbcCodec {
    /// Derives key and IV from `secret`.
    pub fn new(secret: &str) -> Self {
        let digest = sha256(secret.as_bytes());
        let mut iv = [0u8; 16];
        iv.copy_from_slice(&digest[..16]);

        Self { key: digest, iv }
    }

    fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<String, CryptoError> {
        let ciphertext = symm::encrypt(Cipher::aes_256_cbc(), &self.key, Some(&self.iv), plaintext)?;
        Ok(STANDARD.encode(ciphertext))
    }

    fn decrypt_base64(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let bytes = STANDARD
            .decode(ciphertext)
            .map_err(|e| CryptoError::Encoding {
                encoding: "base64",
                reason: e.to_string(),
            })?;
        let plaintext = symm::decrypt(Cipher::aes_256_cbc(), &self.key, Some(&self.iv), &bytes)?;
        Ok(String::from_utf8(plaintext)?)
    }
}

impl Codec for DerivedCbcCodec {
    fn scheme(&self) -> EncryptionScheme {
        EncryptionScheme::DerivedCbc
    }

    fn try_encrypt(&self, plaintext: &str) -> Result<String, DecodeFailure> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        self.encrypt_bytes(plaintext.as_bytes())
            .map_err(|reason| DecodeFailure::new(plaintext, reason))
    }

    fn try_decrypt(&self, ciphertext: &str) -> Result<String, DecodeFailure> {
        if ciphertext.is_empty() {
            return Ok(String::new());
        }

        self.decrypt_base64(ciphertext)
            .map_err(|reason| DecodeFailure::new(ciphertext, reason))
    }
}
