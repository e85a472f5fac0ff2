//! AES-128-ECB codec used by the payment export pipeline.
//!
//! ECB takes no IV. Ciphertext is written as hex, but older rows were written as base64, so
//! decryption tries hex first and falls back to base64. Each attempt runs its own cipher
//! context.

use base64::{engine::general_purpose::STANDARD, Engine};
use openssl::symm::{self, Cipher};

use super::{Codec, CryptoError, DecodeFailure, EncryptionScheme};

const KEY_LEN: usize = 16;

/// Codec for [`EncryptionScheme::LegacyEcb`].
#[derive(Clone)]
pub struct LegacyEcbCodec {
    key: Vec<u8>,
}

impl LegacyEcbCodec {
    /// Creates a codec keyed with the raw bytes of `secret`.
    ///
    /// The secret must be exactly 16 bytes; any other length makes every operation fail,
    /// which the permissive API turns into a pass-through.
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn check_key(&self) -> Result<(), CryptoError> {
        if self.key.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: self.key.len(),
            });
        }
        Ok(())
    }

    fn decrypt_bytes(&self, bytes: &[u8]) -> Result<String, CryptoError> {
        self.check_key()?;
        let plaintext = symm::decrypt(Cipher::aes_128_ecb(), &self.key, None, bytes)?;
        Ok(String::from_utf8(plaintext)?)
    }

    fn decrypt_hex(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let bytes = hex::decode(ciphertext).map_err(|e| CryptoError::Encoding {
            encoding: "hex",
            reason: e.to_string(),
        })?;
        self.decrypt_bytes(&bytes)
    }

    fn decrypt_base64(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let bytes = STANDARD
            .decode(ciphertext)
            .map_err(|e| CryptoError::Encoding {
                encoding: "base64",
                reason: e.to_string(),
            })?;
        self.decrypt_bytes(&bytes)
    }
}

impl Codec for LegacyEcbCodec {
    fn scheme(&self) -> EncryptionScheme {
        EncryptionScheme::LegacyEcb
    }

    fn try_encrypt(&self, plaintext: &str) -> Result<String, DecodeFailure> {
        self.check_key()
            .and_then(|_| {
                Ok(symm::encrypt(
                    Cipher::aes_128_ecb(),
                    &self.key,
                    None,
                    plaintext.as_bytes(),
                )?)
            })
            .map(hex::encode)
            .map_err(|reason| DecodeFailure::new(plaintext, reason))
    }

    fn try_decrypt(&self, ciphertext: &str) -> Result<String, DecodeFailure> {
        if ciphertext.is_empty() {
            return Ok(String::new());
        }

        self.decrypt_hex(ciphertext)
            .or_else(|hex| {
                self.decrypt_base64(ciphertext)
                    .map_err(|base64| CryptoError::Undecodable {
                        hex: Box::new(hex),
                        base64: Box::new(base64),
                    })
            })
            .map_err(|reason| DecodeFailure::new(ciphertext, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SECRET: &str = "0123456789abcdef";

    #[test]
    fn round_trips_ascii_and_utf8() {
        let codec = LegacyEcbCodec::new(SECRET);

        for plaintext in ["a@x.com", "Jane Doe", "Страница 42, 東京都", "emoji 🎮", ""] {
            let ciphertext = codec.encrypt(plaintext);
            assert_ne!(ciphertext, plaintext);
            assert_eq!(codec.decrypt(&ciphertext), plaintext);
        }
    }

    #[test]
    fn encrypts_to_lowercase_hex() {
        let codec = LegacyEcbCodec::new(SECRET);

        let ciphertext = codec.encrypt("a@x.com");

        // one AES block
        assert_eq!(ciphertext.len(), 32);
        assert!(ciphertext.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn is_deterministic() {
        let codec = LegacyEcbCodec::new(SECRET);

        assert_eq!(codec.encrypt("billing@x.com"), codec.encrypt("billing@x.com"));
    }

    #[test]
    fn falls_back_to_base64() {
        let codec = LegacyEcbCodec::new(SECRET);
        let raw = symm::encrypt(
            Cipher::aes_128_ecb(),
            SECRET.as_bytes(),
            None,
            b"legacy base64 row",
        )
        .unwrap();
        let base64 = STANDARD.encode(raw);
        assert!(hex::decode(&base64).is_err());

        assert_eq!(codec.try_decrypt(&base64).unwrap(), "legacy base64 row");
    }

    #[test]
    fn empty_input_short_circuits() {
        let codec = LegacyEcbCodec::new(SECRET);

        assert_eq!(codec.try_decrypt("").unwrap(), "");
    }

    #[test]
    fn undecodable_input_is_returned_unchanged() {
        let codec = LegacyEcbCodec::new(SECRET);

        let result = codec.try_decrypt("not a ciphertext!");

        let failure = result.unwrap_err();
        assert!(matches!(failure.reason(), CryptoError::Undecodable { .. }));
        assert_eq!(codec.decrypt("not a ciphertext!"), "not a ciphertext!");
    }

    #[test]
    fn wrong_key_length_passes_plaintext_through() {
        let codec = LegacyEcbCodec::new("too short");

        let result = codec.try_encrypt("a@x.com");

        assert!(matches!(
            result.unwrap_err().reason(),
            CryptoError::InvalidKeyLength {
                expected: 16,
                actual: 9
            }
        ));
        assert_eq!(codec.encrypt("a@x.com"), "a@x.com");
    }

    #[test]
    fn different_key_cannot_decrypt() {
        let codec = LegacyEcbCodec::new(SECRET);
        let other = LegacyEcbCodec::new("fedcba9876543210");

        let ciphertext = codec.encrypt("a longer value spanning two blocks");

        // Wrong-key ECB output almost never has valid padding and UTF-8.
        assert_ne!(
            other.try_decrypt(&ciphertext).ok().as_deref(),
            Some("a longer value spanning two blocks")
        );
    }
}
