//! PII field encryption.
//!
//! Two symmetric schemes coexist because the stored data was produced by two different
//! subsystems. Neither can read the other's ciphertext, so every PII column is tagged with
//! the [`EncryptionScheme`] that produced it (see [`field`]) and [`FieldCipher`] dispatches
//! on that tag:
//!
//! - [`EncryptionScheme::LegacyEcb`] - AES-128-ECB, hex output, hex-then-base64 decode
//! - [`EncryptionScheme::DerivedCbc`] - AES-256-CBC with key and IV derived from one SHA-256
//!   digest, base64 output
//!
//! The `try_*` methods return a typed [`DecodeFailure`] so callers can tell a decrypted value
//! from one handed back as-is. The plain `encrypt`/`decrypt` methods never fail: they log and
//! return the input, which keeps legacy or corrupted rows readable.

pub mod derived;
pub mod field;
pub mod legacy;

use std::string::FromUtf8Error;

use thiserror::Error;

pub use derived::DerivedCbcCodec;
pub use field::PiiField;
pub use legacy::LegacyEcbCodec;

/// Placeholder secret used when `DATABASE_ENCRYPTION_KEY` is unset.
///
/// Kept so data written by deployments that never set a key stays readable. It must not be
/// used to write new data.
pub static PLACEHOLDER_KEY: &str = "placeholder-key!";

/// Cipher configuration a stored PII value was written with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncryptionScheme {
    /// AES-128-ECB keyed with the raw secret, hex encoded.
    LegacyEcb,
    /// AES-256-CBC keyed with SHA-256 of the secret, IV taken from the same digest, base64 encoded.
    DerivedCbc,
}

/// Low-level failure inside a cipher operation.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The key doesn't match the cipher's key size.
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Key size required by the cipher.
        expected: usize,
        /// Key size provided.
        actual: usize,
    },
    /// The ciphertext isn't valid in the expected text encoding.
    #[error("Invalid {encoding} ciphertext: {reason}")]
    Encoding {
        /// Encoding that was attempted.
        encoding: &'static str,
        /// Decoder error message.
        reason: String,
    },
    /// OpenSSL rejected the operation (bad padding, wrong key, ...).
    #[error(transparent)]
    Cipher(#[from] openssl::error::ErrorStack),
    /// Decrypted bytes are not valid UTF-8.
    #[error(transparent)]
    Utf8(#[from] FromUtf8Error),
    /// Neither the hex nor the base64 decode path produced a plaintext.
    #[error("Undecodable ciphertext (hex: {hex}; base64: {base64})")]
    Undecodable {
        /// Failure of the hex path.
        hex: Box<CryptoError>,
        /// Failure of the base64 path.
        base64: Box<CryptoError>,
    },
}

/// A cipher operation failed; carries the input so it can be returned unchanged.
#[derive(Error, Debug)]
#[error("{reason}")]
pub struct DecodeFailure {
    original: String,
    #[source]
    reason: CryptoError,
}

impl DecodeFailure {
    pub(crate) fn new(original: &str, reason: CryptoError) -> Self {
        Self {
            original: original.to_string(),
            reason,
        }
    }

    /// The value the failed operation was given.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Why the operation failed.
    pub fn reason(&self) -> &CryptoError {
        &self.reason
    }

    /// Consumes the failure, returning the value the operation was given.
    pub fn into_original(self) -> String {
        self.original
    }
}

/// A symmetric codec for one [`EncryptionScheme`].
pub trait Codec: Send + Sync {
    /// Scheme implemented by this codec.
    fn scheme(&self) -> EncryptionScheme;

    /// Encrypts `plaintext`, returning the encoded ciphertext.
    fn try_encrypt(&self, plaintext: &str) -> Result<String, DecodeFailure>;

    /// Decrypts `ciphertext`, returning the plaintext.
    fn try_decrypt(&self, ciphertext: &str) -> Result<String, DecodeFailure>;

    /// Encrypts `plaintext`, returning it unchanged (and logging) on failure.
    fn encrypt(&self, plaintext: &str) -> String {
        self.try_encrypt(plaintext).unwrap_or_else(|failure| {
            tracing::error!(
                scheme = ?self.scheme(),
                value = failure.original(),
                error = %failure,
                details = ?failure.reason(),
                "Failed to encrypt value"
            );
            failure.into_original()
        })
    }

    /// Decrypts `ciphertext`, returning it unchanged (and logging) on failure.
    fn decrypt(&self, ciphertext: &str) -> String {
        self.try_decrypt(ciphertext).unwrap_or_else(|failure| {
            tracing::error!(
                scheme = ?self.scheme(),
                value = failure.original(),
                error = %failure,
                details = ?failure.reason(),
                "Failed to decrypt value"
            );
            failure.into_original()
        })
    }
}

/// Both codecs keyed from the same secret, selected per field.
#[derive(Clone)]
pub struct FieldCipher {
    legacy: LegacyEcbCodec,
    derived: DerivedCbcCodec,
}

impl FieldCipher {
    /// Builds both codecs from `secret`, falling back to [`PLACEHOLDER_KEY`] when it is `None`.
    pub fn new(secret: Option<&str>) -> Self {
        let secret = match secret {
            Some(secret) => secret,
            None => {
                tracing::warn!(
                    "DATABASE_ENCRYPTION_KEY is not set, using the placeholder key. \
                    This is only safe for reading legacy data and must not be used in production."
                );
                PLACEHOLDER_KEY
            }
        };

        Self {
            legacy: LegacyEcbCodec::new(secret),
            derived: DerivedCbcCodec::new(secret),
        }
    }

    /// Returns the codec for `scheme`.
    pub fn codec(&self, scheme: EncryptionScheme) -> &dyn Codec {
        match scheme {
            EncryptionScheme::LegacyEcb => &self.legacy,
            EncryptionScheme::DerivedCbc => &self.derived,
        }
    }

    /// Encrypts a value for `field` using the field's scheme.
    pub fn encrypt_field(&self, field: PiiField, plaintext: &str) -> String {
        self.codec(field.scheme).encrypt(plaintext)
    }

    /// Decrypts an optional stored value for `field`; `None` stays `None`.
    pub fn decrypt_field(&self, field: PiiField, value: Option<&str>) -> Option<String> {
        value.map(|value| self.codec(field.scheme).decrypt(value))
    }

    /// Decrypts a stored value for `field`, reporting failure instead of passing it through.
    pub fn try_decrypt_field(&self, field: PiiField, value: &str) -> Result<String, DecodeFailure> {
        self.codec(field.scheme).try_decrypt(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SECRET: &str = "0123456789abcdef";

    #[test]
    fn dispatches_by_field_scheme() {
        let cipher = FieldCipher::new(Some(SECRET));

        let legacy = cipher.encrypt_field(field::PAYMENT_BILLING_EMAIL, "a@x.com");
        let derived = cipher.encrypt_field(field::USER_EMAIL, "a@x.com");

        assert!(hex::decode(&legacy).is_ok());
        assert_ne!(legacy, derived);
        assert_eq!(
            cipher.decrypt_field(field::PAYMENT_BILLING_EMAIL, Some(&legacy)),
            Some("a@x.com".to_string())
        );
        assert_eq!(
            cipher.decrypt_field(field::USER_EMAIL, Some(&derived)),
            Some("a@x.com".to_string())
        );
    }

    #[test]
    fn schemes_cannot_read_each_other() {
        let cipher = FieldCipher::new(Some(SECRET));
        let derived = cipher.encrypt_field(field::USER_EMAIL, "a@x.com");

        let result = cipher.try_decrypt_field(field::PAYMENT_BILLING_EMAIL, &derived);

        let failure = result.unwrap_err();
        assert_eq!(failure.original(), derived);
    }

    #[test]
    fn absent_value_stays_absent() {
        let cipher = FieldCipher::new(Some(SECRET));

        assert_eq!(cipher.decrypt_field(field::USER_NAME, None), None);
    }

    #[test]
    fn placeholder_key_round_trips() {
        let cipher = FieldCipher::new(None);
        let explicit = FieldCipher::new(Some(PLACEHOLDER_KEY));

        let ciphertext = cipher.encrypt_field(field::PAYMENT_USER_NAME, "Ada");

        assert_eq!(
            explicit.decrypt_field(field::PAYMENT_USER_NAME, Some(&ciphertext)),
            Some("Ada".to_string())
        );
    }
}
