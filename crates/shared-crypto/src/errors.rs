//! Crypto error types.

use thiserror::Error;

/// Key capability errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Key type tag not supported by this crate
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(i32),

    /// Key type name not recognised
    #[error("Unknown key type name: {0}")]
    UnknownKeyTypeName(String),

    /// Protobuf key encoding could not be decoded
    #[error("Key decoding failed: {0}")]
    KeyDecodingFailed(String),
}
