//! # Shared Crypto - Signing Key Capability
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Default envelope signing scheme |
//! | `ecdsa` | secp256k1 | Envelope signing with secp256k1 identities |
//! | `keys` | both | Scheme-agnostic `PrivateKey`/`PublicKey`, protobuf key encoding |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, strict verification
//! - **secp256k1**: RFC 6979 deterministic, low-S enforced on both sides
//! - Secret key bytes leave this crate only inside `Zeroizing` wrappers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod keys;
pub mod signatures;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use keys::{KeyType, PrivateKey, PrivateKeyProto, PublicKey, PublicKeyProto};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
