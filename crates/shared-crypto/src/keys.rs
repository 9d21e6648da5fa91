//! # Key Capability
//!
//! Scheme-agnostic private and public keys, plus their protobuf encoding.
//!
//! The protobuf shape is two fields, `key_type = 1` (enumeration) and
//! `data = 2` (bytes), shared by public and private keys:
//!
//! | Key type | Public `data` | Private `data` |
//! |----------|---------------|----------------|
//! | Ed25519 (1) | 32-byte point | 32-byte seed |
//! | Secp256k1 (2) | 33-byte compressed SEC1 | 32-byte scalar |

use crate::ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
use crate::signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use crate::CryptoError;
use prost::Message;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

/// Signature scheme tag, as carried on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum KeyType {
    /// Ed25519 (RFC 8032)
    Ed25519 = 1,
    /// ECDSA over secp256k1 with SHA-256
    Secp256k1 = 2,
}

impl KeyType {
    /// Lowercase scheme name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::Secp256k1 => "secp256k1",
        }
    }

    fn from_wire(value: i32) -> Result<Self, CryptoError> {
        KeyType::try_from(value).map_err(|_| CryptoError::UnsupportedKeyType(value))
    }
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KeyType {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ed25519" => Ok(Self::Ed25519),
            "secp256k1" => Ok(Self::Secp256k1),
            _ => Err(CryptoError::UnknownKeyTypeName(s.to_string())),
        }
    }
}

/// Wire form of a public key.
#[derive(Clone, PartialEq, Message)]
pub struct PublicKeyProto {
    /// [`KeyType`] tag
    #[prost(enumeration = "KeyType", required, tag = "1")]
    pub key_type: i32,
    /// Scheme-specific key bytes
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

/// Wire form of a private key.
#[derive(Clone, PartialEq, Message)]
pub struct PrivateKeyProto {
    /// [`KeyType`] tag
    #[prost(enumeration = "KeyType", required, tag = "1")]
    pub key_type: i32,
    /// Scheme-specific secret bytes
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

/// A verifying key for any supported scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PublicKey {
    /// Ed25519 public key
    Ed25519(Ed25519PublicKey),
    /// secp256k1 public key
    Secp256k1(Secp256k1PublicKey),
}

impl PublicKey {
    /// Scheme of this key.
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Secp256k1(_) => KeyType::Secp256k1,
        }
    }

    /// Raw scheme-specific key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Ed25519(key) => key.as_bytes(),
            Self::Secp256k1(key) => key.as_bytes(),
        }
    }

    /// Build from a scheme tag and raw key bytes.
    pub fn from_parts(key_type: KeyType, data: &[u8]) -> Result<Self, CryptoError> {
        match key_type {
            KeyType::Ed25519 => Ed25519PublicKey::from_slice(data).map(Self::Ed25519),
            KeyType::Secp256k1 => Secp256k1PublicKey::from_slice(data).map(Self::Secp256k1),
        }
    }

    /// Verify `signature` over `message`.
    ///
    /// A signature of the wrong length for the scheme is reported as
    /// [`CryptoError::InvalidSignatureFormat`].
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        match self {
            Self::Ed25519(key) => key.verify(message, &Ed25519Signature::from_slice(signature)?),
            Self::Secp256k1(key) => {
                key.verify(message, &Secp256k1Signature::from_slice(signature)?)
            }
        }
    }

    /// Wire form.
    pub fn to_proto(&self) -> PublicKeyProto {
        PublicKeyProto {
            key_type: self.key_type() as i32,
            data: self.as_bytes().to_vec(),
        }
    }

    /// Parse the wire form, validating the key bytes.
    pub fn from_proto(proto: &PublicKeyProto) -> Result<Self, CryptoError> {
        Self::from_parts(KeyType::from_wire(proto.key_type)?, &proto.data)
    }

    /// Protobuf encoding of the key.
    pub fn encode_protobuf(&self) -> Vec<u8> {
        self.to_proto().encode_to_vec()
    }

    /// Decode a protobuf-encoded key.
    pub fn decode_protobuf(bytes: &[u8]) -> Result<Self, CryptoError> {
        let proto = PublicKeyProto::decode(bytes)
            .map_err(|e| CryptoError::KeyDecodingFailed(e.to_string()))?;
        Self::from_proto(&proto)
    }

    /// SHA-256 of the protobuf encoding; a stable identifier for the signer.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.encode_protobuf());
        hasher.finalize().into()
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(key: Ed25519PublicKey) -> Self {
        Self::Ed25519(key)
    }
}

impl From<Secp256k1PublicKey> for PublicKey {
    fn from(key: Secp256k1PublicKey) -> Self {
        Self::Secp256k1(key)
    }
}

/// A signing key for any supported scheme.
#[derive(Debug)]
pub enum PrivateKey {
    /// Ed25519 key pair
    Ed25519(Ed25519KeyPair),
    /// secp256k1 key pair
    Secp256k1(Secp256k1KeyPair),
}

impl PrivateKey {
    /// Generate a fresh random key of the given scheme.
    pub fn generate(key_type: KeyType) -> Self {
        match key_type {
            KeyType::Ed25519 => Self::Ed25519(Ed25519KeyPair::generate()),
            KeyType::Secp256k1 => Self::Secp256k1(Secp256k1KeyPair::generate()),
        }
    }

    /// Scheme of this key.
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Ed25519(_) => KeyType::Ed25519,
            Self::Secp256k1(_) => KeyType::Secp256k1,
        }
    }

    /// The matching public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Ed25519(pair) => PublicKey::Ed25519(pair.public_key()),
            Self::Secp256k1(pair) => PublicKey::Secp256k1(pair.public_key()),
        }
    }

    /// Sign `message`. Both schemes are deterministic.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self {
            Self::Ed25519(pair) => pair.sign(message).as_bytes().to_vec(),
            Self::Secp256k1(pair) => pair.sign(message).as_bytes().to_vec(),
        }
    }

    /// Protobuf encoding of the secret key.
    pub fn encode_protobuf(&self) -> Zeroizing<Vec<u8>> {
        let data = match self {
            Self::Ed25519(pair) => pair.to_seed().to_vec(),
            Self::Secp256k1(pair) => pair.to_bytes().to_vec(),
        };
        let mut proto = PrivateKeyProto {
            key_type: self.key_type() as i32,
            data,
        };
        let encoded = Zeroizing::new(proto.encode_to_vec());
        proto.data.zeroize();
        encoded
    }

    /// Decode a protobuf-encoded secret key.
    pub fn decode_protobuf(bytes: &[u8]) -> Result<Self, CryptoError> {
        let mut proto = PrivateKeyProto::decode(bytes)
            .map_err(|e| CryptoError::KeyDecodingFailed(e.to_string()))?;
        let key = match KeyType::from_wire(proto.key_type) {
            Ok(KeyType::Ed25519) => Ed25519KeyPair::from_seed_slice(&proto.data).map(Self::Ed25519),
            Ok(KeyType::Secp256k1) => {
                Secp256k1KeyPair::from_slice(&proto.data).map(Self::Secp256k1)
            }
            Err(e) => Err(e),
        };
        proto.data.zeroize();
        key
    }
}

impl From<Ed25519KeyPair> for PrivateKey {
    fn from(pair: Ed25519KeyPair) -> Self {
        Self::Ed25519(pair)
    }
}

impl From<Secp256k1KeyPair> for PrivateKey {
    fn from(pair: Secp256k1KeyPair) -> Self {
        Self::Secp256k1(pair)
    }
}
