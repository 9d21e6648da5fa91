//! # Protobuf Wire Adapter
//!
//! Serializes envelopes to and from their protobuf wire form.
//!
//! ```text
//! message Envelope {
//!   PublicKey public_key   = 1;
//!   bytes     payload_type = 2;
//!   bytes     payload      = 3;
//!   bytes     signature    = 5;
//! }
//! ```

use crate::domain::envelope::Envelope;
use crate::domain::errors::EnvelopeError;
use prost::Message;
use shared_crypto::{PublicKey, PublicKeyProto};

/// Wire form of an [`Envelope`].
#[derive(Clone, PartialEq, Message)]
pub struct EnvelopeProto {
    /// Signer public key
    #[prost(message, optional, tag = "1")]
    pub public_key: Option<PublicKeyProto>,
    /// Payload type identifier
    #[prost(bytes = "vec", tag = "2")]
    pub payload_type: Vec<u8>,
    /// Marshaled record
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
    /// Signature over the domain-separated encoding
    #[prost(bytes = "vec", tag = "5")]
    pub signature: Vec<u8>,
}

impl From<&Envelope> for EnvelopeProto {
    fn from(envelope: &Envelope) -> Self {
        Self {
            public_key: Some(envelope.public_key().to_proto()),
            payload_type: envelope.payload_type().to_vec(),
            payload: envelope.raw_payload().to_vec(),
            signature: envelope.signature().to_vec(),
        }
    }
}

impl TryFrom<EnvelopeProto> for Envelope {
    type Error = EnvelopeError;

    fn try_from(proto: EnvelopeProto) -> Result<Self, Self::Error> {
        let key_proto = proto
            .public_key
            .ok_or_else(|| EnvelopeError::MalformedEnvelope("missing public key".into()))?;
        let public_key = PublicKey::from_proto(&key_proto)
            .map_err(|e| EnvelopeError::MalformedEnvelope(format!("public key: {e}")))?;

        if proto.signature.is_empty() {
            return Err(EnvelopeError::MalformedEnvelope("missing signature".into()));
        }

        Ok(Envelope::from_parts(
            public_key,
            proto.payload_type,
            proto.payload,
            proto.signature,
        ))
    }
}

impl Envelope {
    /// Deterministic protobuf encoding of the envelope.
    pub fn marshal(&self) -> Vec<u8> {
        EnvelopeProto::from(self).encode_to_vec()
    }

    /// Decode an envelope from its protobuf encoding.
    ///
    /// The result is NOT verified; call [`Envelope::verify`] before use.
    ///
    /// # Errors
    /// * `MalformedEnvelope` - protobuf decode failure, missing or invalid
    ///   public key, or empty signature
    pub fn parse(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let proto = EnvelopeProto::decode(bytes)
            .map_err(|e| EnvelopeError::MalformedEnvelope(e.to_string()))?;
        Envelope::try_from(proto)
    }
}
