//! # Envelope
//!
//! The signed container: public key, payload type, raw payload, signature.
//!
//! ## Security Notes
//!
//! - The domain is never stored. Signer and verifier both supply it, so a
//!   signature minted for one domain cannot be replayed under another.
//! - All byte fields are copied in at construction and never exposed
//!   mutably; an `Envelope` is immutable once built.
//! - Verification failures are undifferentiated (`SignatureInvalid`).

use super::errors::EnvelopeError;
use super::signing::encode_for_signing;
use crate::ports::outbound::{Record, TypedRecord};
use shared_crypto::{PrivateKey, PublicKey};
use std::sync::Arc;
use tracing::{debug, trace};

/// A signed, domain-scoped container for an opaque payload.
///
/// Equality is structural over all four fields, including the public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    public_key: Arc<PublicKey>,
    payload_type: Vec<u8>,
    raw_payload: Vec<u8>,
    signature: Vec<u8>,
}

impl Envelope {
    /// Sign `raw_payload` under `domain` and wrap it in an envelope.
    ///
    /// # Errors
    /// * `InvalidArgument` - `domain` is empty
    pub fn make(
        private_key: &PrivateKey,
        domain: &str,
        payload_type: &[u8],
        raw_payload: &[u8],
    ) -> Result<Self, EnvelopeError> {
        if domain.is_empty() {
            return Err(EnvelopeError::InvalidArgument(
                "envelope domain must not be empty",
            ));
        }

        let unsigned = encode_for_signing(domain, payload_type, raw_payload);
        let signature = private_key.sign(&unsigned);

        debug!(
            domain,
            key_type = %private_key.key_type(),
            payload_type_len = payload_type.len(),
            payload_len = raw_payload.len(),
            "Envelope signed"
        );

        Ok(Self {
            public_key: Arc::new(private_key.public_key()),
            payload_type: payload_type.to_vec(),
            raw_payload: raw_payload.to_vec(),
            signature,
        })
    }

    /// Marshal `record` and sign the result under `domain`.
    ///
    /// # Errors
    /// * `RecordEncode` - the record failed to marshal (passed through as is)
    /// * `InvalidArgument` - `domain` is empty
    pub fn make_with_record(
        private_key: &PrivateKey,
        domain: &str,
        payload_type: &[u8],
        record: &dyn Record,
    ) -> Result<Self, EnvelopeError> {
        let raw_payload = record.marshal_record()?;
        Self::make(private_key, domain, payload_type, &raw_payload)
    }

    /// Sign a record that carries its own domain and payload type.
    pub fn seal<R: TypedRecord>(private_key: &PrivateKey, record: &R) -> Result<Self, EnvelopeError> {
        Self::make_with_record(private_key, R::DOMAIN, R::PAYLOAD_TYPE, record)
    }

    /// Reassemble an envelope from already-decoded wire fields.
    ///
    /// Nothing is verified here; call [`Envelope::verify`] before trusting it.
    pub(crate) fn from_parts(
        public_key: PublicKey,
        payload_type: Vec<u8>,
        raw_payload: Vec<u8>,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            public_key: Arc::new(public_key),
            payload_type,
            raw_payload,
            signature,
        }
    }

    /// Check the signature for `domain`.
    ///
    /// # Errors
    /// * `SignatureInvalid` - wrong domain, altered field, or bad signature
    pub fn verify(&self, domain: &str) -> Result<(), EnvelopeError> {
        let unsigned = encode_for_signing(domain, &self.payload_type, &self.raw_payload);

        self.public_key
            .verify(&unsigned, &self.signature)
            .map_err(|e| {
                trace!(error = %e, "Envelope signature check failed");
                EnvelopeError::SignatureInvalid
            })
    }

    /// Decode the payload into a caller-owned record.
    ///
    /// Does not verify; intended for envelopes already verified.
    pub fn typed_record(&self, record: &mut dyn Record) -> Result<(), EnvelopeError> {
        record
            .unmarshal_record(&self.raw_payload)
            .map_err(EnvelopeError::RecordDecode)
    }

    /// Structural equality; same as `==`.
    pub fn equal(&self, other: &Envelope) -> bool {
        self == other
    }

    /// The signer's public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Payload type identifier.
    pub fn payload_type(&self) -> &[u8] {
        &self.payload_type
    }

    /// Marshaled record bytes.
    pub fn raw_payload(&self) -> &[u8] {
        &self.raw_payload
    }

    /// Signature over the domain-separated encoding.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}
