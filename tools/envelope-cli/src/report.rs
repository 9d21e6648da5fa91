//! Human and JSON rendering of an envelope summary.

use serde::Serialize;
use signed_envelope::Envelope;
use std::fmt;

/// Summary of an envelope, printed by `open` and `inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeReport {
    /// Whether the signature was checked under `domain`
    pub verified: bool,
    /// Domain the envelope was verified under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Signer key scheme
    pub key_type: String,
    /// Hex SHA-256 of the signer's protobuf-encoded public key
    pub signer_fingerprint: String,
    /// Payload type, lossily decoded as UTF-8
    pub payload_type: String,
    /// Payload length in bytes
    pub payload_len: usize,
    /// Signature length in bytes
    pub signature_len: usize,
}

impl EnvelopeReport {
    /// Report for an envelope that verified under `domain`.
    pub fn verified(envelope: &Envelope, domain: &str) -> Self {
        Self {
            verified: true,
            domain: Some(domain.to_string()),
            ..Self::unverified(envelope)
        }
    }

    /// Report for an envelope that was only parsed.
    pub fn unverified(envelope: &Envelope) -> Self {
        let public_key = envelope.public_key();
        Self {
            verified: false,
            domain: None,
            key_type: public_key.key_type().to_string(),
            signer_fingerprint: hex::encode(public_key.fingerprint()),
            payload_type: String::from_utf8_lossy(envelope.payload_type()).into_owned(),
            payload_len: envelope.raw_payload().len(),
            signature_len: envelope.signature().len(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for EnvelopeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.domain {
            Some(domain) => writeln!(f, "status:       verified (domain {domain:?})")?,
            None => writeln!(f, "status:       UNVERIFIED")?,
        }
        writeln!(f, "key type:     {}", self.key_type)?;
        writeln!(f, "signer:       {}", self.signer_fingerprint)?;
        writeln!(f, "payload type: {:?}", self.payload_type)?;
        writeln!(f, "payload:      {} bytes", self.payload_len)?;
        write!(f, "signature:    {} bytes", self.signature_len)
    }
}
