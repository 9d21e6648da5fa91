//! # Envelope Errors
//!
//! Error taxonomy for envelope construction, parsing, verification and
//! record dispatch.

use crate::ports::outbound::RecordError;
use thiserror::Error;

/// Errors that can occur while making or consuming an envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// A caller-supplied argument is unusable (empty domain).
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The serialized envelope could not be decoded.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The signature does not check out for the supplied domain.
    ///
    /// Deliberately carries no detail about which field was wrong.
    #[error("Envelope signature is invalid")]
    SignatureInvalid,

    /// No record factory is registered for the envelope's payload type.
    #[error(
        "No record type registered for payload type {:?}",
        String::from_utf8_lossy(.0)
    )]
    UnregisteredPayloadType(Vec<u8>),

    /// The authentic payload did not decode into the expected record.
    #[error("Failed to decode record")]
    RecordDecode(#[source] RecordError),

    /// The record could not be marshaled when making an envelope.
    #[error(transparent)]
    RecordEncode(#[from] RecordError),
}
