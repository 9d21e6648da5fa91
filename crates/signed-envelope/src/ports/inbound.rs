//! # Inbound Ports (Driving Ports / API)
//!
//! The consumption API: turn untrusted bytes into a verified envelope and,
//! when possible, a decoded record.

use crate::domain::envelope::Envelope;
use crate::domain::errors::EnvelopeError;
use crate::ports::outbound::Record;
use std::error::Error;
use std::fmt;

/// Failure of a consume call.
///
/// Parse and signature failures never carry an envelope. Post-verification
/// failures (unregistered payload type, record decode) may carry the
/// verified envelope, depending on the service's
/// [`ConsumePolicy`](crate::service::ConsumePolicy).
///
/// Displays as the underlying [`EnvelopeError`] and forwards its source, so
/// error chains never show the same message twice.
#[derive(Debug, Clone)]
pub struct ConsumeError {
    error: EnvelopeError,
    envelope: Option<Envelope>,
}

impl ConsumeError {
    /// Failure with no trusted data.
    pub fn rejected(error: EnvelopeError) -> Self {
        Self {
            error,
            envelope: None,
        }
    }

    /// Failure after the envelope verified successfully.
    pub fn with_envelope(error: EnvelopeError, envelope: Envelope) -> Self {
        Self {
            error,
            envelope: Some(envelope),
        }
    }

    /// The underlying error.
    pub fn error(&self) -> &EnvelopeError {
        &self.error
    }

    /// The verified envelope, if one survived.
    pub fn envelope(&self) -> Option<&Envelope> {
        self.envelope.as_ref()
    }

    /// Take the verified envelope, if one survived.
    pub fn into_envelope(self) -> Option<Envelope> {
        self.envelope
    }

    /// Split into the error and the optional verified envelope.
    pub fn into_parts(self) -> (EnvelopeError, Option<Envelope>) {
        (self.error, self.envelope)
    }
}

impl fmt::Display for ConsumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl Error for ConsumeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.error.source()
    }
}

impl From<EnvelopeError> for ConsumeError {
    fn from(error: EnvelopeError) -> Self {
        Self::rejected(error)
    }
}

/// Primary envelope consumption API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait EnvelopeApi: Send + Sync {
    /// Parse, verify under `domain`, and decode via the payload-type registry.
    ///
    /// # Errors
    /// * `MalformedEnvelope` - bytes are not an envelope
    /// * `SignatureInvalid` - wrong domain or any tampering
    /// * `UnregisteredPayloadType` - no factory for the payload type
    /// * `RecordDecode` - the registered record rejected the payload
    fn consume_envelope(
        &self,
        serialized: &[u8],
        domain: &str,
    ) -> Result<(Envelope, Box<dyn Record>), ConsumeError>;

    /// Parse, verify under `domain`, and decode into `record`.
    ///
    /// Skips the registry entirely. `record` is only written after the
    /// signature checks out.
    fn consume_typed_envelope(
        &self,
        serialized: &[u8],
        domain: &str,
        record: &mut dyn Record,
    ) -> Result<Envelope, ConsumeError>;
}
