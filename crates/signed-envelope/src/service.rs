//! # Envelope Service
//!
//! Application service layer that implements the `EnvelopeApi` trait.
//!
//! ## Consume Flow
//!
//! ```text
//! bytes ──parse──→ Envelope ──verify(domain)──→ verified Envelope
//!   │                  │                               │
//!   ↓                  ↓                               ↓
//! MalformedEnvelope  SignatureInvalid        registry lookup / unmarshal
//! (no envelope)      (no envelope)                     │
//!                                   ┌──────────────────┼──────────────────┐
//!                                   ↓                  ↓                  ↓
//!                       UnregisteredPayloadType   RecordDecode     (Envelope, Record)
//!                         (+ envelope*)          (+ envelope*)
//! ```
//!
//! `*` subject to [`ConsumePolicy`].

use crate::adapters::registry::PayloadTypeRegistry;
use crate::domain::envelope::Envelope;
use crate::domain::errors::EnvelopeError;
use crate::ports::inbound::{ConsumeError, EnvelopeApi};
use crate::ports::outbound::Record;
use std::sync::Arc;
use tracing::debug;

/// Controls whether post-verification failures hand back the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumePolicy {
    /// Attach the verified envelope to `UnregisteredPayloadType` errors.
    pub attach_envelope_on_unregistered: bool,
    /// Attach the verified envelope to `RecordDecode` errors.
    pub attach_envelope_on_decode_failure: bool,
}

impl Default for ConsumePolicy {
    fn default() -> Self {
        Self {
            attach_envelope_on_unregistered: true,
            attach_envelope_on_decode_failure: true,
        }
    }
}

impl ConsumePolicy {
    /// Never hand back an envelope alongside an error.
    pub fn strict() -> Self {
        Self {
            attach_envelope_on_unregistered: false,
            attach_envelope_on_decode_failure: false,
        }
    }
}

/// Envelope Service.
///
/// Verifies envelopes and dispatches their payloads through an injected
/// [`PayloadTypeRegistry`].
#[derive(Debug, Clone)]
pub struct EnvelopeService {
    registry: Arc<PayloadTypeRegistry>,
    policy: ConsumePolicy,
}

impl EnvelopeService {
    /// Create a service over `registry` with the default policy.
    pub fn new(registry: Arc<PayloadTypeRegistry>) -> Self {
        Self {
            registry,
            policy: ConsumePolicy::default(),
        }
    }

    /// Create a service over the process-wide default registry.
    pub fn with_global_registry() -> Self {
        Self::new(PayloadTypeRegistry::global())
    }

    /// Replace the consume policy.
    pub fn with_policy(mut self, policy: ConsumePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The registry this service dispatches through.
    pub fn registry(&self) -> &Arc<PayloadTypeRegistry> {
        &self.registry
    }

    /// The active consume policy.
    pub fn policy(&self) -> ConsumePolicy {
        self.policy
    }

    /// Steps 1-2: parse and verify. Nothing unverified escapes.
    fn open(&self, serialized: &[u8], domain: &str) -> Result<Envelope, ConsumeError> {
        let envelope = Envelope::parse(serialized).map_err(|e| {
            debug!(error = %e, "Rejected malformed envelope");
            ConsumeError::rejected(e)
        })?;

        envelope.verify(domain).map_err(|e| {
            debug!(domain, "Rejected envelope with invalid signature");
            ConsumeError::rejected(e)
        })?;

        Ok(envelope)
    }

    fn post_verification_failure(
        &self,
        error: EnvelopeError,
        envelope: Envelope,
        attach: bool,
    ) -> ConsumeError {
        debug!(error = %error, attach_envelope = attach, "Verified envelope not decoded");
        if attach {
            ConsumeError::with_envelope(error, envelope)
        } else {
            ConsumeError::rejected(error)
        }
    }
}

impl EnvelopeApi for EnvelopeService {
    fn consume_envelope(
        &self,
        serialized: &[u8],
        domain: &str,
    ) -> Result<(Envelope, Box<dyn Record>), ConsumeError> {
        let envelope = self.open(serialized, domain)?;

        let Some(factory) = self.registry.lookup(envelope.payload_type()) else {
            let error = EnvelopeError::UnregisteredPayloadType(envelope.payload_type().to_vec());
            return Err(self.post_verification_failure(
                error,
                envelope,
                self.policy.attach_envelope_on_unregistered,
            ));
        };

        let mut record = factory();
        if let Err(e) = envelope.typed_record(record.as_mut()) {
            return Err(self.post_verification_failure(
                e,
                envelope,
                self.policy.attach_envelope_on_decode_failure,
            ));
        }

        debug!(
            domain,
            payload_type = %String::from_utf8_lossy(envelope.payload_type()),
            "Envelope consumed"
        );
        Ok((envelope, record))
    }

    fn consume_typed_envelope(
        &self,
        serialized: &[u8],
        domain: &str,
        record: &mut dyn Record,
    ) -> Result<Envelope, ConsumeError> {
        let envelope = self.open(serialized, domain)?;

        if let Err(e) = envelope.typed_record(record) {
            return Err(self.post_verification_failure(
                e,
                envelope,
                self.policy.attach_envelope_on_decode_failure,
            ));
        }

        Ok(envelope)
    }
}
