//! # Signed Envelope
//!
//! Wraps an arbitrary payload together with a payload-type identifier, the
//! signer's public key and a signature over a domain-separated encoding of
//! those fields.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): envelope construction, signing encoding, verification
//! - **Ports Layer** (`ports/`): consumption API and the `Record` abstraction
//! - **Adapters Layer** (`adapters/`): protobuf wire codec, payload-type registry
//! - **Service Layer** (`service.rs`): parse -> verify -> dispatch state machine
//!
//! ## Security Notes
//!
//! - The signature covers `domain`, `payload_type` and `payload`, each
//!   length-prefixed, so fields cannot be shifted into one another.
//! - A parsed envelope is untrusted until `verify` succeeds under the
//!   expected domain. The consume API never hands out unverified data.
//! - The domain string is never transmitted; the verifier supplies it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::registry::PayloadTypeRegistry;
pub use adapters::wire::EnvelopeProto;
pub use domain::envelope::Envelope;
pub use domain::errors::EnvelopeError;
pub use domain::signing::encode_for_signing;
pub use ports::inbound::{ConsumeError, EnvelopeApi};
pub use ports::outbound::{AsAny, Record, RecordError, RecordFactory, TypedRecord};
pub use service::{ConsumePolicy, EnvelopeService};
pub use shared_crypto::{KeyType, PrivateKey, PublicKey};

/// Register `R` for `payload_type` in the process-wide registry.
pub fn register_payload_type<R>(payload_type: impl Into<Vec<u8>>)
where
    R: Record + Default,
{
    PayloadTypeRegistry::global().register_payload_type::<R>(payload_type);
}

/// Consume an envelope, dispatching through the process-wide registry.
pub fn consume_envelope(
    serialized: &[u8],
    domain: &str,
) -> Result<(Envelope, Box<dyn Record>), ConsumeError> {
    EnvelopeService::with_global_registry().consume_envelope(serialized, domain)
}

/// Consume an envelope into a caller-supplied record.
pub fn consume_typed_envelope(
    serialized: &[u8],
    domain: &str,
    record: &mut dyn Record,
) -> Result<Envelope, ConsumeError> {
    EnvelopeService::with_global_registry().consume_typed_envelope(serialized, domain, record)
}
