//! Subcommand implementations. All I/O is synchronous file access.

use crate::record::RawRecord;
use crate::report::EnvelopeReport;
use anyhow::{Context, Result};
use shared_crypto::{KeyType, PrivateKey, PublicKey};
use signed_envelope::{Envelope, EnvelopeApi, EnvelopeService, PayloadTypeRegistry};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Generate a private key and write its protobuf encoding to `out`.
pub fn keygen(key_type: KeyType, out: &Path) -> Result<PublicKey> {
    let key = PrivateKey::generate(key_type);
    let encoded = key.encode_protobuf();

    fs::write(out, encoded.as_slice())
        .with_context(|| format!("writing private key to {}", out.display()))?;

    let public_key = key.public_key();
    info!(
        key_type = %key_type,
        path = %out.display(),
        "Generated private key"
    );
    Ok(public_key)
}

/// Load a protobuf-encoded private key.
pub fn load_private_key(path: &Path) -> Result<PrivateKey> {
    let bytes = fs::read(path).with_context(|| format!("reading key {}", path.display()))?;
    PrivateKey::decode_protobuf(&bytes)
        .with_context(|| format!("decoding private key {}", path.display()))
}

/// Sign the contents of `input` and write the marshaled envelope to `out`.
pub fn seal(
    key: &Path,
    domain: &str,
    payload_type: &str,
    input: &Path,
    out: &Path,
) -> Result<Envelope> {
    let private_key = load_private_key(key)?;
    let payload = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let envelope = Envelope::make_with_record(
        &private_key,
        domain,
        payload_type.as_bytes(),
        &RawRecord::new(payload),
    )
    .context("signing envelope")?;

    fs::write(out, envelope.marshal())
        .with_context(|| format!("writing envelope to {}", out.display()))?;

    info!(
        domain,
        payload_type,
        payload_len = envelope.raw_payload().len(),
        path = %out.display(),
        "Sealed envelope"
    );
    Ok(envelope)
}

/// Verify the envelope in `input` under `domain`.
///
/// The payload is decoded as an opaque [`RawRecord`] regardless of its
/// payload type, and written to `payload_out` when given.
pub fn open(domain: &str, input: &Path, payload_out: Option<&Path>) -> Result<EnvelopeReport> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let service = EnvelopeService::new(Arc::new(PayloadTypeRegistry::new()));
    let mut record = RawRecord::default();
    let envelope = service
        .consume_typed_envelope(&bytes, domain, &mut record)
        .with_context(|| format!("opening {}", input.display()))?;

    if let Some(path) = payload_out {
        fs::write(path, &record.bytes)
            .with_context(|| format!("writing payload to {}", path.display()))?;
        debug!(path = %path.display(), "Wrote payload");
    }

    Ok(EnvelopeReport::verified(&envelope, domain))
}

/// Parse the envelope in `input` without verifying its signature.
pub fn inspect(input: &Path) -> Result<EnvelopeReport> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let envelope =
        Envelope::parse(&bytes).with_context(|| format!("parsing {}", input.display()))?;
    Ok(EnvelopeReport::unverified(&envelope))
}
