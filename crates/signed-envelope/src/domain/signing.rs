//! # Domain-Separated Signing Codec
//!
//! Builds the exact byte string that is signed and verified for an envelope.
//!
//! ## Layout
//!
//! ```text
//! varint(len(domain))       || domain
//! varint(len(payload_type)) || payload_type
//! varint(len(payload))      || payload
//! ```
//!
//! Lengths are unsigned LEB128 varints, the same integer encoding protobuf
//! uses. Length-prefixing every field makes the encoding injective: bytes
//! cannot migrate across a field boundary without changing a prefix.

use prost::encoding::{encode_varint, encoded_len_varint};

/// Encode `(domain, payload_type, payload)` for signing.
///
/// Pure and deterministic; called identically by the signer and the verifier.
pub fn encode_for_signing(domain: &str, payload_type: &[u8], payload: &[u8]) -> Vec<u8> {
    let fields: [&[u8]; 3] = [domain.as_bytes(), payload_type, payload];

    let capacity = fields
        .iter()
        .map(|field| encoded_len_varint(field.len() as u64) + field.len())
        .sum();
    let mut buf = Vec::with_capacity(capacity);

    for field in fields {
        encode_varint(field.len() as u64, &mut buf);
        buf.extend_from_slice(field);
    }

    buf
}
