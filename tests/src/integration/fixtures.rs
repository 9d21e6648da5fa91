//! Records used across the integration flows and benchmarks.

use prost::Message;
use signed_envelope::{Record, RecordError, TypedRecord};

/// Protobuf-encoded routing record, the kind of payload envelopes carry
/// between peers.
#[derive(Clone, PartialEq, Message)]
pub struct PeerRecord {
    /// Protobuf-encoded public key of the peer
    #[prost(bytes = "vec", tag = "1")]
    pub peer_id: Vec<u8>,
    /// Monotonic sequence number
    #[prost(uint64, tag = "2")]
    pub seq: u64,
    /// Listen addresses
    #[prost(string, repeated, tag = "3")]
    pub addresses: Vec<String>,
}

impl Record for PeerRecord {
    fn marshal_record(&self) -> Result<Vec<u8>, RecordError> {
        Ok(self.encode_to_vec())
    }

    fn unmarshal_record(&mut self, bytes: &[u8]) -> Result<(), RecordError> {
        *self = PeerRecord::decode(bytes).map_err(|e| RecordError::Decode(e.to_string()))?;
        Ok(())
    }
}

impl TypedRecord for PeerRecord {
    const DOMAIN: &'static str = "libp2p-routing-state";
    const PAYLOAD_TYPE: &'static [u8] = b"/libp2p/routing-state-record";
}

/// UTF-8 text record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextRecord {
    /// Text content
    pub text: String,
}

impl Record for TextRecord {
    fn marshal_record(&self) -> Result<Vec<u8>, RecordError> {
        Ok(self.text.as_bytes().to_vec())
    }

    fn unmarshal_record(&mut self, bytes: &[u8]) -> Result<(), RecordError> {
        self.text =
            String::from_utf8(bytes.to_vec()).map_err(|e| RecordError::Decode(e.to_string()))?;
        Ok(())
    }
}
