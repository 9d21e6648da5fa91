//! Opaque record used when the payload format is unknown to the tool.

use signed_envelope::{Record, RecordError};

/// Holds the payload bytes unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Payload bytes
    pub bytes: Vec<u8>,
}

impl RawRecord {
    /// Wrap `bytes`.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl Record for RawRecord {
    fn marshal_record(&self) -> Result<Vec<u8>, RecordError> {
        Ok(self.bytes.clone())
    }

    fn unmarshal_record(&mut self, bytes: &[u8]) -> Result<(), RecordError> {
        self.bytes = bytes.to_vec();
        Ok(())
    }
}
