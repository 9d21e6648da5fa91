//! # Outbound Ports (Driven Ports / SPI)
//!
//! The record capability this crate consumes. Record schemas live with their
//! owners; an envelope only ever sees them through [`Record`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error raised by a [`Record`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The record could not be turned into bytes.
    #[error("Record encoding failed: {0}")]
    Encode(String),

    /// The bytes are not a valid encoding of the record.
    #[error("Record decoding failed: {0}")]
    Decode(String),
}

/// Object-safe access to [`Any`] for record downcasting.
///
/// Blanket-implemented for every `'static` type; implementors of [`Record`]
/// never write this by hand.
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Convert a boxed value into `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A payload schema that can live inside an envelope.
///
/// # Example
///
/// ```
/// use signed_envelope::{Record, RecordError};
///
/// #[derive(Default)]
/// struct Note(String);
///
/// impl Record for Note {
///     fn marshal_record(&self) -> Result<Vec<u8>, RecordError> {
///         Ok(self.0.as_bytes().to_vec())
///     }
///
///     fn unmarshal_record(&mut self, bytes: &[u8]) -> Result<(), RecordError> {
///         self.0 = String::from_utf8(bytes.to_vec())
///             .map_err(|e| RecordError::Decode(e.to_string()))?;
///         Ok(())
///     }
/// }
/// ```
pub trait Record: AsAny + Send + Sync {
    /// Encode the record into the bytes carried as the envelope payload.
    fn marshal_record(&self) -> Result<Vec<u8>, RecordError>;

    /// Overwrite this record with the decoding of `bytes`.
    fn unmarshal_record(&mut self, bytes: &[u8]) -> Result<(), RecordError>;
}

impl dyn Record {
    /// Downcast to the concrete record type.
    pub fn downcast_ref<R: Record>(&self) -> Option<&R> {
        self.as_any().downcast_ref::<R>()
    }

    /// Mutable downcast to the concrete record type.
    pub fn downcast_mut<R: Record>(&mut self) -> Option<&mut R> {
        self.as_any_mut().downcast_mut::<R>()
    }

    /// True if the record is an `R`.
    pub fn is<R: Record>(&self) -> bool {
        self.as_any().is::<R>()
    }

    /// Take ownership of the concrete record, or get the box back unchanged.
    pub fn downcast<R: Record>(self: Box<Self>) -> Result<Box<R>, Box<dyn Record>> {
        if self.is::<R>() {
            // Checked above, so the conversion cannot fail.
            Ok(self
                .into_any()
                .downcast::<R>()
                .unwrap_or_else(|_| unreachable!("type id checked")))
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for dyn Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record").finish_non_exhaustive()
    }
}

/// Produces an empty record ready for [`Record::unmarshal_record`].
pub type RecordFactory = Arc<dyn Fn() -> Box<dyn Record> + Send + Sync>;

/// A record type that knows its own envelope domain and payload type.
pub trait TypedRecord: Record + Default {
    /// Signing domain for envelopes carrying this record.
    const DOMAIN: &'static str;

    /// Payload type identifier for this record.
    const PAYLOAD_TYPE: &'static [u8];
}
