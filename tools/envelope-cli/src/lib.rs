//! # Envelope CLI
//!
//! Library side of the `envelope` binary: key generation, sealing,
//! opening and inspecting signed envelopes stored as files.

pub mod commands;
pub mod record;
pub mod report;

pub use record::RawRecord;
pub use report::EnvelopeReport;
