//! # Adapters Layer
//!
//! - `wire`: protobuf (de)serialization of envelopes
//! - `registry`: payload type -> record factory lookup

pub mod registry;
pub mod wire;
