//! # Domain Layer
//!
//! Pure envelope logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod envelope;
pub mod errors;
pub mod signing;
