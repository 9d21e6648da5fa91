//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: consumption API that callers use
//! - **Outbound (Driven)**: record capability this crate decodes into

pub mod inbound;
pub mod outbound;
