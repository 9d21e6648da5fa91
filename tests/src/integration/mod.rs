//! Cross-crate integration flows.
//!
//! `fixtures` holds record types shared by the flows and the benchmarks.

pub mod fixtures;
mod flows;
