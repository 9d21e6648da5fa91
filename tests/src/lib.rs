//! # Signed Envelope Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion benchmarks (sign, verify, codec, consume)
//! └── src/
//!     └── integration/  # Cross-crate flows: keys + envelope + registry
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p envelope-tests
//!
//! # Benchmarks
//! cargo bench -p envelope-tests
//! ```

pub mod integration;
