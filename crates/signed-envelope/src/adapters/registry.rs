//! # Payload Type Registry
//!
//! Maps payload-type identifiers to factories that produce empty records for
//! decoding.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let registry = Arc::new(PayloadTypeRegistry::new());
//! registry.register_payload_type::<PeerRecord>(b"/libp2p/routing-state-record");
//!
//! let service = EnvelopeService::new(registry);
//! let (envelope, record) = service.consume_envelope(&bytes, "libp2p-routing-state")?;
//! ```
//!
//! Registration is additive and last-writer-wins. Reads and writes go through
//! a `parking_lot::RwLock`, so lookups on hot paths only contend with the
//! (rare) registrations.

use crate::ports::outbound::{Record, RecordFactory, TypedRecord};
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

lazy_static! {
    static ref GLOBAL_REGISTRY: Arc<PayloadTypeRegistry> = Arc::new(PayloadTypeRegistry::new());
}

/// Payload type -> record factory map.
#[derive(Default)]
pub struct PayloadTypeRegistry {
    factories: RwLock<HashMap<Vec<u8>, RecordFactory>>,
}

impl PayloadTypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default registry.
    pub fn global() -> Arc<PayloadTypeRegistry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// Register `factory` for `payload_type`, replacing any previous entry.
    pub fn register_factory(&self, payload_type: impl Into<Vec<u8>>, factory: RecordFactory) {
        let payload_type = payload_type.into();
        let shown = String::from_utf8_lossy(&payload_type).into_owned();

        let previous = self.factories.write().insert(payload_type, factory);

        if previous.is_some() {
            warn!(payload_type = %shown, "[Registry] Payload type already registered, replacing");
        } else {
            info!(payload_type = %shown, "[Registry] Registered payload type");
        }
    }

    /// Register `R::default` as the factory for `payload_type`.
    pub fn register_payload_type<R>(&self, payload_type: impl Into<Vec<u8>>)
    where
        R: Record + Default,
    {
        self.register_factory(payload_type, Arc::new(|| Box::new(R::default()) as Box<dyn Record>));
    }

    /// Register `R` under its own [`TypedRecord::PAYLOAD_TYPE`].
    pub fn register_typed<R: TypedRecord>(&self) {
        self.register_payload_type::<R>(R::PAYLOAD_TYPE);
    }

    /// Factory registered for `payload_type`, if any.
    pub fn lookup(&self, payload_type: &[u8]) -> Option<RecordFactory> {
        self.factories.read().get(payload_type).cloned()
    }

    /// Check if a payload type is registered.
    pub fn contains(&self, payload_type: &[u8]) -> bool {
        self.factories.read().contains_key(payload_type)
    }

    /// Number of registered payload types.
    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }

    /// Sorted snapshot of the registered payload types.
    pub fn payload_types(&self) -> Vec<Vec<u8>> {
        let mut types: Vec<Vec<u8>> = self.factories.read().keys().cloned().collect();
        types.sort();
        types
    }
}

impl std::fmt::Debug for PayloadTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let types: Vec<String> = self
            .payload_types()
            .iter()
            .map(|t| String::from_utf8_lossy(t).into_owned())
            .collect();
        f.debug_struct("PayloadTypeRegistry")
            .field("payload_types", &types)
            .finish()
    }
}
