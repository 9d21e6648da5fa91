//! # Integration Test Flows
//!
//! Exercises shared-crypto keys, the envelope core and the payload-type
//! registry together:
//!
//! 1. **Seal -> marshal -> consume**: typed records round-trip for both key schemes
//! 2. **Registry dispatch**: unregistered, then registered, payload types
//! 3. **Tampering**: no altered envelope ever yields different verified content
//! 4. **Concurrency**: one registry shared by many consumers

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use proptest::prelude::*;
    use shared_crypto::{KeyType, PrivateKey};
    use signed_envelope::{
        ConsumePolicy, Envelope, EnvelopeApi, EnvelopeError, EnvelopeService,
        PayloadTypeRegistry, TypedRecord,
    };

    use crate::integration::fixtures::{PeerRecord, TextRecord};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const DOMAIN: &str = "libp2p-testing";
    const PAYLOAD_TYPE: &[u8] = b"/libp2p/testdata";

    fn peer_record(key: &PrivateKey, seq: u64) -> PeerRecord {
        PeerRecord {
            peer_id: key.public_key().encode_protobuf(),
            seq,
            addresses: vec!["/ip4/127.0.0.1/tcp/4001".into()],
        }
    }

    fn isolated_service() -> EnvelopeService {
        EnvelopeService::new(Arc::new(PayloadTypeRegistry::new()))
    }

    // =============================================================================
    // SEAL -> CONSUME
    // =============================================================================

    #[test]
    fn test_typed_record_flow_both_schemes() {
        let service = isolated_service();
        service.registry().register_typed::<PeerRecord>();

        for key_type in [KeyType::Ed25519, KeyType::Secp256k1] {
            let key = PrivateKey::generate(key_type);
            let record = peer_record(&key, 7);
            let bytes = Envelope::seal(&key, &record).unwrap().marshal();

            let (envelope, decoded) = service
                .consume_envelope(&bytes, PeerRecord::DOMAIN)
                .unwrap();

            assert_eq!(envelope.public_key(), &key.public_key());
            assert_eq!(decoded.downcast_ref::<PeerRecord>(), Some(&record));
        }
    }

    #[test]
    fn test_hello_world_scenario() {
        let key = PrivateKey::generate(KeyType::Ed25519);
        let envelope = Envelope::make(&key, DOMAIN, PAYLOAD_TYPE, b"hello world!").unwrap();
        let bytes = envelope.marshal();

        let service = isolated_service();
        service
            .registry()
            .register_payload_type::<TextRecord>(PAYLOAD_TYPE);

        let (opened, record) = service.consume_envelope(&bytes, DOMAIN).unwrap();
        assert!(opened.equal(&envelope));
        assert_eq!(
            record.downcast_ref::<TextRecord>().map(|r| r.text.as_str()),
            Some("hello world!")
        );

        let err = service
            .consume_envelope(&bytes, "wrong-domain")
            .unwrap_err();
        assert_eq!(err.error(), &EnvelopeError::SignatureInvalid);
        assert!(err.envelope().is_none());
    }

    #[test]
    fn test_public_key_recovered_from_envelope_matches_signer() {
        let key = PrivateKey::generate(KeyType::Secp256k1);
        let bytes = Envelope::make(&key, DOMAIN, PAYLOAD_TYPE, b"id")
            .unwrap()
            .marshal();

        let mut record = TextRecord::default();
        let envelope = isolated_service()
            .consume_typed_envelope(&bytes, DOMAIN, &mut record)
            .unwrap();

        assert_eq!(
            envelope.public_key().fingerprint(),
            key.public_key().fingerprint()
        );
    }

    #[test]
    fn test_equality_distinguishes_signers() {
        let a = PrivateKey::generate(KeyType::Ed25519);
        let b = PrivateKey::generate(KeyType::Ed25519);

        let ea = Envelope::make(&a, DOMAIN, PAYLOAD_TYPE, b"same").unwrap();
        let eb = Envelope::make(&b, DOMAIN, PAYLOAD_TYPE, b"same").unwrap();

        assert!(!ea.equal(&eb));
        assert!(ea.equal(&Envelope::parse(&ea.marshal()).unwrap()));
    }

    // =============================================================================
    // REGISTRY DISPATCH
    // =============================================================================

    #[test]
    fn test_registration_after_first_consume() {
        let key = PrivateKey::generate(KeyType::Ed25519);
        let bytes = Envelope::make(&key, DOMAIN, b"/late/registration", b"later")
            .unwrap()
            .marshal();
        let service = isolated_service();

        let err = service.consume_envelope(&bytes, DOMAIN).unwrap_err();
        assert_eq!(
            err.error(),
            &EnvelopeError::UnregisteredPayloadType(b"/late/registration".to_vec())
        );
        // The verified envelope still carries the payload.
        assert_eq!(err.envelope().map(|e| e.raw_payload()), Some(&b"later"[..]));

        service
            .registry()
            .register_payload_type::<TextRecord>("/late/registration");
        assert!(service.consume_envelope(&bytes, DOMAIN).is_ok());
    }

    #[test]
    fn test_global_registry_convenience_functions() {
        const GLOBAL_TYPE: &[u8] = b"/envelope-tests/global/text";

        let key = PrivateKey::generate(KeyType::Ed25519);
        let bytes = Envelope::make(&key, DOMAIN, GLOBAL_TYPE, b"global")
            .unwrap()
            .marshal();

        signed_envelope::register_payload_type::<TextRecord>(GLOBAL_TYPE);

        let (_, record) = signed_envelope::consume_envelope(&bytes, DOMAIN).unwrap();
        assert!(record.is::<TextRecord>());
        assert!(PayloadTypeRegistry::global().contains(GLOBAL_TYPE));
    }

    #[test]
    fn test_decode_failure_under_strict_policy() {
        let key = PrivateKey::generate(KeyType::Ed25519);
        let bytes = Envelope::make(&key, DOMAIN, PAYLOAD_TYPE, &[0xFF, 0xFF])
            .unwrap()
            .marshal();

        let service = isolated_service().with_policy(ConsumePolicy::strict());
        service
            .registry()
            .register_payload_type::<TextRecord>(PAYLOAD_TYPE);

        let (error, envelope) = service
            .consume_envelope(&bytes, DOMAIN)
            .unwrap_err()
            .into_parts();
        assert!(matches!(error, EnvelopeError::RecordDecode(_)));
        assert!(envelope.is_none());
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[test]
    fn test_shared_registry_across_threads() {
        let service = Arc::new(isolated_service());
        service.registry().register_typed::<PeerRecord>();

        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    let key_type = if i % 2 == 0 {
                        KeyType::Ed25519
                    } else {
                        KeyType::Secp256k1
                    };
                    let key = PrivateKey::generate(key_type);
                    let record = peer_record(&key, i);
                    let bytes = Envelope::seal(&key, &record).unwrap().marshal();

                    // Concurrent registration of an unrelated type.
                    service
                        .registry()
                        .register_payload_type::<TextRecord>(format!("/thread/{i}"));

                    let (_, decoded) = service
                        .consume_envelope(&bytes, PeerRecord::DOMAIN)
                        .unwrap();
                    decoded.downcast::<PeerRecord>().unwrap().seq
                })
            })
            .collect();

        let mut seqs: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        seqs.sort_unstable();
        assert_eq!(seqs, (0..8).collect::<Vec<_>>());
        assert_eq!(service.registry().len(), 9);
    }

    // =============================================================================
    // TAMPERING
    // =============================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Flipping any byte of the wire form either breaks the envelope or
        /// leaves its verified content unchanged.
        #[test]
        fn prop_wire_tamper_never_forges(
            payload in proptest::collection::vec(any::<u8>(), 0..64),
            index in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let key = PrivateKey::generate(KeyType::Ed25519);
            let original = Envelope::make(&key, DOMAIN, PAYLOAD_TYPE, &payload).unwrap();
            let mut bytes = original.marshal();
            let i = index.index(bytes.len());
            bytes[i] ^= flip;

            let opened = Envelope::parse(&bytes).and_then(|e| e.verify(DOMAIN).map(|_| e));
            if let Ok(opened) = opened {
                prop_assert_eq!(opened.payload_type(), original.payload_type());
                prop_assert_eq!(opened.raw_payload(), original.raw_payload());
                prop_assert_eq!(opened.public_key(), original.public_key());
            }
        }
    }
}
