//! # Signed Envelope Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | `signing-encoding` | length-prefixed encoding of domain, type and payload |
//! | `envelope-make` | encode + sign, per key scheme |
//! | `envelope-verify` | encode + verify, per key scheme |
//! | `envelope-codec` | protobuf marshal / parse |
//! | `envelope-consume` | parse + verify + registry dispatch + record decode |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use envelope_tests::integration::fixtures::PeerRecord;
use rand::RngCore;
use shared_crypto::{KeyType, PrivateKey};
use signed_envelope::{
    encode_for_signing, Envelope, EnvelopeApi, EnvelopeService, PayloadTypeRegistry, TypedRecord,
};
use std::sync::Arc;

const DOMAIN: &str = "bench-domain";
const PAYLOAD_TYPE: &[u8] = b"/bench/payload";
const PAYLOAD_SIZES: [usize; 4] = [64, 1024, 16 * 1024, 256 * 1024];
const SCHEMES: [KeyType; 2] = [KeyType::Ed25519, KeyType::Secp256k1];

fn random_payload(len: usize) -> Vec<u8> {
    let mut payload = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut payload);
    payload
}

fn bench_signing_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("signing-encoding");

    for size in PAYLOAD_SIZES {
        let payload = random_payload(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| black_box(encode_for_signing(DOMAIN, PAYLOAD_TYPE, payload)))
        });
    }

    group.finish();
}

fn bench_make(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope-make");
    let payload = random_payload(1024);

    for key_type in SCHEMES {
        let key = PrivateKey::generate(key_type);
        group.bench_function(key_type.as_str(), |b| {
            b.iter(|| black_box(Envelope::make(&key, DOMAIN, PAYLOAD_TYPE, &payload)))
        });
    }

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope-verify");
    let payload = random_payload(1024);

    for key_type in SCHEMES {
        let key = PrivateKey::generate(key_type);
        let Ok(envelope) = Envelope::make(&key, DOMAIN, PAYLOAD_TYPE, &payload) else {
            continue;
        };
        group.bench_function(key_type.as_str(), |b| {
            b.iter(|| black_box(envelope.verify(DOMAIN).is_ok()))
        });
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope-codec");
    let key = PrivateKey::generate(KeyType::Ed25519);

    for size in PAYLOAD_SIZES {
        let Ok(envelope) = Envelope::make(&key, DOMAIN, PAYLOAD_TYPE, &random_payload(size))
        else {
            continue;
        };
        let bytes = envelope.marshal();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("marshal", size), &envelope, |b, e| {
            b.iter(|| black_box(e.marshal()))
        });
        group.bench_with_input(BenchmarkId::new("parse", size), &bytes, |b, bytes| {
            b.iter(|| black_box(Envelope::parse(bytes).is_ok()))
        });
    }

    group.finish();
}

fn bench_consume(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope-consume");

    let registry = Arc::new(PayloadTypeRegistry::new());
    registry.register_typed::<PeerRecord>();
    let service = EnvelopeService::new(registry);

    for key_type in SCHEMES {
        let key = PrivateKey::generate(key_type);
        let record = PeerRecord {
            peer_id: key.public_key().encode_protobuf(),
            seq: 1,
            addresses: vec!["/ip4/10.0.0.1/tcp/4001".into(); 4],
        };
        let Ok(envelope) = Envelope::seal(&key, &record) else {
            continue;
        };
        let bytes = envelope.marshal();

        group.bench_function(key_type.as_str(), |b| {
            b.iter(|| black_box(service.consume_envelope(&bytes, PeerRecord::DOMAIN).is_ok()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_signing_encoding,
    bench_make,
    bench_verify,
    bench_codec,
    bench_consume
);
criterion_main!(benches);
