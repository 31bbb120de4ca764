//! # Tollgate Ticket Benchmarks
//!
//! | Path | Operation |
//! |------|-----------|
//! | tg-01 Key Container | Armored OpenSSH private key to raw bytes |
//! | tg-02 Ticket Codec | Sign, verify, verify by issuer among many keys |
//! | tg-03 Pricing | Price and scale a grant |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_crypto::Ed25519KeyPair;
use shared_types::Payload;
use std::time::Duration;
use tg_01_key_container::{decode_private_key_armor, parse_private_container};
use tg_02_ticket_codec::{extract_token, sign, verify, KeyStore};
use tg_03_pricing::{price, scale, TokenTier};

const NOW: u32 = 1_700_000_000;

fn sample_payload() -> Payload {
    Payload {
        expiration_time: NOW + 60 * 60 * 24 * 30,
        issuer: "bnch".to_string(),
        id: "benchmark-ticket-0000001".to_string(),
        target_url: "broker.example".to_string(),
        ..Payload::default()
    }
    .with_limits(TokenTier::Medium.quote().expect("tier quote").limits)
}

// ============================================================================
// TG-01: Key Container
// ============================================================================

fn bench_key_container(c: &mut Criterion) {
    let text = std::fs::read_to_string(tg_tests::key_fixture("sample_ed25519"))
        .expect("fixture readable");

    let mut group = c.benchmark_group("tg-01-key-container");
    group.bench_function("armor_and_parse", |b| {
        b.iter(|| {
            let container = decode_private_key_armor(black_box(&text)).expect("armor");
            parse_private_container(&container).expect("container")
        })
    });
    group.finish();
}

// ============================================================================
// TG-02: Ticket Codec
// ============================================================================

fn bench_ticket_codec(c: &mut Criterion) {
    let keypair = Ed25519KeyPair::generate();
    let public_key = keypair.public_key();
    let payload = sample_payload();
    let token = sign(&payload, &keypair).expect("sign");

    let mut group = c.benchmark_group("tg-02-ticket-codec");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("sign", |b| {
        b.iter(|| sign(black_box(&payload), &keypair).expect("sign"))
    });
    group.bench_function("verify", |b| {
        b.iter(|| verify(black_box(&token), &public_key))
    });

    let pasted = format!("ticket follows: {} (keep it safe)", token);
    group.bench_function("extract", |b| {
        b.iter(|| extract_token(black_box(&pasted)).expect("extract"))
    });

    for issuers in [1usize, 100, 1_000] {
        let mut store = KeyStore::new();
        for _ in 1..issuers {
            store.trust(Ed25519KeyPair::generate().public_key());
        }
        let issuer = store.add_signing_key(keypair.clone());
        let issued = sign(
            &Payload {
                issuer,
                ..payload.clone()
            },
            &keypair,
        )
        .expect("sign");

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("store_verify", issuers),
            &issued,
            |b, token| b.iter(|| store.verify(black_box(token)).expect("verify")),
        );
    }
    group.finish();
}

// ============================================================================
// TG-03: Pricing
// ============================================================================

fn bench_pricing(c: &mut Criterion) {
    let payload = sample_payload();

    let mut group = c.benchmark_group("tg-03-pricing");
    group.bench_function("price", |b| b.iter(|| price(black_box(&payload), NOW)));
    group.bench_function("scale", |b| {
        b.iter(|| scale(black_box(&payload), 2.0).expect("scale"))
    });
    group.finish();
}

criterion_group!(benches, bench_key_container, bench_ticket_codec, bench_pricing);
criterion_main!(benches);
