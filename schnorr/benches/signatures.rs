use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use schnorr::{GrumpkinSha256, SchnorrVerifier, SigningKey, VerifyingKey, decode_signature};

const MESSAGE: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

fn bench_sign(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);

    c.bench_function("schnorr_sign", |bencher| {
        bencher.iter(|| {
            let sig = sk.sign(&mut rng, black_box(&MESSAGE)).expect("sign");
            black_box(sig);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);
    let sig = sk.sign(&mut rng, &MESSAGE).expect("sign");

    c.bench_function("schnorr_verify", |bencher| {
        bencher.iter(|| {
            let ok = vk.verify(black_box(&MESSAGE), black_box(&sig));
            black_box(ok);
        })
    });
}

fn bench_verify_bytes(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let pk = sk.verifying_key().to_bytes();
    let sig = sk.sign(&mut rng, &MESSAGE).expect("sign").to_bytes();
    let verifier = SchnorrVerifier::<GrumpkinSha256>::new();

    c.bench_function("schnorr_verify_bytes", |bencher| {
        bencher.iter(|| {
            let ok = verifier.verify(black_box(&MESSAGE), black_box(&pk), black_box(&sig));
            black_box(ok);
        })
    });

    c.bench_function("schnorr_decode_signature", |bencher| {
        bencher.iter(|| black_box(decode_signature(black_box(&sig))))
    });
}

criterion_group!(benches, bench_sign, bench_verify, bench_verify_bytes);
criterion_main!(benches);
