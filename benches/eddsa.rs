use cryptal_ecc::curves::CurveId;
use cryptal_ecc::signatures::eddsa::{EdDsaHash, PrivateKey, Sha512Hash, Shake256Hash};

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_curve(c: &mut Criterion, id: CurveId, hash: &dyn EdDsaHash) {
    let curve = id.curve();
    let seed = vec![0x42u8; curve.baselen()];
    let key = PrivateKey::from_seed(curve, &seed, hash).unwrap();
    let message = [0u8; 64];
    let signature = key.sign(&message, hash).unwrap();

    c.bench_function(&format!("eddsa sign {}", curve.name()), |b| {
        b.iter(|| key.sign(black_box(&message), hash))
    });

    c.bench_function(&format!("eddsa verify {}", curve.name()), |b| {
        b.iter(|| key.public_key().verify(black_box(&message), black_box(&signature), hash))
    });
}

pub fn bench_eddsa(c: &mut Criterion) {
    bench_curve(c, CurveId::Ed25519, &Sha512Hash::new());
    bench_curve(c, CurveId::Ed448, &Shake256Hash);
}

criterion_group!(benches, bench_eddsa);
criterion_main!(benches);
