use std::sync::Arc;

use cryptal_ecc::curves::{Curve, CurveId};
use cryptal_ecc::ec::{
    CurveForm, CurveModel, DecodeOptions, MalformedPointError, OrderCheck, Point, PointEncoding,
    decode_point,
};
use cryptal_ecc::primitives::conv::{to_bytes_be_padded, to_bytes_le_padded};
use cryptal_ecc::primitives::square_root_mod_prime;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn random_scalar(rng: &mut StdRng, n: &BigUint) -> BigUint {
    let mut buf = vec![0u8; n.bits() as usize / 8 + 8];
    rng.fill_bytes(&mut buf);
    let k = BigUint::from_bytes_be(&buf) % n;
    if k.is_zero() { BigUint::one() } else { k }
}

fn check_roundtrip(curve: &Curve, point: &Point) {
    let encodings: &[PointEncoding] = if curve.is_edwards() {
        &[PointEncoding::Compressed]
    } else {
        PointEncoding::ALL
    };

    for &encoding in encodings {
        let bytes = point.to_bytes(encoding);
        let decoded = curve.decode_point(&bytes, &DecodeOptions::default()).unwrap_or_else(|err| {
            panic!("{} {encoding:?}: {err}", curve.name());
        });
        assert_eq!(&decoded, point, "{} {encoding:?}", curve.name());
    }
}

#[test]
fn encode_decode_roundtrip_all_curves() {
    let mut rng = StdRng::seed_from_u64(1);

    for id in CurveId::ALL {
        let curve = id.curve();
        check_roundtrip(curve, curve.generator());

        let k = random_scalar(&mut rng, curve.order());
        check_roundtrip(curve, &curve.generator().mul(&k));
    }
}

#[test]
fn encoded_lengths() {
    let p256 = CurveId::Nist256p.curve();
    let g = p256.generator();

    assert_eq!(g.to_bytes(PointEncoding::Raw).len(), 64);
    assert_eq!(g.to_bytes(PointEncoding::Uncompressed).len(), 65);
    assert_eq!(g.to_bytes(PointEncoding::Compressed).len(), 33);
    assert_eq!(g.to_bytes(PointEncoding::Hybrid).len(), 65);
    assert_eq!(p256.verifying_key_length(), 64);

    assert_eq!(CurveId::Ed25519.curve().generator().to_bytes(PointEncoding::Raw).len(), 32);
    assert_eq!(CurveId::Ed448.curve().generator().to_bytes(PointEncoding::Raw).len(), 57);
}

#[test]
fn generator_compressed_known_value() {
    let g = CurveId::Nist256p.curve().generator();
    assert_eq!(
        hex::encode(g.to_bytes(PointEncoding::Compressed)),
        "036b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
    );

    let ed = CurveId::Ed25519.curve().generator();
    assert_eq!(
        hex::encode(ed.to_bytes(PointEncoding::Compressed)),
        "5866666666666666666666666666666666666666666666666666666666666666"
    );
}

#[test]
fn group_law_consistency() {
    let mut rng = StdRng::seed_from_u64(2);

    for id in [
        CurveId::Nist256p,
        CurveId::Secp256k1,
        CurveId::Secp112r2,
        CurveId::Ed25519,
        CurveId::Ed448,
    ] {
        let curve = id.curve();
        let g = curve.generator();
        let n = curve.order();

        let k1 = random_scalar(&mut rng, n);
        let k2 = random_scalar(&mut rng, n);

        let sum = g.mul(&(&k1 + &k2));
        assert_eq!(sum, g.mul(&k1).add(&g.mul(&k2)), "{}", curve.name());
        assert_eq!(sum, &(g * &k1) + &(g * &k2), "{}", curve.name());

        assert_eq!(g.mul(&k1), g.mul_add(&k1, g, &BigUint::zero()), "{}", curve.name());

        let q = g.mul(&k2);
        assert_eq!(
            g.mul_add(&k1, &q, &k2),
            g.mul(&k1).add(&q.mul(&k2)),
            "{}",
            curve.name()
        );

        assert_eq!(g.double(), g.add(g), "{}", curve.name());
        assert!(g.add(&g.neg()).is_infinity(), "{}", curve.name());
        assert!(g.add(&-g).is_infinity(), "{}", curve.name());
    }
}

#[test]
fn scalar_reduced_by_order() {
    let curve = CurveId::Nist256p.curve();
    let g = curve.generator();
    let n = curve.order();

    assert!(g.mul(n).is_infinity());
    assert!(g.mul(&BigUint::zero()).is_infinity());
    assert_eq!(g.mul(&(n + 5u8)), g.mul(&BigUint::from(5u8)));
    assert!(g.has_order(n));
}

#[test]
fn secret_multiplication_matches_public() {
    let mut rng = StdRng::seed_from_u64(3);

    for id in [CurveId::Nist256p, CurveId::Secp112r1, CurveId::Ed25519] {
        let curve = id.curve();
        let g = curve.generator();
        let k = random_scalar(&mut rng, curve.order());
        let m = BigUint::from(rng.next_u64());
        let expected = g.mul(&k);

        assert_eq!(g.mul_secret(&k, None), expected, "{}", curve.name());
        assert_eq!(g.mul_secret(&k, Some(&m)), expected, "{}", curve.name());

        let table = curve.generator_table();
        assert_eq!(table.mul(&k), expected, "{}", curve.name());
        assert_eq!(table.mul_secret(&k, None), expected, "{}", curve.name());
        assert_eq!(table.mul_secret(&k, Some(&m)), expected, "{}", curve.name());

        let q = g.mul(&BigUint::from(7u8));
        let q_table = q.precompute();
        assert_eq!(q_table.mul_secret(&k, Some(&m)), q.mul(&k), "{}", curve.name());
    }
}

#[test]
fn infinity_encoding() {
    let curve = CurveId::Nist256p.curve();
    let inf = Point::infinity(Arc::clone(curve.model()));

    assert_eq!(inf.to_bytes(PointEncoding::Uncompressed), vec![0x00]);
    assert_eq!(
        curve.decode_point(&[0x00], &DecodeOptions::default()),
        Err(MalformedPointError::Infinity)
    );
}

#[test]
fn off_curve_coordinates_are_rejected() {
    let curve = CurveId::Nist256p.curve();
    let (x, y) = curve.generator().to_affine().unwrap();

    let result = Point::from_affine(Arc::clone(curve.model()), x, y + 1u8, None);
    assert_eq!(result.unwrap_err(), MalformedPointError::NotOnCurve);
}

#[test]
fn invalid_curve_point_is_rejected() {
    // a point on y² = x³ + a·x + (b + 1) over the P-256 field
    let curve = CurveId::Nist256p.curve();
    let p = curve.model().p().clone();
    let CurveForm::ShortWeierstrass { a, b } = curve.model().form() else {
        unreachable!()
    };
    let other = CurveModel::short_weierstrass(p.clone(), a.clone(), b + 1u8, None);

    let mut x = BigUint::one();
    let y = loop {
        let rhs = (&x * &x * &x + a * &x + b + 1u8) % &p;
        if let Ok(y) = square_root_mod_prime(&rhs, &p) {
            break y;
        }
        x += 1u8;
    };
    assert!(other.contains_point(&x, &y));
    assert!(!curve.model().contains_point(&x, &y));

    let mut encoded = vec![0x04];
    encoded.extend_from_slice(&to_bytes_be_padded(&x, 32));
    encoded.extend_from_slice(&to_bytes_be_padded(&y, 32));

    assert_eq!(
        curve.decode_point(&encoded, &DecodeOptions::default()),
        Err(MalformedPointError::NotOnCurve)
    );

    let skip = DecodeOptions {
        order_check: OrderCheck::SkipUnsafe,
        ..DecodeOptions::default()
    };
    assert_eq!(
        curve.decode_point(&encoded, &skip),
        Err(MalformedPointError::NotOnCurve)
    );
}

#[test]
fn compressed_zero_y_has_one_encoding() {
    // y² = x³ + x over F₂₃ contains (0, 0)
    let model = Arc::new(CurveModel::short_weierstrass(
        BigUint::from(23u8),
        BigUint::one(),
        BigUint::zero(),
        None,
    ));

    let point = decode_point(&model, &[0x02, 0x00], None, &DecodeOptions::default()).unwrap();
    assert_eq!(point.y(), Some(BigUint::zero()));
    assert_eq!(point.to_bytes(PointEncoding::Compressed), vec![0x02, 0x00]);

    assert_eq!(
        decode_point(&model, &[0x03, 0x00], None, &DecodeOptions::default()),
        Err(MalformedPointError::InvalidPrefix(0x03))
    );
}

#[test]
fn order_check_rejects_points_outside_subgroup() {
    // secp112r2 has cofactor 4
    let curve = CurveId::Secp112r2.curve();
    let n = curve.order();
    let skip = DecodeOptions {
        order_check: OrderCheck::SkipUnsafe,
        ..DecodeOptions::default()
    };

    let mut x = 1u32;
    let encoded = loop {
        let mut candidate = vec![0x02];
        candidate.extend_from_slice(&to_bytes_be_padded(&BigUint::from(x), 14));

        if let Ok(point) = curve.decode_point(&candidate, &skip) {
            if !point.has_order(n) {
                break candidate;
            }
        }
        x += 1;
    };

    assert_eq!(
        curve.decode_point(&encoded, &DecodeOptions::default()),
        Err(MalformedPointError::WrongOrder)
    );
}

#[test]
fn order_check_on_edwards_small_order_point() {
    // (0, -1) has order 2
    let curve = CurveId::Ed25519.curve();
    let p = curve.model().p();
    let encoded = to_bytes_le_padded(&(p - 1u8), 32);

    assert_eq!(
        curve.decode_point(&encoded, &DecodeOptions::default()),
        Err(MalformedPointError::WrongOrder)
    );

    let skip = DecodeOptions {
        order_check: OrderCheck::SkipUnsafe,
        ..DecodeOptions::default()
    };
    let point = curve.decode_point(&encoded, &skip).unwrap();
    assert!(point.double().is_infinity());
}

#[test]
fn edwards_decode_errors() {
    let curve = CurveId::Ed25519.curve();

    assert_eq!(
        curve.decode_point(&[0u8; 31], &DecodeOptions::default()),
        Err(MalformedPointError::InvalidLength(31))
    );

    // y = 1 gives x = 0, which cannot carry the sign bit
    let mut encoded = vec![0u8; 32];
    encoded[0] = 1;
    encoded[31] = 0x80;
    assert_eq!(
        curve.decode_point(&encoded, &DecodeOptions::default()),
        Err(MalformedPointError::NotOnCurve)
    );

    // y = p is not reduced
    let p = curve.model().p();
    let encoded = to_bytes_le_padded(p, 32);
    assert_eq!(
        curve.decode_point(&encoded, &DecodeOptions::default()),
        Err(MalformedPointError::CoordinateOutOfRange)
    );
}

#[test]
fn weierstrass_decode_errors() {
    let curve = CurveId::Nist256p.curve();
    let g = curve.generator();

    let mut hybrid = g.to_bytes(PointEncoding::Hybrid);
    hybrid[0] ^= 0x01;
    assert_eq!(
        curve.decode_point(&hybrid, &DecodeOptions::default()),
        Err(MalformedPointError::InconsistentHybrid)
    );

    let mut compressed = g.to_bytes(PointEncoding::Compressed);
    compressed[0] = 0x04;
    assert_eq!(
        curve.decode_point(&compressed, &DecodeOptions::default()),
        Err(MalformedPointError::InvalidPrefix(0x04))
    );

    assert_eq!(
        curve.decode_point(&[0x04; 10], &DecodeOptions::default()),
        Err(MalformedPointError::InvalidLength(10))
    );

    let only_compressed = DecodeOptions {
        encodings: &[PointEncoding::Compressed],
        order_check: OrderCheck::Required,
    };
    assert_eq!(
        curve.decode_point(&g.to_bytes(PointEncoding::Uncompressed), &only_compressed),
        Err(MalformedPointError::EncodingNotAllowed(PointEncoding::Uncompressed))
    );

    let mut out_of_range = vec![0x02];
    out_of_range.extend_from_slice(&to_bytes_be_padded(curve.model().p(), 32));
    assert_eq!(
        curve.decode_point(&out_of_range, &DecodeOptions::default()),
        Err(MalformedPointError::CoordinateOutOfRange)
    );
}

#[test]
fn decode_without_order_keeps_unknown_order() {
    let curve = CurveId::Secp256k1.curve();
    let bytes = curve.generator().to_bytes(PointEncoding::Compressed);

    let point = decode_point(curve.model(), &bytes, None, &DecodeOptions::default()).unwrap();
    assert_eq!(point.order(), None);
    assert_eq!(&point, curve.generator());
}
