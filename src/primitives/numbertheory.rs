//! Modular arithmetic helpers.
//!
//! This module implements the handful of number-theoretic operations the
//! curve layer depends on:
//!
//! - [`inverse_mod`]: modular inverse via the extended Euclidean algorithm
//! - [`square_root_mod_prime`]: modular square root (Tonelli-Shanks family)
//! - [`jacobi`]: Jacobi symbol, used as a cheap quadratic-residuosity test
//! - [`is_prime`]: Miller-Rabin primality test
//!
//! None of these functions assume a fixed integer width. The modulus of
//! [`inverse_mod`] is not required to be prime.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use thiserror::Error;

/// Errors raised when a number-theoretic precondition does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberTheoryError {
    /// `gcd(a, m) != 1`, so no modular inverse exists.
    #[error("value is not invertible modulo the given modulus")]
    NotInvertible,

    /// The value is a quadratic non-residue modulo the prime.
    #[error("value has no square root modulo the given prime")]
    NoSquareRoot,

    /// The Jacobi symbol is only defined for odd moduli `n >= 3`.
    #[error("Jacobi symbol requires an odd modulus of at least 3")]
    InvalidModulus,
}

/// Computes `x` such that `a·x ≡ 1 (mod m)`.
///
/// Uses the iterative extended Euclidean algorithm on signed integers, so
/// `m` may be any modulus greater than one.
///
/// # Errors
/// Returns [`NumberTheoryError::NotInvertible`] when `gcd(a, m) != 1`,
/// which includes `a ≡ 0 (mod m)` and `m <= 1`.
pub fn inverse_mod(a: &BigUint, m: &BigUint) -> Result<BigUint, NumberTheoryError> {
    if m <= &BigUint::one() {
        return Err(NumberTheoryError::NotInvertible);
    }

    let modulus = BigInt::from(m.clone());
    let mut r0 = BigInt::from(a % m);
    let mut r1 = modulus.clone();
    let mut s0 = BigInt::one();
    let mut s1 = BigInt::zero();

    while !r1.is_zero() {
        let (q, r) = r0.div_rem(&r1);
        r0 = std::mem::replace(&mut r1, r);

        let s = &s0 - &q * &s1;
        s0 = std::mem::replace(&mut s1, s);
    }

    if !r0.is_one() {
        return Err(NumberTheoryError::NotInvertible);
    }

    s0.mod_floor(&modulus)
        .to_biguint()
        .ok_or(NumberTheoryError::NotInvertible)
}

/// Computes the Jacobi symbol `(a / n)`.
///
/// Returns `-1`, `0` or `1`. For a prime `n` this is the Legendre symbol:
/// `1` for non-zero quadratic residues, `-1` for non-residues and `0` when
/// `n` divides `a`.
///
/// # Errors
/// Returns [`NumberTheoryError::InvalidModulus`] if `n` is even or smaller
/// than three.
pub fn jacobi(a: &BigUint, n: &BigUint) -> Result<i8, NumberTheoryError> {
    let three = BigUint::from(3u8);
    if n < &three || n.is_even() {
        return Err(NumberTheoryError::InvalidModulus);
    }

    let mut a = a % n;
    let mut n = n.clone();
    let mut result = 1i8;

    while !a.is_zero() {
        let twos = a.trailing_zeros().unwrap_or(0);
        a >>= twos;

        // (2/n) = -1 iff n ≡ 3, 5 (mod 8)
        let n_mod_8 = low_bits(&n, 8);
        if twos % 2 == 1 && (n_mod_8 == 3 || n_mod_8 == 5) {
            result = -result;
        }

        // quadratic reciprocity
        if low_bits(&a, 4) == 3 && low_bits(&n, 4) == 3 {
            result = -result;
        }

        std::mem::swap(&mut a, &mut n);
        a %= &n;
    }

    Ok(if n.is_one() { result } else { 0 })
}

/// Computes a square root of `a` modulo the odd prime `p`.
///
/// The returned root is one of the two possible roots; callers pick the
/// parity they need by negating it.
///
/// Dispatch:
/// - `p ≡ 3 (mod 4)`: `a^((p+1)/4)`
/// - `p ≡ 5 (mod 8)`: Atkin's formula
/// - otherwise: Tonelli-Shanks
///
/// # Errors
/// Returns [`NumberTheoryError::NoSquareRoot`] if `a` is a non-residue, or
/// if a composite `p` stops the Tonelli-Shanks iteration from converging.
pub fn square_root_mod_prime(a: &BigUint, p: &BigUint) -> Result<BigUint, NumberTheoryError> {
    let a = a % p;
    if a.is_zero() {
        return Ok(a);
    }

    if p == &BigUint::from(2u8) {
        return Ok(a);
    }

    if jacobi(&a, p)? != 1 {
        return Err(NumberTheoryError::NoSquareRoot);
    }

    let one = BigUint::one();

    if low_bits(p, 4) == 3 {
        let exp = (p + &one) >> 2u32;
        return Ok(a.modpow(&exp, p));
    }

    if low_bits(p, 8) == 5 {
        let d = a.modpow(&((p - &one) >> 2u32), p);
        if d.is_one() {
            return Ok(a.modpow(&((p + 3u8) >> 3u32), p));
        }

        // d == p - 1
        let two_a = (&a << 1u32) % p;
        let four_a = (&a << 2u32) % p;
        return Ok((two_a * four_a.modpow(&((p - 5u8) >> 3u32), p)) % p);
    }

    tonelli_shanks(&a, p)
}

/// Tonelli-Shanks for a known quadratic residue `a` modulo an odd prime.
///
/// A composite `p` can break the loop invariants; every loop is bounded
/// and such inputs report [`NumberTheoryError::NoSquareRoot`].
fn tonelli_shanks(a: &BigUint, p: &BigUint) -> Result<BigUint, NumberTheoryError> {
    let one = BigUint::one();
    let p_minus_one = p - &one;

    let s = p_minus_one.trailing_zeros().unwrap_or(0);
    let q = &p_minus_one >> s;

    // smallest quadratic non-residue
    let mut z = BigUint::from(2u8);
    while jacobi(&z, p)? != -1 {
        z += 1u8;
        if &z >= p {
            return Err(NumberTheoryError::NoSquareRoot);
        }
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + &one) >> 1u32), p);

    while !t.is_one() {
        // least i < m with t^(2^i) == 1
        let mut i = 0u64;
        let mut t2 = t.clone();
        while !t2.is_one() {
            t2 = (&t2 * &t2) % p;
            i += 1;
            if i >= m {
                return Err(NumberTheoryError::NoSquareRoot);
            }
        }

        let b = c.modpow(&(BigUint::one() << (m - i - 1)), p);
        m = i;
        c = (&b * &b) % p;
        t = (t * &c) % p;
        r = (r * b) % p;
    }

    Ok(r)
}

/// Small primes used for trial division and as Miller-Rabin witnesses.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Probabilistic primality test.
///
/// Trial division by small primes followed by Miller-Rabin with the small
/// primes as fixed witnesses. Deterministic for `n < 3.3·10²⁴`; above that,
/// the error probability is below `4⁻²⁵` for adversarially chosen inputs
/// and negligible for curve parameters.
pub fn is_prime(n: &BigUint) -> bool {
    if n < &BigUint::from(2u8) {
        return false;
    }

    for &sp in &SMALL_PRIMES {
        let sp = BigUint::from(sp);
        if n == &sp {
            return true;
        }
        if (n % &sp).is_zero() {
            return false;
        }
    }

    let one = BigUint::one();
    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for &w in &SMALL_PRIMES {
        let mut x = BigUint::from(w).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Returns `n mod modulus` for a small power-of-two modulus.
fn low_bits(n: &BigUint, modulus: u32) -> u32 {
    let low = n.iter_u32_digits().next().unwrap_or(0);
    low & (modulus - 1)
}
