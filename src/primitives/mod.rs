//! Number-theoretic primitives
//!
//! This module defines the arbitrary-precision building blocks used by the
//! curve and signature layers.
//!
//! All values are plain `BigUint`s understood modulo an explicitly supplied
//! modulus; there is no dedicated field-element type. The functions here are
//! pure and stateless, and are correct for integers of any size (the largest
//! curve in the registry works over a 521-bit prime).
//!
//! Submodules:
//! - `numbertheory`: modular inverse, modular square root, Jacobi symbol and
//!   a probabilistic primality test
//! - `conv`: conversions between integers and fixed-width byte strings,
//!   including the FIPS 186 `bits2int` truncation rule

pub mod conv;
pub mod numbertheory;

pub use numbertheory::{
    NumberTheoryError, inverse_mod, is_prime, jacobi, square_root_mod_prime,
};
