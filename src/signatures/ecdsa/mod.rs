//! ECDSA over short-Weierstrass curves.
//!
//! ```text
//! let curve = CurveId::Nist256p.curve();
//! let secret = SecretScalar::generate(curve, &mut OsRng);
//! let public = secret.public_point(curve);
//!
//! let digest = Sha256::digest(message);
//! let nonce = NonceMode::deterministic::<Sha256>();
//! let sig = sign_digest(curve, &secret, &digest, nonce, &SignOptions::default())?;
//! verify_digest(curve, &public, &digest, &sig)?;
//! ```

mod core;
pub mod keys;
pub mod rfc6979;
pub mod signature;

pub use self::core::{NonceMode, SignOptions, sign_digest, verify_digest};
pub use keys::SecretScalar;
pub use rfc6979::{HmacDigest, Rfc6979, Rfc6979Hmac, generate_k};
pub use signature::Signature;
