//! The [`Curve`] type: a curve model with a generator of prime order.

use std::sync::{Arc, OnceLock};

use num_bigint::BigUint;

use crate::der::Oid;
use crate::ec::encoding::edwards_encoding_length;
use crate::ec::{
    CurveModel, DecodeOptions, MalformedPointError, Point, PrecomputedPoint, decode_point,
};
use crate::primitives::conv::byte_length;

/// A named or ad-hoc curve usable for signatures.
///
/// Besides the model and the generator, a curve exposes the byte lengths
/// that key and signature containers need:
///
/// - `baselen`: width of a scalar modulo the order (Weierstrass) or of an
///   encoded point (Edwards)
/// - `verifying_key_length`: width of a raw public key
/// - `signature_length`: width of a raw signature, `2·baselen`
///
/// Equality compares the model and the generator; names, OIDs and
/// cofactors are ignored.
#[derive(Clone, Debug)]
pub struct Curve {
    name: &'static str,
    openssl_name: Option<&'static str>,
    model: Arc<CurveModel>,
    generator: Point,
    oid: Option<Oid>,
    baselen: usize,
    verifying_key_length: usize,
    signature_length: usize,
    generator_table: OnceLock<PrecomputedPoint>,
}

impl Curve {
    /// Builds a curve from a generator and its order.
    ///
    /// The generator is tagged with `order`; it is the caller's
    /// responsibility that `order` is the actual prime order of the point.
    pub fn new(
        name: &'static str,
        openssl_name: Option<&'static str>,
        generator: Point,
        order: BigUint,
        oid: Option<Oid>,
    ) -> Self {
        let model = Arc::clone(generator.curve());

        let (baselen, verifying_key_length) = if model.is_edwards() {
            let len = edwards_encoding_length(model.p());
            (len, len)
        } else {
            (byte_length(&order), 2 * byte_length(model.p()))
        };

        Self {
            name,
            openssl_name,
            model,
            generator: generator.with_order(Some(order)),
            oid,
            baselen,
            verifying_key_length,
            signature_length: 2 * baselen,
            generator_table: OnceLock::new(),
        }
    }

    /// Canonical name, `"unknown"` for curves decoded from explicit
    /// parameters that match no registered curve.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name used by OpenSSL, if any.
    #[inline]
    pub fn openssl_name(&self) -> Option<&'static str> {
        self.openssl_name
    }

    #[inline]
    pub fn model(&self) -> &Arc<CurveModel> {
        &self.model
    }

    #[inline]
    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// Prime order of the generator.
    pub fn order(&self) -> &BigUint {
        // always set by `Curve::new`
        self.generator
            .order()
            .unwrap_or_else(|| unreachable!("curve generator carries its order"))
    }

    #[inline]
    pub fn oid(&self) -> Option<&Oid> {
        self.oid.as_ref()
    }

    #[inline]
    pub fn cofactor(&self) -> Option<&BigUint> {
        self.model.cofactor()
    }

    #[inline]
    pub fn is_edwards(&self) -> bool {
        self.model.is_edwards()
    }

    #[inline]
    pub fn baselen(&self) -> usize {
        self.baselen
    }

    #[inline]
    pub fn verifying_key_length(&self) -> usize {
        self.verifying_key_length
    }

    #[inline]
    pub fn signature_length(&self) -> usize {
        self.signature_length
    }

    /// Precomputed multiples of the generator, built on first use.
    ///
    /// Initialisation is synchronised; concurrent first calls block until
    /// one of them has filled the table.
    pub fn generator_table(&self) -> &PrecomputedPoint {
        self.generator_table.get_or_init(|| {
            tracing::debug!(curve = self.name, "precomputing generator multiples");
            self.generator.precompute()
        })
    }

    /// Decodes and validates a point on this curve.
    ///
    /// The point is checked against the curve equation and, unless
    /// `options.order_check` is [`OrderCheck::SkipUnsafe`](crate::ec::OrderCheck::SkipUnsafe),
    /// against the generator order.
    pub fn decode_point(
        &self,
        data: &[u8],
        options: &DecodeOptions,
    ) -> Result<Point, MalformedPointError> {
        decode_point(&self.model, data, Some(self.order()), options)
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.model == other.model && self.generator == other.generator
    }
}

impl Eq for Curve {}
