//! `ECParameters` (RFC 3279, SEC 1 §C.2) serialization.
//!
//! ```text
//! ECParameters ::= CHOICE {
//!     namedCurve   OBJECT IDENTIFIER,
//!     specifiedCurve SEQUENCE {
//!         version   INTEGER { ecpVer1(1) },
//!         fieldID   SEQUENCE { fieldType OBJECT IDENTIFIER, parameters ANY },
//!         curve     SEQUENCE { a OCTET STRING, b OCTET STRING, seed BIT STRING OPTIONAL },
//!         base      OCTET STRING,
//!         order     INTEGER,
//!         cofactor  INTEGER OPTIONAL,
//!         ...
//!     }
//! }
//! ```

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use num_bigint::BigUint;
use num_traits::One;

use super::curve::Curve;
use super::registry::{curves, find_curve};
use super::UnknownCurveError;
use crate::der::{self, DerError, Oid};
use crate::ec::{CurveForm, CurveModel, DecodeOptions, OrderCheck, PointEncoding, decode_point};
use crate::error::Result;
use crate::primitives::conv::{byte_length, to_bytes_be_padded};
use crate::primitives::is_prime;

/// PEM label of an `ECParameters` block.
pub const PEM_LABEL: &str = "EC PARAMETERS";

static PRIME_FIELD_OID: LazyLock<Oid> = LazyLock::new(|| {
    Oid::new(&[1, 2, 840, 10045, 1, 1]).expect("prime-field OID is well-formed")
});

static CHARACTERISTIC_TWO_FIELD_OID: LazyLock<Oid> = LazyLock::new(|| {
    Oid::new(&[1, 2, 840, 10045, 1, 2]).expect("characteristic-two OID is well-formed")
});

/// The two `ECParameters` alternatives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamEncoding {
    /// Only the curve OID.
    NamedCurve,
    /// The full `specifiedCurve` structure.
    Explicit,
}

impl ParamEncoding {
    pub const ALL: &'static [ParamEncoding] = &[ParamEncoding::NamedCurve, ParamEncoding::Explicit];
}

impl Curve {
    /// Encodes the curve parameters as DER.
    ///
    /// `encoding = None` selects `NamedCurve` when the curve has an OID and
    /// `Explicit` otherwise. `point_encoding` applies to the base point of
    /// explicit parameters and must not be [`PointEncoding::Raw`].
    ///
    /// # Errors
    /// - [`UnknownCurveError::NoOid`] for `NamedCurve` without an OID
    /// - [`UnknownCurveError::ExplicitEdwards`] for explicit Edwards
    ///   parameters, which have no standard form
    /// - [`UnknownCurveError::UnsupportedPointEncoding`] for a raw base point
    pub fn to_der(
        &self,
        encoding: Option<ParamEncoding>,
        point_encoding: PointEncoding,
    ) -> Result<Vec<u8>, UnknownCurveError> {
        let encoding = encoding.unwrap_or(if self.oid().is_some() {
            ParamEncoding::NamedCurve
        } else {
            ParamEncoding::Explicit
        });

        match encoding {
            ParamEncoding::NamedCurve => {
                let oid = self.oid().ok_or(UnknownCurveError::NoOid(self.name()))?;
                Ok(der::encode_oid(oid))
            }
            ParamEncoding::Explicit => self.explicit_der(point_encoding),
        }
    }

    fn explicit_der(&self, point_encoding: PointEncoding) -> Result<Vec<u8>, UnknownCurveError> {
        let CurveForm::ShortWeierstrass { a, b } = self.model().form() else {
            return Err(UnknownCurveError::ExplicitEdwards);
        };

        if point_encoding == PointEncoding::Raw {
            return Err(UnknownCurveError::UnsupportedPointEncoding);
        }

        let p = self.model().p();
        let len = byte_length(p);

        let version = der::encode_integer(&BigUint::one());
        let field_id =
            der::encode_sequence(&[&der::encode_oid(&PRIME_FIELD_OID), &der::encode_integer(p)]);
        let curve = der::encode_sequence(&[
            &der::encode_octet_string(&to_bytes_be_padded(a, len)),
            &der::encode_octet_string(&to_bytes_be_padded(b, len)),
        ]);
        let base = der::encode_octet_string(&self.generator().to_bytes(point_encoding));
        let order = der::encode_integer(self.order());

        let mut elements: Vec<Vec<u8>> = vec![version, field_id, curve, base, order];
        if let Some(h) = self.cofactor() {
            elements.push(der::encode_integer(h));
        }

        let refs: Vec<&[u8]> = elements.iter().map(Vec::as_slice).collect();
        Ok(der::encode_sequence(&refs))
    }

    /// Encodes the curve parameters as an `EC PARAMETERS` PEM block.
    pub fn to_pem(
        &self,
        encoding: Option<ParamEncoding>,
        point_encoding: PointEncoding,
    ) -> Result<String, UnknownCurveError> {
        Ok(der::to_pem(&self.to_der(encoding, point_encoding)?, PEM_LABEL))
    }

    /// Decodes `ECParameters`.
    ///
    /// Named curves resolve to their registry entry. Explicit parameters
    /// are validated, then compared with every registered curve; a match
    /// returns the registry entry, otherwise an ad-hoc curve named
    /// `"unknown"` is returned.
    ///
    /// # Errors
    /// - [`DerError`] on malformed input, trailing bytes, `version != 1`,
    ///   or an encoding outside `allowed`
    /// - [`UnknownCurveError`] for unknown OIDs, characteristic-two or
    ///   unknown field types
    /// - [`MalformedPointError`](crate::ec::MalformedPointError) if the
    ///   base point is not on the curve or not of the stated order
    pub fn from_der(data: &[u8], allowed: &[ParamEncoding]) -> Result<Cow<'static, Curve>> {
        if !der::is_sequence(data) {
            if !allowed.contains(&ParamEncoding::NamedCurve) {
                return Err(DerError::Malformed("named_curve parameters not allowed").into());
            }

            let (oid, rest) = der::remove_object(data)?;
            if !rest.is_empty() {
                return Err(DerError::TrailingData("curve OID").into());
            }

            return Ok(Cow::Borrowed(find_curve(&oid)?));
        }

        if !allowed.contains(&ParamEncoding::Explicit) {
            return Err(DerError::Malformed("explicit parameters not allowed").into());
        }

        let (seq, rest) = der::remove_sequence(data)?;
        if !rest.is_empty() {
            return Err(DerError::TrailingData("ECParameters").into());
        }

        let (version, rest) = der::remove_integer(seq)?;
        if !version.is_one() {
            return Err(DerError::Malformed("unknown ECParameters version").into());
        }

        let (field_id, rest) = der::remove_sequence(rest)?;
        let (curve, rest) = der::remove_sequence(rest)?;
        let (base, rest) = der::remove_octet_string(rest)?;
        let (order, rest) = der::remove_integer(rest)?;
        let cofactor = if rest.is_empty() {
            None
        } else {
            // later extensions are ignored
            Some(der::remove_integer(rest)?.0)
        };

        let (field_type, rest) = der::remove_object(field_id)?;
        if field_type == *CHARACTERISTIC_TWO_FIELD_OID {
            return Err(UnknownCurveError::CharacteristicTwo.into());
        }
        if field_type != *PRIME_FIELD_OID {
            return Err(UnknownCurveError::FieldType(field_type).into());
        }

        let (prime, rest) = der::remove_integer(rest)?;
        if !rest.is_empty() {
            return Err(DerError::TrailingData("fieldID parameters").into());
        }

        let (a, rest) = der::remove_octet_string(curve)?;
        // the optional seed is not used
        let (b, _) = der::remove_octet_string(rest)?;

        if !is_prime(&prime) || order < BigUint::from(2u8) {
            return Err(DerError::Malformed("invalid explicit curve parameters").into());
        }

        let model = Arc::new(CurveModel::short_weierstrass(
            prime,
            BigUint::from_bytes_be(a),
            BigUint::from_bytes_be(b),
            cofactor,
        ));

        let options = DecodeOptions {
            encodings: &[
                PointEncoding::Uncompressed,
                PointEncoding::Compressed,
                PointEncoding::Hybrid,
            ],
            order_check: OrderCheck::Required,
        };
        let generator = decode_point(&model, base, Some(&order), &options)?;

        let candidate = Curve::new("unknown", None, generator, order, None);

        if let Some(named) = curves().iter().find(|c| **c == candidate) {
            tracing::debug!(curve = named.name(), "explicit parameters match a named curve");
            return Ok(Cow::Borrowed(named));
        }

        Ok(Cow::Owned(candidate))
    }

    /// Decodes the first `EC PARAMETERS` PEM block found in `text`.
    pub fn from_pem(text: &str, allowed: &[ParamEncoding]) -> Result<Cow<'static, Curve>> {
        Self::from_der(&der::from_pem(text, PEM_LABEL)?, allowed)
    }
}
