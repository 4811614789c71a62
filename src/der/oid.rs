//! ASN.1 object identifiers.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::DerError;

/// An ASN.1 OBJECT IDENTIFIER as its list of arcs.
///
/// Construction enforces the X.690 constraints needed to encode the value:
/// at least two arcs, a first arc of 0, 1 or 2, and a second arc below 40
/// unless the first arc is 2.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Oid(Vec<u64>);

impl Oid {
    /// Creates an OID from its arcs.
    pub fn new(arcs: &[u64]) -> Result<Self, DerError> {
        if arcs.len() < 2 {
            return Err(DerError::Malformed("OID needs at least two arcs"));
        }

        if arcs[0] > 2 || (arcs[0] < 2 && arcs[1] >= 40) {
            return Err(DerError::Malformed("invalid leading OID arcs"));
        }

        if arcs[0] == 2 && arcs[1] > u64::MAX - 80 {
            return Err(DerError::Malformed("OID arc out of range"));
        }

        Ok(Self(arcs.to_vec()))
    }

    /// Returns the arcs of the identifier.
    pub fn arcs(&self) -> &[u64] {
        &self.0
    }
}

impl Display for Oid {
    /// Dotted-decimal notation, e.g. `1.2.840.10045.3.1.7`.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;

        for arc in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
            first = false;
        }

        Ok(())
    }
}

impl FromStr for Oid {
    type Err = DerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s
            .split('.')
            .map(|arc| arc.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| DerError::Malformed("OID arc is not a number"))?;

        Self::new(&arcs)
    }
}

impl PartialEq<[u64]> for Oid {
    fn eq(&self, other: &[u64]) -> bool {
        self.0 == other
    }
}
