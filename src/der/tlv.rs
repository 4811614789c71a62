//! DER tag-length-value encoders and decoders.
//!
//! Encoders return freshly allocated byte vectors and never fail for valid
//! inputs. Decoders follow a single convention:
//!
//! ```text
//! remove_x(bytes) -> (value, remaining_bytes)
//! ```
//!
//! so nested structures are parsed by threading the remainder through
//! successive calls and checking that it is empty at the end.

use num_bigint::BigUint;

use super::{DerError, Oid};

/// `INTEGER` tag.
pub const TAG_INTEGER: u8 = 0x02;
/// `BIT STRING` tag.
pub const TAG_BIT_STRING: u8 = 0x03;
/// `OCTET STRING` tag.
pub const TAG_OCTET_STRING: u8 = 0x04;
/// `OBJECT IDENTIFIER` tag.
pub const TAG_OBJECT_IDENTIFIER: u8 = 0x06;
/// `SEQUENCE` (constructed) tag.
pub const TAG_SEQUENCE: u8 = 0x30;
/// Context-specific constructed tag class, `[n]` is `0xa0 | n`.
pub const TAG_CONTEXT_CONSTRUCTED: u8 = 0xa0;

/// Encodes a definite length in its shortest DER form.
pub fn encode_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        return vec![len as u8];
    }

    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[skip..];

    let mut out = Vec::with_capacity(1 + significant.len());
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
    out
}

fn encode_tlv(tag: u8, value: &[u8]) -> Vec<u8> {
    let len = encode_length(value.len());

    let mut out = Vec::with_capacity(1 + len.len() + value.len());
    out.push(tag);
    out.extend_from_slice(&len);
    out.extend_from_slice(value);
    out
}

/// Encodes a non-negative `INTEGER`.
///
/// A leading zero byte is added only when the most significant bit of the
/// magnitude is set, so the value is never read back as negative.
pub fn encode_integer(n: &BigUint) -> Vec<u8> {
    let mut magnitude = n.to_bytes_be();

    if magnitude[0] & 0x80 != 0 {
        magnitude.insert(0, 0);
    }

    encode_tlv(TAG_INTEGER, &magnitude)
}

/// Encodes an `OCTET STRING`.
pub fn encode_octet_string(data: &[u8]) -> Vec<u8> {
    encode_tlv(TAG_OCTET_STRING, data)
}

/// Encodes a `BIT STRING` whose last `unused_bits` bits are padding.
///
/// # Errors
/// Fails if `unused_bits > 7`, if padding is declared on an empty string,
/// or if the padding bits are not zero (DER requires them cleared).
pub fn encode_bitstring(data: &[u8], unused_bits: u8) -> Result<Vec<u8>, DerError> {
    validate_unused_bits(data, unused_bits)?;

    let mut value = Vec::with_capacity(1 + data.len());
    value.push(unused_bits);
    value.extend_from_slice(data);

    Ok(encode_tlv(TAG_BIT_STRING, &value))
}

/// Encodes a `SEQUENCE` from already encoded elements.
pub fn encode_sequence(elements: &[&[u8]]) -> Vec<u8> {
    encode_tlv(TAG_SEQUENCE, &elements.concat())
}

/// Encodes an `OBJECT IDENTIFIER`.
///
/// The first two arcs are folded into a single sub-identifier
/// `40·arc1 + arc2`; every sub-identifier is written base-128, most
/// significant group first.
pub fn encode_oid(oid: &Oid) -> Vec<u8> {
    let arcs = oid.arcs();

    let mut body = Vec::new();
    encode_base128(arcs[0] * 40 + arcs[1], &mut body);
    for &arc in &arcs[2..] {
        encode_base128(arc, &mut body);
    }

    encode_tlv(TAG_OBJECT_IDENTIFIER, &body)
}

/// Encodes a context-specific constructed element `[tag]`.
pub fn encode_constructed(tag: u8, value: &[u8]) -> Vec<u8> {
    encode_tlv(TAG_CONTEXT_CONSTRUCTED | (tag & 0x1f), value)
}

fn encode_base128(mut n: u64, out: &mut Vec<u8>) {
    let mut groups = [0u8; 10];
    let mut i = groups.len();

    loop {
        i -= 1;
        groups[i] = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            break;
        }
    }

    let last = groups.len() - 1;
    for (idx, g) in groups.iter().enumerate().skip(i) {
        out.push(if idx == last { *g } else { g | 0x80 });
    }
}

/// Reads a DER length field.
///
/// Returns `(length, bytes_consumed)`. Indefinite lengths, lengths that do
/// not fit in `usize` and non-minimal long forms are rejected.
pub fn read_length(data: &[u8]) -> Result<(usize, usize), DerError> {
    let first = *data.first().ok_or(DerError::Truncated("missing length"))?;

    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }

    let llen = (first & 0x7f) as usize;
    if llen == 0 {
        return Err(DerError::Malformed("indefinite length"));
    }

    if llen > data.len() - 1 {
        return Err(DerError::Truncated("length of length longer than buffer"));
    }

    if llen > std::mem::size_of::<usize>() {
        return Err(DerError::Malformed("length too large"));
    }

    let bytes = &data[1..1 + llen];
    if bytes[0] == 0 || (llen == 1 && bytes[0] < 0x80) {
        return Err(DerError::NonMinimal("length"));
    }

    let len = bytes.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
    Ok((len, 1 + llen))
}

/// Splits one element with the expected tag off the front of `data`.
fn remove_tlv(data: &[u8], tag: u8) -> Result<(&[u8], &[u8]), DerError> {
    let found = *data.first().ok_or(DerError::Truncated("empty input"))?;
    if found != tag {
        return Err(DerError::UnexpectedTag {
            expected: tag,
            found,
        });
    }

    let (len, llen) = read_length(&data[1..])?;
    let start = 1 + llen;

    if len > data.len() - start {
        return Err(DerError::Truncated("length longer than provided buffer"));
    }

    Ok((&data[start..start + len], &data[start + len..]))
}

/// Returns `true` if `data` starts with a `SEQUENCE` tag.
pub fn is_sequence(data: &[u8]) -> bool {
    data.first() == Some(&TAG_SEQUENCE)
}

/// Removes a `SEQUENCE`, returning its body and the remaining bytes.
pub fn remove_sequence(data: &[u8]) -> Result<(&[u8], &[u8]), DerError> {
    remove_tlv(data, TAG_SEQUENCE)
}

/// Removes an `OCTET STRING`, returning its content and the remaining bytes.
pub fn remove_octet_string(data: &[u8]) -> Result<(&[u8], &[u8]), DerError> {
    remove_tlv(data, TAG_OCTET_STRING)
}

/// Removes a non-negative `INTEGER`.
///
/// # Errors
/// Rejects empty encodings, negative values and superfluous leading zero
/// bytes.
pub fn remove_integer(data: &[u8]) -> Result<(BigUint, &[u8]), DerError> {
    let (body, rest) = remove_tlv(data, TAG_INTEGER)?;

    let msb = *body
        .first()
        .ok_or(DerError::Malformed("zero-length INTEGER"))?;

    if msb >= 0x80 {
        return Err(DerError::Malformed("negative INTEGER"));
    }

    if body.len() > 1 && msb == 0 && body[1] < 0x80 {
        return Err(DerError::NonMinimal("INTEGER padding"));
    }

    Ok((BigUint::from_bytes_be(body), rest))
}

/// Removes a `BIT STRING`.
///
/// Returns `((content, unused_bits), remaining_bytes)`. When
/// `expect_unused` is set, any other padding count is rejected.
pub fn remove_bitstring(
    data: &[u8],
    expect_unused: Option<u8>,
) -> Result<((&[u8], u8), &[u8]), DerError> {
    let (body, rest) = remove_tlv(data, TAG_BIT_STRING)?;

    let unused = *body
        .first()
        .ok_or(DerError::Malformed("BIT STRING without padding byte"))?;
    let content = &body[1..];

    if let Some(expected) = expect_unused {
        if unused != expected {
            return Err(DerError::Malformed("unexpected BIT STRING padding"));
        }
    }

    validate_unused_bits(content, unused)?;

    Ok(((content, unused), rest))
}

fn validate_unused_bits(content: &[u8], unused: u8) -> Result<(), DerError> {
    if unused > 7 {
        return Err(DerError::Malformed("BIT STRING padding above 7 bits"));
    }

    match content.last() {
        None if unused != 0 => Err(DerError::Malformed("padding on empty BIT STRING")),
        Some(last) if last & ((1u8 << unused) - 1) != 0 => {
            Err(DerError::NonMinimal("non-zero BIT STRING padding bits"))
        }
        _ => Ok(()),
    }
}

/// Removes an `OBJECT IDENTIFIER`.
pub fn remove_object(data: &[u8]) -> Result<(Oid, &[u8]), DerError> {
    let (mut body, rest) = remove_tlv(data, TAG_OBJECT_IDENTIFIER)?;

    if body.is_empty() {
        return Err(DerError::Malformed("empty OBJECT IDENTIFIER"));
    }

    let mut arcs = Vec::new();

    let (first, used) = read_base128(body)?;
    body = &body[used..];
    if first >= 80 {
        arcs.push(2);
        arcs.push(first - 80);
    } else {
        arcs.push(first / 40);
        arcs.push(first % 40);
    }

    while !body.is_empty() {
        let (arc, used) = read_base128(body)?;
        arcs.push(arc);
        body = &body[used..];
    }

    Ok((Oid::new(&arcs)?, rest))
}

fn read_base128(data: &[u8]) -> Result<(u64, usize), DerError> {
    if data[0] == 0x80 {
        return Err(DerError::NonMinimal("OID sub-identifier"));
    }

    let mut value = 0u64;
    for (i, &b) in data.iter().enumerate() {
        if value > (u64::MAX >> 7) {
            return Err(DerError::Malformed("OID sub-identifier too large"));
        }

        value = (value << 7) | u64::from(b & 0x7f);
        if b & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(DerError::Truncated("unterminated OID sub-identifier"))
}

/// Removes a context-specific constructed element.
///
/// Returns `(tag_number, body, remaining_bytes)`.
pub fn remove_constructed(data: &[u8]) -> Result<(u8, &[u8], &[u8]), DerError> {
    let found = *data.first().ok_or(DerError::Truncated("empty input"))?;

    if found & 0xe0 != TAG_CONTEXT_CONSTRUCTED {
        return Err(DerError::UnexpectedTag {
            expected: TAG_CONTEXT_CONSTRUCTED,
            found,
        });
    }

    let (body, rest) = remove_tlv(data, found)?;
    Ok((found & 0x1f, body, rest))
}
