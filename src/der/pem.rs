//! PEM armour around DER payloads.
//!
//! A PEM block is the base64 encoding of a DER structure framed by
//! `-----BEGIN <label>-----` and `-----END <label>-----` lines. Output uses
//! 64-character lines; input may be wrapped at any width and may be
//! embedded in a larger text (for example a key file that also carries an
//! `EC PARAMETERS` block).

use base64::{Engine, engine::general_purpose::STANDARD};

use super::DerError;

const LINE_WIDTH: usize = 64;

/// Wraps `der` into a PEM block with the given label.
///
/// The result ends with a newline.
pub fn to_pem(der: &[u8], label: &str) -> String {
    let body = STANDARD.encode(der);

    let capacity = body.len() + body.len() / LINE_WIDTH + 2 * label.len() + 40;
    let mut out = String::with_capacity(capacity);
    out.push_str(&format!("-----BEGIN {label}-----\n"));

    for chunk in body.as_bytes().chunks(LINE_WIDTH) {
        // base64 output is ASCII
        out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        out.push('\n');
    }

    out.push_str(&format!("-----END {label}-----\n"));
    out
}

/// Extracts and decodes the first PEM block with the given label.
///
/// Text before the header and after the footer is ignored.
///
/// # Errors
/// - [`DerError::Pem`] if the header or the matching footer is missing
/// - [`DerError::Base64`] if the body is not valid base64
pub fn from_pem(text: &str, label: &str) -> Result<Vec<u8>, DerError> {
    let header = format!("-----BEGIN {label}-----");
    let footer = format!("-----END {label}-----");

    let start = text
        .find(&header)
        .ok_or(DerError::Pem("header not found"))?
        + header.len();

    let len = text[start..]
        .find(&footer)
        .ok_or(DerError::Pem("footer not found"))?;

    let body: String = text[start..start + len]
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    STANDARD.decode(body).map_err(|_| DerError::Base64)
}
