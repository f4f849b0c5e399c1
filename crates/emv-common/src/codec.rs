//! Hex, BCD and ASCII helpers for card data

use thiserror::Error;

/// Errors raised while reading hex text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexError {
    #[error("Invalid hex character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("Odd number of hex digits ({0})")]
    OddLength(usize),
}

/// Parse hex text as pasted from a log or trace.
///
/// Case-insensitive. Whitespace and the `:` / `-` separators are ignored, as is
/// a leading `0x`. Positions in errors refer to the original text.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let trimmed = text.trim_start();
    let skip = text.len() - trimmed.len();
    let (body, skip) = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(rest) => (rest, skip + 2),
        None => (trimmed, skip),
    };

    let mut digits = String::with_capacity(body.len());
    for (i, ch) in body.char_indices() {
        if ch.is_whitespace() || ch == ':' || ch == '-' {
            continue;
        }
        if !ch.is_ascii_hexdigit() {
            return Err(HexError::InvalidCharacter {
                ch,
                position: skip + i,
            });
        }
        digits.push(ch);
    }

    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }

    // Every character was checked above, so decoding cannot fail.
    hex::decode(&digits).map_err(|_| HexError::OddLength(digits.len()))
}

/// Uppercase hex without separators
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode packed BCD, two digits per byte.
///
/// Returns `None` if any nibble is above 9.
pub fn bcd_digits(bytes: &[u8]) -> Option<String> {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        for nibble in [byte >> 4, byte & 0x0F] {
            if nibble > 9 {
                return None;
            }
            out.push(char::from(b'0' + nibble));
        }
    }
    Some(out)
}

/// Decode packed BCD that may be right-padded with `F` nibbles (PAN, Track 2).
pub fn bcd_digits_padded(bytes: &[u8]) -> Option<String> {
    let mut nibbles: Vec<u8> = bytes.iter().flat_map(|b| [b >> 4, b & 0x0F]).collect();
    while nibbles.last() == Some(&0x0F) {
        nibbles.pop();
    }

    let mut out = String::with_capacity(nibbles.len());
    for nibble in nibbles {
        if nibble > 9 {
            return None;
        }
        out.push(char::from(b'0' + nibble));
    }
    Some(out)
}

/// Render bytes as ASCII, replacing anything non-printable with `.`
pub fn to_ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                char::from(b)
            } else {
                '.'
            }
        })
        .collect()
}
