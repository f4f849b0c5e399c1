//! Tolerant BER-TLV decoder
//!
//! Malformed input never aborts the scan. When an element cannot be read at
//! some offset, a warning is recorded, exactly one byte is skipped and decoding
//! resumes from the next byte. This lets garbage embedded in card data be
//! diagnosed instead of hiding everything after it.

use thiserror::Error;
use tracing::{debug, trace};

use crate::node::{ParseOutcome, Tag, TlvNode};

/// Nesting limit used by [`decode`]
pub const DEFAULT_MAX_DEPTH: usize = 32;

const MAX_TAG_BYTES: usize = 4;
const MAX_LENGTH_BYTES: usize = 4;

/// Decoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// How many levels of constructed tags are expanded. Templates nested
    /// deeper keep their raw value and get no children.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Reasons a single element could not be read
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ElementError {
    #[error("tag runs past the end of the buffer")]
    TruncatedTag,

    #[error("invalid tag encoding (first subsequent byte is 0x80)")]
    InvalidTag,

    #[error("no length byte after tag")]
    MissingLength,

    #[error("indefinite length encoding is not supported")]
    IndefiniteLength,

    #[error("length uses {0} bytes, at most 4 are supported")]
    LengthTooLong(usize),

    #[error("length needs {needed} bytes but only {available} remain")]
    TruncatedLength { needed: usize, available: usize },

    #[error("value needs {length} bytes but only {available} remain")]
    TruncatedValue { length: usize, available: usize },
}

/// Position of one element within a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ElementSpan {
    start: usize,
    tag_end: usize,
    value_start: usize,
    end: usize,
}

impl ElementSpan {
    fn length(&self) -> usize {
        self.end - self.value_start
    }
}

/// Decode every TLV element in `buffer` starting at `offset`.
///
/// Uses [`DecodeOptions::default`].
pub fn decode(buffer: &[u8], offset: usize) -> ParseOutcome {
    decode_with(buffer, offset, &DecodeOptions::default())
}

/// Decode every TLV element in `buffer` starting at `offset`
pub fn decode_with(buffer: &[u8], offset: usize, options: &DecodeOptions) -> ParseOutcome {
    if offset > buffer.len() {
        let message = format!(
            "Start offset {} is beyond the end of the {}-byte buffer",
            offset,
            buffer.len()
        );
        debug!("{}", message);
        return ParseOutcome {
            errors: vec![message],
            ..Default::default()
        };
    }

    let level = scan(buffer, offset, 0, 0, options);

    let outcome = ParseOutcome {
        nodes: level.nodes,
        bytes_consumed: level.cursor - offset,
        errors: Vec::new(),
        warnings: level.warnings,
    };

    debug!(
        nodes = outcome.nodes.len(),
        bytes_consumed = outcome.bytes_consumed,
        warnings = outcome.warnings.len(),
        "TLV decode finished"
    );

    outcome
}

/// Elements found at one nesting level
struct Level {
    nodes: Vec<TlvNode>,
    warnings: Vec<String>,
    /// Number of bytes skipped at this level (not counting deeper levels)
    skipped: usize,
    cursor: usize,
}

/// Scan `buffer[start..]`. `base` maps local offsets to offsets in the
/// top-level buffer.
fn scan(buffer: &[u8], start: usize, base: usize, depth: usize, options: &DecodeOptions) -> Level {
    let mut level = Level {
        nodes: Vec::new(),
        warnings: Vec::new(),
        skipped: 0,
        cursor: start,
    };

    while level.cursor < buffer.len() {
        match read_element(buffer, level.cursor) {
            Ok(span) => {
                let node = build_node(buffer, span, base, depth, options, &mut level.warnings);
                level.nodes.push(node);
                level.cursor = span.end;
            }
            Err(err) => {
                let message = format!(
                    "Skipped byte 0x{:02X} at offset {}: {}",
                    buffer[level.cursor],
                    base + level.cursor,
                    err
                );
                debug!("{}", message);
                level.warnings.push(message);
                level.skipped += 1;
                level.cursor += 1;
            }
        }
    }

    level
}

fn build_node(
    buffer: &[u8],
    span: ElementSpan,
    base: usize,
    depth: usize,
    options: &DecodeOptions,
    warnings: &mut Vec<String>,
) -> TlvNode {
    let tag = Tag::from_bytes(&buffer[span.start..span.tag_end]);
    let value = &buffer[span.value_start..span.end];
    let constructed = emv_common::is_constructed(tag.as_bytes());
    let offset = base + span.start;

    trace!(tag = %tag, offset, length = span.length(), constructed, "TLV element");

    let mut children = Vec::new();
    if constructed && !value.is_empty() {
        if depth >= options.max_depth {
            warnings.push(format!(
                "Nesting limit of {} reached at offset {}; tag {} not expanded",
                options.max_depth, offset, tag
            ));
        } else {
            let inner = scan(value, 0, base + span.value_start, depth + 1, options);
            if inner.skipped == 0 {
                children = inner.nodes;
                warnings.extend(inner.warnings);
            } else {
                warnings.push(format!(
                    "Constructed tag {} at offset {} does not contain valid TLV; value kept unexpanded",
                    tag, offset
                ));
            }
        }
    }

    TlvNode {
        tag,
        length: span.length(),
        value: value.to_vec(),
        constructed,
        children,
        raw_bytes: buffer[span.start..span.end].to_vec(),
        offset,
    }
}

/// Read the tag, length and value boundaries of the element at `start`
fn read_element(buffer: &[u8], start: usize) -> Result<ElementSpan, ElementError> {
    let tag_end = read_tag(buffer, start)?;
    let (length, value_start) = read_length(buffer, tag_end)?;

    let available = buffer.len() - value_start;
    if length > available {
        return Err(ElementError::TruncatedValue { length, available });
    }

    Ok(ElementSpan {
        start,
        tag_end,
        value_start,
        end: value_start + length,
    })
}

/// Returns the offset just past the tag
fn read_tag(buffer: &[u8], start: usize) -> Result<usize, ElementError> {
    let first = buffer.get(start).ok_or(ElementError::TruncatedTag)?;
    let mut end = start + 1;

    if first & 0x1F != 0x1F {
        return Ok(end);
    }

    loop {
        let byte = *buffer.get(end).ok_or(ElementError::TruncatedTag)?;
        if end == start + 1 && byte == 0x80 {
            return Err(ElementError::InvalidTag);
        }
        end += 1;

        // A tag that has not terminated by the cap is accepted as is
        if byte & 0x80 == 0 || end - start == MAX_TAG_BYTES {
            return Ok(end);
        }
    }
}

/// Returns the declared length and the offset of the first value byte
fn read_length(buffer: &[u8], start: usize) -> Result<(usize, usize), ElementError> {
    let first = *buffer.get(start).ok_or(ElementError::MissingLength)?;
    let pos = start + 1;

    if first & 0x80 == 0 {
        return Ok((first as usize, pos));
    }
    if first == 0x80 {
        return Err(ElementError::IndefiniteLength);
    }

    let count = (first & 0x7F) as usize;
    if count > MAX_LENGTH_BYTES {
        return Err(ElementError::LengthTooLong(count));
    }

    let bytes = buffer
        .get(pos..pos + count)
        .ok_or(ElementError::TruncatedLength {
            needed: count,
            available: buffer.len() - pos,
        })?;
    let length = bytes
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);

    Ok((length, pos + count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_tag_forms() {
        assert_eq!(read_tag(&[0x5A], 0), Ok(1));
        assert_eq!(read_tag(&[0x9F, 0x02], 0), Ok(2));
        assert_eq!(read_tag(&[0xDF, 0x81, 0x29], 0), Ok(3));
        assert_eq!(read_tag(&[0x9F], 0), Err(ElementError::TruncatedTag));
        assert_eq!(read_tag(&[0x9F, 0x81], 0), Err(ElementError::TruncatedTag));
        assert_eq!(read_tag(&[0x7F, 0x80, 0x00], 0), Err(ElementError::InvalidTag));
    }

    #[test]
    fn test_read_tag_caps_at_four_bytes() {
        // Continuation bit never clears; the first four bytes are taken
        assert_eq!(read_tag(&[0xDF, 0x81, 0x82, 0x83, 0x84, 0x05], 0), Ok(4));
    }

    #[test]
    fn test_read_length_forms() {
        assert_eq!(read_length(&[0x05], 0), Ok((5, 1)));
        assert_eq!(read_length(&[0x81, 0xB0], 0), Ok((0xB0, 2)));
        assert_eq!(read_length(&[0x82, 0x01, 0x00], 0), Ok((256, 3)));
        assert_eq!(read_length(&[0x84, 0x00, 0x00, 0x01, 0x00], 0), Ok((256, 5)));
        assert_eq!(read_length(&[], 0), Err(ElementError::MissingLength));
        assert_eq!(read_length(&[0x80], 0), Err(ElementError::IndefiniteLength));
        assert_eq!(read_length(&[0x85, 0, 0, 0, 0, 1], 0), Err(ElementError::LengthTooLong(5)));
        assert_eq!(
            read_length(&[0x82, 0x01], 0),
            Err(ElementError::TruncatedLength { needed: 2, available: 1 })
        );
    }

    #[test]
    fn test_read_element_truncated_value() {
        assert_eq!(
            read_element(&[0x5A, 0x08, 0x11, 0x22], 0),
            Err(ElementError::TruncatedValue { length: 8, available: 2 })
        );
    }

    #[test]
    fn test_offsets_are_absolute() {
        let data = [0x00, 0x70, 0x03, 0x5A, 0x01, 0x99];
        let outcome = decode(&data, 1);

        assert!(outcome.is_clean());
        assert_eq!(outcome.bytes_consumed, 5);
        assert_eq!(outcome.nodes[0].offset, 1);
        assert_eq!(outcome.nodes[0].children[0].offset, 3);
    }

    #[test]
    fn test_offset_beyond_buffer_is_an_error() {
        let outcome = decode(&[0x5A, 0x00], 3);
        assert!(outcome.nodes.is_empty());
        assert_eq!(outcome.bytes_consumed, 0);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn test_offset_at_end_is_empty() {
        let outcome = decode(&[0x5A, 0x00], 2);
        assert!(outcome.is_clean());
        assert!(outcome.nodes.is_empty());
        assert_eq!(outcome.bytes_consumed, 0);
    }

    #[test]
    fn test_depth_limit() {
        // 70 { 70 { 5A 01 11 } }
        let data = [0x70, 0x05, 0x70, 0x03, 0x5A, 0x01, 0x11];

        let outcome = decode_with(&data, 0, &DecodeOptions { max_depth: 1 });
        let outer = &outcome.nodes[0];
        assert_eq!(outer.children.len(), 1);
        assert!(outer.children[0].children.is_empty());
        assert_eq!(outer.children[0].value, vec![0x5A, 0x01, 0x11]);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("offset 2"));
        assert!(outcome.errors.is_empty());

        let outcome = decode_with(&data, 0, &DecodeOptions { max_depth: 0 });
        assert!(outcome.nodes[0].children.is_empty());

        let outcome = decode(&data, 0);
        assert!(outcome.is_clean());
        assert_eq!(outcome.nodes[0].children[0].children[0].tag, "5A");
    }

    #[test]
    fn test_depth_warning_does_not_discard_parent_children() {
        // 70 { 5A 01 11, 70 { 5A 01 22 } } with only one level expanded
        let data = [0x70, 0x08, 0x5A, 0x01, 0x11, 0x70, 0x03, 0x5A, 0x01, 0x22];
        let outcome = decode_with(&data, 0, &DecodeOptions { max_depth: 1 });

        assert_eq!(outcome.nodes[0].children.len(), 2);
        assert_eq!(outcome.warnings.len(), 1);
    }
}
