//! Decoded TLV values

use std::fmt;

use crate::interpret::interpret;

/// A BER-TLV tag, 1 to 4 bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(Vec<u8>);

impl Tag {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Canonical uppercase hex form, e.g. `"9F02"`
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.0)
    }

    /// Name from the EMV dictionary, empty if unknown
    pub fn description(&self) -> &'static str {
        emv_common::describe_tag_bytes(&self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.to_hex().eq_ignore_ascii_case(other.trim())
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// One decoded TLV element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvNode {
    pub tag: Tag,
    /// Declared payload length
    pub length: usize,
    /// Payload, exactly `length` bytes
    pub value: Vec<u8>,
    /// Bit 6 of the first tag byte, or an EMV template
    pub constructed: bool,
    /// Nested elements; only filled for constructed tags with a well-formed payload
    pub children: Vec<TlvNode>,
    /// Tag, length and value exactly as they appeared in the input
    pub raw_bytes: Vec<u8>,
    /// Offset of the first tag byte in the decoded buffer
    pub offset: usize,
}

impl TlvNode {
    pub fn description(&self) -> &'static str {
        self.tag.description()
    }

    /// Readable rendering of the value, empty for tags without one
    pub fn interpretation(&self) -> String {
        interpret(&self.tag.to_hex(), &self.value)
    }

    /// Depth-first search for a tag, starting with this node
    pub fn find(&self, tag: &str) -> Option<&TlvNode> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(tag))
    }

    /// Find a direct child by tag (non-recursive)
    pub fn find_child(&self, tag: &str) -> Option<&TlvNode> {
        self.children.iter().find(|child| child.tag == tag)
    }
}

/// Result of decoding a buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Top-level elements in input order
    pub nodes: Vec<TlvNode>,
    /// Bytes advanced from the start offset before decoding stopped
    pub bytes_consumed: usize,
    /// Conditions that stopped decoding
    pub errors: Vec<String>,
    /// Skipped bytes and unexpanded templates
    pub warnings: Vec<String>,
}

impl ParseOutcome {
    /// True when nothing was skipped and nothing stopped decoding
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Depth-first search across all top-level nodes
    pub fn find(&self, tag: &str) -> Option<&TlvNode> {
        self.nodes.iter().find_map(|node| node.find(tag))
    }
}
