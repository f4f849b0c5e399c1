//! Field formatters for human-readable output

use clap::ValueEnum;
use emv_tlv::TlvNode;

/// Values longer than this are truncated in human-readable mode
const MAX_INLINE_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatMode {
    /// Raw hex output
    Raw,
    /// Human-readable formatted output
    Human,
}

impl FormatMode {
    pub fn description(&self) -> &'static str {
        match self {
            FormatMode::Raw => "Raw",
            FormatMode::Human => "Human-Readable",
        }
    }
}

/// Format a node's value based on its tag type
pub fn format_value(node: &TlvNode, mode: FormatMode) -> String {
    let value = node.value.as_slice();
    if mode == FormatMode::Raw {
        return hex::encode_upper(value);
    }

    match node.tag.as_bytes() {
        // Text fields
        [0x50] | [0x5F, 0x20] | [0x9F, 0x12] | [0x5F, 0x2D] | [0x9F, 0x4E] => {
            match std::str::from_utf8(value) {
                Ok(text) if text.chars().all(|c| !c.is_control()) => {
                    format!("\"{}\"", text.trim_end())
                }
                _ => hex::encode_upper(value),
            }
        }

        // Track 2 Data, D separates PAN and expiry
        [0x57] | [0x9F, 0x6B] => hex::encode_upper(value).replace('D', " | "),

        // Large binary fields (certificates, etc.)
        _ if value.len() > MAX_INLINE_BYTES => format!(
            "{}... ({} bytes total)",
            hex::encode_upper(&value[..MAX_INLINE_BYTES]),
            value.len()
        ),

        _ => hex::encode_upper(value),
    }
}

/// Render a decoded tree, one line per node plus interpretation lines
pub fn render_nodes(nodes: &[TlvNode], mode: FormatMode, indent: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for node in nodes {
        render_node(node, mode, indent, &mut lines);
    }
    lines
}

fn render_node(node: &TlvNode, mode: FormatMode, indent: usize, lines: &mut Vec<String>) {
    let indent_str = " ".repeat(indent * 2);

    let header = match mode {
        FormatMode::Raw => format!("{}[{}] ({} bytes)", indent_str, node.tag, node.length),
        FormatMode::Human => {
            let name = match node.description() {
                "" => "Unknown Tag",
                name => name,
            };
            format!("{}[{}] {} ({} bytes)", indent_str, node.tag, name, node.length)
        }
    };

    if !node.children.is_empty() {
        lines.push(header);
        for child in &node.children {
            render_node(child, mode, indent + 1, lines);
        }
        return;
    }

    if node.value.is_empty() {
        lines.push(header);
    } else {
        lines.push(format!("{}: {}", header, format_value(node, mode)));
    }

    if mode == FormatMode::Human {
        let interpretation = node.interpretation();
        if !interpretation.is_empty() {
            lines.push(format!("{}  => {}", indent_str, interpretation));
        }
    }
}
