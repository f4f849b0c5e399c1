pub mod apdu;
pub mod decode;
pub mod describe;
pub mod response;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use emv_common::HexError;
use emv_tlv::{DecodeOptions, ParseOutcome, ShowOption, DEFAULT_MAX_DEPTH};
use thiserror::Error;

use crate::formatters::{render_nodes, FormatMode};

/// Errors that end a command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Provide hex data either as an argument or with --file, not both")]
    AmbiguousInput,

    #[error("No input: pass hex data as an argument or use --file")]
    MissingInput,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid hex input: {0}")]
    Hex(#[from] HexError),

    #[error("Invalid APDU: {0}")]
    Apdu(#[from] emv_card::ApduError),
}

/// Where the hex input comes from
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Hex data (spaces, ':' and '-' separators allowed)
    pub hex: Option<String>,

    /// Read hex data from a file instead
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    pub fn read_bytes(&self) -> Result<Vec<u8>, CommandError> {
        let text = match (&self.hex, &self.file) {
            (Some(_), Some(_)) => return Err(CommandError::AmbiguousInput),
            (Some(hex), None) => hex.clone(),
            (None, Some(path)) => std::fs::read_to_string(path).map_err(|source| CommandError::Io {
                path: path.clone(),
                source,
            })?,
            (None, None) => return Err(CommandError::MissingInput),
        };
        Ok(emv_common::parse_hex(&text)?)
    }
}

/// Which tags to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowArg {
    /// Every decoded tag
    All,
    /// Only tags with a known EMV name
    Described,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Byte offset to start decoding at
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Maximum number of nested templates to expand
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Which tags to display
    #[arg(long, value_enum, default_value_t = ShowArg::All)]
    pub show: ShowArg,

    /// Only display these tags (and their parents); repeatable
    #[arg(long = "tag", value_name = "HEX")]
    pub tags: Vec<String>,
}

impl DecodeArgs {
    pub fn options(&self) -> DecodeOptions {
        DecodeOptions {
            max_depth: self.max_depth,
        }
    }

    pub fn show_option(&self) -> ShowOption {
        if !self.tags.is_empty() {
            return ShowOption::Tags(self.tags.clone());
        }
        match self.show {
            ShowArg::All => ShowOption::All,
            ShowArg::Described => ShowOption::Described,
        }
    }
}

#[derive(Args, Debug)]
pub struct ApduArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Tags in hex, e.g. 9F02
    #[arg(required = true)]
    pub tags: Vec<String>,

    /// Value to interpret (hex); applied to every tag given
    #[arg(long, value_name = "HEX")]
    pub value: Option<String>,
}

/// Print a decode result: tag tree, then a summary with warnings and errors
pub(crate) fn print_outcome(outcome: &ParseOutcome, show: &ShowOption, total: usize, mode: FormatMode) {
    let nodes = emv_tlv::filter_nodes(&outcome.nodes, show);
    for line in render_nodes(&nodes, mode, 1) {
        println!("{}", line);
    }

    println!(
        "\nDecoded {} top-level tag(s), consumed {} of {} bytes",
        outcome.nodes.len(),
        outcome.bytes_consumed,
        total
    );

    if !outcome.warnings.is_empty() {
        println!("\nWarnings ({}):", outcome.warnings.len());
        for warning in &outcome.warnings {
            println!("  - {}", warning);
        }
    }

    if !outcome.errors.is_empty() {
        println!("\nErrors:");
        for error in &outcome.errors {
            println!("  - {}", error);
        }
    }
}
