//! EMV Common - Shared codec helpers and tag metadata for EMV processing

pub mod codec;
pub mod registry;
pub mod tags;

pub use codec::{bcd_digits, bcd_digits_padded, parse_hex, to_ascii_lossy, to_hex, HexError};
pub use registry::{country_name, currency_name, scheme_name};
pub use tags::{describe_tag, describe_tag_bytes, is_constructed};
