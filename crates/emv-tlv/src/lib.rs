//! EMV TLV - Tolerant BER-TLV decoding of EMV card data
//!
//! [`decode`] turns a byte buffer into a tree of [`TlvNode`]s. Decoding never
//! fails: problems are reported in [`ParseOutcome::warnings`] and
//! [`ParseOutcome::errors`], and every element that could be read is returned.
//!
//! ```
//! let data = hex::decode("70055A03112233").unwrap();
//! let outcome = emv_tlv::decode(&data, 0);
//!
//! assert!(outcome.is_clean());
//! let pan = outcome.find("5A").unwrap();
//! assert_eq!(pan.value, vec![0x11, 0x22, 0x33]);
//! ```

pub mod decoder;
pub mod filter;
pub mod interpret;
pub mod node;

pub use decoder::{decode, decode_with, DecodeOptions, DEFAULT_MAX_DEPTH};
pub use emv_common::describe_tag;
pub use filter::{filter_nodes, ShowOption};
pub use interpret::interpret;
pub use node::{ParseOutcome, Tag, TlvNode};
