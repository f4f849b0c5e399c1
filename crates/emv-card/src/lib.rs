//! EMV Card - ISO 7816 / EMV command construction and response parsing
//!
//! Builds the APDUs an EMV terminal sends and splits card responses into data
//! and status word. Transport to a reader is left to the caller.

pub mod afl;
pub mod aids;
pub mod apdu;

pub use afl::{parse_afl, AflEntry};
pub use apdu::{commands, ApduCommand, ApduError, ApduResponse};
