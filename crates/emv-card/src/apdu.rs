//! APDU (Application Protocol Data Unit) command and response handling
//!
//! Short APDUs only (ISO 7816-4 cases 1 to 4, Lc and Le on one byte).

use thiserror::Error;

/// Errors raised while parsing APDU bytes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApduError {
    #[error("APDU header needs 4 bytes, got {0}")]
    ShortHeader(usize),

    #[error("Lc announces {expected} data bytes but {actual} follow")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Extended length APDUs are not supported")]
    ExtendedLength,

    #[error("Command data is {0} bytes, a short APDU holds at most 255")]
    DataTooLong(usize),

    #[error("Response needs at least 2 status bytes, got {0}")]
    ShortResponse(usize),
}

/// APDU response containing data and status word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduResponse {
    /// Response data (without status word)
    pub data: Vec<u8>,
    /// Status word SW1
    pub sw1: u8,
    /// Status word SW2
    pub sw2: u8,
}

impl ApduResponse {
    /// Split raw response bytes into data and status word
    pub fn parse(rapdu: &[u8]) -> Result<Self, ApduError> {
        if rapdu.len() < 2 {
            return Err(ApduError::ShortResponse(rapdu.len()));
        }

        let sw1 = rapdu[rapdu.len() - 2];
        let sw2 = rapdu[rapdu.len() - 1];
        let data = rapdu[..rapdu.len() - 2].to_vec();

        Ok(Self { data, sw1, sw2 })
    }

    /// Check if the response indicates success (9000)
    pub fn is_success(&self) -> bool {
        self.sw1 == 0x90 && self.sw2 == 0x00
    }

    /// Get the full status word as a 16-bit value
    pub fn status_word(&self) -> u16 {
        ((self.sw1 as u16) << 8) | (self.sw2 as u16)
    }

    /// Get status word as hex string (e.g., "9000")
    pub fn status_string(&self) -> String {
        format!("{:02X}{:02X}", self.sw1, self.sw2)
    }

    /// Meaning of the status word per ISO 7816-4 and EMV Book 1
    pub fn status_description(&self) -> String {
        match (self.sw1, self.sw2) {
            (0x90, 0x00) => "Success".to_string(),
            (0x61, n) => format!("{} more bytes available (GET RESPONSE)", n),
            (0x62, 0x83) => "Selected file invalidated".to_string(),
            (0x63, n) if n & 0xF0 == 0xC0 => format!("Verification failed, {} tries left", n & 0x0F),
            (0x63, 0x00) => "Verification failed".to_string(),
            (0x64, 0x00) => "State of non-volatile memory unchanged".to_string(),
            (0x65, 0x81) => "Memory failure".to_string(),
            (0x67, 0x00) => "Wrong length".to_string(),
            (0x68, 0x82) => "Secure messaging not supported".to_string(),
            (0x69, 0x83) => "Authentication method blocked".to_string(),
            (0x69, 0x84) => "Referenced data invalidated".to_string(),
            (0x69, 0x85) => "Conditions of use not satisfied".to_string(),
            (0x69, 0x86) => "Command not allowed (no current EF)".to_string(),
            (0x6A, 0x81) => "Function not supported".to_string(),
            (0x6A, 0x82) => "File or application not found".to_string(),
            (0x6A, 0x83) => "Record not found".to_string(),
            (0x6A, 0x86) => "Incorrect parameters P1-P2".to_string(),
            (0x6A, 0x88) => "Referenced data not found".to_string(),
            (0x6C, n) => format!("Wrong Le, {} bytes available", n),
            (0x6D, 0x00) => "Instruction code not supported".to_string(),
            (0x6E, 0x00) => "Class not supported".to_string(),
            (0x6F, 0x00) => "No precise diagnosis".to_string(),
            _ => "Unknown status".to_string(),
        }
    }
}

/// APDU command builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduCommand {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    pub data: Vec<u8>,
    pub le: Option<u8>,
}

impl ApduCommand {
    /// Create a new APDU command
    pub fn new(cla: u8, ins: u8, p1: u8, p2: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: Vec::new(),
            le: None,
        }
    }

    /// Set command data
    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Set expected response length
    pub fn le(mut self, le: u8) -> Self {
        self.le = Some(le);
        self
    }

    /// Build the APDU command bytes
    pub fn build(&self) -> Result<Vec<u8>, ApduError> {
        if self.data.len() > 255 {
            return Err(ApduError::DataTooLong(self.data.len()));
        }

        let mut apdu = vec![self.cla, self.ins, self.p1, self.p2];

        if !self.data.is_empty() {
            apdu.push(self.data.len() as u8);
            apdu.extend_from_slice(&self.data);
        }

        if let Some(le) = self.le {
            apdu.push(le);
        }

        Ok(apdu)
    }

    /// Parse a short command APDU
    pub fn parse(bytes: &[u8]) -> Result<Self, ApduError> {
        if bytes.len() < 4 {
            return Err(ApduError::ShortHeader(bytes.len()));
        }

        let command = Self::new(bytes[0], bytes[1], bytes[2], bytes[3]);
        let body = &bytes[4..];

        match body.len() {
            // Case 1
            0 => Ok(command),
            // Case 2
            1 => Ok(command.le(body[0])),
            _ => {
                let lc = body[0] as usize;
                if lc == 0 {
                    // 00 followed by more bytes is the extended length marker
                    return Err(ApduError::ExtendedLength);
                }
                let rest = &body[1..];
                match rest.len().checked_sub(lc) {
                    // Case 3
                    Some(0) => Ok(command.data(rest.to_vec())),
                    // Case 4
                    Some(1) => Ok(command.data(rest[..lc].to_vec()).le(rest[lc])),
                    _ => Err(ApduError::LengthMismatch {
                        expected: lc,
                        actual: rest.len(),
                    }),
                }
            }
        }
    }

    /// ISO 7816-4 case number (1 to 4)
    pub fn case(&self) -> u8 {
        match (self.data.is_empty(), self.le.is_some()) {
            (true, false) => 1,
            (true, true) => 2,
            (false, false) => 3,
            (false, true) => 4,
        }
    }

    /// Name of the instruction for well-known EMV and ISO commands
    pub fn instruction_name(&self) -> &'static str {
        match (self.cla & 0xF0, self.ins) {
            (_, 0xA4) => "SELECT",
            (0x80, 0xA8) => "GET PROCESSING OPTIONS",
            (_, 0xB2) => "READ RECORD",
            (_, 0xB0) => "READ BINARY",
            (_, 0x88) => "INTERNAL AUTHENTICATE",
            (_, 0x82) => "EXTERNAL AUTHENTICATE",
            (0x80, 0xAE) => "GENERATE APPLICATION CRYPTOGRAM",
            (0x80, 0xCA) => "GET DATA",
            (_, 0x84) => "GET CHALLENGE",
            (_, 0x20) => "VERIFY",
            (_, 0xC0) => "GET RESPONSE",
            (0x80, 0x1E) => "APPLICATION BLOCK",
            (0x80, 0x18) => "APPLICATION UNBLOCK",
            (0x80, 0x24) => "PIN CHANGE/UNBLOCK",
            _ => "UNKNOWN",
        }
    }
}

/// Common EMV APDU commands
pub mod commands {
    use super::ApduCommand;

    /// SELECT command (by name/AID)
    pub fn select(aid: &[u8]) -> ApduCommand {
        ApduCommand::new(0x00, 0xA4, 0x04, 0x00)
            .data(aid.to_vec())
            .le(0x00)
    }

    /// GET PROCESSING OPTIONS command
    pub fn get_processing_options(pdol_data: Vec<u8>) -> ApduCommand {
        ApduCommand::new(0x80, 0xA8, 0x00, 0x00)
            .data(pdol_data)
            .le(0x00)
    }

    /// READ RECORD command
    pub fn read_record(record_number: u8, sfi: u8) -> ApduCommand {
        let p2 = (sfi << 3) | 0x04;
        ApduCommand::new(0x00, 0xB2, record_number, p2).le(0x00)
    }

    /// INTERNAL AUTHENTICATE command (for DDA)
    pub fn internal_authenticate(data: Vec<u8>) -> ApduCommand {
        ApduCommand::new(0x00, 0x88, 0x00, 0x00)
            .data(data)
            .le(0x00)
    }

    /// GET DATA command for a one or two byte tag
    pub fn get_data(tag: &[u8]) -> ApduCommand {
        match tag {
            [single] => ApduCommand::new(0x80, 0xCA, 0x00, *single).le(0x00),
            [first, second, ..] => ApduCommand::new(0x80, 0xCA, *first, *second).le(0x00),
            [] => ApduCommand::new(0x80, 0xCA, 0x00, 0x00).le(0x00),
        }
    }

    /// GET CHALLENGE command (8-byte unpredictable number)
    pub fn get_challenge() -> ApduCommand {
        ApduCommand::new(0x00, 0x84, 0x00, 0x00).le(0x00)
    }

    /// GENERATE AC command; `reference_control` is P1 (AAC 0x00, TC 0x40, ARQC 0x80, CDA bit 0x10)
    pub fn generate_ac(reference_control: u8, cdol_data: Vec<u8>) -> ApduCommand {
        ApduCommand::new(0x80, 0xAE, reference_control, 0x00)
            .data(cdol_data)
            .le(0x00)
    }
}
