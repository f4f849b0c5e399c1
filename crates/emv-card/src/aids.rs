//! Known EMV Application Identifiers (AIDs)

/// PSE (Payment System Environment)
pub const PSE: &[u8] = b"1PAY.SYS.DDF01";

/// PPSE (Proximity Payment System Environment)
pub const PPSE: &[u8] = b"2PAY.SYS.DDF01";

/// Visa
pub const VISA: &[u8] = &[0xA0, 0x00, 0x00, 0x00, 0x03, 0x10, 0x10];

/// Visa Electron
pub const VISA_ELECTRON: &[u8] = &[0xA0, 0x00, 0x00, 0x00, 0x03, 0x20, 0x10];

/// Mastercard
pub const MASTERCARD: &[u8] = &[0xA0, 0x00, 0x00, 0x00, 0x04, 0x10, 0x10];

/// Maestro
pub const MAESTRO: &[u8] = &[0xA0, 0x00, 0x00, 0x00, 0x04, 0x30, 0x60];

/// American Express
pub const AMEX: &[u8] = &[0xA0, 0x00, 0x00, 0x00, 0x25, 0x01];

/// Payment scheme for an AID, looked up by its RID (first 5 bytes)
pub fn scheme_name(aid: &[u8]) -> Option<&'static str> {
    emv_common::scheme_name(aid)
}

/// Whether `name` is a PSE or PPSE directory name rather than an application AID
pub fn is_directory(name: &[u8]) -> bool {
    name == PSE || name == PPSE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aids() {
        assert_eq!(VISA.len(), 7);
        assert_eq!(MASTERCARD.len(), 7);
        assert_eq!(PSE, b"1PAY.SYS.DDF01");
        assert!(is_directory(PPSE));
        assert!(!is_directory(VISA));
    }

    #[test]
    fn test_scheme_names() {
        assert_eq!(scheme_name(VISA_ELECTRON), Some("Visa"));
        assert_eq!(scheme_name(MAESTRO), Some("Mastercard"));
        assert_eq!(scheme_name(AMEX), Some("American Express"));
    }
}
