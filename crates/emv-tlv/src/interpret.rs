//! Human-readable rendering of well-known tag values
//!
//! Display only: malformed values produce a fixed placeholder, never an error.

use emv_common::{bcd_digits, bcd_digits_padded, country_name, currency_name, scheme_name, to_ascii_lossy};

const INVALID_DATE: &str = "Invalid date format";
const INVALID_TIME: &str = "Invalid time format";
const INVALID_AMOUNT: &str = "Invalid amount format";
const INVALID_CODE: &str = "Invalid code format";
const INVALID_PAN: &str = "Invalid PAN format";

/// (byte index, bit mask, condition)
type BitFlag = (usize, u8, &'static str);

/// Terminal Verification Results (95), EMV Book 3 Annex C5
const TVR_FLAGS: &[BitFlag] = &[
    (0, 0x80, "Offline data authentication was not performed"),
    (0, 0x40, "SDA failed"),
    (0, 0x20, "ICC data missing"),
    (0, 0x10, "Card appears on terminal exception file"),
    (0, 0x08, "DDA failed"),
    (0, 0x04, "CDA failed"),
    (0, 0x02, "SDA selected"),
    (1, 0x80, "ICC and terminal have different application versions"),
    (1, 0x40, "Expired application"),
    (1, 0x20, "Application not yet effective"),
    (1, 0x10, "Requested service not allowed for card product"),
    (1, 0x08, "New card"),
    (2, 0x80, "Cardholder verification was not successful"),
    (2, 0x40, "Unrecognised CVM"),
    (2, 0x20, "PIN Try Limit exceeded"),
    (2, 0x10, "PIN entry required and PIN pad not present or not working"),
    (2, 0x08, "PIN entry required, PIN pad present, but PIN was not entered"),
    (2, 0x04, "Online PIN entered"),
    (3, 0x80, "Transaction exceeds floor limit"),
    (3, 0x40, "Lower consecutive offline limit exceeded"),
    (3, 0x20, "Upper consecutive offline limit exceeded"),
    (3, 0x10, "Transaction selected randomly for online processing"),
    (3, 0x08, "Merchant forced transaction online"),
    (4, 0x80, "Default TDOL used"),
    (4, 0x40, "Issuer authentication failed"),
    (4, 0x20, "Script processing failed before final GENERATE AC"),
    (4, 0x10, "Script processing failed after final GENERATE AC"),
];

/// Transaction Status Information (9B), EMV Book 3 Annex C6
const TSI_FLAGS: &[BitFlag] = &[
    (0, 0x80, "Offline data authentication was performed"),
    (0, 0x40, "Cardholder verification was performed"),
    (0, 0x20, "Card risk management was performed"),
    (0, 0x10, "Issuer authentication was performed"),
    (0, 0x08, "Terminal risk management was performed"),
    (0, 0x04, "Script processing was performed"),
];

/// Application Interchange Profile (82), EMV Book 3 Annex C1
const AIP_FLAGS: &[BitFlag] = &[
    (0, 0x40, "SDA supported"),
    (0, 0x20, "DDA supported"),
    (0, 0x10, "Cardholder verification is supported"),
    (0, 0x08, "Terminal risk management is to be performed"),
    (0, 0x04, "Issuer authentication is supported"),
    (0, 0x02, "On device cardholder verification is supported"),
    (0, 0x01, "CDA supported"),
    (1, 0x80, "EMV mode is supported"),
];

/// Interpret the value of a well-known tag.
///
/// `tag` is hex, case-insensitive. Tags without an interpretation yield an
/// empty string.
pub fn interpret(tag: &str, value: &[u8]) -> String {
    match tag.trim().to_ascii_uppercase().as_str() {
        "95" => {
            let set = set_flags(value, TVR_FLAGS);
            if set.is_empty() {
                "All verifications passed".to_string()
            } else {
                set.join("; ")
            }
        }
        "9B" => set_flags(value, TSI_FLAGS).join("; "),
        "82" => set_flags(value, AIP_FLAGS).join("; "),
        "5A" => match bcd_digits_padded(value) {
            Some(pan) if !pan.is_empty() => format!("PAN: {}", pan),
            _ => INVALID_PAN.to_string(),
        },
        "5F24" => month_year(value, "Expires"),
        "5F25" => month_year(value, "Effective"),
        "9A" => full_date(value),
        "9F21" => time_of_day(value),
        "9F02" | "9F03" => amount(value),
        "84" | "4F" | "9F06" => aid(value),
        "5F28" | "9F1A" => numeric_code(value, "Country", country_name),
        "5F2A" | "9F42" => numeric_code(value, "Currency", currency_name),
        "50" | "5F20" | "9F12" => format!("Text: {}", to_ascii_lossy(value).trim_end()),
        _ => String::new(),
    }
}

fn set_flags(value: &[u8], table: &[BitFlag]) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(index, mask, _)| value.get(*index).is_some_and(|b| b & mask != 0))
        .map(|(_, _, name)| *name)
        .collect()
}

/// Split BCD digits into two-digit numbers, `None` if there are too few
fn pairs(value: &[u8], count: usize) -> Option<Vec<u8>> {
    let digits = bcd_digits(value)?;
    if digits.len() < count * 2 {
        return None;
    }
    digits.as_bytes()[..count * 2]
        .chunks(2)
        .map(|pair| Some((pair[0] - b'0') * 10 + (pair[1] - b'0')))
        .collect()
}

/// YYMM[DD] rendered as `MM/20YY`
fn month_year(value: &[u8], label: &str) -> String {
    match pairs(value, 2) {
        Some(p) if (1..=12).contains(&p[1]) => format!("{}: {:02}/20{:02}", label, p[1], p[0]),
        _ => INVALID_DATE.to_string(),
    }
}

/// YYMMDD rendered as `DD/MM/20YY`
fn full_date(value: &[u8]) -> String {
    match pairs(value, 3) {
        Some(p) if (1..=12).contains(&p[1]) && (1..=31).contains(&p[2]) => {
            format!("Date: {:02}/{:02}/20{:02}", p[2], p[1], p[0])
        }
        _ => INVALID_DATE.to_string(),
    }
}

/// HHMMSS
fn time_of_day(value: &[u8]) -> String {
    match pairs(value, 3) {
        Some(p) if p[0] < 24 && p[1] < 60 && p[2] < 60 => {
            format!("Time: {:02}:{:02}:{:02}", p[0], p[1], p[2])
        }
        _ => INVALID_TIME.to_string(),
    }
}

fn amount(value: &[u8]) -> String {
    match bcd_digits(value) {
        Some(digits) if !digits.is_empty() => {
            let trimmed = digits.trim_start_matches('0');
            format!("Amount: {}", if trimmed.is_empty() { "0" } else { trimmed })
        }
        _ => INVALID_AMOUNT.to_string(),
    }
}

fn aid(value: &[u8]) -> String {
    let hex = hex::encode_upper(value);
    match scheme_name(value) {
        Some(scheme) => format!("AID: {} ({})", hex, scheme),
        None => format!("AID: {}", hex),
    }
}

/// ISO numeric codes are BCD-encoded (n3 in two bytes)
fn numeric_code(value: &[u8], label: &str, lookup: fn(u16) -> Option<&'static str>) -> String {
    let code = bcd_digits(value)
        .filter(|digits| !digits.is_empty() && digits.len() <= 4)
        .and_then(|digits| digits.parse::<u16>().ok());

    match code {
        Some(code) => match lookup(code) {
            Some(name) => format!("{}: {} ({})", label, code, name),
            None => format!("{}: {}", label, code),
        },
        None => INVALID_CODE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tvr() {
        assert_eq!(interpret("95", &[0x00; 5]), "All verifications passed");
        assert_eq!(
            interpret("95", &[0x80, 0x00, 0x00, 0x80, 0x00]),
            "Offline data authentication was not performed; Transaction exceeds floor limit"
        );
        // Short values only report the bytes present
        assert_eq!(interpret("95", &[0x00, 0x40]), "Expired application");
    }

    #[test]
    fn test_tsi_and_aip() {
        assert_eq!(interpret("9B", &[0x00, 0x00]), "");
        assert_eq!(
            interpret("9B", &[0xE8, 0x00]),
            "Offline data authentication was performed; Cardholder verification was performed; \
             Card risk management was performed; Terminal risk management was performed"
        );
        assert_eq!(interpret("82", &[0x00, 0x00]), "");
        assert_eq!(interpret("82", &[0x19, 0x80]),
            "Cardholder verification is supported; Terminal risk management is to be performed; \
             CDA supported; EMV mode is supported");
    }

    #[test]
    fn test_pan() {
        assert_eq!(
            interpret("5A", &[0x47, 0x61, 0x73, 0x90, 0x12, 0x34, 0x56, 0x78]),
            "PAN: 4761739012345678"
        );
        assert_eq!(interpret("5A", &[0x54, 0x13, 0x33, 0x9F]), "PAN: 5413339");
        assert_eq!(interpret("5A", &[0xAB]), "Invalid PAN format");
    }

    #[test]
    fn test_dates() {
        assert_eq!(interpret("5F24", &[0x27, 0x12, 0x31]), "Expires: 12/2027");
        assert_eq!(interpret("5F25", &[0x23, 0x01, 0x01]), "Effective: 01/2023");
        assert_eq!(interpret("9A", &[0x24, 0x03, 0x15]), "Date: 15/03/2024");
        assert_eq!(interpret("9A", &[0x24, 0x03]), "Invalid date format");
        assert_eq!(interpret("9A", &[0x24, 0x13, 0x01]), "Invalid date format");
        assert_eq!(interpret("5F24", &[0x2A]), "Invalid date format");
        assert_eq!(interpret("5F24", &[]), "Invalid date format");
    }

    #[test]
    fn test_time() {
        assert_eq!(interpret("9F21", &[0x13, 0x45, 0x09]), "Time: 13:45:09");
        assert_eq!(interpret("9F21", &[0x25, 0x00, 0x00]), "Invalid time format");
        assert_eq!(interpret("9F21", &[0x12]), "Invalid time format");
    }

    #[test]
    fn test_amounts() {
        assert_eq!(interpret("9F02", &[0x00, 0x00, 0x00, 0x00, 0x10, 0x00]), "Amount: 1000");
        assert_eq!(interpret("9F03", &[0x00; 6]), "Amount: 0");
        assert_eq!(interpret("9F02", &[0x0A]), "Invalid amount format");
    }

    #[test]
    fn test_aid_and_codes() {
        assert_eq!(
            interpret("84", &[0xA0, 0x00, 0x00, 0x00, 0x03, 0x10, 0x10]),
            "AID: A0000000031010 (Visa)"
        );
        assert_eq!(interpret("4F", &[0xA0, 0x00, 0x00, 0x09, 0x99]), "AID: A000000999");
        assert_eq!(interpret("5F28", &[0x08, 0x40]), "Country: 840 (United States)");
        assert_eq!(interpret("9F1A", &[0x09, 0x99]), "Country: 999");
        assert_eq!(interpret("5F2A", &[0x09, 0x78]), "Currency: 978 (EUR (Euro))");
        assert_eq!(interpret("9F42", &[0xFF, 0xFF]), "Invalid code format");
    }

    #[test]
    fn test_text_and_unknown() {
        assert_eq!(interpret("50", b"VISA CREDIT "), "Text: VISA CREDIT");
        assert_eq!(interpret("9F36", &[0x00, 0x01]), "");
        assert_eq!(interpret("FF", &[]), "");
    }
}
