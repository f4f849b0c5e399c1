//! Lookup tables for codes that appear inside EMV data

/// ISO 3166-1 numeric country codes (subset)
pub fn country_name(code: u16) -> Option<&'static str> {
    match code {
        36 => Some("Australia"),
        56 => Some("Belgium"),
        76 => Some("Brazil"),
        124 => Some("Canada"),
        156 => Some("China"),
        208 => Some("Denmark"),
        250 => Some("France"),
        276 => Some("Germany"),
        344 => Some("Hong Kong"),
        356 => Some("India"),
        372 => Some("Ireland"),
        380 => Some("Italy"),
        392 => Some("Japan"),
        410 => Some("South Korea"),
        484 => Some("Mexico"),
        528 => Some("Netherlands"),
        554 => Some("New Zealand"),
        578 => Some("Norway"),
        616 => Some("Poland"),
        643 => Some("Russia"),
        702 => Some("Singapore"),
        710 => Some("South Africa"),
        724 => Some("Spain"),
        752 => Some("Sweden"),
        756 => Some("Switzerland"),
        784 => Some("United Arab Emirates"),
        826 => Some("United Kingdom"),
        840 => Some("United States"),
        _ => None,
    }
}

/// ISO 4217 numeric currency codes (subset)
pub fn currency_name(code: u16) -> Option<&'static str> {
    match code {
        36 => Some("AUD (Australian Dollar)"),
        124 => Some("CAD (Canadian Dollar)"),
        156 => Some("CNY (Chinese Yuan)"),
        208 => Some("DKK (Danish Krone)"),
        344 => Some("HKD (Hong Kong Dollar)"),
        356 => Some("INR (Indian Rupee)"),
        392 => Some("JPY (Japanese Yen)"),
        410 => Some("KRW (South Korean Won)"),
        484 => Some("MXN (Mexican Peso)"),
        578 => Some("NOK (Norwegian Krone)"),
        643 => Some("RUB (Russian Ruble)"),
        702 => Some("SGD (Singapore Dollar)"),
        752 => Some("SEK (Swedish Krona)"),
        756 => Some("CHF (Swiss Franc)"),
        784 => Some("AED (UAE Dirham)"),
        826 => Some("GBP (Pound Sterling)"),
        840 => Some("USD (US Dollar)"),
        978 => Some("EUR (Euro)"),
        985 => Some("PLN (Polish Zloty)"),
        986 => Some("BRL (Brazilian Real)"),
        _ => None,
    }
}

/// Payment scheme owning a Registered Application Provider Identifier.
///
/// Only the first five bytes of `aid` are considered.
pub fn scheme_name(aid: &[u8]) -> Option<&'static str> {
    let rid = aid.get(..5)?;
    match rid {
        [0xA0, 0x00, 0x00, 0x00, 0x03] => Some("Visa"),
        [0xA0, 0x00, 0x00, 0x00, 0x04] => Some("Mastercard"),
        [0xA0, 0x00, 0x00, 0x00, 0x25] => Some("American Express"),
        [0xA0, 0x00, 0x00, 0x00, 0x65] => Some("JCB"),
        [0xA0, 0x00, 0x00, 0x01, 0x52] => Some("Discover"),
        [0xA0, 0x00, 0x00, 0x03, 0x33] => Some("UnionPay"),
        [0xA0, 0x00, 0x00, 0x05, 0x24] => Some("RuPay"),
        [0xA0, 0x00, 0x00, 0x00, 0x42] => Some("CB"),
        [0xA0, 0x00, 0x00, 0x00, 0x59] => Some("Girocard"),
        [0xA0, 0x00, 0x00, 0x01, 0x21] => Some("Dankort"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        assert_eq!(country_name(840), Some("United States"));
        assert_eq!(currency_name(978), Some("EUR (Euro)"));
        assert_eq!(country_name(999), None);
    }

    #[test]
    fn test_scheme_name() {
        assert_eq!(scheme_name(&[0xA0, 0x00, 0x00, 0x00, 0x03, 0x10, 0x10]), Some("Visa"));
        assert_eq!(scheme_name(&[0xA0, 0x00, 0x00, 0x00, 0x04]), Some("Mastercard"));
        assert_eq!(scheme_name(&[0xA0, 0x00, 0x00]), None);
        assert_eq!(scheme_name(&[0xA0, 0x00, 0x00, 0x99, 0x99]), None);
    }
}
