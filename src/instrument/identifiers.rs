//! Identifier validators, grounded on spec §6 "Instrument-identifier
//! validators" and `original_source/attestor/instrument/asset.py`'s use of
//! `ISIN.parse`/CUSIP/SEDOL shape checks.

/// Validate a 12-character ISIN: 2-letter country prefix, 9 alphanumeric
/// identifiers, and a trailing Luhn checksum digit computed over the
/// digit-expanded alphanumeric string (each letter A-Z maps to 10-35).
pub fn validate_isin(raw: &str) -> Result<(), String> {
    if raw.len() != 12 {
        return Err(format!("ISIN must be 12 characters, got {} ('{raw}')", raw.len()));
    }
    if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("ISIN must be alphanumeric, got '{raw}'"));
    }
    let prefix = &raw[0..2];
    if !prefix.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(format!("ISIN country prefix must be 2 uppercase letters, got '{prefix}'"));
    }

    let mut digits = String::new();
    for c in raw.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            digits.push_str(&(c.to_ascii_uppercase() as u32 - 'A' as u32 + 10).to_string());
        }
    }

    if !luhn_checksum_valid(&digits) {
        return Err(format!("ISIN '{raw}' fails Luhn checksum"));
    }
    Ok(())
}

fn luhn_checksum_valid(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = true;
    for c in digits.chars().rev() {
        let mut d = c.to_digit(10).expect("digit-expanded string is all ASCII digits");
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}

/// 20-character alphanumeric Legal Entity Identifier.
pub fn validate_lei(raw: &str) -> Result<(), String> {
    if raw.len() != 20 || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("LEI must be 20 alphanumeric characters, got '{raw}'"));
    }
    Ok(())
}

/// 9-character alphanumeric CUSIP.
pub fn validate_cusip(raw: &str) -> Result<(), String> {
    if raw.len() != 9 || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("CUSIP must be 9 alphanumeric characters, got '{raw}'"));
    }
    Ok(())
}

/// 7-character alphanumeric SEDOL.
pub fn validate_sedol(raw: &str) -> Result<(), String> {
    if raw.len() != 7 || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("SEDOL must be 7 alphanumeric characters, got '{raw}'"));
    }
    Ok(())
}

const VALID_EXCHANGE_MICS: &[&str] = &[
    "XNAS", "XNYS", "XLON", "XPAR", "XFRA", "XHKG", "XTKS", "XSHE", "XASE", "BATS", "XCHI",
    "XBOM", "XNSE", "XCME", "XEUR",
];

/// Accept any known MIC, or fall back to accepting any 4-character uppercase
/// alphabetic string (ISO 10383 shape) for forward compatibility.
pub fn validate_exchange_mic(code: &str) -> Result<(), String> {
    if VALID_EXCHANGE_MICS.contains(&code) {
        return Ok(());
    }
    if code.len() == 4 && code.chars().all(|c| c.is_ascii_uppercase()) {
        return Ok(());
    }
    Err(format!(
        "invalid exchange MIC '{code}': must be a known MIC or 4 uppercase letters (ISO 10383 format)"
    ))
}
