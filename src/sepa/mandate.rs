use chrono::{DateTime, Utc};

use crate::core::{Member, SepaMandateStatus};

/// Strip all whitespace from an IBAN and uppercase it.
pub fn sanitize_iban(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Validate an IBAN: structure plus the full ISO 7064 MOD-97 checksum.
///
/// Accepts whitespace and lowercase input (sanitized first). German IBANs
/// must be exactly 22 characters.
pub fn validate_iban(iban: &str) -> bool {
    let iban = sanitize_iban(iban);
    let bytes = iban.as_bytes();

    if bytes.len() < 15 || bytes.len() > 34 {
        return false;
    }
    if !bytes[..2].iter().all(u8::is_ascii_uppercase) {
        return false;
    }
    if !bytes[2..4].iter().all(u8::is_ascii_digit) {
        return false;
    }
    if !bytes[4..]
        .iter()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        return false;
    }
    if iban.starts_with("DE") && bytes.len() != 22 {
        return false;
    }

    mod97(&iban) == 1
}

/// ISO 7064 MOD-97-10 remainder: move the first four characters to the end,
/// map A-Z to 10-35, and fold the digit string modulo 97.
fn mod97(iban: &str) -> u32 {
    let rearranged = iban.bytes().skip(4).chain(iban.bytes().take(4));
    let mut remainder: u32 = 0;
    for b in rearranged {
        if b.is_ascii_digit() {
            remainder = (remainder * 10 + u32::from(b - b'0')) % 97;
        } else {
            remainder = (remainder * 100 + u32::from(b - b'A') + 10) % 97;
        }
    }
    remainder
}

/// Validate a BIC: 6 letters, 2 alphanumerics, optionally 3 more (8 or 11
/// characters). Whitespace and case are normalized first.
pub fn validate_bic(bic: &str) -> bool {
    let bic: String = bic
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let bytes = bic.as_bytes();

    if bytes.len() != 8 && bytes.len() != 11 {
        return false;
    }
    bytes[..6].iter().all(u8::is_ascii_uppercase)
        && bytes[6..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Format an IBAN for display in blocks of four characters.
pub fn format_iban(iban: &str) -> String {
    let clean = sanitize_iban(iban);
    let mut out = String::with_capacity(clean.len() + clean.len() / 4);
    for (i, c) in clean.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Generate a mandate reference: `MAND-{member_number}-{timestamp}` with the
/// issue timestamp encoded base36. The timestamp is injected so the result
/// is reproducible.
pub fn generate_mandate_reference(member_number: &str, issued_at: DateTime<Utc>) -> String {
    let millis = issued_at.timestamp_millis().max(0) as u64;
    format!("MAND-{}-{}", member_number, base36_upper(millis))
}

fn base36_upper(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    digits.iter().rev().collect()
}

/// Whether a member can be debited: active mandate, complete account data,
/// and an IBAN that passes the checksum.
pub fn is_mandate_valid(member: &Member) -> bool {
    if member.sepa_mandate_status != Some(SepaMandateStatus::Active) {
        return false;
    }

    let present = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
    if !present(&member.iban)
        || !present(&member.account_holder)
        || !present(&member.sepa_mandate_reference)
    {
        return false;
    }

    member.iban.as_deref().is_some_and(validate_iban)
}
