//! National-identifier checksum validation.
//!
//! Runs at the write boundary before an identifier is encrypted and stored.
//! The number is 11 digits, must not start with 0, and carries two checksum
//! digits: the 10th is derived from a weighted sum of the first nine, the
//! 11th from the plain sum of the first ten.

/// Validates a national identity number against its format and checksum
/// rules. Accepts only an exact 11-digit string; strip formatting first.
#[must_use]
pub fn validate_identifier(identifier: &str) -> bool {
    if identifier.len() != 11 || !identifier.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if identifier.as_bytes()[0] == b'0' {
        return false;
    }

    let digits: Vec<u32> = identifier
        .bytes()
        .map(|b| u32::from(b - b'0'))
        .collect();

    let odd_sum: u32 = digits[0..9].iter().step_by(2).sum();
    let even_sum: u32 = digits[1..8].iter().step_by(2).sum();
    // 7 * odd positions minus even positions, mod 10. The difference can go
    // negative, so keep the subtraction in modular form.
    let digit10 = ((odd_sum * 7) % 10 + 10 - even_sum % 10) % 10;
    if digit10 != digits[9] {
        return false;
    }

    let digit11: u32 = digits[..10].iter().sum::<u32>() % 10;
    digit11 == digits[10]
}
