//! CPF check-digit validation
//!
//! A CPF is an 11-digit number whose last two digits are modulo-11 check
//! digits over the preceding nine (and ten) digits. Input coming from a form
//! is usually masked as `000.000.000-00`; [`normalize`] strips the mask.

/// Number of digits in a CPF
pub const CPF_LEN: usize = 11;

/// Strip every non-digit character
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate an unmasked CPF.
///
/// Returns false for any length other than 11, for the eleven "repeated
/// digit" sequences, and when either check digit does not match.
pub fn is_valid(digits: &str) -> bool {
    let digits: Vec<u32> = match digits.chars().map(|c| c.to_digit(10)).collect() {
        Some(d) => d,
        None => return false,
    };

    if digits.len() != CPF_LEN {
        return false;
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Compute the check digit over a 9- or 10-digit prefix.
///
/// Weights run down from `prefix.len() + 1` to 2.
fn check_digit(prefix: &[u32]) -> u32 {
    let top = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (top - i as u32))
        .sum();

    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

/// Render digits with the display mask `000.000.000-00`.
///
/// Anything that is not exactly 11 digits is returned as given.
pub fn format(digits: &str) -> String {
    if digits.len() != CPF_LEN || !digits.chars().all(|c| c.is_ascii_digit()) {
        return digits.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}
