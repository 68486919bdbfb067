//! Human-shareable booking codes
//!
//! Codes are cosmetic: they are never used as keys and collisions are not checked.

use rand::distributions::Alphanumeric;
use rand::Rng;

pub const BOOKING_CODE_PREFIX: &str = "PARK-";
const CODE_LEN: usize = 8;

/// `PARK-` followed by eight uppercase letters or digits
pub fn generate_booking_code() -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{}{}", BOOKING_CODE_PREFIX, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_has_prefix_and_uppercase_token() {
        let code = generate_booking_code();
        let token = code.strip_prefix(BOOKING_CODE_PREFIX).expect("prefix");
        assert_eq!(token.len(), CODE_LEN);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn codes_vary() {
        let a = generate_booking_code();
        let b = generate_booking_code();
        let c = generate_booking_code();
        assert!(a != b || b != c);
    }
}
