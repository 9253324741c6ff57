//! Client-side input validation.
//!
//! Runs before any network call. Length is counted in characters of the
//! trimmed text.

use crate::error::ValidationError;

pub const MIN_TEXT_LEN: usize = 3;
pub const MAX_TEXT_LEN: usize = 500;

/// Trim `raw` and check it, first failure wins: empty, too short, too long.
///
/// Returns the trimmed slice on success.
pub fn validate(raw: &str) -> Result<&str, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let len = text.chars().count();
    if len < MIN_TEXT_LEN {
        return Err(ValidationError::TooShort { len });
    }
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong { len });
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(validate(""), Err(ValidationError::EmptyInput));
        assert_eq!(validate(" \t\n "), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn test_length_boundaries() {
        assert_eq!(validate("ab"), Err(ValidationError::TooShort { len: 2 }));
        assert_eq!(validate("abc"), Ok("abc"));

        let max = "a".repeat(MAX_TEXT_LEN);
        assert_eq!(validate(&max), Ok(max.as_str()));

        let over = "a".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(validate(&over), Err(ValidationError::TooLong { len: 501 }));
    }

    #[test]
    fn test_length_measured_after_trim() {
        assert_eq!(validate("   ab   "), Err(ValidationError::TooShort { len: 2 }));

        let padded = format!("  {}  ", "a".repeat(MAX_TEXT_LEN));
        assert!(validate(&padded).is_ok());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // three characters, nine bytes
        assert_eq!(validate("ヘイト"), Ok("ヘイト"));

        let wide = "é".repeat(MAX_TEXT_LEN);
        assert!(validate(&wide).is_ok());
    }

    #[test]
    fn test_every_length_in_range_passes() {
        for len in MIN_TEXT_LEN..=MAX_TEXT_LEN {
            let text = "x".repeat(len);
            assert!(validate(&text).is_ok(), "length {} should pass", len);
        }
        for len in 1..MIN_TEXT_LEN {
            assert_eq!(
                validate(&"x".repeat(len)),
                Err(ValidationError::TooShort { len })
            );
        }
    }
}
