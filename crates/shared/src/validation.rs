//! Common validation utilities.

use chrono::NaiveDate;
use validator::ValidationError;

lazy_static::lazy_static! {
    static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9][0-9 ().-]{5,19}$").unwrap();
}

/// Validates a phone number: optional leading `+`, then digits with common
/// separators, 6 to 20 characters total.
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_phone_number");
        err.message = Some("Phone number must contain 6-20 digits and separators only".into());
        Err(err)
    }
}

/// Validates that free text contains no control characters.
pub fn validate_plain_text(text: &str) -> Result<(), ValidationError> {
    if text.chars().any(|c| c.is_control() && c != '\n' && c != '\t') {
        let mut err = ValidationError::new("control_characters");
        err.message = Some("Text must not contain control characters".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that an end date does not precede a start date.
/// Either side may be absent; only a fully specified, inverted range fails.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            let mut err = ValidationError::new("inverted_date_range");
            err.message = Some("End date must not be before start date".into());
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Phone number tests
    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("+41 79 123 45 67").is_ok());
        assert!(validate_phone_number("0791234567").is_ok());
        assert!(validate_phone_number("(022) 345-6789").is_err()); // starts with separator
        assert!(validate_phone_number("1 (022) 345-6789").is_ok());
        assert!(validate_phone_number("call me").is_err());
        assert!(validate_phone_number("").is_err());
    }

    #[test]
    fn test_validate_phone_number_too_short() {
        assert!(validate_phone_number("12345").is_err());
        assert!(validate_phone_number("123456").is_ok());
    }

    #[test]
    fn test_validate_phone_number_too_long() {
        assert!(validate_phone_number("123456789012345678901").is_err());
        assert!(validate_phone_number("12345678901234567890").is_ok());
    }

    #[test]
    fn test_validate_phone_number_error_message() {
        let err = validate_phone_number("abc").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Phone number must contain 6-20 digits and separators only"
        );
    }

    // Plain text tests
    #[test]
    fn test_validate_plain_text() {
        assert!(validate_plain_text("Bathroom renovation, 2nd floor").is_ok());
        assert!(validate_plain_text("multi\nline\tnote").is_ok());
        assert!(validate_plain_text("bad\u{0000}byte").is_err());
        assert!(validate_plain_text("escape\u{001b}[0m").is_err());
    }

    #[test]
    fn test_validate_plain_text_empty() {
        assert!(validate_plain_text("").is_ok());
    }

    // Date range tests
    #[test]
    fn test_validate_date_range_ordered() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1);
        let end = NaiveDate::from_ymd_opt(2025, 3, 15);
        assert!(validate_date_range(start, end).is_ok());
    }

    #[test]
    fn test_validate_date_range_same_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1);
        assert!(validate_date_range(day, day).is_ok());
    }

    #[test]
    fn test_validate_date_range_inverted() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 15);
        let end = NaiveDate::from_ymd_opt(2025, 3, 1);
        let err = validate_date_range(start, end).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "End date must not be before start date"
        );
    }

    #[test]
    fn test_validate_date_range_partial() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1);
        assert!(validate_date_range(day, None).is_ok());
        assert!(validate_date_range(None, day).is_ok());
        assert!(validate_date_range(None, None).is_ok());
    }
}
