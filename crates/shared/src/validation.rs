//! Common validation utilities.

use std::borrow::Cow;

use chrono::NaiveTime;
use validator::ValidationError;

/// Minimum number of digits accepted in a phone number.
const MIN_PHONE_DIGITS: usize = 9;

/// Maximum number of digits accepted in a phone number.
const MAX_PHONE_DIGITS: usize = 15;

/// Builds a `ValidationError` with a user-facing message.
pub fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// True when the value is empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// True when the trimmed value contains any whitespace.
pub fn has_inner_whitespace(value: &str) -> bool {
    value.trim().chars().any(char::is_whitespace)
}

/// Keeps only the ASCII digits of a phone number.
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Validates that a phone number carries 9 to 15 digits.
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(field_error(
            "phone_required",
            "Nomor telepon tidak boleh kosong.",
        ));
    }

    let digits = phone_digits(value).len();
    if (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        Ok(())
    } else {
        Err(field_error(
            "phone_format",
            "Format nomor telepon tidak valid (9-15 digit).",
        ))
    }
}

/// Parses an `HH:MM` time of day.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Validates that a value is an `HH:MM` time of day.
pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    match parse_time_of_day(value) {
        Some(_) => Ok(()),
        None => Err(field_error("time_format", "Format waktu harus JJ:MM.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_has_inner_whitespace() {
        assert!(has_inner_whitespace("SAVE 10"));
        assert!(has_inner_whitespace("SAVE\t10"));
        assert!(!has_inner_whitespace("  SAVE10  "));
    }

    #[test]
    fn test_phone_digits() {
        assert_eq!(phone_digits("+62 812-3456-7890"), "6281234567890");
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("081234567").is_ok());
        assert!(validate_phone_number("0812 3456 7890").is_ok());
        assert!(validate_phone_number("12345678").is_err());
        assert!(validate_phone_number("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_phone_number_error_messages() {
        let err = validate_phone_number("").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Nomor telepon tidak boleh kosong."
        );

        let err = validate_phone_number("123").unwrap_err();
        assert_eq!(err.code, "phone_format");
    }

    #[test]
    fn test_validate_time_of_day() {
        assert!(validate_time_of_day("08:00").is_ok());
        assert!(validate_time_of_day("23:59").is_ok());
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("8 pagi").is_err());
    }

    #[test]
    fn test_field_error_carries_message() {
        let err = field_error("custom", "Pesan");
        assert_eq!(err.code, "custom");
        assert_eq!(err.message.unwrap().to_string(), "Pesan");
    }
}
