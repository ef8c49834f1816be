//! Field validation for tracker records.
//!
//! # Invariants
//! - Validation is pure: no I/O, no store access.
//! - The same rules run at the input boundary (re-prompt) and in the
//!   repositories (reject before SQL).

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

// Simple `local@domain.tld` shape; not a full RFC 5322 check.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern must compile")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    BlankField(&'static str),
    InvalidEmail(String),
    /// Amount is negative, NaN or infinite.
    InvalidAmount(&'static str),
    InvalidStatus(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email format: `{value}`"),
            Self::InvalidAmount(field) => {
                write!(f, "{field} must be a finite, non-negative number")
            }
            Self::InvalidStatus(value) => write!(
                f,
                "invalid status `{value}`; expected Pending|In Progress|Completed"
            ),
        }
    }
}

impl Error for ValidationError {}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub fn validate_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount(field))
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_amount, validate_email, validate_required, ValidationError};

    #[test]
    fn email_pattern_accepts_simple_addresses() {
        assert!(validate_email("a@acme.com").is_ok());
        assert!(validate_email("first.last+tag@mail.example.co.ke").is_ok());
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        for bad in ["", "acme.com", "a@", "@acme.com", "a@acme", "a b@acme.com", "a@@acme.com"] {
            assert_eq!(
                validate_email(bad),
                Err(ValidationError::InvalidEmail(bad.to_string())),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn required_rejects_whitespace_only() {
        assert_eq!(
            validate_required("name", "   "),
            Err(ValidationError::BlankField("name"))
        );
        assert!(validate_required("name", "Acme").is_ok());
    }

    #[test]
    fn amount_allows_zero_and_rejects_negative_or_nan() {
        assert!(validate_amount("hours_worked", 0.0).is_ok());
        assert!(validate_amount("hours_worked", 7.5).is_ok());
        assert_eq!(
            validate_amount("rate_per_hour", -1.0),
            Err(ValidationError::InvalidAmount("rate_per_hour"))
        );
        assert!(validate_amount("rate_per_hour", f64::NAN).is_err());
        assert!(validate_amount("rate_per_hour", f64::INFINITY).is_err());
    }
}
