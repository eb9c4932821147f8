//! Input validation helpers
//!
//! Centralized text length constants and lookup-key validation shared by the
//! CRUD handlers. DTO-level constraints (email/phone patterns, ranges) live on
//! the create/update payloads as `validator` derives; the helpers here cover
//! path/query lookup keys that never pass through a DTO.

use crate::AppError;
use std::sync::LazyLock;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu, menu item, table, guest name, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Phone numbers: optional leading '+', 7 to 15 digits
pub static PHONE_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone regex"));

// ── DTO validation ──────────────────────────────────────────────────

/// Run a payload's declarative `validator` constraints, folding the first
/// violation into an [`AppError`] with field details.
pub fn validate_dto(dto: &impl validator::Validate) -> Result<(), AppError> {
    dto.validate().map_err(|errors| {
        let mut err = AppError::validation("Validation failed");
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                err = err.with_detail(field.to_string(), message);
            }
        }
        err
    })
}

// ── Validation helpers (lookup keys) ────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate an email lookup key (non-empty, plausible shape)
pub fn validate_email_key(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(AppError::validation("Valid email is required"));
    }
    Ok(())
}

/// Validate a phone lookup key against the shared phone pattern
pub fn validate_phone_key(phone: &str) -> Result<(), AppError> {
    if !PHONE_REGEX.is_match(phone) {
        return Err(AppError::validation("Valid phone number is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Dinner", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_email_key() {
        assert!(validate_email_key("guest@example.com").is_ok());
        assert!(validate_email_key("").is_err());
        assert!(validate_email_key("no-at-sign").is_err());
        assert!(validate_email_key("@leading").is_err());
    }

    #[test]
    fn test_phone_key() {
        assert!(validate_phone_key("+34123456789").is_ok());
        assert!(validate_phone_key("1234567").is_ok());
        assert!(validate_phone_key("12-34").is_err());
        assert!(validate_phone_key("123").is_err());
    }
}
