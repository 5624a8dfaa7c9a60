//! Payload checks applied at the HTTP boundary before anything reaches a
//! repository. Each function returns `CoreError::Validation` with a message
//! suitable for the client.

use crate::error::CoreError;

/// Longest accepted value for short text fields (titles, names, types, roles).
pub const MAX_SHORT_TEXT_LEN: usize = 255;

/// Reject empty or whitespace-only required text, and overly long values.
pub fn validate_required_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_SHORT_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_SHORT_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Same as [`validate_required_text`] but only when a value was supplied.
pub fn validate_optional_text(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_required_text(field, v),
        None => Ok(()),
    }
}

/// Ratings may be absent, but when present must be a finite number.
pub fn validate_rating(rating: Option<f64>) -> Result<(), CoreError> {
    match rating {
        Some(r) if !r.is_finite() => Err(CoreError::Validation(
            "rating must be a finite number".to_string(),
        )),
        _ => Ok(()),
    }
}
