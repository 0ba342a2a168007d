//! Input validation for unit codes and assignment fields.

use crate::error::CoreError;

/// Maximum length of a unit code (e.g. `CS101`).
pub const MAX_UNIT_CODE_LEN: usize = 32;

/// Maximum length of an assignment title.
pub const MAX_ASSIGNMENT_TITLE_LEN: usize = 200;

/// Validate a unit code taken from a URL path.
///
/// Codes are non-empty, at most [`MAX_UNIT_CODE_LEN`] characters, and
/// restricted to ASCII alphanumerics, `-` and `_`.
pub fn validate_unit_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() {
        return Err(CoreError::Validation("Unit code must not be empty".into()));
    }
    if code.len() > MAX_UNIT_CODE_LEN {
        return Err(CoreError::Validation(format!(
            "Unit code must be at most {MAX_UNIT_CODE_LEN} characters"
        )));
    }
    if let Some(bad) = code
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(CoreError::Validation(format!(
            "Unit code contains invalid character '{bad}'"
        )));
    }
    Ok(())
}

/// Validate an assignment title. Leading/trailing whitespace is ignored.
pub fn validate_assignment_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Assignment title must not be empty".into(),
        ));
    }
    if trimmed.chars().count() > MAX_ASSIGNMENT_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Assignment title must be at most {MAX_ASSIGNMENT_TITLE_LEN} characters"
        )));
    }
    Ok(())
}
