use crate::generation::errors::ValidationError;

/// Minimum request length, in characters after trimming.
pub const MIN_REQUEST_CHARS: usize = 10;
/// Maximum request length, in characters after trimming.
pub const MAX_REQUEST_CHARS: usize = 500;

/// Check a request text and return it trimmed.
///
/// Length is counted in characters, not bytes.
pub fn validate_request(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    let actual = trimmed.chars().count();

    if actual == 0 {
        return Err(ValidationError::Empty);
    }
    if actual < MIN_REQUEST_CHARS {
        return Err(ValidationError::TooShort {
            min: MIN_REQUEST_CHARS,
            actual,
        });
    }
    if actual > MAX_REQUEST_CHARS {
        return Err(ValidationError::TooLong {
            max: MAX_REQUEST_CHARS,
            actual,
        });
    }

    Ok(trimmed)
}
