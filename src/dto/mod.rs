//! DTO modules that bridge services with the JSON API.

use validator::ValidationError;

pub mod company;
pub mod employee;
pub mod parameters;

/// Rejects text that is empty once surrounding whitespace is removed. Stored
/// values are trimmed, so a blank value would be saved as an empty string.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
