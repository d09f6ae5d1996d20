//! Common validation helpers for use cases.

use herodex_domain::{HERO_NAME_MAX, REAL_NAME_MAX};
use herodex_shared::HeroInput;

/// Validation error type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field_name} is required")]
    Missing { field_name: &'static str },

    #[error("{field_name} cannot be empty")]
    Empty { field_name: &'static str },

    #[error("{field_name} exceeds maximum length of {max}")]
    TooLong { field_name: &'static str, max: usize },

    #[error("{field_name} is invalid: {reason}")]
    Invalid {
        field_name: &'static str,
        reason: String,
    },
}

impl ValidationError {
    /// Wire name of the offending field.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Missing { field_name }
            | Self::Empty { field_name }
            | Self::TooLong { field_name, .. }
            | Self::Invalid { field_name, .. } => *field_name,
        }
    }
}

/// Validate a string is non-empty after trimming.
pub fn require_non_empty(value: &str, field_name: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field_name });
    }
    Ok(())
}

/// Validate a string doesn't exceed max length, counted in characters.
pub fn require_max_length(
    value: &str,
    max: usize,
    field_name: &'static str,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field_name, max });
    }
    Ok(())
}

/// Validate a measurement is a finite number above zero.
pub fn require_positive(value: f64, field_name: &'static str) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::Invalid {
            field_name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// Validate a list carries at least one element.
pub fn require_non_empty_list<T>(
    values: &[T],
    field_name: &'static str,
) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::Empty { field_name });
    }
    Ok(())
}

/// Check every field of a hero payload, collecting all violations.
pub fn validate_hero_input(input: &HeroInput) -> Result<(), Vec<ValidationError>> {
    let checks = [
        require_non_empty(&input.real_name, "realName"),
        require_max_length(&input.real_name, REAL_NAME_MAX, "realName"),
        require_non_empty(&input.hero_name, "heroName"),
        require_max_length(&input.hero_name, HERO_NAME_MAX, "heroName"),
        require_positive(input.height, "height"),
        require_positive(input.weight, "weight"),
        require_non_empty_list(&input.superpower_ids, "superpowerIds"),
    ];

    let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
