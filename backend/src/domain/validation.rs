//! Input checks shared by the entity services.

use super::errors::{DomainError, DomainResult};

/// Trimmed, non-empty text
pub fn require_text(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Finite and strictly positive
pub fn require_positive(field: &str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::validation(format!("{} must be positive", field)));
    }
    Ok(value)
}

/// Finite, any sign
pub fn require_finite(field: &str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{} must be a number", field)));
    }
    Ok(value)
}
