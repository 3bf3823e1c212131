//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are
//! checked here before any write is staged.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Customer names
pub const MAX_CUSTOMER_NAME_LEN: usize = 200;

/// Product names on order items
pub const MAX_PRODUCT_NAME_LEN: usize = 50;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    let chars = value.chars().count();
    if chars > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({chars} chars, max {max_len})"
        )));
    }
    Ok(())
}
