//! Money calculation utilities using rust_decimal for precision
//!
//! All total-amount arithmetic is done using `Decimal` internally, then
//! converted to `f64` for storage/serialization. Deltas applied to an
//! order total therefore never accumulate floating-point drift.

use rust_decimal::prelude::*;

use crate::utils::AppError;

#[cfg(test)]
mod tests;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price per item
const MAX_UNIT_PRICE: f64 = 1_000_000.0;
/// Maximum allowed caller-supplied line total
const MAX_TOTAL_PRICE: f64 = 100_000_000.0;

/// Convert f64 to Decimal for calculation
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(value, "Failed to convert f64 to Decimal, using 0");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp(DECIMAL_PLACES)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with range-validated inputs is representable as f64
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate the numeric fields of an order item request.
///
/// The line total is caller-supplied and deliberately not derived from
/// quantity x unit_price; only range checks apply.
pub fn validate_item_amounts(
    quantity: i32,
    unit_price: f64,
    total_price: f64,
) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::validation(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }

    require_finite(unit_price, "unit_price")?;
    if !(0.0..=MAX_UNIT_PRICE).contains(&unit_price) {
        return Err(AppError::validation(format!(
            "unit_price must be in [0, {MAX_UNIT_PRICE}], got {unit_price}"
        )));
    }

    require_finite(total_price, "total_price")?;
    if !(0.0..=MAX_TOTAL_PRICE).contains(&total_price) {
        return Err(AppError::validation(format!(
            "total_price must be in [0, {MAX_TOTAL_PRICE}], got {total_price}"
        )));
    }

    Ok(())
}

/// Validate a caller-supplied order total (direct override path).
pub fn validate_total_amount(total_amount: f64) -> Result<(), AppError> {
    require_finite(total_amount, "total_amount")?;
    if total_amount < 0.0 {
        return Err(AppError::validation(format!(
            "total_amount must be non-negative, got {total_amount}"
        )));
    }
    Ok(())
}
