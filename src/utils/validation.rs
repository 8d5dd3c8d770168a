use crate::error::{AppError, AppResult};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Trim and enforce a character-length range on a required text field.
pub fn required_text(field: &str, value: &str, max: usize) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{field} is required")));
    }
    if trimmed.chars().count() > max {
        return Err(AppError::ValidationError(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Optional text: blank becomes `None`.
pub fn optional_text(field: &str, value: Option<&str>, max: usize) -> AppResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.chars().count() > max => Err(AppError::ValidationError(format!(
            "{field} must be at most {max} characters"
        ))),
        Some(v) => Ok(Some(v.to_string())),
    }
}

pub fn int_in_range(field: &str, value: i64, min: i64, max: i64) -> AppResult<i32> {
    if value < min || value > max {
        return Err(AppError::ValidationError(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    // bounds are always within i32 at the call sites
    i32::try_from(value).map_err(|_| AppError::ValidationError(format!("{field} is out of range")))
}

/// Parse a non-negative money amount and normalise it to two decimal places.
pub fn money(field: &str, value: &str) -> AppResult<String> {
    let amount = Decimal::from_str(value.trim())
        .map_err(|_| AppError::ValidationError(format!("{field} must be a decimal amount")))?;
    if amount.is_sign_negative() {
        return Err(AppError::ValidationError(format!(
            "{field} must not be negative"
        )));
    }
    Ok(format_money(amount))
}

pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}
