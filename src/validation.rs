//! Validation helper functions for command arguments
//!
//! These parsers are used as clap value parsers, so their error messages are
//! what the user sees for a bad argument.

use crate::error::{DeskError, DeskResult};
use chrono::NaiveDate;

/// Parse a date in YYYY-MM-DD format
///
/// # Arguments
/// * `date_str` - Date string in YYYY-MM-DD format
///
/// # Returns
/// Result containing parsed NaiveDate or error
pub fn parse_date(date_str: &str) -> DeskResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        DeskError::invalid(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        ))
    })
}

/// Parse a ticket price typed by the user
///
/// Rejects anything that is not a finite, non-negative number.
pub fn parse_price(text: &str) -> DeskResult<f64> {
    let invalid = || DeskError::invalid(format!("Invalid ticket price '{}'", text));
    let price: f64 = text.trim().parse().map_err(|_| invalid())?;
    if !price.is_finite() || price < 0.0 {
        return Err(invalid());
    }
    Ok(price)
}

/// Parse a 1-based task position
pub fn parse_position(text: &str) -> DeskResult<usize> {
    match text.trim().parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(DeskError::invalid(format!(
            "Invalid task number '{}'. Use the number shown by 'todo list' (starting at 1)",
            text
        ))),
    }
}
