//! Validation of user-entered weekly budgets.

use thiserror::Error;

use crate::money::round_cents;

/// Smallest weekly budget accepted from a user.
pub const MIN_BUDGET: f64 = 20.0;
/// Largest weekly budget accepted from a user.
pub const MAX_BUDGET: f64 = 500.0;

#[derive(Debug, Error, PartialEq)]
pub enum BudgetError {
    #[error("budget '{0}' is not a number")]
    NotANumber(String),
    #[error("budget must be greater than zero")]
    NotPositive,
    #[error("budget must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
}

/// Parse a weekly budget typed by the user, e.g. `"110"` or `" 42.50 "`.
pub fn parse_budget(input: &str) -> Result<f64, BudgetError> {
    let trimmed = input.trim().trim_start_matches('$');
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| BudgetError::NotANumber(input.trim().to_string()))?;
    validate_budget(amount)
}

/// Check an already-numeric budget against the accepted range.
pub fn validate_budget(amount: f64) -> Result<f64, BudgetError> {
    if !amount.is_finite() {
        return Err(BudgetError::NotANumber(amount.to_string()));
    }
    if amount <= 0.0 {
        return Err(BudgetError::NotPositive);
    }
    if !(MIN_BUDGET..=MAX_BUDGET).contains(&amount) {
        return Err(BudgetError::OutOfRange {
            min: MIN_BUDGET,
            max: MAX_BUDGET,
        });
    }
    Ok(round_cents(amount))
}
