//! Planned shopping entries (purchase events).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reward::Coupon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Planned,
    Completed,
    Missed,
}

/// One planned transaction.
///
/// `savings > 0` only when `used_coupon` is present, and then equals its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingEntry {
    pub id: String,
    pub date: NaiveDate,
    /// Dollars, rounded to cents.
    pub planned_amount: f64,
    /// Filled in by reconciliation, never by the planner.
    #[serde(default)]
    pub actual_amount: Option<f64>,
    #[serde(default)]
    pub used_coupon: Option<Coupon>,
    #[serde(default)]
    pub earned_coupon: Option<Coupon>,
    pub savings: f64,
    #[serde(default)]
    pub status: EntryStatus,
}

impl ShoppingEntry {
    pub fn new(id: impl Into<String>, date: NaiveDate, planned_amount: f64) -> Self {
        Self {
            id: id.into(),
            date,
            planned_amount,
            actual_amount: None,
            used_coupon: None,
            earned_coupon: None,
            savings: 0.0,
            status: EntryStatus::Planned,
        }
    }

    pub fn with_used_coupon(mut self, coupon: Coupon) -> Self {
        self.savings = coupon.value;
        self.used_coupon = Some(coupon);
        self
    }

    pub fn with_earned_coupon(mut self, coupon: Coupon) -> Self {
        self.earned_coupon = Some(coupon);
        self
    }

    /// Amount actually paid at the till once the coupon is applied
    pub fn net_amount(&self) -> f64 {
        (self.planned_amount - self.savings).max(0.0)
    }
}
