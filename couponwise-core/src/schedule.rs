//! Aggregate output of one planning run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::ShoppingEntry;
use crate::reward::Coupon;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Weekly budget the schedule was planned for
    pub budget: f64,
    pub start_date: NaiveDate,
    /// `budget × horizon` (zero for an unusable budget)
    pub total_budget: f64,
    /// Ordered by date
    pub entries: Vec<ShoppingEntry>,
    pub total_spend: f64,
    pub total_savings: f64,
    /// Value of coupons that expired unredeemed
    pub missed_savings: f64,
    pub coupons_earned: usize,
    pub coupons_used: usize,
    /// Every coupon earned during the run, in final state
    #[serde(default)]
    pub rewards: Vec<Coupon>,
    /// Ids of coupons swept as expired
    #[serde(default)]
    pub expired_coupon_ids: Vec<String>,
}

impl ScheduleResult {
    /// A schedule with no entries and zero totals.
    pub fn empty(budget: f64, start_date: NaiveDate) -> Self {
        Self {
            budget,
            start_date,
            total_budget: 0.0,
            entries: Vec::new(),
            total_spend: 0.0,
            total_savings: 0.0,
            missed_savings: 0.0,
            coupons_earned: 0,
            coupons_used: 0,
            rewards: Vec::new(),
            expired_coupon_ids: Vec::new(),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn coupons_missed(&self) -> usize {
        self.expired_coupon_ids.len()
    }

    pub fn find_coupon(&self, id: &str) -> Option<&Coupon> {
        self.rewards.iter().find(|c| c.id == id)
    }

    pub fn find_entry(&self, id: &str) -> Option<&ShoppingEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Savings as a share of planned spend (0.0 - 1.0)
    pub fn savings_rate(&self) -> f64 {
        if self.total_spend > 0.0 {
            self.total_savings / self.total_spend
        } else {
            0.0
        }
    }
}
