//! Working set of coupons that are earned but neither used nor expired.
//!
//! Owned by a single planning run. Expiry is swept as a discrete step before
//! each event so the set is never mutated while it is being searched.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::reward::Coupon;
use crate::rules::RewardRules;

#[derive(Debug, Clone, Default)]
pub struct ActiveCoupons {
    by_id: BTreeMap<String, Coupon>,
}

impl ActiveCoupons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coupon: Coupon) {
        self.by_id.insert(coupon.id.clone(), coupon);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Remove and return every unused coupon that has expired by `date`.
    pub fn sweep_expired(&mut self, rules: &RewardRules, date: NaiveDate) -> Vec<Coupon> {
        let expired: Vec<String> = self
            .by_id
            .values()
            .filter(|c| !c.used && rules.is_expired(c, date))
            .map(|c| c.id.clone())
            .collect();

        expired
            .into_iter()
            .filter_map(|id| self.by_id.remove(&id))
            .collect()
    }

    /// Best coupon usable on `date`: highest value, then earliest expiry, then earliest earned.
    pub fn best_candidate(&self, date: NaiveDate) -> Option<&Coupon> {
        self.by_id
            .values()
            .filter(|c| !c.used && c.in_window(date))
            .min_by(|a, b| compare_candidates(a, b))
    }

    /// Remove a coupon from the working set (after redemption).
    pub fn take(&mut self, id: &str) -> Option<Coupon> {
        self.by_id.remove(id)
    }
}

/// `Less` means `a` is preferred.
fn compare_candidates(a: &Coupon, b: &Coupon) -> Ordering {
    b.value
        .partial_cmp(&a.value)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.expiry_date.cmp(&b.expiry_date))
        .then_with(|| a.earned_date.cmp(&b.earned_date))
        .then_with(|| a.id.cmp(&b.id))
}
