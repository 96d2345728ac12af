//! Reward-Rule Engine: tier classification and coupon lifecycle checks.
//!
//! Every operation is a pure function of its inputs and the policy table.

use chrono::{Duration, NaiveDate};

use crate::reward::{Coupon, CouponTier, RewardPolicy};

/// Applies a `RewardPolicy` to spends and dates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RewardRules {
    policy: RewardPolicy,
}

impl RewardRules {
    pub fn new(policy: RewardPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RewardPolicy {
        &self.policy
    }

    /// Tier earned by a single spend, if any. Large is checked first.
    pub fn tier_for_spend(&self, spend: f64) -> Option<CouponTier> {
        if spend >= self.policy.large.min_spend {
            Some(CouponTier::Large)
        } else if spend >= self.policy.small.min_spend {
            Some(CouponTier::Small)
        } else {
            None
        }
    }

    /// Coupon earned by spending `spend` on `earned`, if the spend crosses a tier threshold.
    pub fn reward_for_spend(
        &self,
        id: impl Into<String>,
        spend: f64,
        earned: NaiveDate,
    ) -> Option<Coupon> {
        self.tier_for_spend(spend)
            .map(|tier| self.build_reward(id, tier, earned))
    }

    /// Build a fresh, unused coupon of `tier` earned on `earned`.
    pub fn build_reward(&self, id: impl Into<String>, tier: CouponTier, earned: NaiveDate) -> Coupon {
        let rule = self.policy.rule(tier);
        let active_date = earned + Duration::days(self.policy.activation_delay_days);
        Coupon {
            id: id.into(),
            tier,
            value: rule.value,
            min_spend: rule.min_spend,
            earned_date: earned,
            active_date,
            expiry_date: active_date + Duration::days(rule.validity_days),
            used: false,
            used_date: None,
        }
    }

    /// True iff the coupon is unused, `spend` meets its minimum, and `date` is in its window.
    pub fn is_redeemable(&self, coupon: &Coupon, spend: f64, date: NaiveDate) -> bool {
        !coupon.used && spend >= coupon.min_spend && coupon.in_window(date)
    }

    /// True iff `date` is strictly after the coupon's expiry.
    pub fn is_expired(&self, coupon: &Coupon, date: NaiveDate) -> bool {
        date > coupon.expiry_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_threshold_classification() {
        let rules = RewardRules::default();
        let cases = [
            (0.0, None),
            (24.99, None),
            (25.0, Some(CouponTier::Small)),
            (49.99, Some(CouponTier::Small)),
            (50.0, Some(CouponTier::Large)),
            (320.0, Some(CouponTier::Large)),
        ];
        for (spend, expected) in cases {
            let got = rules.reward_for_spend("c", spend, day(1)).map(|c| c.tier);
            assert_eq!(got, expected, "spend {spend}");
        }
    }

    #[test]
    fn test_activation_and_expiry_small() {
        let rules = RewardRules::default();
        let c = rules.build_reward("c1", CouponTier::Small, day(5));
        assert_eq!(c.active_date, day(6));
        assert_eq!(c.expiry_date, day(12));
        assert_eq!(c.value, 5.0);
        assert_eq!(c.min_spend, 25.0);
        assert!(!c.used);
        assert!(c.used_date.is_none());
    }

    #[test]
    fn test_activation_and_expiry_large() {
        let rules = RewardRules::default();
        let c = rules.build_reward("c1", CouponTier::Large, day(5));
        assert_eq!(c.active_date, day(6));
        assert_eq!(c.expiry_date, day(15));
    }

    #[test]
    fn test_never_redeemable_same_day() {
        let rules = RewardRules::default();
        let c = rules.build_reward("c1", CouponTier::Small, day(5));
        assert!(!rules.is_redeemable(&c, 100.0, day(5)));
        assert!(rules.is_redeemable(&c, 100.0, day(6)));
    }

    #[test]
    fn test_redeemable_window_is_inclusive() {
        let rules = RewardRules::default();
        let c = rules.build_reward("c1", CouponTier::Small, day(5));
        assert!(rules.is_redeemable(&c, 25.0, day(12)));
        assert!(!rules.is_redeemable(&c, 25.0, day(13)));
        assert!(!rules.is_redeemable(&c, 24.99, day(8)));
    }

    #[test]
    fn test_used_coupon_not_redeemable() {
        let rules = RewardRules::default();
        let mut c = rules.build_reward("c1", CouponTier::Large, day(1));
        c.redeem(day(3));
        assert!(!rules.is_redeemable(&c, 80.0, day(4)));
        assert_eq!(c.used_date, Some(day(3)));
    }

    #[test]
    fn test_expired_strictly_after() {
        let rules = RewardRules::default();
        let c = rules.build_reward("c1", CouponTier::Small, day(5));
        assert!(!rules.is_expired(&c, day(12)));
        assert!(rules.is_expired(&c, day(13)));
    }

    #[test]
    fn test_custom_policy_is_honoured() {
        let mut policy = RewardPolicy::default();
        policy.small.min_spend = 30.0;
        policy.activation_delay_days = 2;
        let rules = RewardRules::new(policy);
        assert_eq!(rules.tier_for_spend(25.0), None);
        let c = rules.build_reward("c1", CouponTier::Small, day(1));
        assert_eq!(c.active_date, day(3));
        assert_eq!(c.expiry_date, day(9));
    }
}
