//! Coupon (reward) types and the two-tier reward policy table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest activation delay or validity window a policy may declare.
pub const MAX_POLICY_DAYS: i64 = 366;

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("{field} must be between 0 and {max} days, got {value}")]
    DaysOutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },
    #[error("{0} value must be a non-negative amount")]
    InvalidValue(&'static str),
    #[error("tier minimums must satisfy 0 < small ({small}) < large ({large})")]
    InvalidMinimums { small: f64, large: f64 },
}

/// Reward tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CouponTier {
    #[serde(rename = "small")]
    Small,
    #[serde(rename = "large")]
    Large,
}

impl CouponTier {
    pub fn label(&self) -> &'static str {
        match self {
            CouponTier::Small => "small",
            CouponTier::Large => "large",
        }
    }
}

/// Fixed terms of one tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TierRule {
    /// Discount granted when redeemed
    pub value: f64,
    /// Spend needed both to earn this tier and to redeem it
    pub min_spend: f64,
    /// Days the coupon stays redeemable once active
    pub validity_days: i64,
}

/// The reward program table. Swappable without touching planning logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RewardPolicy {
    /// Days between earning and first use
    #[serde(default = "default_activation_delay")]
    pub activation_delay_days: i64,
    pub small: TierRule,
    pub large: TierRule,
}

fn default_activation_delay() -> i64 {
    1
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            activation_delay_days: 1,
            small: TierRule {
                value: 5.0,
                min_spend: 25.0,
                validity_days: 6,
            },
            large: TierRule {
                value: 10.0,
                min_spend: 50.0,
                validity_days: 9,
            },
        }
    }
}

impl RewardPolicy {
    /// Reject tables that would break coupon date arithmetic or tier ordering.
    pub fn validate(&self) -> Result<(), PolicyError> {
        check_days("activation_delay_days", self.activation_delay_days)?;
        check_days("small.validity_days", self.small.validity_days)?;
        check_days("large.validity_days", self.large.validity_days)?;

        for (tier, rule) in [("small", &self.small), ("large", &self.large)] {
            if !rule.value.is_finite() || rule.value < 0.0 {
                return Err(PolicyError::InvalidValue(tier));
            }
        }

        let (small, large) = (self.small.min_spend, self.large.min_spend);
        if !(small.is_finite() && large.is_finite() && 0.0 < small && small < large) {
            return Err(PolicyError::InvalidMinimums { small, large });
        }
        Ok(())
    }

    /// Terms for a tier
    pub fn rule(&self, tier: CouponTier) -> &TierRule {
        match tier {
            CouponTier::Small => &self.small,
            CouponTier::Large => &self.large,
        }
    }
}

fn check_days(field: &'static str, value: i64) -> Result<(), PolicyError> {
    if (0..=MAX_POLICY_DAYS).contains(&value) {
        Ok(())
    } else {
        Err(PolicyError::DaysOutOfRange {
            field,
            value,
            max: MAX_POLICY_DAYS,
        })
    }
}

/// One earned coupon.
///
/// `active_date = earned_date + activation delay`, `expiry_date = active_date + validity`.
/// A used coupon always carries `used_date` within `[active_date, expiry_date]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    pub id: String,
    pub tier: CouponTier,
    pub value: f64,
    pub min_spend: f64,
    pub earned_date: NaiveDate,
    pub active_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub used: bool,
    #[serde(default)]
    pub used_date: Option<NaiveDate>,
}

impl Coupon {
    /// True if `date` falls inside the redemption window (inclusive both ends)
    pub fn in_window(&self, date: NaiveDate) -> bool {
        date >= self.active_date && date <= self.expiry_date
    }

    /// Record redemption. A coupon is only ever redeemed once.
    pub fn redeem(&mut self, date: NaiveDate) {
        debug_assert!(!self.used, "coupon {} redeemed twice", self.id);
        self.used = true;
        self.used_date = Some(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_table() {
        let policy = RewardPolicy::default();
        assert_eq!(policy.rule(CouponTier::Small).value, 5.0);
        assert_eq!(policy.rule(CouponTier::Small).min_spend, 25.0);
        assert_eq!(policy.rule(CouponTier::Large).value, 10.0);
        assert_eq!(policy.rule(CouponTier::Large).min_spend, 50.0);
        assert_eq!(policy.large.validity_days, 9);
    }

    #[test]
    fn test_default_policy_is_valid() {
        assert_eq!(RewardPolicy::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_out_of_range_days() {
        let mut policy = RewardPolicy::default();
        policy.small.validity_days = 100_000_000;
        assert_eq!(
            policy.validate(),
            Err(PolicyError::DaysOutOfRange {
                field: "small.validity_days",
                value: 100_000_000,
                max: MAX_POLICY_DAYS,
            })
        );

        let mut policy = RewardPolicy::default();
        policy.activation_delay_days = -1;
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::DaysOutOfRange { field: "activation_delay_days", .. })
        ));

        let mut policy = RewardPolicy::default();
        policy.large.validity_days = -3;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_amounts() {
        let mut policy = RewardPolicy::default();
        policy.large.value = -10.0;
        assert_eq!(policy.validate(), Err(PolicyError::InvalidValue("large")));

        let mut policy = RewardPolicy::default();
        policy.small.min_spend = 60.0;
        assert!(matches!(policy.validate(), Err(PolicyError::InvalidMinimums { .. })));

        let mut policy = RewardPolicy::default();
        policy.small.min_spend = 0.0;
        assert!(matches!(policy.validate(), Err(PolicyError::InvalidMinimums { .. })));

        let mut policy = RewardPolicy::default();
        policy.large.min_spend = f64::NAN;
        assert!(matches!(policy.validate(), Err(PolicyError::InvalidMinimums { .. })));
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        let json = serde_json::to_string(&CouponTier::Large).unwrap();
        assert_eq!(json, "\"large\"");
    }

    #[test]
    fn test_policy_activation_delay_defaults_when_missing() {
        let json = r#"{
            "small": {"value": 3.0, "min_spend": 20.0, "validity_days": 5},
            "large": {"value": 8.0, "min_spend": 40.0, "validity_days": 7}
        }"#;
        let policy: RewardPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.activation_delay_days, 1);
        assert_eq!(policy.small.min_spend, 20.0);
    }
}
