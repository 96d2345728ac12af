//! couponwise-core: coupon reward rules and the weekly shopping planner

pub mod active;
pub mod budget;
pub mod entry;
pub mod money;
pub mod planner;
pub mod reward;
pub mod rules;
pub mod schedule;
pub mod tracking;

pub use active::ActiveCoupons;
pub use budget::{parse_budget, validate_budget, BudgetError, MAX_BUDGET, MIN_BUDGET};
pub use entry::{EntryStatus, ShoppingEntry};
pub use planner::{events_per_period, plan_schedule, Planner, HORIZON_WEEKS};
pub use reward::{Coupon, CouponTier, PolicyError, RewardPolicy, TierRule, MAX_POLICY_DAYS};
pub use rules::RewardRules;
pub use schedule::ScheduleResult;
pub use tracking::{complete_entry, mark_missed_before, TrackingError, TrackingSummary};
