//! Schedule planner: spreads a weekly budget over a fixed horizon of shopping
//! trips, greedily redeeming the best live coupon at each trip and nudging
//! spends toward reward thresholds.

use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use crate::active::ActiveCoupons;
use crate::entry::ShoppingEntry;
use crate::money::{reached, round_cents};
use crate::reward::Coupon;
use crate::rules::RewardRules;
use crate::schedule::ScheduleResult;

/// Number of weekly periods in a plan.
pub const HORIZON_WEEKS: u32 = 10;

/// Length of one period in days.
pub const PERIOD_DAYS: i64 = 7;

/// Period budgets at or above this are split into two trips.
pub const SPLIT_THRESHOLD: f64 = 90.0;

/// Spends this close below a tier minimum get raised to it.
const NUDGE_WINDOW: f64 = 5.0;

/// Trips planned in a period with the given budget.
///
/// Budgets of 100+ and [90, 100) both get two trips; [75, 90) and anything
/// lower get one.
pub fn events_per_period(period_budget: f64) -> usize {
    if period_budget >= SPLIT_THRESHOLD { 2 } else { 1 }
}

/// Day offset of trip `slot` from the period start.
pub fn day_offset(event_count: usize, slot: usize) -> i64 {
    if event_count > 1 {
        ((6 / (event_count - 1)) * slot) as i64
    } else {
        0
    }
}

/// Stateless planner. Every call to [`Planner::plan`] starts from an empty
/// coupon set, so identical inputs give identical schedules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    rules: RewardRules,
}

impl Planner {
    pub fn new(rules: RewardRules) -> Self {
        Self { rules }
    }

    /// Plan `HORIZON_WEEKS` weeks of shopping starting on `start`.
    ///
    /// A budget that is not finite or not positive yields an empty schedule.
    pub fn plan(&self, budget: f64, start: NaiveDate) -> ScheduleResult {
        if !budget.is_finite() || budget <= 0.0 {
            debug!(budget, "unusable budget, returning empty schedule");
            return ScheduleResult::empty(budget, start);
        }

        let total_budget = budget * HORIZON_WEEKS as f64;

        let mut active = ActiveCoupons::new();
        let mut ledger: Vec<Coupon> = Vec::new();
        let mut expired_coupon_ids: Vec<String> = Vec::new();
        let mut entries: Vec<ShoppingEntry> = Vec::new();

        let mut total_spend = 0.0;
        let mut total_savings = 0.0;
        let mut missed_savings = 0.0;

        'periods: for week in 0..HORIZON_WEEKS {
            let period_start = start + Duration::days(PERIOD_DAYS * week as i64);
            let period_budget = budget.min(total_budget - total_spend);
            if period_budget <= 0.0 {
                break;
            }

            let event_count = events_per_period(period_budget);
            let mut period_spent = 0.0;

            for slot in 0..event_count {
                let date = period_start + Duration::days(day_offset(event_count, slot));

                for coupon in active.sweep_expired(&self.rules, date) {
                    debug!(coupon = %coupon.id, expiry = %coupon.expiry_date, %date, "coupon expired unused");
                    missed_savings += coupon.value;
                    expired_coupon_ids.push(coupon.id);
                }

                let remaining_slots = (event_count - slot) as f64;
                let mut spend = (period_budget - period_spent) / remaining_slots;

                let candidate = active
                    .best_candidate(date)
                    .filter(|c| self.rules.is_redeemable(c, spend, date))
                    .map(|c| c.id.clone());

                let mut used: Option<Coupon> = None;
                if let Some(id) = candidate {
                    if let Some(mut coupon) = active.take(&id) {
                        coupon.redeem(date);
                        spend = spend.max(coupon.min_spend);
                        if let Some(record) = ledger.iter_mut().find(|c| c.id == coupon.id) {
                            *record = coupon.clone();
                        }
                        used = Some(coupon);
                    }
                }

                let remaining_overall = total_budget - total_spend;
                let spend = round_cents(self.nudge_toward_threshold(spend, remaining_overall));

                // Sizing only raises a spend or clamps it to a remainder the
                // pre-nudge spend already fit under.
                debug_assert!(used.as_ref().is_none_or(|c| spend >= c.min_spend));

                let earned = self
                    .rules
                    .reward_for_spend(coupon_id(ledger.len() + 1), spend, date);

                let mut entry = ShoppingEntry::new(entry_id(entries.len() + 1), date, spend);
                if let Some(coupon) = used {
                    total_savings += coupon.value;
                    entry = entry.with_used_coupon(coupon);
                }
                if let Some(coupon) = earned {
                    ledger.push(coupon.clone());
                    active.insert(coupon.clone());
                    entry = entry.with_earned_coupon(coupon);
                }

                debug!(
                    entry = %entry.id,
                    %date,
                    spend,
                    used = ?entry.used_coupon.as_ref().map(|c| c.id.as_str()),
                    earned = ?entry.earned_coupon.as_ref().map(|c| c.tier),
                    "planned trip"
                );

                entries.push(entry);
                period_spent += spend;
                total_spend = round_cents(total_spend + spend);

                if reached(total_spend, total_budget) {
                    break 'periods;
                }
            }
        }

        // Events hold copies; bring earned-coupon copies up to their final state.
        for entry in entries.iter_mut() {
            if let Some(earned) = entry.earned_coupon.as_mut() {
                if let Some(record) = ledger.iter().find(|c| c.id == earned.id) {
                    *earned = record.clone();
                }
            }
        }

        let coupons_used = ledger.iter().filter(|c| c.used).count();

        info!(
            budget,
            entries = entries.len(),
            total_spend,
            total_savings,
            missed_savings,
            coupons_earned = ledger.len(),
            coupons_used,
            "schedule planned"
        );

        ScheduleResult {
            budget,
            start_date: start,
            total_budget,
            entries,
            total_spend,
            total_savings: round_cents(total_savings),
            missed_savings: round_cents(missed_savings),
            coupons_earned: ledger.len(),
            coupons_used,
            rewards: ledger,
            expired_coupon_ids,
        }
    }

    /// Move a spend onto a reward threshold when close, then clamp it to what
    /// is left of the overall budget.
    fn nudge_toward_threshold(&self, spend: f64, remaining: f64) -> f64 {
        let policy = self.rules.policy();
        let large = policy.large.min_spend;
        let small = policy.small.min_spend;

        let nudged = if spend >= large - NUDGE_WINDOW && spend < large && remaining >= large {
            large
        } else if spend >= large {
            spend.max(large)
        } else if spend >= small - NUDGE_WINDOW && spend < small && remaining >= small {
            small
        } else if spend >= small && spend < large {
            spend.min(large - 0.01)
        } else {
            spend
        };

        nudged.min(remaining).max(0.0)
    }
}

/// Plan with the default reward policy.
pub fn plan_schedule(budget: f64, start: NaiveDate) -> ScheduleResult {
    Planner::default().plan(budget, start)
}

fn coupon_id(n: usize) -> String {
    format!("coupon-{:03}", n)
}

fn entry_id(n: usize) -> String {
    format!("entry-{:03}", n)
}
