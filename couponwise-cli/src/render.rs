//! Plain-text rendering of a schedule for the terminal.

use couponwise_core::{Coupon, EntryStatus, ScheduleResult, ShoppingEntry, TrackingSummary};

pub fn render_schedule(schedule: &ScheduleResult) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "# Shopping plan from {} (weekly budget ${:.2})\n\n",
        schedule.start_date, schedule.budget
    ));

    if schedule.is_empty() {
        s.push_str("(no trips planned)\n");
        return s;
    }

    s.push_str("## Trips\n\n");
    for entry in &schedule.entries {
        s.push_str(&render_entry(entry));
        s.push('\n');
    }

    s.push_str("\n## Coupons\n\n");
    for coupon in &schedule.rewards {
        let expired = schedule.expired_coupon_ids.iter().any(|id| id == &coupon.id);
        s.push_str(&format!("- {}\n", render_coupon(coupon, expired)));
    }

    s.push_str("\n## Summary\n\n");
    s.push_str(&format!("- Planned spend:   ${:.2}\n", schedule.total_spend));
    s.push_str(&format!(
        "- Savings:         ${:.2} ({:.1}%)\n",
        schedule.total_savings,
        schedule.savings_rate() * 100.0
    ));
    s.push_str(&format!("- Missed savings:  ${:.2}\n", schedule.missed_savings));
    s.push_str(&format!(
        "- Coupons:         {} earned, {} used, {} expired\n",
        schedule.coupons_earned,
        schedule.coupons_used,
        schedule.coupons_missed()
    ));

    let tracking = TrackingSummary::of(schedule);
    if tracking.completed + tracking.missed > 0 {
        s.push_str(&format!(
            "- Progress:        {} done, {} skipped, {} to go (actual ${:.2}, variance {:+.2})\n",
            tracking.completed,
            tracking.missed,
            tracking.planned,
            tracking.actual_spend,
            tracking.variance()
        ));
    }
    s
}

fn render_entry(entry: &ShoppingEntry) -> String {
    let mut line = format!(
        "- {} {} {:<9} spend ${:>7.2}",
        entry.id,
        entry.date.format("%a %Y-%m-%d"),
        status_label(entry.status),
        entry.planned_amount
    );
    if let Some(coupon) = &entry.used_coupon {
        line.push_str(&format!(
            " | use {} (-${:.2}, pay ${:.2})",
            coupon.id,
            coupon.value,
            entry.net_amount()
        ));
    }
    if let Some(coupon) = &entry.earned_coupon {
        line.push_str(&format!(" | earn {} {}", coupon.tier.label(), coupon.id));
    }
    if let Some(actual) = entry.actual_amount {
        line.push_str(&format!(" | actual ${:.2}", actual));
    }
    line
}

fn render_coupon(coupon: &Coupon, expired: bool) -> String {
    let state = match (coupon.used, coupon.used_date, expired) {
        (true, Some(d), _) => format!("used {}", d),
        (true, None, _) => "used".to_string(),
        (false, _, true) => "expired".to_string(),
        (false, _, false) => "open".to_string(),
    };
    format!(
        "{} {:<5} ${:.2} off ${:.2} | valid {} to {} | {}",
        coupon.id,
        coupon.tier.label(),
        coupon.value,
        coupon.min_spend,
        coupon.active_date,
        coupon.expiry_date,
        state
    )
}

fn status_label(status: EntryStatus) -> &'static str {
    match status {
        EntryStatus::Planned => "[planned]",
        EntryStatus::Completed => "[done]",
        EntryStatus::Missed => "[missed]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use couponwise_core::plan_schedule;

    #[test]
    fn test_render_includes_sections() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let out = render_schedule(&plan_schedule(30.0, start));
        assert!(out.contains("## Trips"));
        assert!(out.contains("entry-001 Mon 2026-03-02"));
        assert!(out.contains("use coupon-001 (-$5.00, pay $25.00)"));
        assert!(out.contains("Savings:         $45.00"));
    }

    #[test]
    fn test_render_empty() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let out = render_schedule(&ScheduleResult::empty(0.0, start));
        assert!(out.contains("(no trips planned)"));
    }
}
