//! Status bookkeeping on a saved schedule: recording what was actually spent
//! and which trips were skipped. Planned amounts are never changed here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entry::EntryStatus;
use crate::money::round_cents;
use crate::schedule::ScheduleResult;

#[derive(Debug, Error, PartialEq)]
pub enum TrackingError {
    #[error("no entry with id '{0}'")]
    UnknownEntry(String),
    #[error("actual spend must be a non-negative amount")]
    InvalidAmount,
}

/// Mark an entry completed with the amount actually spent.
pub fn complete_entry(
    schedule: &mut ScheduleResult,
    entry_id: &str,
    actual_amount: f64,
) -> Result<(), TrackingError> {
    if !actual_amount.is_finite() || actual_amount < 0.0 {
        return Err(TrackingError::InvalidAmount);
    }
    let entry = schedule
        .entries
        .iter_mut()
        .find(|e| e.id == entry_id)
        .ok_or_else(|| TrackingError::UnknownEntry(entry_id.to_string()))?;

    entry.actual_amount = Some(round_cents(actual_amount));
    entry.status = EntryStatus::Completed;
    Ok(())
}

/// Flip every still-planned entry dated before `today` to missed.
/// Returns how many entries changed.
pub fn mark_missed_before(schedule: &mut ScheduleResult, today: NaiveDate) -> usize {
    let mut changed = 0;
    for entry in schedule.entries.iter_mut() {
        if entry.status == EntryStatus::Planned && entry.date < today {
            entry.status = EntryStatus::Missed;
            changed += 1;
        }
    }
    changed
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingSummary {
    pub planned: usize,
    pub completed: usize,
    pub missed: usize,
    /// Planned spend of completed entries
    pub planned_spend_completed: f64,
    pub actual_spend: f64,
}

impl TrackingSummary {
    pub fn of(schedule: &ScheduleResult) -> Self {
        let mut s = Self::default();
        for entry in &schedule.entries {
            match entry.status {
                EntryStatus::Planned => s.planned += 1,
                EntryStatus::Missed => s.missed += 1,
                EntryStatus::Completed => {
                    s.completed += 1;
                    s.planned_spend_completed += entry.planned_amount;
                    s.actual_spend += entry.actual_amount.unwrap_or(entry.planned_amount);
                }
            }
        }
        s.planned_spend_completed = round_cents(s.planned_spend_completed);
        s.actual_spend = round_cents(s.actual_spend);
        s
    }

    /// Positive when more was spent than planned
    pub fn variance(&self) -> f64 {
        round_cents(self.actual_spend - self.planned_spend_completed)
    }
}
