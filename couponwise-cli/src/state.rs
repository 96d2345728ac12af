use anyhow::{Context, Result};
use couponwise_core::ScheduleResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub fn couponwise_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("COUPONWISE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".couponwise"))
}

pub fn ensure_couponwise_home() -> Result<PathBuf> {
    let dir = couponwise_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedBudget {
    pub weekly: f64,
    pub updated_at_utc: Option<String>,
}

pub fn budget_path() -> Result<PathBuf> {
    Ok(ensure_couponwise_home()?.join("budget.json"))
}

pub fn schedule_path() -> Result<PathBuf> {
    Ok(ensure_couponwise_home()?.join("schedule.json"))
}

pub fn write_budget(budget: &SavedBudget) -> Result<()> {
    write_json(&budget_path()?, budget)
}

pub fn read_budget() -> Result<Option<SavedBudget>> {
    read_json(&budget_path()?)
}

pub fn write_schedule(schedule: &ScheduleResult) -> Result<()> {
    write_json(&schedule_path()?, schedule)
}

pub fn read_schedule() -> Result<Option<ScheduleResult>> {
    read_json(&schedule_path()?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use couponwise_core::plan_schedule;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("couponwise-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_schedule_file_round_trip() {
        let dir = scratch_dir("schedule");
        let path = dir.join("schedule.json");
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let schedule = plan_schedule(110.0, start);

        write_json(&path, &schedule).unwrap();
        let back: Option<ScheduleResult> = read_json(&path).unwrap();
        assert_eq!(back, Some(schedule));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = scratch_dir("missing");
        let back: Option<SavedBudget> = read_json(&dir.join("budget.json")).unwrap();
        assert!(back.is_none());
        fs::remove_dir_all(dir).ok();
    }
}
