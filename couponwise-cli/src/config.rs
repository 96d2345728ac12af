use anyhow::{Context, Result};
use couponwise_core::RewardPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_couponwise_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerSection,
    #[serde(default)]
    pub rewards: RewardPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlannerSection {
    /// Used by `plan` when no --budget is given and none was saved.
    pub default_budget: Option<f64>,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_couponwise_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

/// Parse config.toml text and check the reward table before it reaches the planner.
pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s).context("parse config.toml")?;
    cfg.rewards
        .validate()
        .context("invalid [rewards] in config.toml")?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        assert!(s.contains("[rewards.small]"));
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg = parse_config("[planner]\ndefault_budget = 80.0\n").unwrap();
        assert_eq!(cfg.planner.default_budget, Some(80.0));
        assert_eq!(cfg.rewards, RewardPolicy::default());
    }

    #[test]
    fn test_oversized_validity_window_is_rejected() {
        let toml = r#"
[rewards]
activation_delay_days = 1

[rewards.small]
value = 5.0
min_spend = 25.0
validity_days = 100000000

[rewards.large]
value = 10.0
min_spend = 50.0
validity_days = 9
"#;
        let err = parse_config(toml).unwrap_err();
        assert!(err.to_string().contains("invalid [rewards]"));
        assert!(format!("{err:#}").contains("small.validity_days"));
    }

    #[test]
    fn test_inverted_tier_minimums_are_rejected() {
        let toml = r#"
[rewards.small]
value = 5.0
min_spend = 50.0
validity_days = 6

[rewards.large]
value = 10.0
min_spend = 25.0
validity_days = 9
"#;
        assert!(parse_config(toml).is_err());
    }
}
