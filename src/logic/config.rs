//! Monitor Configuration
//!
//! Host-supplied knobs for a monitoring run. Defaults live in
//! `crate::constants`; `from_env` applies environment overrides.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::error::{MonitorError, MonitorResult};
use crate::logic::threat::RuleSet;

/// Rule threshold preset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    Low,
    #[default]
    Standard,
    High,
}

impl Sensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::Low => "low",
            Sensitivity::Standard => "standard",
            Sensitivity::High => "high",
        }
    }
}

impl FromStr for Sensitivity {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Sensitivity::Low),
            "standard" => Ok(Sensitivity::Standard),
            "high" => Ok(Sensitivity::High),
            _ => Err(MonitorError::InvalidConfig(format!(
                "unknown sensitivity '{}' (expected low, standard or high)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Trailing events inspected per tick
    pub window_size: usize,
    /// Ticks per run (loop bound owned by the caller)
    pub tick_count: u32,
    pub tick_interval_ms: u64,
    /// Audit history kept beside the window
    pub history_limit: usize,
    /// Pending alerts before new ones are dropped
    pub alert_queue: usize,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
    pub webhook_url: Option<String>,
    pub audit_log: Option<PathBuf>,
    /// Boost severity with occurrence counts
    pub adaptive_severity: bool,
    pub sensitivity: Sensitivity,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_size: constants::DEFAULT_WINDOW_SIZE,
            tick_count: constants::DEFAULT_TICK_COUNT,
            tick_interval_ms: constants::DEFAULT_TICK_INTERVAL_MS,
            history_limit: constants::DEFAULT_HISTORY_LIMIT,
            alert_queue: constants::DEFAULT_ALERT_QUEUE,
            seed: None,
            webhook_url: None,
            audit_log: None,
            adaptive_severity: false,
            sensitivity: Sensitivity::Standard,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            window_size: constants::get_window_size(),
            tick_count: constants::get_tick_count(),
            tick_interval_ms: constants::get_tick_interval_ms(),
            history_limit: constants::get_history_limit(),
            alert_queue: constants::DEFAULT_ALERT_QUEUE,
            seed: constants::get_seed(),
            webhook_url: constants::get_webhook_url(),
            audit_log: constants::get_audit_log_path(),
            adaptive_severity: constants::is_adaptive_severity(),
            sensitivity: parse_sensitivity(&constants::get_sensitivity()),
        }
    }

    pub fn validate(&self) -> MonitorResult<()> {
        if self.window_size == 0 {
            return Err(MonitorError::InvalidConfig("window_size must be at least 1".to_string()));
        }
        if self.history_limit < self.window_size {
            return Err(MonitorError::InvalidConfig(format!(
                "history_limit ({}) must be >= window_size ({})",
                self.history_limit, self.window_size
            )));
        }
        if self.alert_queue == 0 {
            return Err(MonitorError::InvalidConfig("alert_queue must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Rule table for this config's sensitivity and window size
    pub fn rule_set(&self) -> RuleSet {
        let base = match self.sensitivity {
            Sensitivity::Low => RuleSet::low_sensitivity(),
            Sensitivity::Standard => RuleSet::default(),
            Sensitivity::High => RuleSet::high_sensitivity(),
        };
        RuleSet { window_size: self.window_size, ..base }
    }
}

/// Unrecognised presets fall back to `Standard`
fn parse_sensitivity(raw: &str) -> Sensitivity {
    raw.parse().unwrap_or_else(|e| {
        log::warn!("{}; using standard", e);
        Sensitivity::Standard
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MonitorConfig::default();
        assert_eq!(config.window_size, 10);
        assert_eq!(config.tick_count, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_window() {
        let config = MonitorConfig { window_size: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(MonitorError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_short_history() {
        let config = MonitorConfig { window_size: 20, history_limit: 5, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_queue() {
        let config = MonitorConfig { alert_queue: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rule_set_follows_config() {
        let config = MonitorConfig { window_size: 15, sensitivity: Sensitivity::High, ..Default::default() };
        let rules = config.rule_set();
        assert_eq!(rules.window_size, 15);
        assert_eq!(rules, RuleSet { window_size: 15, ..RuleSet::high_sensitivity() });
    }

    #[test]
    fn test_sensitivity_parse() {
        assert_eq!("HIGH".parse::<Sensitivity>().unwrap(), Sensitivity::High);
        assert_eq!(" low ".parse::<Sensitivity>().unwrap(), Sensitivity::Low);
        assert_eq!("standard".parse::<Sensitivity>().unwrap(), Sensitivity::Standard);
        assert!(matches!(
            "whatever".parse::<Sensitivity>(),
            Err(MonitorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sensitivity_env_value_fallback() {
        assert_eq!(parse_sensitivity(constants::DEFAULT_SENSITIVITY), Sensitivity::Standard);
        assert_eq!(parse_sensitivity("High"), Sensitivity::High);
        assert_eq!(parse_sensitivity("paranoid"), Sensitivity::Standard);
    }

    #[test]
    fn test_sensitivity_names_round_trip() {
        for preset in [Sensitivity::Low, Sensitivity::Standard, Sensitivity::High] {
            assert_eq!(preset.as_str().parse::<Sensitivity>().unwrap(), preset);
        }
    }

    #[test]
    fn test_config_json_roundtrip_fields() {
        let json = serde_json::to_value(MonitorConfig::default()).unwrap();
        assert_eq!(json["sensitivity"], "standard");
        assert_eq!(json["window_size"], 10);
    }
}
