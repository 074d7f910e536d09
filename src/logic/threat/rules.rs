//! Detection Rules & Thresholds
//!
//! Ordered rule table for the window classifier.
//! No classify logic here - constants and config only.

use serde::{Deserialize, Serialize};

use super::types::AttackKind;
use crate::constants::DEFAULT_WINDOW_SIZE;
use crate::logic::events::EventLabel;

// ============================================================================
// SEVERITIES (fixed at compile time)
// ============================================================================

pub const MALWARE_SEVERITY: u8 = 95;
pub const RANSOMWARE_SEVERITY: u8 = 97;
pub const PORT_SCAN_SEVERITY: u8 = 80;
pub const BRUTE_FORCE_SEVERITY: u8 = 90;
pub const DDOS_SEVERITY: u8 = 85;

/// Severity reported when no rule matches
pub const NORMAL_SEVERITY: u8 = 10;

// ============================================================================
// RULE
// ============================================================================

/// Fires when `trigger` occurs at least `min_count` times in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRule {
    pub trigger: EventLabel,
    pub min_count: u32,
    pub kind: AttackKind,
    pub severity: u8,
}

impl DetectionRule {
    pub const fn new(trigger: EventLabel, min_count: u32, kind: AttackKind, severity: u8) -> Self {
        Self { trigger, min_count, kind, severity }
    }

    pub fn label(&self) -> u8 {
        self.kind.label()
    }
}

/// Priority order = table order, most severe first. First match wins.
pub const DEFAULT_RULES: [DetectionRule; 5] = [
    DetectionRule::new(EventLabel::MalwareProcess, 2, AttackKind::MalwareActivity, MALWARE_SEVERITY),
    DetectionRule::new(EventLabel::SuspiciousFileWrite, 3, AttackKind::RansomwareLike, RANSOMWARE_SEVERITY),
    DetectionRule::new(EventLabel::PortScan, 3, AttackKind::PortScanning, PORT_SCAN_SEVERITY),
    DetectionRule::new(EventLabel::LoginFailed, 4, AttackKind::BruteForce, BRUTE_FORCE_SEVERITY),
    DetectionRule::new(EventLabel::HighTraffic, 4, AttackKind::DDoS, DDOS_SEVERITY),
];

// ============================================================================
// CONFIGURABLE RULE SET (for runtime adjustment)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Trailing events inspected
    pub window_size: usize,
    /// Evaluated top to bottom
    pub rules: Vec<DetectionRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            rules: DEFAULT_RULES.to_vec(),
        }
    }
}

impl RuleSet {
    pub fn with_window(window_size: usize) -> Self {
        Self { window_size, ..Default::default() }
    }

    /// High sensitivity - every threshold one lower (floor 1), more alerts
    pub fn high_sensitivity() -> Self {
        Self::shifted(|n| n.saturating_sub(1).max(1))
    }

    /// Low sensitivity - every threshold one higher, fewer alerts
    pub fn low_sensitivity() -> Self {
        Self::shifted(|n| n + 1)
    }

    fn shifted(f: impl Fn(u32) -> u32) -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|r| DetectionRule { min_count: f(r.min_count), ..*r })
            .collect();
        Self { rules, ..Default::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_order() {
        let kinds: Vec<AttackKind> = DEFAULT_RULES.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AttackKind::MalwareActivity,
                AttackKind::RansomwareLike,
                AttackKind::PortScanning,
                AttackKind::BruteForce,
                AttackKind::DDoS,
            ]
        );
    }

    #[test]
    fn test_sensitivity_presets() {
        let high = RuleSet::high_sensitivity();
        let low = RuleSet::low_sensitivity();
        assert_eq!(high.rules[0].min_count, 1);
        assert_eq!(high.rules[3].min_count, 3);
        assert_eq!(low.rules[3].min_count, 5);
        assert_eq!(high.window_size, DEFAULT_WINDOW_SIZE);
    }
}
