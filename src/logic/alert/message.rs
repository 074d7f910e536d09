//! Alert Message
//!
//! Rendered warning handed to notifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::advice::advice_for;
use crate::logic::threat::{AttackKind, ClassificationResult, RiskLevel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertMessage {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Tick that produced the alert (0-based)
    pub tick: u64,
    pub kind: AttackKind,
    pub severity: u8,
    pub label: u8,
    pub risk: RiskLevel,
    pub advice: String,
    /// Full sentence for speech/display
    pub text: String,
}

impl AlertMessage {
    /// `severity` may differ from `result.severity` when adaptive scoring is on
    pub fn new(result: &ClassificationResult, severity: u8, tick: u64) -> Self {
        let advice = advice_for(result.attack_type);
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            tick,
            kind: result.attack_type,
            severity,
            label: result.label,
            risk: RiskLevel::from_severity(severity),
            advice: advice.to_string(),
            text: render(result.attack_type, severity, advice),
        }
    }

    pub fn title(&self) -> String {
        format!("[{}] {}", self.risk.as_str(), self.kind.display_name())
    }
}

fn render(kind: AttackKind, severity: u8, advice: &str) -> String {
    match kind {
        AttackKind::Normal => advice.to_string(),
        _ => format!(
            "Warning! {} detected with severity {}%. {}",
            kind.display_name(),
            severity,
            advice
        ),
    }
}
