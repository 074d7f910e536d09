//! Event Types
//!
//! The fixed vocabulary of telemetry labels fed into the window.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logic::error::MonitorError;

// ============================================================================
// EVENT LABEL
// ============================================================================

/// One categorical observation per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLabel {
    NormalActivity,
    LoginSuccess,
    LoginFailed,
    HighTraffic,
    MalwareProcess,
    SuspiciousFileWrite,
    PortScan,
}

impl EventLabel {
    /// Full vocabulary, in declaration order
    pub const ALL: [EventLabel; 7] = [
        EventLabel::NormalActivity,
        EventLabel::LoginSuccess,
        EventLabel::LoginFailed,
        EventLabel::HighTraffic,
        EventLabel::MalwareProcess,
        EventLabel::SuspiciousFileWrite,
        EventLabel::PortScan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventLabel::NormalActivity => "normal_activity",
            EventLabel::LoginSuccess => "login_success",
            EventLabel::LoginFailed => "login_failed",
            EventLabel::HighTraffic => "high_traffic",
            EventLabel::MalwareProcess => "malware_process",
            EventLabel::SuspiciousFileWrite => "suspicious_file_write",
            EventLabel::PortScan => "port_scan",
        }
    }

    /// Index into `ALL`, used for counting
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for EventLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventLabel {
    type Err = MonitorError;

    /// Unknown labels are rejected here, before they reach a window
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        EventLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| MonitorError::UnknownEvent(s.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
