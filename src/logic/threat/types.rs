//! Threat Types
//!
//! Core types for window classification.
//! No logic here - data structures only.

use serde::{Deserialize, Serialize};

// ============================================================================
// ATTACK KIND
// ============================================================================

/// Classification outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    #[default]
    Normal,
    BruteForce,
    DDoS,
    MalwareActivity,
    RansomwareLike,
    PortScanning,
}

impl AttackKind {
    pub const ALL: [AttackKind; 6] = [
        AttackKind::Normal,
        AttackKind::BruteForce,
        AttackKind::DDoS,
        AttackKind::MalwareActivity,
        AttackKind::RansomwareLike,
        AttackKind::PortScanning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackKind::Normal => "normal",
            AttackKind::BruteForce => "brute_force",
            AttackKind::DDoS => "ddos",
            AttackKind::MalwareActivity => "malware_activity",
            AttackKind::RansomwareLike => "ransomware_like",
            AttackKind::PortScanning => "port_scanning",
        }
    }

    /// Human-readable name used in alerts and status lines
    pub fn display_name(&self) -> &'static str {
        match self {
            AttackKind::Normal => "No Attack",
            AttackKind::BruteForce => "Brute Force Attack",
            AttackKind::DDoS => "DDoS Attack",
            AttackKind::MalwareActivity => "Malware Activity",
            AttackKind::RansomwareLike => "Ransomware-like Behavior",
            AttackKind::PortScanning => "Port Scanning",
        }
    }

    /// Numeric label (0-5)
    pub fn label(&self) -> u8 {
        match self {
            AttackKind::Normal => 0,
            AttackKind::BruteForce => 1,
            AttackKind::DDoS => 2,
            AttackKind::MalwareActivity => 3,
            AttackKind::PortScanning => 4,
            AttackKind::RansomwareLike => 5,
        }
    }

    pub fn from_label(label: u8) -> Option<Self> {
        AttackKind::ALL.iter().copied().find(|k| k.label() == label)
    }

    pub fn is_attack(&self) -> bool {
        !matches!(self, AttackKind::Normal)
    }

    pub fn color(&self) -> &'static str {
        match self {
            AttackKind::Normal => "#10b981",          // Green
            AttackKind::PortScanning => "#f59e0b",    // Yellow
            AttackKind::DDoS | AttackKind::BruteForce => "#f97316", // Orange
            AttackKind::MalwareActivity | AttackKind::RansomwareLike => "#ef4444", // Red
        }
    }
}

impl std::fmt::Display for AttackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Coarse risk band for alerts and the anomaly scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl RiskLevel {
    /// Band for a 0-100 severity
    pub fn from_severity(severity: u8) -> Self {
        match severity {
            95..=u8::MAX => RiskLevel::Critical,
            80..=94 => RiskLevel::High,
            40..=79 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#2ecc71",
            RiskLevel::Medium => "#f1c40f",
            RiskLevel::High => "#e67e22",
            RiskLevel::Critical => "#e74c3c",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Result of classifying one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub attack_type: AttackKind,
    /// 0-100
    pub severity: u8,
    /// 0-5, see `AttackKind::label`
    pub label: u8,
}

impl ClassificationResult {
    pub fn normal() -> Self {
        Self {
            attack_type: AttackKind::Normal,
            severity: super::rules::NORMAL_SEVERITY,
            label: AttackKind::Normal.label(),
        }
    }

    pub fn is_attack(&self) -> bool {
        self.attack_type.is_attack()
    }

    pub fn risk(&self) -> RiskLevel {
        RiskLevel::from_severity(self.severity)
    }
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self::normal()
    }
}

// ============================================================================
// TESTS
// ============================================================================
