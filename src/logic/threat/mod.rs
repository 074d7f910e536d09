//! Threat Module
//!
//! Maps a window of events to an attack kind using ordered threshold rules.
//!
//! ## Structure
//! - `types`: Core types (AttackKind, ClassificationResult)
//! - `rules`: Rule table, severities, sensitivity presets
//! - `classifier`: Classification logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::threat::{classify, AttackKind};
//!
//! let result = classify(window.recent());
//! match result.attack_type {
//!     AttackKind::Normal => println!("Safe"),
//!     kind => println!("{} (severity {})", kind, result.severity),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod classifier;

pub use types::{AttackKind, ClassificationResult, RiskLevel};

pub use rules::{DetectionRule, RuleSet, DEFAULT_RULES, NORMAL_SEVERITY};

pub use classifier::{classify, classify_with, classify_with_rules, matching_rule};
