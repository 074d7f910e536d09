//! AI Security Monitor - Library Root
//!
//! Sliding-window attack classifier with cooldown-gated alerting.
//! The binary in `main.rs` drives a monitoring run on top of this API.

pub mod constants;
pub mod logic;

pub use logic::error::{MonitorError, MonitorResult, NotifyError};
pub use logic::events::{EventLabel, EventSource};
pub use logic::threat::{classify, AttackKind, ClassificationResult};
pub use logic::alert::{advice_for, advice_for_name, should_alert, AlertState};
pub use logic::session::{SessionState, SharedSession};
