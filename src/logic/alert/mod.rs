//! Alert Module
//!
//! Cooldown gate, advice table and fire-and-forget delivery.
//!
//! ## Structure
//! - `gate`: AlertState + should_alert (fires on change only)
//! - `advice`: Static advice per AttackKind, fallback by name
//! - `message`: AlertMessage rendered for notifiers
//! - `notifier`: Log, webhook and audit-log channels
//! - `dispatcher`: Bounded queue + delivery thread

pub mod gate;
pub mod advice;
pub mod message;
pub mod notifier;
pub mod dispatcher;

pub use gate::{should_alert, AlertState};
pub use advice::{advice_for, advice_for_name, kind_from_name, GENERIC_ADVICE};
pub use message::AlertMessage;
pub use notifier::{
    default_audit_log_path, AuditLogNotifier, LogNotifier, Notifier, WebhookNotifier, WebhookPlatform,
};
pub use dispatcher::{AlertDispatcher, DispatchStats};
