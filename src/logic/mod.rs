//! Logic Module - Business Logic & Engines
//!
//! ## Structure
//! - `events/` - Event labels and event sources (simulator, replay)
//! - `window` - Bounded event window + audit history
//! - `threat/` - Rule table and sliding-window classifier
//! - `alert/` - Cooldown gate, advice table, notifiers, dispatcher
//! - `scoring/` - Confidence memory and anomaly scorer
//! - `session` - Per-session state, one tick at a time
//! - `monitor` - Tick loop that ties everything together

pub mod error;
pub mod config;
pub mod events;
pub mod window;
pub mod threat;
pub mod alert;
pub mod scoring;
pub mod session;
pub mod monitor;
