//! Events Module
//!
//! Event vocabulary and the sources that produce it.

pub mod types;
pub mod source;

pub use types::EventLabel;
pub use source::{EventSource, RandomEventSource, ReplaySource};
