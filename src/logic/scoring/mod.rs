//! Scoring Module
//!
//! - `confidence`: occurrence memory + adaptive severity
//! - `anomaly`: feature-based outlier scorer and traffic simulator

pub mod confidence;
pub mod anomaly;

pub use confidence::{ConfidenceMemory, SeverityScorer};
pub use anomaly::{
    AnomalyScorer, AnomalyVerdict, GaussianOutlierScorer, TrafficSample, TrafficSimulator,
};
