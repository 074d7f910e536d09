//! Event Sources
//!
//! Stand-ins for a real telemetry feed. The monitor only knows the
//! `EventSource` trait, so a real collector can be plugged in later.

use std::collections::VecDeque;

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::types::EventLabel;
use crate::logic::error::{MonitorError, MonitorResult};

/// Produces one event label per tick. `None` = feed exhausted.
pub trait EventSource {
    fn next_event(&mut self) -> Option<EventLabel>;
}

// ============================================================================
// RANDOM SIMULATOR
// ============================================================================

/// Random event generator
pub struct RandomEventSource {
    rng: ChaCha8Rng,
    /// `None` = uniform
    weights: Option<WeightedIndex<u32>>,
}

impl RandomEventSource {
    /// Uniform over the whole vocabulary
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: make_rng(seed), weights: None }
    }

    /// Custom weights, indexed like `EventLabel::ALL`
    pub fn with_weights(seed: Option<u64>, weights: [u32; 7]) -> MonitorResult<Self> {
        let weights = WeightedIndex::new(weights)
            .map_err(|e| MonitorError::InvalidConfig(format!("event weights: {}", e)))?;
        Ok(Self { rng: make_rng(seed), weights: Some(weights) })
    }
}

impl EventSource for RandomEventSource {
    fn next_event(&mut self) -> Option<EventLabel> {
        match &self.weights {
            Some(weights) => Some(EventLabel::ALL[weights.sample(&mut self.rng)]),
            None => EventLabel::ALL.choose(&mut self.rng).copied(),
        }
    }
}

// ============================================================================
// REPLAY
// ============================================================================

/// Replays a fixed sequence, then ends
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    events: VecDeque<EventLabel>,
}

impl ReplaySource {
    pub fn new(events: impl IntoIterator<Item = EventLabel>) -> Self {
        Self { events: events.into_iter().collect() }
    }

    /// Parse raw labels; the first unknown one rejects the whole script
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> MonitorResult<Self> {
        let events = raw
            .iter()
            .map(|s| s.as_ref().parse::<EventLabel>())
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { events })
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ReplaySource {
    fn next_event(&mut self) -> Option<EventLabel> {
        self.events.pop_front()
    }
}

pub(crate) fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
