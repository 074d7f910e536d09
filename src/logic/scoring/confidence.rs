//! Confidence Memory & Severity Scorer
//!
//! Occurrence counts per attack kind bias the reported severity upward.
//! Cosmetic only: the number is not a calibrated probability.

use std::collections::HashMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::logic::events::source::make_rng;
use crate::logic::threat::AttackKind;

/// Bonus cap, in severity points
pub const MAX_OCCURRENCE_BONUS: u32 = 10;

/// Bonus per previous occurrence
pub const BONUS_PER_OCCURRENCE: u32 = 2;

// ============================================================================
// CONFIDENCE MEMORY
// ============================================================================

/// Lives as long as the session; cleared only by `reset`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfidenceMemory {
    occurrences: HashMap<AttackKind, u32>,
}

impl ConfidenceMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more classification of `kind`, return the new count
    pub fn record(&mut self, kind: AttackKind) -> u32 {
        let count = self.occurrences.entry(kind).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn get(&self, kind: AttackKind) -> u32 {
        self.occurrences.get(&kind).copied().unwrap_or(0)
    }

    /// Counts in `AttackKind::ALL` order, zeros included
    pub fn snapshot(&self) -> Vec<(AttackKind, u32)> {
        AttackKind::ALL.iter().map(|&k| (k, self.get(k))).collect()
    }

    pub fn reset(&mut self) {
        self.occurrences.clear();
    }
}

// ============================================================================
// SEVERITY SCORER
// ============================================================================

/// Base severity range per kind, inclusive
pub fn base_range(kind: AttackKind) -> (u32, u32) {
    match kind {
        AttackKind::Normal => (5, 15),
        AttackKind::BruteForce => (80, 90),
        AttackKind::DDoS => (75, 88),
        AttackKind::MalwareActivity => (85, 95),
        AttackKind::RansomwareLike => (88, 97),
        AttackKind::PortScanning => (70, 82),
    }
}

pub fn occurrence_bonus(occurrences: u32) -> u32 {
    occurrences.saturating_mul(BONUS_PER_OCCURRENCE).min(MAX_OCCURRENCE_BONUS)
}

pub struct SeverityScorer {
    rng: ChaCha8Rng,
}

impl SeverityScorer {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: make_rng(seed) }
    }

    /// uniform(low + bonus, high + bonus), clamped to 0..=100
    pub fn score(&mut self, kind: AttackKind, occurrences: u32) -> u8 {
        let (low, high) = base_range(kind);
        let bonus = occurrence_bonus(occurrences);
        let value = self.rng.gen_range((low + bonus)..=(high + bonus));
        value.min(100) as u8
    }
}
