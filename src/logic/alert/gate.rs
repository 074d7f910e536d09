//! Alert Cooldown Gate
//!
//! Fires only when the classification changes from the previous tick.

use serde::{Deserialize, Serialize};

use crate::logic::threat::AttackKind;

/// True iff the kind changed
pub fn should_alert(previous: AttackKind, current: AttackKind) -> bool {
    previous != current
}

/// Last emitted kind; the only state the gate reads and writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    last: AttackKind,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> AttackKind {
        self.last
    }

    /// Decide for this tick, then remember `current` whatever the decision.
    pub fn observe(&mut self, current: AttackKind) -> bool {
        let fire = should_alert(self.last, current);
        self.last = current;
        fire
    }

    pub fn reset(&mut self) {
        self.last = AttackKind::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AttackKind::*;

    #[test]
    fn test_should_alert() {
        assert!(should_alert(Normal, BruteForce));
        assert!(!should_alert(DDoS, DDoS));
        assert!(should_alert(DDoS, Normal));
    }

    #[test]
    fn test_transitions_only() {
        let mut state = AlertState::new();
        let sequence = [Normal, BruteForce, BruteForce, DDoS, DDoS, BruteForce];

        let fired: Vec<usize> = sequence
            .iter()
            .enumerate()
            .filter_map(|(i, &kind)| state.observe(kind).then_some(i))
            .collect();

        assert_eq!(fired, vec![1, 3, 5]);
        assert_eq!(state.last(), BruteForce);
    }

    #[test]
    fn test_return_to_normal_rearms() {
        let mut state = AlertState::new();
        assert!(state.observe(PortScanning));
        assert!(!state.observe(PortScanning));
        state.observe(Normal);
        assert_eq!(state.last(), Normal);
        assert!(state.observe(PortScanning));
    }

    #[test]
    fn test_reset() {
        let mut state = AlertState::new();
        state.observe(MalwareActivity);
        state.reset();
        assert_eq!(state.last(), Normal);
    }
}
