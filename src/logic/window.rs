//! Event Window
//!
//! Bounded view over the most recent events. Only the trailing `capacity`
//! entries take part in classification; the longer audit history is kept
//! separately and trimmed oldest first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HISTORY_LIMIT, DEFAULT_WINDOW_SIZE};
use crate::logic::events::EventLabel;

// ============================================================================
// WINDOW
// ============================================================================

#[derive(Debug, Clone)]
pub struct EventWindow {
    capacity: usize,
    /// Kept contiguous so it can be borrowed as a slice
    recent: Vec<EventLabel>,
    history: VecDeque<EventLabel>,
    history_limit: usize,
    total_seen: u64,
}

impl EventWindow {
    /// `capacity` is clamped to at least 1; history never holds fewer than `capacity`
    pub fn new(capacity: usize, history_limit: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            recent: Vec::with_capacity(capacity),
            history: VecDeque::new(),
            history_limit: history_limit.max(capacity),
            total_seen: 0,
        }
    }

    /// Append one event; the oldest falls out once the window is full
    pub fn push(&mut self, event: EventLabel) {
        if self.recent.len() == self.capacity {
            self.recent.remove(0);
        }
        self.recent.push(event);

        self.history.push_back(event);
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }

        self.total_seen += 1;
    }

    /// Trailing events, oldest first; goes straight into `classify`
    pub fn recent(&self) -> &[EventLabel] {
        &self.recent
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventLabel> {
        self.recent.iter()
    }

    /// Audit history, oldest first
    pub fn history(&self) -> Vec<EventLabel> {
        self.history.iter().copied().collect()
    }

    pub fn counts(&self) -> WindowCounts {
        WindowCounts::from_events(self.recent.iter())
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_seen(&self) -> u64 {
        self.total_seen
    }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.history.clear();
        self.total_seen = 0;
    }
}

impl Default for EventWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE, DEFAULT_HISTORY_LIMIT)
    }
}

// ============================================================================
// COUNTS
// ============================================================================

/// Per-label occurrence counts over a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCounts {
    counts: [u32; 7],
}

impl WindowCounts {
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a EventLabel>) -> Self {
        let mut counts = [0u32; 7];
        for event in events {
            counts[event.index()] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, label: EventLabel) -> u32 {
        self.counts[label.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Non-zero counts, vocabulary order
    pub fn non_zero(&self) -> Vec<(EventLabel, u32)> {
        EventLabel::ALL
            .iter()
            .map(|&label| (label, self.get(label)))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = EventWindow::new(3, 100);
        window.push(EventLabel::PortScan);
        window.push(EventLabel::LoginFailed);
        window.push(EventLabel::LoginFailed);
        window.push(EventLabel::HighTraffic);

        assert_eq!(window.len(), 3);
        assert_eq!(
            window.recent(),
            &[EventLabel::LoginFailed, EventLabel::LoginFailed, EventLabel::HighTraffic]
        );
        assert_eq!(window.counts().get(EventLabel::PortScan), 0);
        assert_eq!(window.total_seen(), 4);
    }

    #[test]
    fn test_history_keeps_more_than_window() {
        let mut window = EventWindow::new(2, 5);
        for _ in 0..4 {
            window.push(EventLabel::NormalActivity);
        }
        assert_eq!(window.len(), 2);
        assert_eq!(window.history().len(), 4);

        for _ in 0..4 {
            window.push(EventLabel::LoginSuccess);
        }
        let history = window.history();
        assert_eq!(history.len(), 5);
        assert_eq!(history[0], EventLabel::NormalActivity);
    }

    #[test]
    fn test_history_limit_never_below_capacity() {
        let mut window = EventWindow::new(10, 3);
        for _ in 0..10 {
            window.push(EventLabel::PortScan);
        }
        assert_eq!(window.history().len(), 10);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let window = EventWindow::new(0, 0);
        assert_eq!(window.capacity(), 1);
    }

    #[test]
    fn test_counts() {
        let events = [
            EventLabel::LoginFailed,
            EventLabel::LoginFailed,
            EventLabel::PortScan,
        ];
        let counts = WindowCounts::from_events(events.iter());
        assert_eq!(counts.get(EventLabel::LoginFailed), 2);
        assert_eq!(counts.get(EventLabel::PortScan), 1);
        assert_eq!(counts.total(), 3);
        assert_eq!(
            counts.non_zero(),
            vec![(EventLabel::LoginFailed, 2), (EventLabel::PortScan, 1)]
        );
    }

    #[test]
    fn test_recent_through_shared_borrow() {
        let mut window = EventWindow::new(4, 10);
        for label in [
            EventLabel::PortScan,
            EventLabel::HighTraffic,
            EventLabel::HighTraffic,
            EventLabel::HighTraffic,
            EventLabel::HighTraffic,
        ] {
            window.push(label);
        }

        let view: &EventWindow = &window;
        assert_eq!(view.recent(), &[EventLabel::HighTraffic; 4]);
        assert_eq!(view.recent().len(), view.len());
        assert!(view.recent().iter().eq(view.iter()));
    }

    #[test]
    fn test_clear() {
        let mut window = EventWindow::default();
        window.push(EventLabel::HighTraffic);
        window.clear();
        assert!(window.is_empty());
        assert!(window.history().is_empty());
        assert_eq!(window.total_seen(), 0);
    }
}
