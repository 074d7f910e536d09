//! Session State
//!
//! Everything one monitoring session owns: the window, the cooldown gate,
//! confidence memory and the tick counter. All mutation goes through
//! `ingest`; there is no global state.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::logic::alert::{AlertMessage, AlertState};
use crate::logic::config::MonitorConfig;
use crate::logic::error::MonitorResult;
use crate::logic::events::EventLabel;
use crate::logic::scoring::{ConfidenceMemory, SeverityScorer};
use crate::logic::threat::{classify_with_rules, AttackKind, ClassificationResult, RuleSet};
use crate::logic::window::EventWindow;

/// What one tick produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// 0-based
    pub tick: u64,
    pub event: EventLabel,
    pub result: ClassificationResult,
    /// Reported severity (adaptive when enabled, else `result.severity`)
    pub severity: u8,
    /// Classification changed since the previous tick
    pub transition: bool,
    /// Set only on a transition into an attack kind
    pub alert: Option<AlertMessage>,
    /// Times `result.attack_type` has been seen this session, this tick included
    pub occurrences: u32,
}

impl TickOutcome {
    /// One-line status for console display
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "#{:<3} {:<22} -> {} (severity {}%, label {})",
            self.tick + 1,
            self.event.as_str(),
            self.result.attack_type.display_name(),
            self.severity,
            self.result.label
        );
        if self.alert.is_some() {
            line.push_str("  [ALERT]");
        }
        line
    }
}

pub struct SessionState {
    window: EventWindow,
    rules: RuleSet,
    alert_state: AlertState,
    confidence: ConfidenceMemory,
    /// Present when adaptive severity is on
    scorer: Option<SeverityScorer>,
    tick: u64,
    last_result: ClassificationResult,
}

impl SessionState {
    pub fn new(config: &MonitorConfig) -> Self {
        let scorer = config.adaptive_severity.then(|| SeverityScorer::new(config.seed));
        Self {
            window: EventWindow::new(config.window_size, config.history_limit),
            rules: config.rule_set(),
            alert_state: AlertState::new(),
            confidence: ConfidenceMemory::new(),
            scorer,
            tick: 0,
            last_result: ClassificationResult::normal(),
        }
    }

    /// Default rules and history, custom window size
    pub fn with_window(window_size: usize) -> Self {
        Self::new(&MonitorConfig { window_size, ..Default::default() })
    }

    /// Append, classify, score, gate. One call = one tick.
    pub fn ingest(&mut self, event: EventLabel) -> TickOutcome {
        self.window.push(event);
        let result = classify_with_rules(self.window.recent(), &self.rules);

        let occurrences = self.confidence.record(result.attack_type);
        let severity = match self.scorer.as_mut() {
            Some(scorer) => scorer.score(result.attack_type, occurrences),
            None => result.severity,
        };

        let transition = self.alert_state.observe(result.attack_type);
        let alert = (transition && result.is_attack())
            .then(|| AlertMessage::new(&result, severity, self.tick));

        log::debug!(
            "tick {} event={} -> {} (severity {}, transition {})",
            self.tick,
            event,
            result.attack_type.as_str(),
            severity,
            transition
        );

        let outcome = TickOutcome {
            tick: self.tick,
            event,
            result,
            severity,
            transition,
            alert,
            occurrences,
        };

        self.tick += 1;
        self.last_result = result;
        outcome
    }

    /// Parse at the boundary; unknown labels never reach the window
    pub fn ingest_raw(&mut self, raw: &str) -> MonitorResult<TickOutcome> {
        let event = raw.parse::<EventLabel>()?;
        Ok(self.ingest(event))
    }

    /// Classify the current window without advancing the session
    pub fn classify_current(&self) -> ClassificationResult {
        classify_with_rules(self.window.recent(), &self.rules)
    }

    pub fn window(&self) -> &EventWindow {
        &self.window
    }

    pub fn alert_state(&self) -> AlertState {
        self.alert_state
    }

    pub fn confidence(&self) -> &ConfidenceMemory {
        &self.confidence
    }

    pub fn last_result(&self) -> ClassificationResult {
        self.last_result
    }

    pub fn last_kind(&self) -> AttackKind {
        self.alert_state.last()
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Explicit reset: window, history, gate and confidence memory
    pub fn reset(&mut self) {
        self.window.clear();
        self.alert_state.reset();
        self.confidence.reset();
        self.tick = 0;
        self.last_result = ClassificationResult::normal();
        log::info!("Session reset");
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&MonitorConfig::default())
    }
}

// ============================================================================
// SHARED SESSION
// ============================================================================

/// For hosts that ingest from several threads: append + classify run
/// under one lock, so a tick always sees a consistent window.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionState>>,
}

impl SharedSession {
    pub fn new(state: SessionState) -> Self {
        Self { inner: Arc::new(Mutex::new(state)) }
    }

    pub fn ingest(&self, event: EventLabel) -> TickOutcome {
        self.inner.lock().ingest(event)
    }

    pub fn ingest_raw(&self, raw: &str) -> MonitorResult<TickOutcome> {
        self.inner.lock().ingest_raw(raw)
    }

    /// Run `f` with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }
}

// ============================================================================
// TESTS
// ============================================================================
