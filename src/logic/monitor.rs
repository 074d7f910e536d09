//! Monitor Loop
//!
//! Bridges EventSource -> SessionState -> AlertDispatcher, one tick at a
//! time. Classification never waits on delivery.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logic::alert::{
    default_audit_log_path, AlertDispatcher, AuditLogNotifier, DispatchStats, LogNotifier, Notifier,
    WebhookNotifier,
};
use crate::logic::config::MonitorConfig;
use crate::logic::error::MonitorResult;
use crate::logic::events::EventSource;
use crate::logic::scoring::ConfidenceMemory;
use crate::logic::session::{SessionState, TickOutcome};
use crate::logic::threat::{AttackKind, ClassificationResult};

/// Summary of one `run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorReport {
    pub ticks: u64,
    pub alerts_fired: u64,
    /// Alerts the dispatcher refused (queue full/closed)
    pub alerts_dropped: u64,
    pub kind_counts: Vec<(AttackKind, u32)>,
    pub final_result: ClassificationResult,
    /// Ended because of the stop flag or an exhausted source
    pub stopped_early: bool,
}

pub struct Monitor {
    config: MonitorConfig,
    session: SessionState,
    dispatcher: AlertDispatcher,
    stop: Arc<AtomicBool>,
}

impl Monitor {
    /// Validate `config` and start delivery with the given notifiers
    pub fn new(config: MonitorConfig, notifiers: Vec<Box<dyn Notifier>>) -> MonitorResult<Self> {
        config.validate()?;
        let dispatcher = AlertDispatcher::start(notifiers, config.alert_queue)?;
        Ok(Self {
            session: SessionState::new(&config),
            config,
            dispatcher,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Notifiers from config: log always, webhook and audit log when set
    pub fn from_config(config: MonitorConfig) -> MonitorResult<Self> {
        let notifiers = notifiers_for(&config);
        Self::new(config, notifiers)
    }

    /// Raise to stop after the current tick
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn dispatch_stats(&self) -> DispatchStats {
        self.dispatcher.stats()
    }

    /// Up to `tick_count` ticks; `on_tick` is the presentation hook
    pub fn run<S, F>(&mut self, source: &mut S, mut on_tick: F) -> MonitorReport
    where
        S: EventSource + ?Sized,
        F: FnMut(&TickOutcome),
    {
        let interval = Duration::from_millis(self.config.tick_interval_ms);
        let mut run_counts = ConfidenceMemory::new();
        let mut ticks = 0u64;
        let mut alerts_fired = 0u64;
        let mut alerts_dropped = 0u64;
        let mut stopped_early = false;

        log::info!(
            "Monitoring started: {} ticks, window {}, interval {}ms",
            self.config.tick_count,
            self.config.window_size,
            self.config.tick_interval_ms
        );

        for i in 0..self.config.tick_count {
            if self.stop.load(Ordering::Relaxed) {
                log::info!("Stop requested after {} ticks", ticks);
                stopped_early = true;
                break;
            }

            let Some(event) = source.next_event() else {
                log::info!("Event source exhausted after {} ticks", ticks);
                stopped_early = true;
                break;
            };

            let outcome = self.session.ingest(event);
            run_counts.record(outcome.result.attack_type);
            ticks += 1;

            if let Some(alert) = outcome.alert.clone() {
                alerts_fired += 1;
                if !self.dispatcher.dispatch(alert) {
                    alerts_dropped += 1;
                }
            }

            on_tick(&outcome);

            if i + 1 < self.config.tick_count && !interval.is_zero() {
                thread::sleep(interval);
            }
        }

        let report = MonitorReport {
            ticks,
            alerts_fired,
            alerts_dropped,
            kind_counts: run_counts.snapshot(),
            final_result: self.session.last_result(),
            stopped_early,
        };

        log::info!(
            "Monitoring finished: {} ticks, {} alerts ({} dropped), final status {}",
            report.ticks,
            report.alerts_fired,
            report.alerts_dropped,
            report.final_result.attack_type
        );

        report
    }

    /// Drain pending alerts and stop the dispatcher
    pub fn finish(self) -> DispatchStats {
        self.dispatcher.shutdown()
    }
}

fn notifiers_for(config: &MonitorConfig) -> Vec<Box<dyn Notifier>> {
    let mut notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(LogNotifier)];

    if let Some(url) = config.webhook_url.as_deref() {
        let webhook = WebhookNotifier::new(url);
        log::info!("Webhook alerts enabled ({})", webhook.platform().as_str());
        notifiers.push(Box::new(webhook));
    }

    if let Some(path) = config.audit_log.as_ref() {
        let path = if path.as_os_str() == "default" {
            default_audit_log_path()
        } else {
            path.clone()
        };
        log::info!("Audit log: {}", path.display());
        notifiers.push(Box::new(AuditLogNotifier::new(path)));
    }

    notifiers
}

// ============================================================================
// TESTS
// ============================================================================
