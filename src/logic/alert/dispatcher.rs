//! Alert Dispatcher
//!
//! Fire-and-forget delivery on a dedicated thread running a current-thread
//! tokio runtime. The tick only ever calls `try_send` on a bounded queue: a
//! full or closed queue drops the alert, and a failing notifier is logged and
//! skipped. Nothing is retried.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};

use super::message::AlertMessage;
use super::notifier::Notifier;
use crate::logic::error::{MonitorError, MonitorResult};

#[derive(Debug, Default)]
struct Counters {
    queued: AtomicU64,
    dropped: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

/// Snapshot of delivery counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStats {
    pub queued: u64,
    pub dropped: u64,
    /// Successful notifier calls (one alert × one notifier)
    pub delivered: u64,
    pub failed: u64,
}

pub struct AlertDispatcher {
    tx: Option<mpsc::Sender<AlertMessage>>,
    worker: Option<JoinHandle<()>>,
    counters: Arc<Counters>,
}

impl AlertDispatcher {
    /// Spawn the delivery thread
    pub fn start(notifiers: Vec<Box<dyn Notifier>>, queue_size: usize) -> MonitorResult<Self> {
        let (tx, rx) = mpsc::channel(queue_size.max(1));
        let counters = Arc::new(Counters::default());
        let worker_counters = Arc::clone(&counters);

        let names: Vec<String> = notifiers.iter().map(|n| n.name().to_string()).collect();

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| MonitorError::DispatcherUnavailable(format!("tokio runtime: {}", e)))?;

        let worker = thread::Builder::new()
            .name("alert-dispatch".to_string())
            .spawn(move || {
                rt.block_on(deliver_loop(rx, notifiers, worker_counters));
            })
            .map_err(|e| MonitorError::DispatcherUnavailable(e.to_string()))?;

        log::info!("Alert dispatcher started (notifiers: [{}])", names.join(", "));

        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
            counters,
        })
    }

    /// Hand an alert over without blocking. Returns false if it was dropped.
    pub fn dispatch(&self, message: AlertMessage) -> bool {
        let Some(tx) = self.tx.as_ref() else {
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        };

        match tx.try_send(message) {
            Ok(()) => {
                self.counters.queued.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(TrySendError::Full(message)) => {
                log::warn!("Alert queue full, dropping alert for tick {}", message.tick);
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
            Err(TrySendError::Closed(message)) => {
                log::warn!("Alert dispatcher closed, dropping alert for tick {}", message.tick);
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            queued: self.counters.queued.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    /// Close the queue, wait for queued alerts to drain, return final counters
    pub fn shutdown(mut self) -> DispatchStats {
        self.close();
        self.stats()
    }

    fn close(&mut self) {
        // Dropping the sender ends the worker loop once the queue is empty
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Alert dispatcher thread panicked");
            }
        }
    }
}

impl Drop for AlertDispatcher {
    fn drop(&mut self) {
        self.close();
    }
}

async fn deliver_loop(
    mut rx: mpsc::Receiver<AlertMessage>,
    notifiers: Vec<Box<dyn Notifier>>,
    counters: Arc<Counters>,
) {
    while let Some(message) = rx.recv().await {
        for notifier in &notifiers {
            match notifier.notify(&message) {
                Ok(()) => {
                    counters.delivered.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    log::debug!("Notifier '{}' failed for alert {}: {}", notifier.name(), message.id, e);
                    counters.failed.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }
    log::debug!("Alert dispatcher stopped");
}

// ============================================================================
// TESTS
// ============================================================================
