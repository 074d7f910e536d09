//! Error Types
//!
//! Two families: `MonitorError` surfaces to the caller, `NotifyError` never
//! leaves the alert dispatcher.

use thiserror::Error;

pub type MonitorResult<T> = Result<T, MonitorError>;

#[derive(Debug, Error)]
pub enum MonitorError {
    /// Raw event string outside the known vocabulary
    #[error("unknown event label: {0:?}")]
    UnknownEvent(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dispatcher thread could not be started
    #[error("alert dispatcher unavailable: {0}")]
    DispatcherUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("network error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ureq::Error> for NotifyError {
    fn from(err: ureq::Error) -> Self {
        NotifyError::Network(err.to_string())
    }
}
