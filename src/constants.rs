//! Central Configuration Constants
//!
//! Single source of truth for all monitoring defaults.
//! Every value can be overridden through an environment variable.

/// Trailing events inspected by the classifier
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Ticks per monitoring run
pub const DEFAULT_TICK_COUNT: u32 = 12;

/// Pause between ticks (milliseconds)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

/// Full event history kept for audit/display
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Pending alerts the dispatcher will queue before dropping
pub const DEFAULT_ALERT_QUEUE: usize = 32;

/// Rule threshold preset: "low", "standard" or "high"
pub const DEFAULT_SENSITIVITY: &str = "standard";

/// Timeout for a single webhook delivery (seconds)
pub const WEBHOOK_TIMEOUT_SECS: u64 = 5;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "AI Security Assistant";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get window size from environment or use default
pub fn get_window_size() -> usize {
    std::env::var("MONITOR_WINDOW_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_WINDOW_SIZE)
}

/// Get tick count from environment or use default
pub fn get_tick_count() -> u32 {
    std::env::var("MONITOR_TICK_COUNT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICK_COUNT)
}

/// Get tick interval from environment or use default
pub fn get_tick_interval_ms() -> u64 {
    std::env::var("MONITOR_TICK_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICK_INTERVAL_MS)
}

/// Get history limit from environment or use default
pub fn get_history_limit() -> usize {
    std::env::var("MONITOR_HISTORY_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
}

/// Get RNG seed from environment (unset = entropy)
pub fn get_seed() -> Option<u64> {
    std::env::var("MONITOR_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
}

/// Get webhook URL from environment
pub fn get_webhook_url() -> Option<String> {
    std::env::var("MONITOR_WEBHOOK_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// Get audit log path from environment
pub fn get_audit_log_path() -> Option<std::path::PathBuf> {
    std::env::var("MONITOR_AUDIT_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(std::path::PathBuf::from)
}

/// Check if adaptive (confidence-boosted) severity is enabled
pub fn is_adaptive_severity() -> bool {
    std::env::var("MONITOR_ADAPTIVE_SEVERITY")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Get rule sensitivity preset from environment or use default
pub fn get_sensitivity() -> String {
    std::env::var("MONITOR_SENSITIVITY")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SENSITIVITY.to_string())
}
