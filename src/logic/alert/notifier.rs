//! Notifiers
//!
//! Delivery channels for alert messages: log, webhook (Slack, Discord,
//! generic JSON) and a JSON-lines audit file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::message::AlertMessage;
use crate::constants::WEBHOOK_TIMEOUT_SECS;
use crate::logic::error::NotifyError;

/// A delivery channel. Runs on the dispatcher thread, never on the tick.
pub trait Notifier: Send {
    fn name(&self) -> &str;

    fn notify(&self, message: &AlertMessage) -> Result<(), NotifyError>;
}

// ============================================================================
// LOG
// ============================================================================

/// Writes the alert through `log` (stand-in for speak/display)
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    fn notify(&self, message: &AlertMessage) -> Result<(), NotifyError> {
        log::warn!("[ALERT #{}] {}", message.tick, message.text);
        Ok(())
    }
}

// ============================================================================
// WEBHOOK
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookPlatform {
    Slack,
    Discord,
    Generic,
}

impl WebhookPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookPlatform::Slack => "slack",
            WebhookPlatform::Discord => "discord",
            WebhookPlatform::Generic => "generic",
        }
    }

    /// Guess from the URL host
    pub fn detect(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("hooks.slack.com") {
            WebhookPlatform::Slack
        } else if url.contains("discord.com/api/webhooks") || url.contains("discordapp.com/api/webhooks") {
            WebhookPlatform::Discord
        } else {
            WebhookPlatform::Generic
        }
    }
}

pub struct WebhookNotifier {
    url: String,
    platform: WebhookPlatform,
    timeout: Duration,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            platform: WebhookPlatform::detect(url),
            timeout: Duration::from_secs(WEBHOOK_TIMEOUT_SECS),
        }
    }

    pub fn with_platform(mut self, platform: WebhookPlatform) -> Self {
        self.platform = platform;
        self
    }

    pub fn platform(&self) -> WebhookPlatform {
        self.platform
    }

    /// Body for the configured platform
    pub fn format_payload(&self, message: &AlertMessage) -> String {
        match self.platform {
            WebhookPlatform::Slack => format_slack(message),
            WebhookPlatform::Discord => format_discord(message),
            WebhookPlatform::Generic => format_generic(message),
        }
    }
}

impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        self.platform.as_str()
    }

    fn notify(&self, message: &AlertMessage) -> Result<(), NotifyError> {
        let body = self.format_payload(message);

        let response = ureq::post(&self.url)
            .timeout(self.timeout)
            .set("Content-Type", "application/json")
            .send_string(&body)?;

        log::debug!("Alert {} sent to {} ({})", message.id, self.platform.as_str(), response.status());
        Ok(())
    }
}

fn format_slack(message: &AlertMessage) -> String {
    serde_json::json!({
        "text": message.text,
        "blocks": [
            {
                "type": "header",
                "text": { "type": "plain_text", "text": message.title(), "emoji": true }
            },
            {
                "type": "section",
                "text": { "type": "mrkdwn", "text": message.advice }
            },
            {
                "type": "section",
                "fields": [
                    { "type": "mrkdwn", "text": format!("*Severity:* {}%", message.severity) },
                    { "type": "mrkdwn", "text": format!("*Label:* {}", message.label) }
                ]
            }
        ],
        "attachments": [{ "color": message.risk.color() }]
    })
    .to_string()
}

fn format_discord(message: &AlertMessage) -> String {
    serde_json::json!({
        "content": message.text,
        "embeds": [{
            "title": message.title(),
            "description": message.advice,
            "color": u32::from_str_radix(&message.risk.color()[1..], 16).unwrap_or(0),
            "fields": [
                { "name": "Severity", "value": format!("{}%", message.severity), "inline": true },
                { "name": "Tick", "value": message.tick.to_string(), "inline": true }
            ],
            "timestamp": message.timestamp.to_rfc3339()
        }]
    })
    .to_string()
}

fn format_generic(message: &AlertMessage) -> String {
    serde_json::to_string(message).unwrap_or_else(|_| {
        serde_json::json!({ "text": message.text }).to_string()
    })
}

// ============================================================================
// AUDIT LOG
// ============================================================================

/// Appends one JSON object per alert
pub struct AuditLogNotifier {
    path: PathBuf,
}

impl AuditLogNotifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Notifier for AuditLogNotifier {
    fn name(&self) -> &str {
        "audit-log"
    }

    fn notify(&self, message: &AlertMessage) -> Result<(), NotifyError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let line = serde_json::to_string(message)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

/// `<data_local_dir>/ai-security/alerts.jsonl`, or `./ai-security/alerts.jsonl`
pub fn default_audit_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ai-security")
        .join("alerts.jsonl")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::events::EventLabel;
    use crate::logic::threat::classify;

    fn sample_message() -> AlertMessage {
        let result = classify(&[EventLabel::HighTraffic; 4]);
        AlertMessage::new(&result, result.severity, 7)
    }

    #[test]
    fn test_platform_detection() {
        assert_eq!(
            WebhookPlatform::detect("https://hooks.slack.com/services/T000/B000/XXX"),
            WebhookPlatform::Slack
        );
        assert_eq!(
            WebhookPlatform::detect("https://discord.com/api/webhooks/1/abc"),
            WebhookPlatform::Discord
        );
        assert_eq!(WebhookPlatform::detect("http://localhost:9000/alerts"), WebhookPlatform::Generic);
    }

    #[test]
    fn test_slack_payload() {
        let notifier = WebhookNotifier::new("https://hooks.slack.com/services/x");
        let body: serde_json::Value = serde_json::from_str(&notifier.format_payload(&sample_message())).unwrap();
        assert!(body["text"].as_str().unwrap().contains("DDoS Attack"));
        assert_eq!(body["blocks"][0]["text"]["text"], "[HIGH] DDoS Attack");
    }

    #[test]
    fn test_discord_payload() {
        let notifier = WebhookNotifier::new("http://example.invalid").with_platform(WebhookPlatform::Discord);
        let body: serde_json::Value = serde_json::from_str(&notifier.format_payload(&sample_message())).unwrap();
        assert_eq!(body["embeds"][0]["fields"][1]["value"], "7");
        assert_eq!(body["embeds"][0]["color"], 0xe67e22);
    }

    #[test]
    fn test_generic_payload_is_message() {
        let msg = sample_message();
        let notifier = WebhookNotifier::new("http://example.invalid");
        let back: AlertMessage = serde_json::from_str(&notifier.format_payload(&msg)).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_unreachable_webhook_is_error() {
        let notifier = WebhookNotifier::new("http://127.0.0.1:9/unreachable");
        assert!(notifier.notify(&sample_message()).is_err());
    }

    #[test]
    fn test_audit_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("alerts.jsonl");
        let notifier = AuditLogNotifier::new(&path);

        notifier.notify(&sample_message()).unwrap();
        notifier.notify(&sample_message()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: AlertMessage = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.tick, 7);
    }

    #[test]
    fn test_default_audit_path() {
        let path = default_audit_log_path();
        assert!(path.ends_with("ai-security/alerts.jsonl"));
    }
}
