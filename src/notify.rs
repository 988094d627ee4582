// src/notify.rs
//! Transient user-facing messages

use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, warn};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Success => "✓",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }
}

/// Fire-and-forget sink for user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

fn log_notification(message: &str, severity: Severity) {
    match severity {
        Severity::Info | Severity::Success => info!("Notification ({:?}): {}", severity, message),
        Severity::Warning => warn!("Notification: {}", message),
        Severity::Error => error!("Notification: {}", message),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

/// FIFO of toasts that dismiss themselves after a fixed duration.
#[derive(Debug)]
pub struct ToastQueue {
    duration: Duration,
    toasts: Mutex<VecDeque<Toast>>,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            toasts: Mutex::new(VecDeque::new()),
        }
    }

    /// Toasts still on screen, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        let now = Instant::now();
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        while toasts.front().is_some_and(|toast| toast.expires_at <= now) {
            toasts.pop_front();
        }
        toasts.iter().cloned().collect()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, message: &str, severity: Severity) {
        log_notification(message, severity);
        let toast = Toast {
            message: message.to_string(),
            severity,
            expires_at: Instant::now() + self.duration,
        };
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(toast);
    }
}

/// Prints notifications for the command line front end.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        log_notification(message, severity);
        match severity {
            Severity::Warning | Severity::Error => {
                eprintln!("{} {}", severity.icon(), message)
            }
            _ => println!("{} {}", severity.icon(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn toasts_expire_in_fifo_order() {
        let queue = ToastQueue::new(Duration::from_secs(3));
        queue.notify("first", Severity::Info);
        tokio::time::advance(Duration::from_secs(1)).await;
        queue.notify("second", Severity::Error);

        let messages: Vec<String> = queue.visible().into_iter().map(|t| t.message).collect();
        assert_eq!(messages, vec!["first", "second"]);

        tokio::time::advance(Duration::from_millis(2500)).await;
        let visible = queue.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].severity, Severity::Error);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(queue.visible().is_empty());
    }
}
