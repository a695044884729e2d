//! Transient operator notifications (toasts)

use serde::{Deserialize, Serialize};

use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for toasts; the UI decides how long they stay up
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => tracing::warn!(message = %toast.message, "toast"),
            _ => tracing::info!(message = %toast.message, "toast"),
        }
    }
}

/// Report a failed operation: unexpected failures are logged as errors,
/// every failure gets one toast
pub fn report(notifier: &dyn Notifier, context: &str, err: &ClientError) {
    if err.is_unexpected() {
        tracing::error!(error = %err, "{} failed unexpectedly", context);
    } else {
        tracing::warn!(error = %err, "{} failed", context);
    }
    let toast = match err {
        ClientError::Rejected(_) => Toast::warning(err.user_message()),
        _ => Toast::error(err.user_message()),
    };
    notifier.notify(toast);
}
