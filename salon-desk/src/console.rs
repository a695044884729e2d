//! Toasts printed to the terminal

use salon_client::{Notifier, Toast, ToastLevel};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        let tag = match toast.level {
            ToastLevel::Info => "info",
            ToastLevel::Success => "ok",
            ToastLevel::Warning => "warn",
            ToastLevel::Error => "error",
        };
        eprintln!("[{}] {}", tag, toast.message);
    }
}
