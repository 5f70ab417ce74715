//! Toast notifications.

use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

/// Queue of transient success/failure messages
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        self.items.push(Toast {
            kind,
            message,
            shown_at: Instant::now(),
        });
    }

    /// Drop toasts older than [`TOAST_DURATION`]
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < TOAST_DURATION);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
