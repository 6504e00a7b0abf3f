//! Presenter seam
//!
//! The controller never draws anything itself. Toasts, confirmation prompts,
//! notifications and redraws go through this trait so the same handlers
//! drive a terminal, an HTML writer or a recording double in tests.

use crate::render::{NotificationView, Page};

pub trait Presenter: Send + Sync {
    /// Transient error toast
    fn show_error(&self, message: &str);

    /// Transient success toast
    fn show_success(&self, message: &str);

    /// Yes/no prompt; `false` aborts the action
    fn confirm(&self, message: &str) -> bool;

    /// New-event notification from the poller
    fn notify(&self, notification: &NotificationView);

    /// Visible page changed
    fn redraw(&self, page: &Page);
}

/// Presenter that logs everything and accepts every prompt
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn show_error(&self, message: &str) {
        tracing::error!(message, "Dashboard error");
    }

    fn show_success(&self, message: &str) {
        tracing::info!(message, "Dashboard success");
    }

    fn confirm(&self, message: &str) -> bool {
        tracing::info!(message, "Auto-confirming prompt");
        true
    }

    fn notify(&self, notification: &NotificationView) {
        tracing::info!(
            event = %notification.title,
            area = %notification.area,
            start = %notification.start_date,
            "New event"
        );
    }

    fn redraw(&self, _page: &Page) {}
}
