//! Transient user-facing messages.
//!
//! The host shows each message on its own and forgets it; there is no
//! acknowledgement and no failure path.

/// Fire-and-forget message sink.
pub trait Notifier {
    fn show(&mut self, message: &str);
}

/// Drops every message. Used when notifications are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn show(&mut self, message: &str) {
        tracing::trace!(message, "notification suppressed");
    }
}

/// Keeps every message in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Notifier for RecordingNotifier {
    fn show(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn show(&mut self, message: &str) {
        (**self).show(message);
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn show(&mut self, message: &str) {
        (**self).show(message);
    }
}
