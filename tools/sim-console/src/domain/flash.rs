//! Transient operator notifications.
//!
//! Messages are kept in insertion order. Each one stays visible for the
//! display duration, then fades for the fade duration, then is removed.
//! Time is passed in explicitly so the lifecycle can be tested without a
//! real clock.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Visual severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Lifecycle phase of a message still on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    Visible,
    Fading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlashMessage {
    pub id: u64,
    pub text: String,
    pub severity: Severity,
    pub created_at: Instant,
    pub phase: FlashPhase,
}

/// Ordered queue of flash messages.
#[derive(Debug)]
pub struct FlashQueue {
    messages: VecDeque<FlashMessage>,
    next_id: u64,
    display: Duration,
    fade: Duration,
}

impl FlashQueue {
    pub fn new(display: Duration, fade: Duration) -> Self {
        Self {
            messages: VecDeque::new(),
            next_id: 0,
            display,
            fade,
        }
    }

    /// Append a message; returns its id.
    pub fn push(&mut self, text: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.messages.push_back(FlashMessage {
            id,
            text: text.into(),
            severity,
            created_at: now,
            phase: FlashPhase::Visible,
        });
        id
    }

    /// Advance every message's lifecycle to `now`.
    pub fn tick(&mut self, now: Instant) {
        let display = self.display;
        let lifetime = self.display + self.fade;

        self.messages
            .retain(|m| now.saturating_duration_since(m.created_at) < lifetime);

        for message in self.messages.iter_mut() {
            if now.saturating_duration_since(message.created_at) >= display {
                message.phase = FlashPhase::Fading;
            }
        }
    }

    /// Drop every message, including those mid-fade.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> impl Iterator<Item = &FlashMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> FlashQueue {
        FlashQueue::new(Duration::from_secs(5), Duration::from_millis(300))
    }

    #[test]
    fn test_lifecycle() {
        let mut q = queue();
        let t0 = Instant::now();
        q.push("Parameters updated", Severity::Success, t0);

        q.tick(t0 + Duration::from_millis(4999));
        assert_eq!(q.messages().next().unwrap().phase, FlashPhase::Visible);

        q.tick(t0 + Duration::from_secs(5));
        assert_eq!(q.messages().next().unwrap().phase, FlashPhase::Fading);

        q.tick(t0 + Duration::from_millis(5299));
        assert_eq!(q.len(), 1);

        q.tick(t0 + Duration::from_millis(5300));
        assert!(q.is_empty());
    }

    #[test]
    fn test_messages_keep_insertion_order_and_expire_independently() {
        let mut q = queue();
        let t0 = Instant::now();
        q.push("first", Severity::Info, t0);
        q.push("second", Severity::Error, t0 + Duration::from_secs(2));

        let texts: Vec<_> = q.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);

        q.tick(t0 + Duration::from_secs(6));
        let texts: Vec<_> = q.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["second"]);
    }

    #[test]
    fn test_clear_cancels_pending_removals() {
        let mut q = queue();
        let t0 = Instant::now();
        q.push("a", Severity::Info, t0);
        q.push("b", Severity::Info, t0);
        q.clear();
        assert!(q.is_empty());

        // Later ticks have nothing left to act on.
        q.tick(t0 + Duration::from_secs(10));
        assert!(q.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut q = queue();
        let t0 = Instant::now();
        let a = q.push("a", Severity::Info, t0);
        let b = q.push("b", Severity::Info, t0);
        assert_ne!(a, b);
    }
}
