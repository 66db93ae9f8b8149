//! Toast-style notification channel.
//!
//! Any flow may append; the display decides when entries go away by calling
//! [`Notifier::tick`]. There is no acknowledgement or consumer contract.

use std::collections::VecDeque;

/// Default lifetime of a notification, in display ticks.
pub const DEFAULT_TTL_TICKS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Debug, Clone)]
struct Entry {
    notification: Notification,
    remaining: u32,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    entries: VecDeque<Entry>,
    ttl_ticks: u32,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_TICKS)
    }
}

impl Notifier {
    pub fn new(ttl_ticks: u32) -> Self {
        Self {
            entries: VecDeque::new(),
            ttl_ticks: ttl_ticks.max(1),
        }
    }

    pub fn push(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Success => {
                tracing::info!(title = %notification.title, "{}", notification.description)
            }
            Severity::Error => {
                tracing::warn!(title = %notification.title, "{}", notification.description)
            }
        }
        self.entries.push_back(Entry {
            notification,
            remaining: self.ttl_ticks,
        });
    }

    /// Age every entry by one tick and drop the expired ones.
    pub fn tick(&mut self) {
        for entry in &mut self.entries {
            entry.remaining = entry.remaining.saturating_sub(1);
        }
        self.entries.retain(|e| e.remaining > 0);
    }

    /// Live notifications, oldest first.
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|e| &e.notification)
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back().map(|e| &e.notification)
    }

    /// Remove and return all live notifications.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.entries.drain(..).map(|e| e.notification).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_expire_after_ttl() {
        let mut n = Notifier::new(2);
        n.push(Notification::success("a", "first"));
        n.tick();
        assert_eq!(n.len(), 1);
        n.tick();
        assert!(n.is_empty());
    }

    #[test]
    fn later_entries_outlive_earlier_ones() {
        let mut n = Notifier::new(2);
        n.push(Notification::success("a", "first"));
        n.tick();
        n.push(Notification::error("b", "second"));
        n.tick();
        let titles: Vec<_> = n.active().map(|x| x.title.as_str()).collect();
        assert_eq!(titles, vec!["b"]);
        assert!(n.latest().unwrap().is_error());
    }

    #[test]
    fn drain_empties_queue_in_order() {
        let mut n = Notifier::default();
        n.push(Notification::success("a", ""));
        n.push(Notification::error("b", ""));
        let drained = n.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].title, "a");
        assert!(n.is_empty());
    }

    #[test]
    fn zero_ttl_is_clamped() {
        let mut n = Notifier::new(0);
        n.push(Notification::success("a", ""));
        assert_eq!(n.len(), 1);
        n.tick();
        assert!(n.is_empty());
    }
}
