//! Snapshot publication and one-shot notifications.
//!
//! The picker exposes its output through two small primitives that know
//! nothing about the host runtime:
//!
//! - [`LiveState`]: the latest immutable snapshot plus a version counter.
//!   Observers hold a [`Subscription`] and poll it; each published version is
//!   observed at most once per subscription.
//! - [`OneShot`]: a drainable queue for consumed-once notifications such as
//!   "picker dismissed" or "create page requested". Draining removes the
//!   items, so nothing is redelivered.
//!
//! # Example
//!
//! ```
//! use layout_picker::app::signals::{LiveState, OneShot};
//!
//! let mut state = LiveState::new(0_u32);
//! let mut sub = state.subscribe();
//! state.set(1);
//! assert_eq!(sub.poll(&state), Some(&1));
//! assert_eq!(sub.poll(&state), None);
//!
//! let mut showing = OneShot::default();
//! showing.emit(true);
//! assert_eq!(showing.drain(), vec![true]);
//! assert!(showing.is_empty());
//! ```

use std::collections::VecDeque;

/// Latest-value holder with versioned change tracking.
#[derive(Debug, Clone)]
pub struct LiveState<T> {
    value: T,
    version: u64,
}

impl<T> LiveState<T> {
    pub const fn new(initial: T) -> Self {
        Self {
            value: initial,
            version: 0,
        }
    }

    /// Returns the current snapshot.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the snapshot and bumps the version.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.version = self.version.wrapping_add(1);
    }

    /// Number of snapshots published since construction.
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Creates a subscription positioned at the current version.
    ///
    /// The current snapshot is considered seen; only later `set` calls are
    /// reported by [`Subscription::poll`].
    pub const fn subscribe(&self) -> Subscription {
        Subscription {
            seen: self.version,
        }
    }
}

impl<T: PartialEq> LiveState<T> {
    /// Publishes `value` only if it differs from the current snapshot.
    ///
    /// Returns `true` when a new version was published.
    pub fn set_if_changed(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.set(value);
        true
    }
}

impl<T: Default> Default for LiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Cursor into a [`LiveState`]'s version history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    seen: u64,
}

impl Subscription {
    /// Returns the snapshot if it changed since the last poll.
    pub fn poll<'a, T>(&mut self, state: &'a LiveState<T>) -> Option<&'a T> {
        if state.version == self.seen {
            return None;
        }
        self.seen = state.version;
        Some(&state.value)
    }
}

/// Queue of notifications that are delivered exactly once.
#[derive(Debug, Clone)]
pub struct OneShot<T> {
    pending: VecDeque<T>,
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<T> OneShot<T> {
    pub fn emit(&mut self, item: T) {
        self.pending.push_back(item);
    }

    /// Removes and returns every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<T> {
        self.pending.drain(..).collect()
    }

    /// Inspects the most recent notification without consuming it.
    pub fn peek_latest(&self) -> Option<&T> {
        self.pending.back()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_version_is_observed_once_per_subscription() {
        let mut state = LiveState::new("loading");
        let mut first = state.subscribe();

        state.set("content");
        let mut second = state.subscribe();

        assert_eq!(first.poll(&state), Some(&"content"));
        assert_eq!(first.poll(&state), None);
        assert_eq!(second.poll(&state), None);

        state.set("content");
        assert_eq!(second.poll(&state), Some(&"content"));
        assert_eq!(state.version(), 2);
    }

    #[test]
    fn set_if_changed_skips_equal_values() {
        let mut state = LiveState::new(3);
        assert!(!state.set_if_changed(3));
        assert_eq!(state.version(), 0);
        assert!(state.set_if_changed(4));
        assert_eq!(state.version(), 1);
    }

    #[test]
    fn drained_notifications_are_not_redelivered() {
        let mut queue = OneShot::default();
        queue.emit(true);
        queue.emit(false);

        assert_eq!(queue.peek_latest(), Some(&false));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain(), vec![true, false]);
        assert!(queue.drain().is_empty());
        assert!(queue.peek_latest().is_none());
    }
}
