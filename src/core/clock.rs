//! Host-driven time and cancellable deadlines.
//!
//! The crate never sleeps or spawns timers. The host passes a monotonic
//! [`Timestamp`] into every time-sensitive call and invokes `advance(now)`
//! when the earliest reported deadline is reached.
//!
//! [`DeadlineQueue`] holds at most one deadline per key. Arming a key that
//! already has a deadline replaces it, so only the most recent arm can ever
//! fire.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::time::Duration;

/// Milliseconds on the host's monotonic clock.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Create a timestamp from milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Raw milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// This timestamp moved forward by `duration`, saturating.
    #[must_use]
    pub fn after(self, duration: Duration) -> Self {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(ms))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// One pending deadline per key, cancel-and-replace on arm.
#[derive(Clone, Debug)]
pub struct DeadlineQueue<K> {
    deadlines: FxHashMap<K, Timestamp>,
}

impl<K> Default for DeadlineQueue<K> {
    fn default() -> Self {
        Self {
            deadlines: FxHashMap::default(),
        }
    }
}

impl<K: Copy + Eq + Hash + Ord> DeadlineQueue<K> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `key` to fire at `at`, replacing any earlier deadline.
    ///
    /// Returns the deadline that was cancelled, if any.
    pub fn arm(&mut self, key: K, at: Timestamp) -> Option<Timestamp> {
        self.deadlines.insert(key, at)
    }

    /// Cancel the pending deadline for `key`.
    pub fn cancel(&mut self, key: K) -> Option<Timestamp> {
        self.deadlines.remove(&key)
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    /// Pending deadline for `key`.
    #[must_use]
    pub fn deadline(&self, key: K) -> Option<Timestamp> {
        self.deadlines.get(&key).copied()
    }

    /// Whether `key` has a pending deadline.
    #[must_use]
    pub fn is_armed(&self, key: K) -> bool {
        self.deadlines.contains_key(&key)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.deadlines.values().min().copied()
    }

    /// Number of pending deadlines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Remove and return every key due at or before `now`,
    /// ordered by deadline then key.
    pub fn expire(&mut self, now: Timestamp) -> Vec<K> {
        let mut due: Vec<(Timestamp, K)> = self
            .deadlines
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(key, at)| (*at, *key))
            .collect();
        due.sort_unstable();

        for (_, key) in &due {
            self.deadlines.remove(key);
        }

        due.into_iter().map(|(_, key)| key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_after() {
        let t = Timestamp::from_millis(1_000);
        assert_eq!(t.after(Duration::from_secs(3)), Timestamp(4_000));
        assert_eq!(Timestamp(u64::MAX).after(Duration::from_millis(1)), Timestamp(u64::MAX));
        assert_eq!(format!("{}", t), "1000ms");
    }

    #[test]
    fn test_arm_replaces_previous_deadline() {
        let mut queue = DeadlineQueue::new();

        assert_eq!(queue.arm(1u8, Timestamp(3_000)), None);
        assert_eq!(queue.arm(1u8, Timestamp(4_000)), Some(Timestamp(3_000)));
        assert_eq!(queue.len(), 1);

        // The replaced deadline never fires.
        assert!(queue.expire(Timestamp(3_500)).is_empty());
        assert_eq!(queue.expire(Timestamp(4_000)), vec![1]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_expire_orders_by_deadline() {
        let mut queue = DeadlineQueue::new();
        queue.arm(3u8, Timestamp(200));
        queue.arm(1u8, Timestamp(300));
        queue.arm(2u8, Timestamp(100));
        queue.arm(4u8, Timestamp(900));

        assert_eq!(queue.next_deadline(), Some(Timestamp(100)));
        assert_eq!(queue.expire(Timestamp(500)), vec![2, 3, 1]);
        assert_eq!(queue.next_deadline(), Some(Timestamp(900)));
    }

    #[test]
    fn test_cancel() {
        let mut queue = DeadlineQueue::new();
        queue.arm(0u8, Timestamp(10));

        assert_eq!(queue.cancel(0), Some(Timestamp(10)));
        assert_eq!(queue.cancel(0), None);
        assert!(!queue.is_armed(0));
        assert!(queue.expire(Timestamp(100)).is_empty());
    }
}
