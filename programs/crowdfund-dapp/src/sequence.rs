//! Keeps a slow fetch from overwriting the result of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use anchor_lang::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Monotonic ticket issuer. Only the most recently issued ticket is current.
#[derive(Debug, Default)]
pub struct FetchSequence {
    latest: AtomicU64,
}

impl FetchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Slot that only accepts values produced under the newest ticket.
#[derive(Debug)]
pub struct LatestOnly<T> {
    sequence: FetchSequence,
    value: Mutex<Option<T>>,
}

impl<T: Clone> LatestOnly<T> {
    pub fn new() -> Self {
        Self {
            sequence: FetchSequence::new(),
            value: Mutex::new(None),
        }
    }

    /// Start a fetch; any ticket issued earlier becomes stale.
    pub fn begin(&self) -> FetchTicket {
        self.sequence.begin()
    }

    /// Store `value` if `ticket` is still current. Returns whether it was kept.
    pub fn offer(&self, ticket: FetchTicket, value: T) -> bool {
        let mut slot = self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !self.sequence.is_latest(ticket) {
            msg!("discarding stale fetch result {:?}", ticket);
            return false;
        }
        *slot = Some(value);
        true
    }

    pub fn get(&self) -> Option<T> {
        self.value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_increase() {
        let sequence = FetchSequence::new();
        let first = sequence.begin();
        let second = sequence.begin();
        assert!(second > first);
        assert!(!sequence.is_latest(first));
        assert!(sequence.is_latest(second));
    }

    #[test]
    fn stale_result_is_discarded() {
        let slot = LatestOnly::new();
        let slow = slot.begin();
        let fast = slot.begin();

        assert!(slot.offer(fast, vec!["fresh"]));
        assert!(!slot.offer(slow, vec!["stale"]));
        assert_eq!(slot.get(), Some(vec!["fresh"]));
    }

    #[test]
    fn stale_result_cannot_land_before_the_fresh_one() {
        let slot: LatestOnly<u32> = LatestOnly::new();
        let slow = slot.begin();
        let _pending = slot.begin();

        assert!(!slot.offer(slow, 1));
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn workers_on_other_threads_respect_the_newest_ticket() {
        let slot: LatestOnly<&str> = LatestOnly::new();
        let stale = slot.begin();
        let fresh = slot.begin();

        let (stale_kept, fresh_kept) = std::thread::scope(|scope| {
            let slow = scope.spawn(|| slot.offer(stale, "stale"));
            let fast = scope.spawn(|| slot.offer(fresh, "fresh"));
            (slow.join().unwrap(), fast.join().unwrap())
        });

        assert!(!stale_kept);
        assert!(fresh_kept);
        assert_eq!(slot.get(), Some("fresh"));
    }
}
