use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Handle identifying one started run.
///
/// Not `Clone`: a ticket publishes at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct RunTicket(u64);

impl RunTicket {
    /// Sequence number, starting at 1.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Last-write-wins slot for results of overlapping runs.
///
/// Each run takes a ticket with [`begin`](Self::begin) before starting and
/// hands its result to [`publish`](Self::publish) when done. Only the most
/// recently issued ticket may publish; results of superseded runs are
/// rejected even if they finish last.
///
/// # Examples
///
/// ```
/// use risk_engine::LatestRunSlot;
///
/// let slot = LatestRunSlot::new();
/// let first = slot.begin();
/// let second = slot.begin();
///
/// assert!(slot.publish(second, "second").is_some());
/// assert!(slot.publish(first, "first").is_none());
/// assert_eq!(slot.current().as_deref(), Some(&"second"));
/// ```
#[derive(Debug)]
pub struct LatestRunSlot<T> {
    issued: AtomicU64,
    current: Mutex<Option<(u64, Arc<T>)>>,
}

impl<T> Default for LatestRunSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestRunSlot<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// Issues the ticket for a newly started run.
    pub fn begin(&self) -> RunTicket {
        RunTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns true if `ticket` is still the most recently issued one.
    pub fn is_latest(&self, ticket: &RunTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Stores `value` if `ticket` is the latest, returning the stored value.
    /// Returns `None` if the run was superseded.
    pub fn publish(&self, ticket: RunTicket, value: T) -> Option<Arc<T>> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        // Checked under the lock so a newer run cannot be overwritten
        if !self.is_latest(&ticket) {
            return None;
        }
        let value = Arc::new(value);
        *current = Some((ticket.0, Arc::clone(&value)));
        Some(value)
    }

    /// Most recently published value.
    pub fn current(&self) -> Option<Arc<T>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, value)| Arc::clone(value))
    }

    /// Ticket id of the most recently published value.
    pub fn current_id(&self) -> Option<u64> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let slot: LatestRunSlot<()> = LatestRunSlot::new();
        assert_eq!(slot.begin().id(), 1);
        assert_eq!(slot.begin().id(), 2);
    }

    #[test]
    fn test_empty_slot() {
        let slot: LatestRunSlot<i32> = LatestRunSlot::default();
        assert!(slot.current().is_none());
        assert!(slot.current_id().is_none());
    }

    #[test]
    fn test_in_order_publication() {
        let slot = LatestRunSlot::new();
        let t1 = slot.begin();
        assert!(slot.publish(t1, 1).is_some());
        let t2 = slot.begin();
        assert!(slot.publish(t2, 2).is_some());
        assert_eq!(slot.current().as_deref(), Some(&2));
        assert_eq!(slot.current_id(), Some(2));
    }

    #[test]
    fn test_superseded_run_keeps_previous_value() {
        let slot = LatestRunSlot::new();
        let t1 = slot.begin();
        assert!(slot.publish(t1, "a").is_some());

        let t2 = slot.begin();
        let t3 = slot.begin();
        assert!(!slot.is_latest(&t2));
        assert!(slot.publish(t2, "b").is_none());
        assert_eq!(slot.current().as_deref(), Some(&"a"));

        assert_eq!(slot.publish(t3, "c").as_deref(), Some(&"c"));
        assert_eq!(slot.current().as_deref(), Some(&"c"));
    }
}
