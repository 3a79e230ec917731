use super::event::Event;
use super::types::Priority;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct QueuedEvent {
    sequence_num: u64,
    event: Event,
}

impl QueuedEvent {
    fn priority(&self) -> Priority {
        self.event.priority
    }
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.priority() == other.priority() && self.sequence_num == other.sequence_num
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on priority; within a priority the older push wins
        self.priority()
            .cmp(&other.priority())
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

#[derive(Debug, Default)]
struct Inner {
    heap: BinaryHeap<QueuedEvent>,
    sequence_counter: u64,
}

/// Priority mailbox shared by every system and the manager.
///
/// Highest priority first, FIFO within a priority band. `pop` never blocks on
/// an empty queue; callers that need to wait poll.
#[derive(Debug, Default)]
pub struct EventQueue {
    inner: Mutex<Inner>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, event: Event) {
        let mut inner = self.inner();
        let sequence_num = inner.sequence_counter;
        inner.sequence_counter += 1;
        inner.heap.push(QueuedEvent { sequence_num, event });
    }

    /// Remove the highest-priority event, or `None` if the queue is empty
    pub fn pop(&self) -> Option<Event> {
        self.inner().heap.pop().map(|queued| queued.event)
    }

    /// Pop everything currently queued, in delivery order
    pub fn drain(&self) -> Vec<Event> {
        let mut inner = self.inner();
        let mut events = Vec::with_capacity(inner.heap.len());
        while let Some(queued) = inner.heap.pop() {
            events.push(queued.event);
        }
        events
    }

    /// Snapshot of the current size
    pub fn len(&self) -> usize {
        self.inner().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
