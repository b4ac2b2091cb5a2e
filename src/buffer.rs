//! Fixed-capacity FIFO history.
//!
//! Both rolling buffers of the processor (recent samples and recent step
//! intervals) are bounded: pushing onto a full history evicts the oldest
//! entry first. Memory is allocated once at construction.

use std::collections::VecDeque;

/// A bounded, insertion-ordered history.
///
/// # Example
///
/// ```
/// use gait_sensing::buffer::BoundedHistory;
///
/// let mut history = BoundedHistory::new(2);
/// history.push(1.0);
/// history.push(2.0);
/// assert_eq!(history.push(3.0), Some(1.0));
/// assert_eq!(history.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> BoundedHistory<T> {
    /// Creates an empty history. A capacity of 0 is treated as 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Appends an item, returning the evicted oldest item when full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }
}

impl BoundedHistory<f64> {
    /// Arithmetic mean, or `None` when empty.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items.iter().sum::<f64>() / self.items.len() as f64)
    }
}
