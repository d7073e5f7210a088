//! Fixed-capacity ring buffer of track centers.

use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;

use nalgebra::Point2;

/// Bounded history of centers, oldest first.
///
/// Once full, each push evicts the oldest entry, so the most recent center is
/// always last and the length never exceeds the capacity.
#[derive(Clone, PartialEq)]
pub struct CentroidHistory {
    deque: VecDeque<Point2<i32>>,
    capacity: usize,
}

impl fmt::Debug for CentroidHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.deque.fmt(f)
    }
}

impl CentroidHistory {
    #[inline]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            deque: VecDeque::with_capacity(capacity.get()),
            capacity: capacity.get(),
        }
    }

    /// Append a center, returning the evicted oldest entry if the buffer was full.
    #[inline]
    pub fn push(&mut self, center: Point2<i32>) -> Option<Point2<i32>> {
        let evicted = if self.is_full() {
            self.deque.pop_front()
        } else {
            None
        };

        self.deque.push_back(center);

        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.deque.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.deque.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn first(&self) -> Option<&Point2<i32>> {
        self.deque.front()
    }

    #[inline]
    pub fn last(&self) -> Option<&Point2<i32>> {
        self.deque.back()
    }

    /// Iterate oldest to newest.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'_ Point2<i32>> {
        self.deque.iter()
    }

    pub fn to_vec(&self) -> Vec<Point2<i32>> {
        self.deque.iter().copied().collect()
    }
}
