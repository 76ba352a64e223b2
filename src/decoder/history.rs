//! Bounded per-channel sample history

use std::collections::VecDeque;

/// Single decoded value for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePoint {
    /// Global sample index the value was decoded at
    pub index: u64,
    /// Raw 8-bit sensor value
    pub value: u8,
}

/// Sliding window of recently decoded values for a single channel.
///
/// Appends at the current sample index; once the window holds `capacity`
/// points, every insertion evicts the oldest point (FIFO). This backs
/// sliding-window visualization, so it keeps arrival order.
#[derive(Debug, Clone)]
pub struct ChannelHistory {
    points: VecDeque<SamplePoint>,
    capacity: usize,
}

impl ChannelHistory {
    /// Create an empty history with the given window capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest when the window is full.
    pub(crate) fn push(&mut self, index: u64, value: u8) {
        self.points.push_back(SamplePoint { index, value });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// All retained points, oldest first.
    #[must_use]
    pub fn points(&self) -> &VecDeque<SamplePoint> {
        &self.points
    }

    /// Most recently decoded value, if any.
    #[must_use]
    pub fn last_value(&self) -> Option<u8> {
        self.points.back().map(|p| p.value)
    }

    /// Window capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the history holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop all retained points.
    pub(crate) fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_arrival_order() {
        let mut history = ChannelHistory::new(8);
        history.push(0, 10);
        history.push(1, 20);
        history.push(2, 30);

        assert_eq!(history.len(), 3);
        assert_eq!(history.last_value(), Some(30));
        let values: Vec<u8> = history.points().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10, 20, 30]);
    }

    #[test]
    fn test_eviction_at_capacity() {
        let mut history = ChannelHistory::new(3);
        for i in 0..10u64 {
            history.push(i, i as u8);
        }

        assert_eq!(history.len(), 3);
        let indices: Vec<u64> = history.points().iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![7, 8, 9]);
    }

    #[test]
    fn test_clear() {
        let mut history = ChannelHistory::new(4);
        history.push(0, 1);
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.last_value(), None);
    }
}
