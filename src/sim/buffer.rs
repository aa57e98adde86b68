//! Bounded sample history
//!
//! Fixed-capacity FIFO store for recent waveform samples. The buffer
//! backs the live chart redraw and the CSV export; the oldest entry is
//! evicted first when the capacity is reached.

use chrono::Utc;
use std::collections::VecDeque;

/// Default capacity of the recent-history buffer.
pub const BUFFER_SIZE: usize = 300;

/// One synthesized signal reading. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Signal value.
    pub value: f64,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

impl Sample {
    /// Create a sample stamped with the current time.
    pub fn now(value: f64) -> Self {
        Self {
            value,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn with_timestamp(value: f64, timestamp: i64) -> Self {
        Self { value, timestamp }
    }
}

/// Capacity-bounded, insertion-ordered history of recent samples.
///
/// Invariant: `len() <= capacity()` always holds; overflow evicts the
/// oldest entry (strict FIFO).
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append a sample, evicting the oldest entry on overflow.
    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Oldest-to-newest iteration.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    /// Values only, oldest first. Used for the full-dataset chart redraw.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(BUFFER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut buffer = SampleBuffer::new(10);
        for i in 0..5 {
            buffer.push(Sample::with_timestamp(i as f64, i));
        }

        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.oldest().unwrap().timestamp, 0);
        assert_eq!(buffer.latest().unwrap().timestamp, 4);
    }

    #[test]
    fn test_fifo_eviction_law() {
        let capacity = 8;
        let mut buffer = SampleBuffer::new(capacity);

        // capacity + 1 insertions: oldest absent, newest present.
        for i in 0..=capacity {
            buffer.push(Sample::with_timestamp(i as f64, i as i64));
        }

        assert_eq!(buffer.len(), capacity);
        assert_eq!(buffer.oldest().unwrap().timestamp, 1);
        assert_eq!(buffer.latest().unwrap().timestamp, capacity as i64);
        assert!(buffer.iter().all(|s| s.timestamp != 0));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut buffer = SampleBuffer::new(16);
        for i in 0..1000 {
            buffer.push(Sample::with_timestamp(0.0, i));
            assert!(buffer.len() <= buffer.capacity());
        }
    }

    #[test]
    fn test_values_preserve_order() {
        let mut buffer = SampleBuffer::new(4);
        for v in [1.0, 2.0, 3.0] {
            buffer.push(Sample::with_timestamp(v, v as i64));
        }

        assert_eq!(buffer.values(), vec![1.0, 2.0, 3.0]);
    }
}
