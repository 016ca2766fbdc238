//! Ring buffer that records its append history for property checking.

use vs_core::invariants::RingBufferProperties;

use crate::ring_buffer::RingBuffer;

/// A `RingBuffer<u64>` plus every value it was ever given.
///
/// The history grows without bound; use it in tests, not in production.
#[derive(Debug, Clone)]
pub struct TrackedRingBuffer {
    buffer: RingBuffer<u64>,
    appended: Vec<u64>,
}

impl TrackedRingBuffer {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: RingBuffer::with_capacity(capacity),
            appended: Vec::new(),
        }
    }

    /// Seed values count as appended.
    #[must_use]
    pub fn from_sequence(values: Vec<u64>) -> Self {
        Self {
            buffer: RingBuffer::from_sequence(values.iter().copied()),
            appended: values,
        }
    }

    pub fn append(&mut self, value: u64) {
        self.buffer.append(value);
        self.appended.push(value);
    }

    pub fn append_all<I: IntoIterator<Item = u64>>(&mut self, values: I) {
        for value in values {
            self.append(value);
        }
    }

    /// The wrapped buffer.
    #[must_use]
    pub fn buffer(&self) -> &RingBuffer<u64> {
        &self.buffer
    }
}

impl RingBufferProperties for TrackedRingBuffer {
    fn appended_values(&self) -> Vec<u64> {
        self.appended.clone()
    }

    fn live_window(&self) -> Vec<u64> {
        self.buffer.to_vec()
    }

    fn count(&self) -> usize {
        self.buffer.count()
    }

    fn capacity(&self) -> usize {
        self.buffer.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vs_core::invariants::RingBufferPropertyChecker;
    use vs_core::PropertyChecker;
    use vs_dst::{get_or_generate_seed, iterations_from_env, DeterministicRng};

    #[test]
    fn test_invariants_basic() {
        let mut buf = TrackedRingBuffer::with_capacity(3);
        buf.append_all([1, 2, 3, 4, 5]);

        let checker = RingBufferPropertyChecker::new(&buf);
        assert!(checker.all_hold(), "{:?}", checker.violations());
        assert_eq!(buf.buffer().to_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn test_invariants_from_sequence() {
        let mut buf = TrackedRingBuffer::from_sequence(vec![9, 8, 7]);
        assert!(RingBufferPropertyChecker::new(&buf).all_hold());
        buf.append(6);
        assert!(RingBufferPropertyChecker::new(&buf).all_hold());
        assert_eq!(buf.buffer().to_vec(), vec![8, 7, 6]);
    }

    #[test]
    fn test_dst_single_threaded() {
        let seed = get_or_generate_seed().unwrap();
        let mut rng = DeterministicRng::new(seed);
        let iterations = iterations_from_env(1000).unwrap();

        let capacity = rng.gen_range(0..=16_usize);
        let mut buf = TrackedRingBuffer::with_capacity(capacity);

        for _ in 0..iterations {
            match rng.gen_range(0..3_u8) {
                0 => buf.append(rng.gen_range(0..1000_u64)),
                1 => {
                    let len = rng.gen_range(0..=2 * capacity + 1);
                    let values: Vec<u64> = (0..len).map(|_| rng.gen_range(0..1000_u64)).collect();
                    buf.append_all(values);
                }
                _ => {
                    let checker = RingBufferPropertyChecker::new(&buf).with_seed(seed);
                    assert!(checker.all_hold(), "Invariant violated at DST_SEED={}", seed);
                }
            }
        }

        let checker = RingBufferPropertyChecker::new(&buf).with_seed(seed);
        assert!(checker.all_hold(), "Final invariant check failed at DST_SEED={}", seed);
    }
}
