//! Overwrite-on-full ring buffer invariants.
//!
//! | Property | Description |
//! |----------|-------------|
//! | BoundedCount | `count <= capacity` at all times |
//! | CountMatchesAppends | `count == min(appends, capacity)` |
//! | RetainsNewest | Live window equals the last `count` appended values, in append order |

use crate::counterexample::{Counterexample, StateSnapshot};
use crate::property::{PropertyChecker, PropertyResult};

/// Observable state of a ring buffer under test.
pub trait RingBufferProperties {
    /// Every value appended since construction, in append order.
    ///
    /// Values that seeded the buffer at construction count as appended.
    fn appended_values(&self) -> Vec<u64>;

    /// Live window, oldest to newest.
    fn live_window(&self) -> Vec<u64>;

    /// Reported number of live elements.
    fn count(&self) -> usize;

    /// Fixed capacity.
    fn capacity(&self) -> usize;
}

/// Property checker for ring buffer implementations.
pub struct RingBufferPropertyChecker<'a, T: RingBufferProperties> {
    buffer: &'a T,
    dst_seed: Option<u64>,
}

impl<'a, T: RingBufferProperties> RingBufferPropertyChecker<'a, T> {
    #[must_use]
    pub fn new(buffer: &'a T) -> Self {
        Self {
            buffer,
            dst_seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.dst_seed = Some(seed);
        self
    }

    fn counterexample(&self, description: String, appended: &[u64], window: &[u64]) -> Counterexample {
        let mut ce = Counterexample::for_seed(self.dst_seed).with_description(description.clone());
        ce.add_state(StateSnapshot {
            step: appended.len() as u64,
            description,
            variables: vec![
                ("capacity".to_string(), self.buffer.capacity().to_string()),
                ("count".to_string(), self.buffer.count().to_string()),
                ("appended".to_string(), format!("{:?}", appended)),
                ("window".to_string(), format!("{:?}", window)),
            ],
        });
        ce
    }

    fn check_bounded_count(&self) -> PropertyResult {
        let count = self.buffer.count();
        let capacity = self.buffer.capacity();

        if count > capacity {
            return PropertyResult::fail(
                "BoundedCount",
                format!("Buffer reports {} items but capacity is {}", count, capacity),
                None,
            );
        }

        PropertyResult::pass("BoundedCount")
    }

    fn check_count_matches_appends(&self) -> PropertyResult {
        let appended = self.buffer.appended_values();
        let expected = appended.len().min(self.buffer.capacity());
        let count = self.buffer.count();
        let window = self.buffer.live_window();

        if count != expected || window.len() != count {
            let message = format!(
                "After {} appends at capacity {}: count={} window_len={} expected={}",
                appended.len(),
                self.buffer.capacity(),
                count,
                window.len(),
                expected
            );
            let ce = self.counterexample(message.clone(), &appended, &window);
            return PropertyResult::fail("CountMatchesAppends", message, Some(ce));
        }

        PropertyResult::pass("CountMatchesAppends")
    }

    fn check_retains_newest(&self) -> PropertyResult {
        let appended = self.buffer.appended_values();
        let window = self.buffer.live_window();
        let keep = appended.len().min(self.buffer.capacity());
        let expected = &appended[appended.len() - keep..];

        if window.as_slice() != expected {
            let message = format!("Window {:?} is not the newest appends {:?}", window, expected);
            let ce = self.counterexample(message.clone(), &appended, &window);
            return PropertyResult::fail("RetainsNewest", message, Some(ce));
        }

        PropertyResult::pass("RetainsNewest")
    }
}

impl<'a, T: RingBufferProperties> PropertyChecker for RingBufferPropertyChecker<'a, T> {
    fn check_all(&self) -> Vec<PropertyResult> {
        vec![
            self.check_bounded_count(),
            self.check_count_matches_appends(),
            self.check_retains_newest(),
        ]
    }
}
