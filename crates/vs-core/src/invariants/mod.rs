//! Invariant traits and checkers for verified sequence structures.
//!
//! - `ring_buffer`: overwrite-on-full ring buffer (BoundedCount, CountMatchesAppends, RetainsNewest)
//! - `sorted_search`: exact-match and insertion-point search (ExactMatchSound, ExactMatchComplete,
//!   InsertionPreservesOrder, InsertionLandsOnEqual)

pub mod ring_buffer;
pub mod sorted_search;

pub use ring_buffer::{RingBufferProperties, RingBufferPropertyChecker};
pub use sorted_search::{SearchObservation, SortedSearchPropertyChecker};
