//! # vs-collections
//!
//! Verified sequence structures.
//!
//! Each implementation:
//! - Implements the corresponding Properties trait from `vs-core` (via a tracked wrapper)
//! - Implements a DST trait from `vs-dst` so the simulation runners can drive it
//! - Has proptest tests against a reference model
//! - Has Kani proofs for bounded verification (under `#[cfg(kani)]`)
//!
//! # Modules
//!
//! - `ring_buffer`: Fixed-capacity buffer that overwrites its oldest element when full
//! - `random_access`: Indexable-sequence abstraction the search routines run over
//! - `sorted_search`: Exact-match, predicate-driven and insertion-point binary search
//! - `tracked`: Ring buffer that records its append history for property checks
//! - `dst`: `vs-dst` trait implementations
//! - `kani_proofs`: Kani bounded model checking proofs

pub mod dst;
pub mod kani_proofs;
pub mod random_access;
pub mod ring_buffer;
pub mod sorted_search;
pub mod tracked;

pub use random_access::RandomAccess;
pub use ring_buffer::{Iter, RingBuffer};
pub use sorted_search::{
    exact_match_search, insertion_point, predicate_search, predicate_search_infallible, SortedSearch,
};
pub use tracked::TrackedRingBuffer;
