//! Kani proof harnesses for the ring buffer and the sorted search routines.
//!
//! Bounded model checking over every input up to the unwind bound.
//!
//! # Running the proofs
//!
//! ```bash
//! # Run all proofs
//! cargo kani -p vs-collections
//!
//! # Run a specific proof
//! cargo kani -p vs-collections --harness proof_count_never_exceeds_capacity
//! ```

#[cfg(kani)]
mod proofs {
    use crate::ring_buffer::RingBuffer;
    use crate::sorted_search::{exact_match_search, insertion_point};

    /// Count stays within capacity for any capacity and append count.
    #[kani::proof]
    #[kani::unwind(6)]
    fn proof_count_never_exceeds_capacity() {
        let capacity: usize = kani::any();
        kani::assume(capacity <= 3);
        let appends: usize = kani::any();
        kani::assume(appends <= 4);

        let mut buf = RingBuffer::with_capacity(capacity);
        for i in 0..appends {
            buf.append(i as u64);
        }

        kani::assert(buf.count() <= buf.capacity(), "count must not exceed capacity");
        kani::assert(buf.count() == appends.min(capacity), "count must be min(appends, capacity)");
    }

    /// After an overwrite the newest value is last and the oldest is gone.
    #[kani::proof]
    #[kani::unwind(5)]
    fn proof_overwrite_keeps_newest() {
        let a: u64 = kani::any();
        let b: u64 = kani::any();
        let c: u64 = kani::any();

        let mut buf = RingBuffer::with_capacity(2);
        buf.append(a);
        buf.append(b);
        buf.append(c);

        kani::assert(buf.count() == 2, "full buffer keeps its count");
        kani::assert(buf.get(0) == Some(&b), "second value becomes oldest");
        kani::assert(buf.last() == Some(&c), "newest value is last");
    }

    /// A returned index always holds the target.
    #[kani::proof]
    #[kani::unwind(5)]
    fn proof_exact_match_sound() {
        let mut seq: [u8; 4] = kani::any();
        seq.sort_unstable();
        let target: u8 = kani::any();

        if let Some(i) = exact_match_search(&seq, &target) {
            kani::assert(i < seq.len(), "index in bounds");
            kani::assert(seq[i] == target, "index holds target");
        }
    }

    /// The insertion point is in bounds and keeps the sequence sorted.
    #[kani::proof]
    #[kani::unwind(5)]
    fn proof_insertion_point_preserves_order() {
        let mut seq: [u8; 4] = kani::any();
        seq.sort_unstable();
        let element: u8 = kani::any();

        let i = insertion_point(&seq, &element);
        kani::assert(i <= seq.len(), "insertion point in bounds");
        kani::assert(i == 0 || seq[i - 1] <= element, "left neighbour not greater");
        kani::assert(i == seq.len() || element <= seq[i], "right neighbour not smaller");
    }
}
