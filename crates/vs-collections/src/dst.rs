//! Hooks that let `vs-dst` drive the structures in this crate.

use vs_dst::{Callback, DstTestableRingBuffer, DstTestableSearch, InjectedFault};

use crate::ring_buffer::RingBuffer;
use crate::sorted_search::{self, SortedSearch};

impl DstTestableRingBuffer for RingBuffer<u64> {
    fn with_capacity(capacity: usize) -> Self {
        RingBuffer::with_capacity(capacity)
    }

    fn from_sequence(values: Vec<u64>) -> Self {
        RingBuffer::from_sequence(values)
    }

    fn filled(value: u64, count: usize) -> Self {
        RingBuffer::filled(value, count)
    }

    fn append(&mut self, value: u64) {
        RingBuffer::append(self, value);
    }

    fn append_all(&mut self, values: &[u64]) {
        RingBuffer::append_all(self, values.iter().copied());
    }

    fn count(&self) -> usize {
        RingBuffer::count(self)
    }

    fn capacity(&self) -> usize {
        RingBuffer::capacity(self)
    }

    fn window(&self) -> Vec<u64> {
        self.to_vec()
    }
}

impl DstTestableSearch for SortedSearch {
    fn exact_match(&self, sequence: &[u64], target: u64) -> Option<usize> {
        sorted_search::exact_match_search(sequence, &target)
    }

    fn insertion_point(&self, sequence: &[u64], element: u64) -> usize {
        sorted_search::insertion_point(sequence, &element)
    }

    fn predicate_search(
        &self,
        sequence: &[u64],
        is_ordered_before: Callback<'_>,
        predicate: Callback<'_>,
    ) -> Result<Option<usize>, InjectedFault> {
        sorted_search::predicate_search(sequence, is_ordered_before, predicate)
    }
}
