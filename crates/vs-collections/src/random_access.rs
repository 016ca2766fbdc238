//! Random-access sequence abstraction used by the search routines.

use std::collections::VecDeque;

use crate::ring_buffer::RingBuffer;

/// A sequence with O(1) positional access over `0..len()`.
///
/// `at` may panic for `index >= len()`; the search routines never call it
/// out of range.
pub trait RandomAccess {
    type Item;

    fn len(&self) -> usize;

    fn at(&self, index: usize) -> &Self::Item;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> RandomAccess for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T, const N: usize> RandomAccess for [T; N] {
    type Item = T;

    fn len(&self) -> usize {
        N
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T> RandomAccess for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T> RandomAccess for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }
}

/// Logical indices: position 0 is the oldest live element.
impl<T> RandomAccess for RingBuffer<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.count()
    }

    fn at(&self, index: usize) -> &T {
        &self[index]
    }
}
