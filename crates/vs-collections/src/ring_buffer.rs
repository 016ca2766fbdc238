//! Fixed-capacity ring buffer that overwrites its oldest element when full.
//!
//! # Invariants
//!
//! | Property | Verified By |
//! |----------|-------------|
//! | BoundedCount | unit tests, proptest, DST, Kani |
//! | CountMatchesAppends | proptest, DST |
//! | RetainsNewest | unit tests, proptest, DST, Kani |
//!
//! # Layout
//!
//! Storage is a boxed slice of `capacity` slots. The live window starts at
//! `head` and spans `count` slots, wrapping modulo capacity; `tail` is the
//! next write position. Fullness is decided by `count`, never by comparing
//! `head` and `tail`, which are equal both when empty and when full.
//!
//! The buffer is single-owner: every mutation takes `&mut self` and there
//! is no internal locking.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Index;

/// A fixed-capacity circular buffer with overwrite-on-full semantics.
///
/// Capacity is set at construction and never changes. Appending to a full
/// buffer drops the oldest element; appending to a zero-capacity buffer
/// drops the new element.
#[derive(Clone)]
pub struct RingBuffer<T> {
    /// Backing slots; never-written slots hold `None`
    slots: Box<[Option<T>]>,
    /// Index of the oldest live element
    head: usize,
    /// Next write position
    tail: usize,
    /// Number of live elements
    count: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer holding at most `capacity` elements.
    ///
    /// A capacity of zero is allowed; such a buffer stays empty forever.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let slots: Box<[Option<T>]> = (0..capacity).map(|_| None).collect();
        Self {
            slots,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Create a full buffer whose capacity is the length of `sequence`.
    ///
    /// Elements keep their iteration order, oldest first.
    #[must_use]
    pub fn from_sequence<I: IntoIterator<Item = T>>(sequence: I) -> Self {
        let slots: Box<[Option<T>]> = sequence.into_iter().map(Some).collect();
        let count = slots.len();
        Self {
            slots,
            head: 0,
            // length mod capacity: the next write overwrites slot 0
            tail: 0,
            count,
        }
    }

    /// Append an element, evicting the oldest one if the buffer is full.
    ///
    /// O(1), never fails. A zero-capacity buffer ignores the call.
    pub fn append(&mut self, element: T) {
        let capacity = self.slots.len();
        if capacity == 0 {
            return;
        }

        let was_full = self.count == capacity;
        debug_assert!(self.count <= capacity, "count exceeded capacity");
        debug_assert!(!was_full || self.head == self.tail, "full buffer must have head == tail");

        // Overwriting drops the evicted element when full
        self.slots[self.tail] = Some(element);
        self.tail = (self.tail + 1) % capacity;

        if was_full {
            self.head = (self.head + 1) % capacity;
        } else {
            self.count += 1;
        }
    }

    /// Append every element of `sequence` in iteration order.
    ///
    /// Identical to calling [`append`](Self::append) once per element,
    /// including partial overwrite when the input outgrows free space.
    pub fn append_all<I: IntoIterator<Item = T>>(&mut self, sequence: I) {
        for element in sequence {
            self.append(element);
        }
    }

    /// Number of live elements.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Alias for [`count`](Self::count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True when the next append evicts the oldest element.
    ///
    /// A zero-capacity buffer is both empty and full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Element at logical position `index` (0 = oldest), if live.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.count {
            return None;
        }
        let slot = (self.head + index) % self.slots.len();
        self.slots[slot].as_ref()
    }

    /// Oldest live element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Newest live element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.count.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate the live window from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: self,
            front: 0,
            back: self.count,
        }
    }

    /// Consume the buffer, returning the live window oldest first.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        let head = self.head;
        let mut slots = self.slots.into_vec();
        if !slots.is_empty() {
            slots.rotate_left(head);
        }
        // After rotation the live window is a prefix; the rest is `None`
        slots.into_iter().flatten().collect()
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Create a full buffer of capacity `count` with every slot set to `value`.
    #[must_use]
    pub fn filled(value: T, count: usize) -> Self {
        Self {
            slots: vec![Some(value); count].into_boxed_slice(),
            head: 0,
            tail: 0,
            count,
        }
    }

    /// Copy the live window into a `Vec`, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(element) => element,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.count, index
            ),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Two buffers are equal when their live windows are equal; capacity is ignored.
impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingBuffer<T> {}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.append_all(iter);
    }
}

impl<T> FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_sequence(iter)
    }
}

impl<T> From<Vec<T>> for RingBuffer<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_sequence(values)
    }
}

impl<T> IntoIterator for RingBuffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over the live window, oldest first.
pub struct Iter<'a, T> {
    buffer: &'a RingBuffer<T>,
    /// Next logical index from the front
    front: usize,
    /// One past the next logical index from the back
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front >= self.back {
            return None;
        }
        let element = self.buffer.get(self.front);
        self.front += 1;
        element
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.buffer.get(self.back)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}
