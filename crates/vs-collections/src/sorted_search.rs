//! Binary search and binary insertion over sorted random-access sequences.
//!
//! All routines narrow a half-open `[start, end)` index range over the
//! borrowed sequence; no sub-sequences are built. The midpoint of a range
//! is `start + len / 2`, so even-length ranges probe the upper-middle
//! element and each step discards at least that element.
//!
//! Sortedness is a caller precondition and is not checked. On unsorted
//! input the answers are unspecified, but every loop still terminates
//! because the range strictly shrinks on each step.

use std::cmp::Ordering;
use std::convert::Infallible;

use crate::random_access::RandomAccess;

#[inline]
fn midpoint(start: usize, end: usize) -> usize {
    debug_assert!(start < end, "midpoint of empty range");
    start + (end - start) / 2
}

/// Find an index holding `target` in an ascending `sequence`.
///
/// Returns `None` when `target` is absent. With duplicates, whichever
/// equal element the bisection reaches first is returned.
///
/// ```
/// use vs_collections::exact_match_search;
///
/// let seq = [1, 3, 5, 7, 9];
/// assert_eq!(exact_match_search(&seq, &5), Some(2));
/// assert_eq!(exact_match_search(&seq, &4), None);
/// ```
pub fn exact_match_search<S>(sequence: &S, target: &S::Item) -> Option<usize>
where
    S: RandomAccess + ?Sized,
    S::Item: Ord,
{
    let mut start = 0;
    let mut end = sequence.len();

    while start < end {
        let mid = midpoint(start, end);
        match sequence.at(mid).cmp(target) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => start = mid + 1,
            Ordering::Greater => end = mid,
        }
    }

    None
}

/// Bisect with caller-supplied callbacks instead of `Ord`.
///
/// At each midpoint `predicate` is asked first; if it holds the midpoint
/// is returned. Otherwise `is_ordered_before` decides whether to move
/// right, and the search moves right only if it holds *and* elements
/// remain to the right of the midpoint. In every other case the search
/// moves left, unless the midpoint is already the first index of the
/// range, in which case it reports `None`.
///
/// Moving left does not require `is_ordered_before` to be false: when it
/// holds at the right edge of a range the search still continues left.
/// `exact_match_search` stops in that situation instead.
///
/// The first `Err` from either callback is returned immediately and no
/// further callbacks run.
pub fn predicate_search<S, E, O, P>(
    sequence: &S,
    mut is_ordered_before: O,
    mut predicate: P,
) -> Result<Option<usize>, E>
where
    S: RandomAccess + ?Sized,
    O: FnMut(&S::Item) -> Result<bool, E>,
    P: FnMut(&S::Item) -> Result<bool, E>,
{
    let mut start = 0;
    let mut end = sequence.len();

    while start < end {
        let mid = midpoint(start, end);
        let element = sequence.at(mid);

        if predicate(element)? {
            return Ok(Some(mid));
        }

        if is_ordered_before(element)? && mid + 1 < end {
            start = mid + 1;
        } else if mid > start {
            end = mid;
        } else {
            return Ok(None);
        }
    }

    Ok(None)
}

/// [`predicate_search`] for callbacks that cannot fail.
pub fn predicate_search_infallible<S, O, P>(
    sequence: &S,
    mut is_ordered_before: O,
    mut predicate: P,
) -> Option<usize>
where
    S: RandomAccess + ?Sized,
    O: FnMut(&S::Item) -> bool,
    P: FnMut(&S::Item) -> bool,
{
    let result: Result<Option<usize>, Infallible> = predicate_search(
        sequence,
        |element| Ok(is_ordered_before(element)),
        |element| Ok(predicate(element)),
    );
    match result {
        Ok(found) => found,
        Err(never) => match never {},
    }
}

/// Index at which `element` can be inserted while keeping `sequence` sorted.
///
/// Edge cases are settled before bisecting:
/// - empty sequence: `0`
/// - `element <= first`: `0` (ties go to the front)
/// - `element >= last`: `len` (ties go to the back)
///
/// Inside the sequence, an element equal to `element` found by the
/// bisection is returned as the insertion point itself.
///
/// ```
/// use vs_collections::insertion_point;
///
/// let seq = [1, 3, 5, 7, 9];
/// assert_eq!(insertion_point(&seq, &4), 2);
/// assert_eq!(insertion_point(&seq, &0), 0);
/// assert_eq!(insertion_point(&seq, &10), 5);
/// ```
pub fn insertion_point<S>(sequence: &S, element: &S::Item) -> usize
where
    S: RandomAccess + ?Sized,
    S::Item: Ord,
{
    let len = sequence.len();
    if len == 0 {
        return len;
    }
    if element <= sequence.at(0) {
        return 0;
    }
    if element >= sequence.at(len - 1) {
        return len;
    }

    let mut start = 0;
    let mut end = len;

    // Invariant: start < end
    loop {
        let mid = midpoint(start, end);
        match sequence.at(mid).cmp(element) {
            Ordering::Equal => return mid,
            Ordering::Less => {
                if mid + 1 < end {
                    start = mid + 1;
                } else {
                    return end;
                }
            }
            Ordering::Greater => {
                if mid > start {
                    end = mid;
                } else {
                    return start;
                }
            }
        }
    }
}

/// Zero-sized handle bundling the search routines.
///
/// Lets callers that want a value (e.g. a test harness) pass the routines
/// around as one unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortedSearch;

impl SortedSearch {
    /// See [`exact_match_search`].
    pub fn exact_match<S>(&self, sequence: &S, target: &S::Item) -> Option<usize>
    where
        S: RandomAccess + ?Sized,
        S::Item: Ord,
    {
        exact_match_search(sequence, target)
    }

    /// See [`insertion_point`].
    pub fn insertion_point<S>(&self, sequence: &S, element: &S::Item) -> usize
    where
        S: RandomAccess + ?Sized,
        S::Item: Ord,
    {
        insertion_point(sequence, element)
    }

    /// See [`predicate_search`].
    pub fn predicate<S, E, O, P>(&self, sequence: &S, is_ordered_before: O, predicate: P) -> Result<Option<usize>, E>
    where
        S: RandomAccess + ?Sized,
        O: FnMut(&S::Item) -> Result<bool, E>,
        P: FnMut(&S::Item) -> Result<bool, E>,
    {
        predicate_search(sequence, is_ordered_before, predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::VecDeque;

    use crate::ring_buffer::RingBuffer;

    const SEQ: [i32; 5] = [1, 3, 5, 7, 9];

    #[test]
    fn test_exact_match_scenarios() {
        assert_eq!(exact_match_search(&SEQ, &5), Some(2));
        assert_eq!(exact_match_search(&SEQ, &4), None);
        assert_eq!(exact_match_search(&SEQ, &1), Some(0));
        assert_eq!(exact_match_search(&SEQ, &9), Some(4));
        assert_eq!(exact_match_search(&SEQ, &0), None);
        assert_eq!(exact_match_search(&SEQ, &10), None);
    }

    #[test]
    fn test_exact_match_empty_and_single() {
        let empty: [i32; 0] = [];
        assert_eq!(exact_match_search(&empty, &1), None);
        assert_eq!(exact_match_search(&[7], &7), Some(0));
        assert_eq!(exact_match_search(&[7], &8), None);
    }

    #[test]
    fn test_exact_match_midpoint_rule() {
        // Even length: first probe is index 2 (start + 4 / 2)
        let probes = Cell::new(Vec::new());
        let seq = [10, 20, 30, 40];
        let _ = predicate_search_infallible(
            &seq,
            |_| false,
            |e| {
                let mut seen = probes.take();
                seen.push(*e);
                probes.set(seen);
                false
            },
        );
        assert_eq!(probes.take().first(), Some(&30));

        // Duplicates: the first equal element reached wins
        assert_eq!(exact_match_search(&[2, 2, 2, 2], &2), Some(2));
    }

    #[test]
    fn test_insertion_point_scenarios() {
        assert_eq!(insertion_point(&SEQ, &4), 2);
        assert_eq!(insertion_point(&SEQ, &0), 0);
        assert_eq!(insertion_point(&SEQ, &10), 5);
        assert_eq!(insertion_point(&SEQ, &8), 4);
        assert_eq!(insertion_point(&SEQ, &2), 1);
    }

    #[test]
    fn test_insertion_point_empty() {
        let empty: Vec<u64> = Vec::new();
        assert_eq!(insertion_point(&empty, &42), 0);
    }

    #[test]
    fn test_insertion_point_equal_elements() {
        // Equal to first: front
        assert_eq!(insertion_point(&SEQ, &1), 0);
        // Equal to last: back
        assert_eq!(insertion_point(&SEQ, &9), 5);
        // Equal in the middle: lands on the equal element
        assert_eq!(insertion_point(&SEQ, &5), 2);
        assert_eq!(insertion_point(&SEQ, &7), 3);
        // Run of equals: whichever the bisection reaches
        let run = [1, 4, 4, 4, 4, 9];
        assert_eq!(insertion_point(&run, &4), 3);
    }

    #[test]
    fn test_unsorted_input_terminates() {
        let shuffled = [9, 1, 8, 2, 7, 3, 6];
        for probe in 0..12 {
            let _ = exact_match_search(&shuffled, &probe);
            assert!(insertion_point(&shuffled, &probe) <= shuffled.len());
        }
    }

    #[test]
    fn test_predicate_search_finds_like_exact_match() {
        for probe in 0..11 {
            let found = predicate_search_infallible(&SEQ, |e| *e < probe, |e| *e == probe);
            assert_eq!(found, exact_match_search(&SEQ, &probe), "probe {}", probe);
        }
    }

    #[test]
    fn test_predicate_search_moves_left_even_when_ordered_before() {
        // At index 1 (the right edge) `is_ordered_before` holds, yet the
        // search still continues into the left half and finds index 0.
        let seq = [10, 20];
        let found = predicate_search_infallible(&seq, |_| true, |e| *e == 10);
        assert_eq!(found, Some(0));

        // `exact_match_search` with the same ordering would stop: with
        // every element "before" the target it only ever moves right.
        assert_eq!(exact_match_search(&seq, &25), None);
    }

    #[test]
    fn test_predicate_search_exhausts_at_first_index() {
        let seq = [1, 2, 3, 4, 5];
        let found = predicate_search_infallible(&seq, |_| false, |_| false);
        assert_eq!(found, None);

        let empty: [u8; 0] = [];
        assert_eq!(predicate_search_infallible(&empty, |_| true, |_| true), None);
    }

    #[test]
    fn test_predicate_error_aborts_search() {
        let calls = Cell::new(0u32);
        let result: Result<Option<usize>, String> = predicate_search(
            &SEQ,
            |_| {
                calls.set(calls.get() + 1);
                Ok(true)
            },
            |e| {
                calls.set(calls.get() + 1);
                if *e == 7 {
                    Err(format!("refused {}", e))
                } else {
                    Ok(false)
                }
            },
        );

        assert_eq!(result, Err("refused 7".to_string()));
        // 5 -> right, 9 -> left, 7 -> error
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_ordering_error_aborts_search() {
        let result: Result<Option<usize>, &str> =
            predicate_search(&SEQ, |_| Err("no ordering"), |_| Ok(false));
        assert_eq!(result, Err("no ordering"));
    }

    #[test]
    fn test_generic_over_containers() {
        let deque: VecDeque<u32> = [2, 4, 6, 8].into_iter().collect();
        assert_eq!(exact_match_search(&deque, &6), Some(2));
        assert_eq!(insertion_point(&deque, &5), 2);

        let mut window = RingBuffer::with_capacity(4);
        window.append_all([1u32, 2, 3, 4, 5, 6]);
        // Live window is [3, 4, 5, 6]
        assert_eq!(exact_match_search(&window, &5), Some(2));
        assert_eq!(exact_match_search(&window, &2), None);
        assert_eq!(insertion_point(&window, &1), 0);

        let slice: &[u32] = &[1, 2, 3];
        assert_eq!(SortedSearch.exact_match(slice, &3), Some(2));
        assert_eq!(SortedSearch.insertion_point(slice, &3), 3);
    }
}
