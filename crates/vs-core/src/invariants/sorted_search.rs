//! Binary search and insertion-point invariants.
//!
//! A checker runs over a batch of `SearchObservation`s, each recording a
//! sorted sequence, a probe value, and what the routines under test
//! answered for it.
//!
//! | Property | Description |
//! |----------|-------------|
//! | SortedInput | Every observed sequence is non-decreasing (caller precondition) |
//! | ExactMatchSound | A returned index points at an element equal to the probe |
//! | ExactMatchComplete | "Not found" only when the probe is absent |
//! | InsertionPreservesOrder | Inserting the probe at the returned index keeps the sequence sorted |
//! | InsertionLandsOnEqual | For a present probe the index lands on an equal element, or at the end when the probe equals the last element |
//!
//! Observations over unsorted sequences only count against `SortedInput`;
//! the routines give unspecified answers for them.

use serde::Serialize;

use crate::counterexample::{Counterexample, StateSnapshot};
use crate::property::{PropertyChecker, PropertyResult};

/// One probe against one sorted sequence, with the answers observed.
#[derive(Debug, Clone, Serialize)]
pub struct SearchObservation {
    /// Sequence that was searched
    pub sequence: Vec<u64>,
    /// Probe value
    pub probe: u64,
    /// Answer of the exact-match search
    pub exact: Option<usize>,
    /// Answer of the insertion-point search
    pub insertion: usize,
}

impl SearchObservation {
    fn is_sorted(&self) -> bool {
        self.sequence.windows(2).all(|w| w[0] <= w[1])
    }

    fn contains_probe(&self) -> bool {
        self.sequence.contains(&self.probe)
    }
}

/// Property checker over a batch of search observations.
pub struct SortedSearchPropertyChecker<'a> {
    observations: &'a [SearchObservation],
    dst_seed: Option<u64>,
}

impl<'a> SortedSearchPropertyChecker<'a> {
    #[must_use]
    pub fn new(observations: &'a [SearchObservation]) -> Self {
        Self {
            observations,
            dst_seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.dst_seed = Some(seed);
        self
    }

    fn sorted(&self) -> impl Iterator<Item = (usize, &'a SearchObservation)> {
        self.observations.iter().enumerate().filter(|(_, o)| o.is_sorted())
    }

    fn fail(&self, name: &'static str, index: usize, obs: &SearchObservation, message: String) -> PropertyResult {
        let mut ce = Counterexample::for_seed(self.dst_seed).with_description(message.clone());
        ce.add_operation(
            index as u64 + 1,
            format!("search({})", obs.probe),
            format!("exact={:?} insertion={}", obs.exact, obs.insertion),
        );
        ce.add_state(StateSnapshot {
            step: index as u64 + 1,
            description: format!("observation #{}", index),
            variables: vec![("sequence".to_string(), format!("{:?}", obs.sequence))],
        });
        PropertyResult::fail(name, message, Some(ce))
    }

    fn check_sorted_input(&self) -> PropertyResult {
        if let Some((index, obs)) = self.observations.iter().enumerate().find(|(_, o)| !o.is_sorted()) {
            return self.fail(
                "SortedInput",
                index,
                obs,
                format!("Observation #{} searched an unsorted sequence", index),
            );
        }
        PropertyResult::pass("SortedInput")
    }

    fn check_exact_match_sound(&self) -> PropertyResult {
        for (index, obs) in self.sorted() {
            if let Some(i) = obs.exact {
                if obs.sequence.get(i) != Some(&obs.probe) {
                    return self.fail(
                        "ExactMatchSound",
                        index,
                        obs,
                        format!("Index {} does not hold probe {}", i, obs.probe),
                    );
                }
            }
        }
        PropertyResult::pass("ExactMatchSound")
    }

    fn check_exact_match_complete(&self) -> PropertyResult {
        for (index, obs) in self.sorted() {
            if obs.exact.is_none() && obs.contains_probe() {
                return self.fail(
                    "ExactMatchComplete",
                    index,
                    obs,
                    format!("Probe {} is present but was reported missing", obs.probe),
                );
            }
        }
        PropertyResult::pass("ExactMatchComplete")
    }

    fn check_insertion_preserves_order(&self) -> PropertyResult {
        for (index, obs) in self.sorted() {
            let i = obs.insertion;
            let seq = &obs.sequence;
            let in_bounds = i <= seq.len();
            let left_ok = i == 0 || (in_bounds && seq[i - 1] <= obs.probe);
            let right_ok = i >= seq.len() || obs.probe <= seq[i];

            if !(in_bounds && left_ok && right_ok) {
                return self.fail(
                    "InsertionPreservesOrder",
                    index,
                    obs,
                    format!("Inserting {} at {} breaks ordering", obs.probe, i),
                );
            }
        }
        PropertyResult::pass("InsertionPreservesOrder")
    }

    fn check_insertion_lands_on_equal(&self) -> PropertyResult {
        for (index, obs) in self.sorted() {
            if !obs.contains_probe() {
                continue;
            }
            let i = obs.insertion;
            let lands = match obs.sequence.get(i) {
                Some(value) => *value == obs.probe,
                None => obs.sequence.last() == Some(&obs.probe),
            };
            if !lands {
                return self.fail(
                    "InsertionLandsOnEqual",
                    index,
                    obs,
                    format!("Present probe {} got insertion point {}", obs.probe, i),
                );
            }
        }
        PropertyResult::pass("InsertionLandsOnEqual")
    }
}

impl<'a> PropertyChecker for SortedSearchPropertyChecker<'a> {
    fn check_all(&self) -> Vec<PropertyResult> {
        vec![
            self.check_sorted_input(),
            self.check_exact_match_sound(),
            self.check_exact_match_complete(),
            self.check_insertion_preserves_order(),
            self.check_insertion_lands_on_equal(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(sequence: &[u64], probe: u64, exact: Option<usize>, insertion: usize) -> SearchObservation {
        SearchObservation {
            sequence: sequence.to_vec(),
            probe,
            exact,
            insertion,
        }
    }

    #[test]
    fn test_reference_answers_hold() {
        let seq = [1, 3, 5, 7, 9];
        let observations = vec![
            obs(&seq, 5, Some(2), 2),
            obs(&seq, 4, None, 2),
            obs(&seq, 0, None, 0),
            obs(&seq, 10, None, 5),
            obs(&seq, 9, Some(4), 5),
            obs(&[], 42, None, 0),
        ];
        let checker = SortedSearchPropertyChecker::new(&observations);
        assert!(checker.all_hold(), "{:?}", checker.violations());
    }

    #[test]
    fn test_wrong_exact_index_detected() {
        let observations = vec![obs(&[1, 3, 5], 3, Some(2), 1)];
        let violations = SortedSearchPropertyChecker::new(&observations).violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].name, "ExactMatchSound");
    }

    #[test]
    fn test_missed_probe_detected() {
        let observations = vec![obs(&[1, 3, 5], 3, None, 1)];
        let violations = SortedSearchPropertyChecker::new(&observations).violations();
        assert_eq!(violations[0].name, "ExactMatchComplete");
    }

    #[test]
    fn test_bad_insertion_detected() {
        let observations = vec![obs(&[1, 3, 5], 4, None, 1)];
        let names: Vec<_> = SortedSearchPropertyChecker::new(&observations)
            .violations()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["InsertionPreservesOrder"]);
    }

    #[test]
    fn test_insertion_beside_equal_detected() {
        // Ordering still holds but the index skips past the equal run
        let observations = vec![obs(&[1, 3, 3, 5], 3, Some(1), 3)];
        let names: Vec<_> = SortedSearchPropertyChecker::new(&observations)
            .violations()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["InsertionLandsOnEqual"]);
    }

    #[test]
    fn test_unsorted_input_only_flags_precondition() {
        let observations = vec![obs(&[5, 1, 3], 1, None, 0)];
        let violations = SortedSearchPropertyChecker::new(&observations).with_seed(3).violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].name, "SortedInput");
        assert_eq!(violations[0].counterexample.as_ref().unwrap().dst_seed, Some(3));
    }
}
