//! DST runner for sorted-sequence search routines.
//!
//! Each operation builds a random sorted sequence (duplicates allowed),
//! draws a probe that may fall inside or outside the value range, and
//! records the exact-match and insertion-point answers as a
//! `SearchObservation`. Batches of observations are handed to the
//! `vs-core` search checker at the configured interval.
//!
//! Every operation also runs the callback-driven search with a consistent
//! ordering (`e < probe`, `e == probe`). With faults disabled it must agree
//! with the exact-match answer. When the fault injector plans a failing
//! callback, the search must return that fault and stop calling back.

use std::cell::Cell;

use tracing::{debug, info, warn};

use vs_core::invariants::{SearchObservation, SortedSearchPropertyChecker};
use vs_core::{Counterexample, PropertyChecker, PropertyResult};

use crate::error::DstError;
use crate::fault::{FaultInjector, InjectedFault};
use crate::harness::{DstReport, HarnessConfig};
use crate::random::DeterministicRng;

/// Callback type handed to `predicate_search` by the runner.
pub type Callback<'c> = &'c mut dyn FnMut(&u64) -> Result<bool, InjectedFault>;

/// Search routines under test, over `u64` slices.
pub trait DstTestableSearch {
    fn exact_match(&self, sequence: &[u64], target: u64) -> Option<usize>;
    fn insertion_point(&self, sequence: &[u64], element: u64) -> usize;
    fn predicate_search(
        &self,
        sequence: &[u64],
        is_ordered_before: Callback<'_>,
        predicate: Callback<'_>,
    ) -> Result<Option<usize>, InjectedFault>;
}

/// Upper bound on callbacks one search may need: two per bisection step.
fn callback_budget(len: usize) -> u64 {
    let steps = usize::BITS - len.leading_zeros() + 1;
    2 * u64::from(steps)
}

/// DST runner for search routines.
pub struct SearchDstRunner<S> {
    search: S,
    rng: DeterministicRng,
    fault_injector: FaultInjector,
    config: HarnessConfig,
    pending: Vec<SearchObservation>,
    operations_count: u64,
    invariant_checks_count: u64,
}

impl<S: DstTestableSearch> SearchDstRunner<S> {
    pub fn new(search: S, seed: u64, config: HarnessConfig) -> Result<Self, DstError> {
        config.validate()?;
        let fault_injector = FaultInjector::new(DeterministicRng::new(seed.wrapping_add(1)), config.fault_config);
        debug!(seed, "search DST runner created");

        Ok(Self {
            search,
            rng: DeterministicRng::new(seed),
            fault_injector,
            config,
            pending: Vec::new(),
            operations_count: 0,
            invariant_checks_count: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Search `sequence` for `probe` with every routine and record the answers.
    ///
    /// Returns the failures of the callback-driven search checks; the
    /// observation itself is checked later in a batch.
    pub fn observe(&mut self, sequence: Vec<u64>, probe: u64) -> Vec<PropertyResult> {
        self.operations_count += 1;

        let exact = self.search.exact_match(&sequence, probe);
        let insertion = self.search.insertion_point(&sequence, probe);
        let failures = self.check_predicate_search(&sequence, probe, exact);

        self.pending.push(SearchObservation {
            sequence,
            probe,
            exact,
            insertion,
        });
        failures
    }

    fn check_predicate_search(&mut self, sequence: &[u64], probe: u64, exact: Option<usize>) -> Vec<PropertyResult> {
        let fail_at = self.fault_injector.plan_failing_call(callback_budget(sequence.len()));
        let calls = Cell::new(0u64);

        let callback = |answer: bool| -> Result<bool, InjectedFault> {
            let call = calls.get() + 1;
            calls.set(call);
            if fail_at == Some(call) {
                return Err(InjectedFault { call });
            }
            Ok(answer)
        };
        let mut is_ordered_before = |e: &u64| callback(*e < probe);
        let mut predicate = |e: &u64| callback(*e == probe);

        let result = self
            .search
            .predicate_search(sequence, &mut is_ordered_before, &mut predicate);
        let total_calls = calls.get();

        let describe = |what: String| {
            Counterexample::with_seed(self.rng.seed())
                .with_description(what)
        };

        let mut failures = Vec::new();
        match fail_at {
            Some(call) if call <= total_calls => {
                if result != Err(InjectedFault { call }) {
                    let message = format!(
                        "Fault at call {} searching {:?} for {} returned {:?}",
                        call, sequence, probe, result
                    );
                    failures.push(PropertyResult::fail("FaultPropagates", message.clone(), Some(describe(message))));
                }
                if total_calls != call {
                    let message = format!("{} callbacks ran after the fault at call {}", total_calls - call, call);
                    failures.push(PropertyResult::fail("FaultPropagates", message.clone(), Some(describe(message))));
                }
            }
            _ => {
                if result != Ok(exact) {
                    let message = format!(
                        "predicate_search {:?} disagrees with exact_match {:?} searching {:?} for {}",
                        result, exact, sequence, probe
                    );
                    failures.push(PropertyResult::fail(
                        "PredicateMatchesExact",
                        message.clone(),
                        Some(describe(message)),
                    ));
                }
            }
        }
        failures
    }

    /// Run the `vs-core` checker over observations gathered since the last check.
    pub fn check(&mut self) -> Vec<PropertyResult> {
        self.invariant_checks_count += 1;
        let results = SortedSearchPropertyChecker::new(&self.pending)
            .with_seed(self.rng.seed())
            .violations();
        self.pending.clear();
        results
    }

    fn random_case(&mut self) -> (Vec<u64>, u64) {
        let len = self.rng.gen_range(0..=self.config.sequence_len_max);
        let sequence = self.rng.sorted_vec(len, self.config.value_max);
        // Half the probes are drawn from the sequence itself
        let probe = if !sequence.is_empty() && self.rng.gen_bool(0.5) {
            sequence[self.rng.gen_range(0..sequence.len())]
        } else {
            self.rng.gen_range(0..=self.config.value_max + 1)
        };
        (sequence, probe)
    }

    /// Run `config.operations` random searches and report.
    pub fn run(mut self) -> DstReport {
        let mut violations = Vec::new();

        while self.operations_count < self.config.operations && violations.is_empty() {
            let (sequence, probe) = self.random_case();
            violations = self.observe(sequence, probe);

            if violations.is_empty() && self.config.check_due(self.operations_count) {
                violations = self.check();
            }
        }

        if violations.is_empty() {
            violations = self.check();
        }

        let report = DstReport {
            target: "sorted_search",
            seed: self.seed(),
            operations_count: self.operations_count,
            invariant_checks_count: self.invariant_checks_count,
            faults_injected_count: self.fault_injector.stats().faults_count,
            violations,
        };

        if report.passed() {
            info!(
                seed = report.seed,
                ops = report.operations_count,
                faults = report.faults_injected_count,
                "search DST passed"
            );
        } else {
            warn!(seed = report.seed, violations = report.violations.len(), "search DST failed");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultConfig;

    /// Linear-scan reference implementation.
    struct LinearSearch;

    impl DstTestableSearch for LinearSearch {
        fn exact_match(&self, sequence: &[u64], target: u64) -> Option<usize> {
            sequence.iter().position(|e| *e == target)
        }

        fn insertion_point(&self, sequence: &[u64], element: u64) -> usize {
            sequence.iter().position(|e| *e >= element).unwrap_or(sequence.len())
        }

        fn predicate_search(
            &self,
            sequence: &[u64],
            is_ordered_before: Callback<'_>,
            predicate: Callback<'_>,
        ) -> Result<Option<usize>, InjectedFault> {
            for (i, e) in sequence.iter().enumerate() {
                if predicate(e)? {
                    return Ok(Some(i));
                }
                is_ordered_before(e)?;
            }
            Ok(None)
        }
    }

    /// Swallows callback errors instead of propagating them.
    struct SwallowingSearch;

    impl DstTestableSearch for SwallowingSearch {
        fn exact_match(&self, sequence: &[u64], target: u64) -> Option<usize> {
            LinearSearch.exact_match(sequence, target)
        }

        fn insertion_point(&self, sequence: &[u64], element: u64) -> usize {
            LinearSearch.insertion_point(sequence, element)
        }

        fn predicate_search(
            &self,
            sequence: &[u64],
            _is_ordered_before: Callback<'_>,
            predicate: Callback<'_>,
        ) -> Result<Option<usize>, InjectedFault> {
            for (i, e) in sequence.iter().enumerate() {
                if predicate(e).unwrap_or(false) {
                    return Ok(Some(i));
                }
            }
            Ok(None)
        }
    }

    #[test]
    fn test_callback_budget() {
        assert_eq!(callback_budget(0), 2);
        assert_eq!(callback_budget(1), 4);
        assert_eq!(callback_budget(5), 8);
    }

    #[test]
    fn test_observe_records_answers() {
        let mut runner = SearchDstRunner::new(LinearSearch, 5, HarnessConfig::quick()).unwrap();
        let failures = runner.observe(vec![1, 3, 5, 7, 9], 5);
        assert!(failures.is_empty());
        assert_eq!(runner.pending.len(), 1);
        assert_eq!(runner.pending[0].exact, Some(2));
        assert_eq!(runner.pending[0].insertion, 2);
        assert!(runner.check().is_empty());
        assert!(runner.pending.is_empty());
    }

    #[test]
    fn test_reference_search_passes_with_faults() {
        let config = HarnessConfig {
            fault_config: FaultConfig::aggressive(),
            ..HarnessConfig::quick()
        };
        for seed in 1..10 {
            let report = SearchDstRunner::new(LinearSearch, seed, config.clone()).unwrap().run();
            assert!(report.passed(), "{}", report.format());
            assert_eq!(report.operations_count, 100);
        }
    }

    #[test]
    fn test_swallowed_fault_is_caught() {
        let config = HarnessConfig {
            fault_config: FaultConfig {
                failure_probability: 1.0,
            },
            ..HarnessConfig::quick()
        };
        let report = SearchDstRunner::new(SwallowingSearch, 11, config).unwrap().run();
        assert!(!report.passed());
        assert_eq!(report.violations[0].name, "FaultPropagates");
        assert!(report.faults_injected_count > 0);
    }

    #[test]
    fn test_wrong_exact_answer_is_caught() {
        struct OffByOne;
        impl DstTestableSearch for OffByOne {
            fn exact_match(&self, sequence: &[u64], target: u64) -> Option<usize> {
                LinearSearch.exact_match(sequence, target).map(|i| i + 1)
            }
            fn insertion_point(&self, sequence: &[u64], element: u64) -> usize {
                LinearSearch.insertion_point(sequence, element)
            }
            fn predicate_search(
                &self,
                sequence: &[u64],
                is_ordered_before: Callback<'_>,
                predicate: Callback<'_>,
            ) -> Result<Option<usize>, InjectedFault> {
                LinearSearch.predicate_search(sequence, is_ordered_before, predicate)
            }
        }

        let mut runner = SearchDstRunner::new(OffByOne, 3, HarnessConfig::quick()).unwrap();
        // predicate search (correct) disagrees with the shifted exact answer
        let failures = runner.observe(vec![2, 4, 6], 4);
        assert_eq!(failures[0].name, "PredicateMatchesExact");
        let names: Vec<_> = runner.check().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["ExactMatchSound"]);
    }
}
