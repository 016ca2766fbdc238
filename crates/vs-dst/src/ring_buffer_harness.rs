//! DST runner for overwrite-on-full ring buffers.
//!
//! The runner drives a buffer with random `append` / `append_all`
//! operations and mirrors each one on a `VecDeque` shadow model. At the
//! configured interval it compares the buffer with the model and runs the
//! `vs-core` ring buffer checker against the full append history.
//!
//! The initial buffer is built with one of the three constructors
//! (empty with capacity, from a sequence, filled), chosen by the seed.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use vs_core::invariants::{RingBufferProperties, RingBufferPropertyChecker};
use vs_core::{Counterexample, PropertyChecker, PropertyResult, StateSnapshot};

use crate::error::DstError;
use crate::harness::{DstReport, HarnessConfig};
use crate::random::DeterministicRng;

/// Number of most recent operations kept for counterexamples.
const TRACE_LEN_MAX: usize = 32;

/// Minimal interface a ring buffer exposes to the runner.
pub trait DstTestableRingBuffer {
    fn with_capacity(capacity: usize) -> Self;
    fn from_sequence(values: Vec<u64>) -> Self;
    fn filled(value: u64, count: usize) -> Self;
    fn append(&mut self, value: u64);
    fn append_all(&mut self, values: &[u64]);
    fn count(&self) -> usize;
    fn capacity(&self) -> usize;
    /// Live window, oldest first.
    fn window(&self) -> Vec<u64>;
}

/// One runner operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingOp {
    Append(u64),
    AppendAll(Vec<u64>),
}

impl RingOp {
    fn describe(&self) -> String {
        match self {
            RingOp::Append(v) => format!("append({})", v),
            RingOp::AppendAll(vs) => format!("append_all({:?})", vs),
        }
    }
}

/// Buffer and append history seen together by the property checker.
struct Observed<'a, B> {
    buffer: &'a B,
    appended: &'a [u64],
}

impl<'a, B: DstTestableRingBuffer> RingBufferProperties for Observed<'a, B> {
    fn appended_values(&self) -> Vec<u64> {
        self.appended.to_vec()
    }

    fn live_window(&self) -> Vec<u64> {
        self.buffer.window()
    }

    fn count(&self) -> usize {
        self.buffer.count()
    }

    fn capacity(&self) -> usize {
        self.buffer.capacity()
    }
}

/// DST runner for ring buffers.
pub struct RingBufferDstRunner<B> {
    buffer: B,
    capacity: usize,
    model: VecDeque<u64>,
    appended: Vec<u64>,
    trace: VecDeque<(u64, String, usize)>,
    rng: DeterministicRng,
    config: HarnessConfig,
    operations_count: u64,
    invariant_checks_count: u64,
}

impl<B: DstTestableRingBuffer> RingBufferDstRunner<B> {
    /// Create a runner; the seed picks the constructor and capacity.
    pub fn new(seed: u64, config: HarnessConfig) -> Result<Self, DstError> {
        config.validate()?;
        let mut rng = DeterministicRng::new(seed);
        let capacity = rng.gen_range(0..=config.capacity_max);

        let (buffer, initial) = match rng.gen_range(0..3_u8) {
            0 => (B::with_capacity(capacity), Vec::new()),
            1 => {
                let values: Vec<u64> = (0..capacity).map(|_| rng.gen_range(0..=config.value_max)).collect();
                (B::from_sequence(values.clone()), values)
            }
            _ => {
                let value = rng.gen_range(0..=config.value_max);
                (B::filled(value, capacity), vec![value; capacity])
            }
        };

        let model: VecDeque<u64> = initial.iter().copied().collect();
        debug!(seed, capacity, initial_len = initial.len(), "ring buffer DST runner created");

        Ok(Self {
            buffer,
            capacity,
            model,
            appended: initial,
            trace: VecDeque::with_capacity(TRACE_LEN_MAX),
            rng,
            config,
            operations_count: 0,
            invariant_checks_count: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Apply one operation to the buffer and the shadow model.
    pub fn apply(&mut self, op: RingOp) {
        match &op {
            RingOp::Append(v) => {
                self.buffer.append(*v);
                self.model_append(*v);
            }
            RingOp::AppendAll(vs) => {
                self.buffer.append_all(vs);
                for v in vs {
                    self.model_append(*v);
                }
            }
        }

        self.operations_count += 1;
        if self.trace.len() == TRACE_LEN_MAX {
            self.trace.pop_front();
        }
        self.trace
            .push_back((self.operations_count, op.describe(), self.buffer.count()));
    }

    fn model_append(&mut self, value: u64) {
        self.appended.push(value);
        if self.capacity == 0 {
            return;
        }
        if self.model.len() == self.capacity {
            self.model.pop_front();
        }
        self.model.push_back(value);
    }

    fn random_op(&mut self) -> RingOp {
        if self.rng.gen_range(0..4_u8) == 0 {
            let len = self.rng.gen_range(0..=self.config.batch_len_max);
            let values = (0..len).map(|_| self.rng.gen_range(0..=self.config.value_max)).collect();
            RingOp::AppendAll(values)
        } else {
            RingOp::Append(self.rng.gen_range(0..=self.config.value_max))
        }
    }

    fn counterexample(&self, description: String) -> Counterexample {
        let mut ce = Counterexample::with_seed(self.seed()).with_description(description);
        for (step, operation, count) in &self.trace {
            ce.add_operation(*step, operation.clone(), format!("count={}", count));
        }
        ce.add_state(StateSnapshot {
            step: self.operations_count,
            description: "after last operation".to_string(),
            variables: vec![
                ("capacity".to_string(), self.capacity.to_string()),
                ("window".to_string(), format!("{:?}", self.buffer.window())),
                ("model".to_string(), format!("{:?}", self.model)),
            ],
        });
        ce
    }

    /// Compare with the shadow model and run the property checker.
    pub fn check(&mut self) -> Vec<PropertyResult> {
        self.invariant_checks_count += 1;

        let window = self.buffer.window();
        let model = self.model.iter().copied().collect::<Vec<_>>();
        let matches_model = if window == model && self.buffer.count() == model.len() {
            PropertyResult::pass("MatchesModel")
        } else {
            let message = format!(
                "Buffer window {:?} (count {}) differs from model {:?}",
                window,
                self.buffer.count(),
                model
            );
            PropertyResult::fail("MatchesModel", message.clone(), Some(self.counterexample(message)))
        };

        let observed = Observed {
            buffer: &self.buffer,
            appended: &self.appended,
        };
        let mut results = vec![matches_model];
        results.extend(
            RingBufferPropertyChecker::new(&observed)
                .with_seed(self.rng.seed())
                .check_all(),
        );
        results
    }

    /// Run `config.operations` random operations and report.
    ///
    /// Stops at the first check that finds a violation.
    pub fn run(mut self) -> DstReport {
        let mut violations = Vec::new();

        while self.operations_count < self.config.operations {
            let op = self.random_op();
            self.apply(op);

            if self.config.check_due(self.operations_count) {
                violations = failed(self.check());
                if !violations.is_empty() {
                    break;
                }
            }
        }

        if violations.is_empty() {
            violations = failed(self.check());
        }

        let report = DstReport {
            target: "ring_buffer",
            seed: self.seed(),
            operations_count: self.operations_count,
            invariant_checks_count: self.invariant_checks_count,
            faults_injected_count: 0,
            violations,
        };

        if report.passed() {
            info!(seed = report.seed, ops = report.operations_count, "ring buffer DST passed");
        } else {
            warn!(seed = report.seed, violations = report.violations.len(), "ring buffer DST failed");
        }
        report
    }
}

fn failed(results: Vec<PropertyResult>) -> Vec<PropertyResult> {
    results.into_iter().filter(|r| !r.passed).collect()
}

/// Run a fixed scenario: build with `with_capacity(capacity)`, apply `ops`, check once.
pub fn run_ring_scenario<B: DstTestableRingBuffer>(
    seed: u64,
    capacity: usize,
    ops: Vec<RingOp>,
) -> DstReport {
    let config = HarnessConfig {
        operations: ops.len() as u64,
        invariant_check_interval: 0,
        ..HarnessConfig::quick()
    };
    let mut runner = RingBufferDstRunner {
        buffer: B::with_capacity(capacity),
        capacity,
        model: VecDeque::new(),
        appended: Vec::new(),
        trace: VecDeque::with_capacity(TRACE_LEN_MAX),
        rng: DeterministicRng::new(seed),
        config,
        operations_count: 0,
        invariant_checks_count: 0,
    };

    for op in ops {
        runner.apply(op);
    }
    let violations = failed(runner.check());

    DstReport {
        target: "ring_buffer",
        seed,
        operations_count: runner.operations_count,
        invariant_checks_count: runner.invariant_checks_count,
        faults_injected_count: 0,
        violations,
    }
}
