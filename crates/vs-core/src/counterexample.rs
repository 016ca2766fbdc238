//! Counterexample representation and rendering.
//!
//! When a property violation is detected, a counterexample shows
//! the exact sequence of operations that led to the failure.

use std::fmt::Write as _;

use serde::Serialize;

/// A counterexample showing the failure path.
///
/// Holds the operations applied to the structure (in order) and
/// snapshots of its observable state. Rendered as a step table for
/// assertion messages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Counterexample {
    /// Operations in the order they were applied
    pub operations: Vec<OperationRecord>,
    /// Snapshots of observable state
    pub states: Vec<StateSnapshot>,
    /// DST seed for reproduction (if applicable)
    pub dst_seed: Option<u64>,
    /// Human-readable description of the failure
    pub description: Option<String>,
}

/// Snapshot of observable state at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    /// Step number in the execution
    pub step: u64,
    /// Description of the state
    pub description: String,
    /// Variable values at this point
    pub variables: Vec<(String, String)>,
}

/// A single operation applied to the structure under test.
#[derive(Debug, Clone, Serialize)]
pub struct OperationRecord {
    /// Step number when this operation ran
    pub step: u64,
    /// Operation as text, e.g. `append(7)`
    pub operation: String,
    /// Observed outcome, e.g. `count=3`
    pub outcome: String,
}

impl Counterexample {
    /// Create a new empty counterexample.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counterexample with DST seed for reproduction.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            dst_seed: Some(seed),
            ..Self::default()
        }
    }

    /// Pick `with_seed` or `new` depending on whether a seed is known.
    #[must_use]
    pub fn for_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    /// Set the description for this counterexample.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a state snapshot. Steps must be strictly increasing.
    pub fn add_state(&mut self, state: StateSnapshot) {
        debug_assert!(
            self.states.last().map_or(true, |last| state.step > last.step),
            "States must be added in order"
        );
        self.states.push(state);
    }

    /// Add an operation record.
    pub fn add_operation(&mut self, step: u64, operation: impl Into<String>, outcome: impl Into<String>) {
        self.operations.push(OperationRecord {
            step,
            operation: operation.into(),
            outcome: outcome.into(),
        });
    }

    /// Render the counterexample as a step table.
    ///
    /// Format:
    /// ```text
    /// DST_SEED=12345
    ///
    /// Failure: window [2, 3] != expected [3, 4]
    ///
    /// Step | Operation      | Outcome
    /// -----|----------------|--------
    ///    1 | append(1)      | count=1
    ///    2 | append(2)      | count=2
    /// ```
    #[must_use]
    pub fn render_trace(&self) -> String {
        let mut output = String::new();

        if let Some(seed) = self.dst_seed {
            let _ = write!(output, "DST_SEED={}\n\n", seed);
        }

        if let Some(ref desc) = self.description {
            let _ = write!(output, "Failure: {}\n\n", desc);
        }

        if self.operations.is_empty() {
            output.push_str("(no operations recorded)\n");
        } else {
            let width = self
                .operations
                .iter()
                .map(|op| op.operation.len())
                .max()
                .unwrap_or(0)
                .max("Operation".len());

            let _ = writeln!(output, "Step | {:<width$} | Outcome", "Operation");
            let _ = writeln!(output, "-----|-{}-|--------", "-".repeat(width));
            for op in &self.operations {
                let _ = writeln!(output, "{:4} | {:<width$} | {}", op.step, op.operation, op.outcome);
            }
        }

        if !self.states.is_empty() {
            output.push_str("\nState:\n");
            for state in &self.states {
                let _ = writeln!(output, "  [{}] {}", state.step, state.description);
                for (name, value) in &state.variables {
                    let _ = writeln!(output, "      {} = {}", name, value);
                }
            }
        }

        output
    }
}
