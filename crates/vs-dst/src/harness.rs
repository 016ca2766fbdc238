//! Harness configuration and run reports shared by the DST runners.

use serde::Serialize;

use vs_core::PropertyResult;

use crate::error::DstError;
use crate::fault::FaultConfig;

/// Capacity ceiling accepted by the ring buffer runner.
const CAPACITY_MAX_LIMIT: usize = 1 << 16;

/// Sequence length ceiling accepted by the search runner.
const SEQUENCE_LEN_MAX_LIMIT: usize = 1 << 16;

/// Configuration for a DST run.
#[derive(Debug, Clone, Serialize)]
pub struct HarnessConfig {
    /// Number of operations to execute
    pub operations: u64,
    /// Largest ring buffer capacity to draw (inclusive)
    pub capacity_max: usize,
    /// Longest batch passed to a single `append_all` (inclusive)
    pub batch_len_max: usize,
    /// Longest sorted sequence the search runner builds (inclusive)
    pub sequence_len_max: usize,
    /// Largest element value (inclusive)
    pub value_max: u64,
    /// Check invariants after every N operations (0 = only at the end)
    pub invariant_check_interval: u64,
    /// Fault injection configuration
    pub fault_config: FaultConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            operations: 1000,
            capacity_max: 32,
            batch_len_max: 48,
            sequence_len_max: 64,
            value_max: 1000,
            invariant_check_interval: 10,
            fault_config: FaultConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Configuration for quick testing.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            operations: 100,
            capacity_max: 8,
            batch_len_max: 12,
            sequence_len_max: 16,
            value_max: 50,
            invariant_check_interval: 5,
            fault_config: FaultConfig::none(),
        }
    }

    /// Configuration for stress testing.
    #[must_use]
    pub fn stress() -> Self {
        Self {
            operations: 20_000,
            capacity_max: 512,
            batch_len_max: 1024,
            sequence_len_max: 2048,
            value_max: 100_000,
            invariant_check_interval: 100,
            fault_config: FaultConfig::aggressive(),
        }
    }

    /// Look up a preset by name (`quick`, `default`, `stress`).
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "quick" => Some(Self::quick()),
            "default" => Some(Self::default()),
            "stress" => Some(Self::stress()),
            _ => None,
        }
    }

    /// Override `operations` with the given count.
    #[must_use]
    pub fn with_operations(mut self, operations: u64) -> Self {
        self.operations = operations;
        self
    }

    pub fn validate(&self) -> Result<(), DstError> {
        let p = self.fault_config.failure_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(DstError::InvalidConfig(format!(
                "failure_probability must be within [0, 1], got {}",
                p
            )));
        }
        if self.capacity_max > CAPACITY_MAX_LIMIT {
            return Err(DstError::InvalidConfig(format!(
                "capacity_max {} exceeds {}",
                self.capacity_max, CAPACITY_MAX_LIMIT
            )));
        }
        if self.sequence_len_max > SEQUENCE_LEN_MAX_LIMIT {
            return Err(DstError::InvalidConfig(format!(
                "sequence_len_max {} exceeds {}",
                self.sequence_len_max, SEQUENCE_LEN_MAX_LIMIT
            )));
        }
        if self.value_max == u64::MAX {
            return Err(DstError::InvalidConfig("value_max must leave room for out-of-range probes".to_string()));
        }
        Ok(())
    }

    /// Is an invariant check due after `operations_count` operations?
    #[must_use]
    pub fn check_due(&self, operations_count: u64) -> bool {
        self.invariant_check_interval != 0 && operations_count % self.invariant_check_interval == 0
    }
}

/// Result of a DST run.
#[derive(Debug, Clone, Serialize)]
pub struct DstReport {
    /// Which runner produced this report
    pub target: &'static str,
    /// Seed used for reproduction
    pub seed: u64,
    /// Total operations executed
    pub operations_count: u64,
    /// Invariant checks performed
    pub invariant_checks_count: u64,
    /// Faults injected
    pub faults_injected_count: u64,
    /// Every failing property (first occurrence per check)
    pub violations: Vec<PropertyResult>,
}

impl DstReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Format for display.
    #[must_use]
    pub fn format(&self) -> String {
        let status = if self.passed() { "PASS" } else { "FAIL" };

        let mut result = format!(
            "[{}] {} DST_SEED={} ops={} checks={} faults={}",
            status,
            self.target,
            self.seed,
            self.operations_count,
            self.invariant_checks_count,
            self.faults_injected_count
        );

        for violation in &self.violations {
            result.push_str(&format!("\n  VIOLATION: {}: {}", violation.name, violation.message));
            if let Some(ref ce) = violation.counterexample {
                for line in ce.render_trace().lines() {
                    result.push_str("\n    ");
                    result.push_str(line);
                }
            }
        }

        result
    }
}
