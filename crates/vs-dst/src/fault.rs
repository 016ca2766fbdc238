//! Fault injection for fallible callbacks.
//!
//! Faults are injected at callback boundaries: the code under test is
//! unchanged, and the harness decides which callback invocation fails.

use serde::Serialize;
use thiserror::Error;

use crate::random::DeterministicRng;

/// Error returned by a callback the harness chose to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("injected fault at callback call {call}")]
pub struct InjectedFault {
    /// 1-based callback invocation that failed
    pub call: u64,
}

/// How often faults are injected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaultConfig {
    /// Probability that a given search gets a failing callback
    pub failure_probability: f64,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            failure_probability: 0.1,
        }
    }
}

impl FaultConfig {
    /// No faults at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            failure_probability: 0.0,
        }
    }

    /// Fail often enough that most runs see many aborts.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            failure_probability: 0.5,
        }
    }
}

/// Fault statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FaultStats {
    /// Times `should_fail` was consulted
    pub checks_count: u64,
    /// Times it answered yes
    pub faults_count: u64,
}

/// Decides, deterministically, when to inject a fault.
#[derive(Debug, Clone)]
pub struct FaultInjector {
    rng: DeterministicRng,
    config: FaultConfig,
    stats: FaultStats,
}

impl FaultInjector {
    #[must_use]
    pub fn new(rng: DeterministicRng, config: FaultConfig) -> Self {
        Self {
            rng,
            config,
            stats: FaultStats::default(),
        }
    }

    /// Should the next operation get a fault?
    pub fn should_fail(&mut self) -> bool {
        self.stats.checks_count += 1;
        let fail = self.config.failure_probability > 0.0 && self.rng.gen_bool(self.config.failure_probability);
        if fail {
            self.stats.faults_count += 1;
        }
        fail
    }

    /// Pick which of the next `max_calls` callback invocations fails, if any.
    pub fn plan_failing_call(&mut self, max_calls: u64) -> Option<u64> {
        if max_calls == 0 || !self.should_fail() {
            return None;
        }
        Some(self.rng.gen_range(1..=max_calls))
    }

    #[must_use]
    pub fn stats(&self) -> FaultStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_faults_when_disabled() {
        let mut injector = FaultInjector::new(DeterministicRng::new(1), FaultConfig::none());
        for _ in 0..100 {
            assert!(!injector.should_fail());
        }
        assert_eq!(injector.stats().checks_count, 100);
        assert_eq!(injector.stats().faults_count, 0);
        assert_eq!(injector.plan_failing_call(10), None);
    }

    #[test]
    fn test_always_fail() {
        let config = FaultConfig {
            failure_probability: 1.0,
        };
        let mut injector = FaultInjector::new(DeterministicRng::new(1), config);
        for _ in 0..20 {
            let call = injector.plan_failing_call(4).unwrap();
            assert!((1..=4).contains(&call));
        }
        assert_eq!(injector.stats().faults_count, 20);
    }

    #[test]
    fn test_injected_fault_message() {
        assert_eq!(
            InjectedFault { call: 3 }.to_string(),
            "injected fault at callback call 3"
        );
    }
}
