//! Property results and the checker trait.
//!
//! Every invariant checker in this crate reports through `PropertyResult`.
//! A failing result may carry a `Counterexample` with the operation trace
//! that led to the violation.

use serde::Serialize;

use crate::counterexample::Counterexample;

/// Outcome of checking a single named property.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyResult {
    /// Property name (e.g., "RetainsNewest")
    pub name: &'static str,
    /// Whether the property held
    pub passed: bool,
    /// Explanation of the violation, empty when passed
    pub message: String,
    /// Failure path, if the checker could build one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterexample: Option<Counterexample>,
}

impl PropertyResult {
    /// Create a passing result.
    #[must_use]
    pub fn pass(name: &'static str) -> Self {
        Self {
            name,
            passed: true,
            message: String::new(),
            counterexample: None,
        }
    }

    /// Create a failing result.
    #[must_use]
    pub fn fail(
        name: &'static str,
        message: impl Into<String>,
        counterexample: Option<Counterexample>,
    ) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "Failing property needs a message");
        Self {
            name,
            passed: false,
            message,
            counterexample,
        }
    }

    /// One-line summary: `[PASS] Name` or `[FAIL] Name: message`.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.passed {
            format!("[PASS] {}", self.name)
        } else {
            format!("[FAIL] {}: {}", self.name, self.message)
        }
    }
}

/// Something that can check a set of properties against observed state.
pub trait PropertyChecker {
    /// Check every property and return all results, passing or not.
    fn check_all(&self) -> Vec<PropertyResult>;

    /// True when every property holds.
    fn all_hold(&self) -> bool {
        self.check_all().iter().all(|r| r.passed)
    }

    /// Only the failing results.
    fn violations(&self) -> Vec<PropertyResult> {
        self.check_all().into_iter().filter(|r| !r.passed).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<PropertyResult>);

    impl PropertyChecker for Fixed {
        fn check_all(&self) -> Vec<PropertyResult> {
            self.0.clone()
        }
    }

    #[test]
    fn test_pass_and_fail_summary() {
        assert_eq!(PropertyResult::pass("BoundedCount").summary(), "[PASS] BoundedCount");

        let failed = PropertyResult::fail("BoundedCount", "4 > 3", None);
        assert!(!failed.passed);
        assert_eq!(failed.summary(), "[FAIL] BoundedCount: 4 > 3");
    }

    #[test]
    fn test_checker_defaults() {
        let checker = Fixed(vec![
            PropertyResult::pass("A"),
            PropertyResult::fail("B", "broken", None),
        ]);

        assert!(!checker.all_hold());
        let violations = checker.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].name, "B");

        assert!(Fixed(vec![PropertyResult::pass("A")]).all_hold());
    }

    #[test]
    fn test_serializes_without_empty_counterexample() {
        let json = serde_json::to_string(&PropertyResult::pass("A")).unwrap();
        assert!(json.contains("\"passed\":true"));
        assert!(!json.contains("counterexample"));
    }
}
