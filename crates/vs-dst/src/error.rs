//! Errors raised by the DST tooling itself.
//!
//! Invariant violations are not errors: they are reported in a
//! `DstReport`. These cover bad configuration coming from the
//! environment or from callers.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DstError {
    /// An environment variable held something other than an integer.
    #[error("{name} must be a valid unsigned integer, got {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    /// Harness configuration is out of range.
    #[error("invalid harness config: {0}")]
    InvalidConfig(String),
}
