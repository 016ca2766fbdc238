//! # vs-core
//!
//! Core types and invariants for verified sequence structures.
//!
//! This crate provides:
//! - `PropertyResult` and `PropertyChecker` for verifying invariants
//! - `Counterexample` for rendering failure paths
//! - Invariant traits and checkers for each structure (e.g., `RingBufferProperties`)
//!
//! It has no dependency on the implementations it checks; `vs-collections`
//! implements the traits and `vs-dst` drives the checkers.

pub mod counterexample;
pub mod invariants;
pub mod property;

pub use counterexample::{Counterexample, OperationRecord, StateSnapshot};
pub use property::{PropertyChecker, PropertyResult};
