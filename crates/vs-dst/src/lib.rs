//! # vs-dst
//!
//! Deterministic Simulation Testing for verified sequence structures.
//!
//! All randomness in a run flows from a single seed, so every failure is
//! reproducible.
//!
//! ## Runners
//!
//! - `ring_buffer_harness`: random appends against a shadow model
//! - `search_harness`: random sorted sequences and probes, with faults
//!   injected into the callbacks of the predicate-driven search
//!
//! ## Usage
//!
//! ```rust
//! use vs_dst::DeterministicRng;
//!
//! let mut rng = DeterministicRng::new(12345);
//! let capacity: usize = rng.gen_range(0..=16);
//! let sorted = rng.sorted_vec(8, 100);
//! assert!(capacity <= 16);
//! assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
//! ```
//!
//! ## Reproducibility
//!
//! To reproduce a failing test:
//! ```bash
//! DST_SEED=12345 cargo test
//! ```

pub mod error;
pub mod fault;
pub mod harness;
pub mod random;
pub mod ring_buffer_harness;
pub mod search_harness;

pub use error::DstError;
pub use fault::{FaultConfig, FaultInjector, FaultStats, InjectedFault};
pub use harness::{DstReport, HarnessConfig};
pub use random::DeterministicRng;
pub use ring_buffer_harness::{run_ring_scenario, DstTestableRingBuffer, RingBufferDstRunner, RingOp};
pub use search_harness::{Callback, DstTestableSearch, SearchDstRunner};

/// Environment variable holding the seed to replay.
pub const SEED_ENV: &str = "DST_SEED";

/// Environment variable overriding the operation count.
pub const ITERATIONS_ENV: &str = "DST_ITERATIONS";

fn parse_env(name: &'static str, value: String) -> Result<u64, DstError> {
    value
        .trim()
        .parse()
        .map_err(|_| DstError::InvalidEnv { name, value })
}

/// Get DST seed from environment or generate a random one.
///
/// Logs the seed for reproduction. Use `DST_SEED=<seed>` to reproduce.
pub fn get_or_generate_seed() -> Result<u64, DstError> {
    match std::env::var(SEED_ENV) {
        Ok(s) => {
            let seed = parse_env(SEED_ENV, s)?;
            tracing::info!(seed, "DST_SEED from environment");
            Ok(seed)
        }
        Err(_) => {
            let seed = rand::random::<u64>();
            tracing::info!(seed, "DST_SEED randomly generated");
            Ok(seed)
        }
    }
}

/// Operation count from `DST_ITERATIONS`, or `default` when unset.
pub fn iterations_from_env(default: u64) -> Result<u64, DstError> {
    match std::env::var(ITERATIONS_ENV) {
        Ok(s) => parse_env(ITERATIONS_ENV, s),
        Err(_) => Ok(default),
    }
}
