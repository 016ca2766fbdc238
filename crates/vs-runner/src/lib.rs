//! # vs-runner
//!
//! Runs the DST targets for `vs-collections` outside of `cargo test`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;
use vs_collections::{RingBuffer, SortedSearch};
use vs_dst::{DstError, DstReport, HarnessConfig, RingBufferDstRunner, SearchDstRunner};

/// Which runner(s) to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Ring,
    Search,
    All,
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ring" => Ok(Target::Ring),
            "search" => Ok(Target::Search),
            "all" => Ok(Target::All),
            _ => Err(format!("Unknown target: {s}. Expected: ring, search, all")),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Ring => "ring",
            Target::Search => "search",
            Target::All => "all",
        };
        f.write_str(name)
    }
}

/// Run `target` with one seed and configuration, one report per runner.
pub fn run_target(target: Target, seed: u64, config: &HarnessConfig) -> Result<Vec<DstReport>, DstError> {
    info!(%target, seed, operations = config.operations, "starting DST run");

    let mut reports = Vec::new();
    if matches!(target, Target::Ring | Target::All) {
        reports.push(RingBufferDstRunner::<RingBuffer<u64>>::new(seed, config.clone())?.run());
    }
    if matches!(target, Target::Search | Target::All) {
        reports.push(SearchDstRunner::new(SortedSearch, seed, config.clone())?.run());
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!("ring".parse::<Target>(), Ok(Target::Ring));
        assert_eq!("SEARCH".parse::<Target>(), Ok(Target::Search));
        assert_eq!("all".parse::<Target>(), Ok(Target::All));
        assert!("stack".parse::<Target>().is_err());
    }

    #[test]
    fn test_run_all_targets() {
        let reports = run_target(Target::All, 1234, &HarnessConfig::quick()).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].target, "ring_buffer");
        assert_eq!(reports[1].target, "sorted_search");
        assert!(reports.iter().all(DstReport::passed));
    }

    #[test]
    fn test_run_single_target() {
        let reports = run_target(Target::Search, 7, &HarnessConfig::quick()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].seed, 7);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config_invalid = HarnessConfig {
            fault_config: vs_dst::FaultConfig { failure_probability: 2.0 },
            ..HarnessConfig::quick()
        };
        assert!(run_target(Target::Ring, 1, &config_invalid).is_err());
    }
}
