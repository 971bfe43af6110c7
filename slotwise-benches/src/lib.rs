//! Benchmark support crate for slotwise.
//!
//! Provides deadline workloads and parameter types used by the Criterion
//! scheduling benchmarks.

pub mod params;
pub mod workload;
