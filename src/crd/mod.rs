//! Custom Resource Definitions for the digi.dev/v1 policy group
//!
//! - YieldPolicy: governs the mounts of a target model

pub mod yield_policy;

pub use yield_policy::*;
