//! Siphon Core - partition planning for bulk table extraction
//!
//! This crate holds the database-independent planning domain: the boundary
//! probe contract, caller hints, and the derivation of range partition plans.

pub mod plan;
pub mod planner;
pub mod probe;

pub use plan::{KeyRange, PartitionHints, PartitionPlan};
pub use planner::derive_plan;
pub use probe::{Boundaries, BoundaryProber, ProbeError};
