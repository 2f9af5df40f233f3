//! Exclusion domain module
//!
//! Types and traits for the mutual exclusion relation between experiments:
//! the undirected edge set, the store that persists it and the outcome
//! records produced by batch creation.

mod edge;
mod outcome;
mod store;

pub use edge::ExclusionEdge;
pub use outcome::{ExclusionOutcome, ExclusionStatus, RejectionReason};
pub use store::ExclusionStore;

#[cfg(test)]
pub use store::mock::MockExclusionStore;
