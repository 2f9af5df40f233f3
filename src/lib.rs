//! Experiment mutual exclusion engine
//!
//! Maintains pairwise exclusion rules between experiments of the same
//! application so that two exclusive experiments never share traffic:
//! - Validation of experiment existence, lifecycle state and end time
//! - Batch creation with per-candidate outcomes
//! - Audit events for every change to the exclusion relation

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    DomainError, ExclusionOutcome, ExclusionStatus, Experiment, ExperimentId, ExperimentState,
    RejectionReason, UserInfo,
};
pub use infrastructure::services::ExclusionService;
