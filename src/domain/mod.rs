//! Domain layer - Core business logic and entities

pub mod audit;
pub mod clock;
pub mod error;
pub mod exclusion;
pub mod experiment;

pub use audit::{AuditRecorder, ChangeEvent, ChangeEventId, UserInfo};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::DomainError;
pub use exclusion::{
    ExclusionEdge, ExclusionOutcome, ExclusionStatus, ExclusionStore, RejectionReason,
};
pub use experiment::{
    Experiment, ExperimentDirectory, ExperimentId, ExperimentState, ExperimentValidationError,
};
