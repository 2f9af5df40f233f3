//! Experiment directory trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Experiment, ExperimentId};
use crate::domain::DomainError;

/// Read access to experiment metadata
///
/// The directory owns experiments and their lifecycle; the exclusion engine
/// only looks experiments up. Implementations must be safe to call
/// concurrently and repeatedly within a single request.
#[async_trait]
pub trait ExperimentDirectory: Send + Sync + Debug {
    /// Resolve an identifier to its current metadata, `None` if absent
    async fn resolve(&self, id: &ExperimentId) -> Result<Option<Experiment>, DomainError>;

    /// All experiments registered under an application
    async fn list_by_application(
        &self,
        application_name: &str,
    ) -> Result<Vec<Experiment>, DomainError>;
}
