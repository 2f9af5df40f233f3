//! In-memory implementation of the experiment directory

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::experiment::{
    validate_application_name, Experiment, ExperimentDirectory, ExperimentId, ExperimentState,
};
use crate::domain::DomainError;

/// In-memory experiment directory
#[derive(Debug, Default)]
pub struct InMemoryExperimentDirectory {
    experiments: RwLock<HashMap<String, Experiment>>,
}

impl InMemoryExperimentDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory with initial experiments
    pub fn with_experiments(experiments: Vec<Experiment>) -> Result<Self, DomainError> {
        let directory = Self::new();

        for experiment in experiments {
            directory.insert(experiment)?;
        }

        Ok(directory)
    }

    /// Register or replace an experiment
    pub fn insert(&self, experiment: Experiment) -> Result<(), DomainError> {
        validate_application_name(experiment.application_name())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let mut experiments = self
            .experiments
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        experiments.insert(experiment.id().as_str().to_string(), experiment);
        Ok(())
    }

    /// Move an experiment through its lifecycle
    pub fn transition(
        &self,
        id: &ExperimentId,
        target: ExperimentState,
    ) -> Result<Experiment, DomainError> {
        let mut experiments = self
            .experiments
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        let experiment = experiments
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::experiment_not_found(id))?;

        experiment
            .transition_to(target)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        Ok(experiment.clone())
    }

    /// Every registered experiment, ordered by ID
    pub fn all(&self) -> Result<Vec<Experiment>, DomainError> {
        let experiments = self
            .experiments
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let mut all: Vec<_> = experiments.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(all)
    }
}

#[async_trait]
impl ExperimentDirectory for InMemoryExperimentDirectory {
    async fn resolve(&self, id: &ExperimentId) -> Result<Option<Experiment>, DomainError> {
        let experiments = self
            .experiments
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(experiments.get(id.as_str()).cloned())
    }

    async fn list_by_application(
        &self,
        application_name: &str,
    ) -> Result<Vec<Experiment>, DomainError> {
        let experiments = self
            .experiments
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let mut results: Vec<_> = experiments
            .values()
            .filter(|e| e.application_name() == application_name)
            .cloned()
            .collect();

        results.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ExperimentId {
        ExperimentId::new(raw).unwrap()
    }

    fn experiment(raw: &str, app: &str) -> Experiment {
        Experiment::new(id(raw), format!("Experiment {}", raw), app)
    }

    #[tokio::test]
    async fn test_resolve() {
        let directory =
            InMemoryExperimentDirectory::with_experiments(vec![experiment("E1", "checkout")])
                .unwrap();

        let found = directory.resolve(&id("E1")).await.unwrap();
        assert_eq!(found.unwrap().label(), "Experiment E1");

        assert!(directory.resolve(&id("E9")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_application() {
        let directory = InMemoryExperimentDirectory::with_experiments(vec![
            experiment("E2", "checkout"),
            experiment("E1", "checkout"),
            experiment("E3", "search"),
        ])
        .unwrap();

        let checkout = directory.list_by_application("checkout").await.unwrap();
        let ids: Vec<_> = checkout.iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2"]);

        assert!(directory.list_by_application("billing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_application() {
        let directory = InMemoryExperimentDirectory::new();
        let result = directory.insert(experiment("E1", " "));

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_transition() {
        let directory =
            InMemoryExperimentDirectory::with_experiments(vec![experiment("E1", "checkout")])
                .unwrap();

        let running = directory.transition(&id("E1"), ExperimentState::Running).unwrap();
        assert_eq!(running.state(), ExperimentState::Running);

        let resolved = directory.resolve(&id("E1")).await.unwrap().unwrap();
        assert_eq!(resolved.state(), ExperimentState::Running);

        let invalid = directory.transition(&id("E1"), ExperimentState::Draft);
        assert!(matches!(invalid, Err(DomainError::Validation { .. })));

        let missing = directory.transition(&id("E9"), ExperimentState::Running);
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }
}
