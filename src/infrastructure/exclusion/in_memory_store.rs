//! In-memory implementation of the exclusion store

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::domain::exclusion::{ExclusionEdge, ExclusionStore};
use crate::domain::experiment::{Experiment, ExperimentDirectory, ExperimentId};
use crate::domain::DomainError;

/// In-memory edge set
///
/// Non-edges are computed against the application's experiments as listed
/// by the directory.
#[derive(Debug)]
pub struct InMemoryExclusionStore {
    edges: RwLock<HashSet<ExclusionEdge>>,
    directory: Arc<dyn ExperimentDirectory>,
}

impl InMemoryExclusionStore {
    /// Create an empty store
    pub fn new(directory: Arc<dyn ExperimentDirectory>) -> Self {
        Self {
            edges: RwLock::new(HashSet::new()),
            directory,
        }
    }

    /// Create a store with initial edges
    pub fn with_edges(directory: Arc<dyn ExperimentDirectory>, edges: Vec<ExclusionEdge>) -> Self {
        Self {
            edges: RwLock::new(edges.into_iter().collect()),
            directory,
        }
    }

    /// Every stored edge, ordered by endpoints
    pub fn edges(&self) -> Result<Vec<ExclusionEdge>, DomainError> {
        let edges = self
            .edges
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut all: Vec<_> = edges.iter().cloned().collect();
        all.sort_by(|a, b| (a.first(), a.second()).cmp(&(b.first(), b.second())));
        Ok(all)
    }

    fn neighbours(&self, id: &ExperimentId) -> Result<Vec<ExperimentId>, DomainError> {
        let edges = self
            .edges
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut neighbours: Vec<_> = edges.iter().filter_map(|e| e.other(id).cloned()).collect();
        neighbours.sort();
        Ok(neighbours)
    }
}

#[async_trait]
impl ExclusionStore for InMemoryExclusionStore {
    async fn list_edges_for(&self, id: &ExperimentId) -> Result<Vec<ExperimentId>, DomainError> {
        self.neighbours(id)
    }

    async fn list_non_edges_for(
        &self,
        experiment: &Experiment,
    ) -> Result<Vec<ExperimentId>, DomainError> {
        let id = experiment.id();
        let excluded: HashSet<_> = self.neighbours(id)?.into_iter().collect();

        let mut others: Vec<_> = self
            .directory
            .list_by_application(experiment.application_name())
            .await?
            .into_iter()
            .map(|e| e.id().clone())
            .filter(|other| other != id && !excluded.contains(other))
            .collect();

        others.sort();
        Ok(others)
    }

    async fn add_edge(&self, a: &ExperimentId, b: &ExperimentId) -> Result<(), DomainError> {
        let edge = ExclusionEdge::new(a.clone(), b.clone())?;
        let mut edges = self
            .edges
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        edges.insert(edge);
        Ok(())
    }

    async fn remove_edge(&self, a: &ExperimentId, b: &ExperimentId) -> Result<(), DomainError> {
        let edge = ExclusionEdge::new(a.clone(), b.clone())?;
        let mut edges = self
            .edges
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        edges.remove(&edge);
        Ok(())
    }
}
