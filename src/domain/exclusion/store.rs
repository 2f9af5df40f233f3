//! Exclusion store trait

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::experiment::{Experiment, ExperimentId};
use crate::domain::DomainError;

/// Durable storage of the exclusion relation
///
/// Single-edge additions and removals must be atomic; the engine does no
/// locking of its own.
#[async_trait]
pub trait ExclusionStore: Send + Sync + Debug {
    /// Experiments sharing an edge with `id`
    async fn list_edges_for(&self, id: &ExperimentId) -> Result<Vec<ExperimentId>, DomainError>;

    /// Experiments of `experiment`'s application that share no edge with it
    async fn list_non_edges_for(
        &self,
        experiment: &Experiment,
    ) -> Result<Vec<ExperimentId>, DomainError>;

    /// Add the edge `(a, b)`; adding an existing edge succeeds
    async fn add_edge(&self, a: &ExperimentId, b: &ExperimentId) -> Result<(), DomainError>;

    /// Remove the edge `(a, b)`; removing an absent edge succeeds
    async fn remove_edge(&self, a: &ExperimentId, b: &ExperimentId) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use crate::domain::exclusion::ExclusionEdge;
    use std::collections::HashSet;
    use std::sync::RwLock;

    /// Edge-only store recording every call, with per-experiment failures
    #[derive(Debug, Default)]
    pub struct MockExclusionStore {
        edges: RwLock<HashSet<ExclusionEdge>>,
        add_calls: RwLock<Vec<(String, String)>>,
        remove_calls: RwLock<Vec<(String, String)>>,
        failing_ids: RwLock<HashSet<String>>,
        should_fail: RwLock<bool>,
    }

    impl MockExclusionStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail every operation
        pub fn with_error(self) -> Self {
            *self.should_fail.write().unwrap() = true;
            self
        }

        /// Fail additions touching the given experiment
        pub fn failing_for(self, id: &str) -> Self {
            self.failing_ids.write().unwrap().insert(id.to_string());
            self
        }

        pub fn add_calls(&self) -> Vec<(String, String)> {
            self.add_calls.read().unwrap().clone()
        }

        pub fn remove_calls(&self) -> Vec<(String, String)> {
            self.remove_calls.read().unwrap().clone()
        }

        pub fn edge_count(&self) -> usize {
            self.edges.read().unwrap().len()
        }

        fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().unwrap() {
                Err(DomainError::storage("Mock error"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ExclusionStore for MockExclusionStore {
        async fn list_edges_for(
            &self,
            id: &ExperimentId,
        ) -> Result<Vec<ExperimentId>, DomainError> {
            self.check_should_fail()?;
            let edges = self.edges.read().unwrap();
            Ok(edges.iter().filter_map(|e| e.other(id).cloned()).collect())
        }

        async fn list_non_edges_for(
            &self,
            _experiment: &Experiment,
        ) -> Result<Vec<ExperimentId>, DomainError> {
            self.check_should_fail()?;
            Ok(Vec::new())
        }

        async fn add_edge(&self, a: &ExperimentId, b: &ExperimentId) -> Result<(), DomainError> {
            self.add_calls
                .write()
                .unwrap()
                .push((a.to_string(), b.to_string()));
            self.check_should_fail()?;

            {
                let failing = self.failing_ids.read().unwrap();
                if failing.contains(a.as_str()) || failing.contains(b.as_str()) {
                    return Err(DomainError::storage(format!(
                        "Mock error storing {} <-> {}",
                        a, b
                    )));
                }
            }

            let edge = ExclusionEdge::new(a.clone(), b.clone())?;
            self.edges.write().unwrap().insert(edge);
            Ok(())
        }

        async fn remove_edge(
            &self,
            a: &ExperimentId,
            b: &ExperimentId,
        ) -> Result<(), DomainError> {
            self.remove_calls
                .write()
                .unwrap()
                .push((a.to_string(), b.to_string()));
            self.check_should_fail()?;

            let edge = ExclusionEdge::new(a.clone(), b.clone())?;
            self.edges.write().unwrap().remove(&edge);
            Ok(())
        }
    }
}
