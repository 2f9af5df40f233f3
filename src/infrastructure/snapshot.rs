//! JSON snapshot of experiments and exclusions
//!
//! Lets the command line tool run against a file instead of a live
//! directory and store: the snapshot is loaded into the in-memory
//! implementations and written back after a mutating command.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::domain::exclusion::ExclusionEdge;
use crate::domain::experiment::{Experiment, ExperimentId};
use crate::domain::DomainError;
use crate::infrastructure::exclusion::InMemoryExclusionStore;
use crate::infrastructure::experiment::InMemoryExperimentDirectory;

/// Serialized state of the directory and the exclusion store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub experiments: Vec<Experiment>,
    #[serde(default)]
    pub exclusions: Vec<ExclusionEdge>,
}

impl Snapshot {
    /// Read a snapshot file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::storage(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|e| {
            DomainError::validation(format!("Invalid snapshot {}: {}", path.display(), e))
        })?;

        debug!(
            path = %path.display(),
            experiments = snapshot.experiments.len(),
            exclusions = snapshot.exclusions.len(),
            "Snapshot loaded"
        );

        Ok(snapshot)
    }

    /// Write the snapshot as pretty-printed JSON
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), DomainError> {
        let path = path.as_ref();
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| DomainError::internal(format!("Failed to encode snapshot: {}", e)))?;

        tokio::fs::write(path, raw).await.map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "Snapshot saved");
        Ok(())
    }

    /// Build in-memory collaborators holding this snapshot's state
    ///
    /// Every exclusion must join two listed experiments of the same
    /// application.
    pub fn into_collaborators(
        self,
    ) -> Result<(Arc<InMemoryExperimentDirectory>, Arc<InMemoryExclusionStore>), DomainError> {
        self.check_exclusions()?;

        let directory = Arc::new(InMemoryExperimentDirectory::with_experiments(
            self.experiments,
        )?);
        let store = Arc::new(InMemoryExclusionStore::with_edges(
            directory.clone(),
            self.exclusions,
        ));

        Ok((directory, store))
    }

    fn check_exclusions(&self) -> Result<(), DomainError> {
        let applications: HashMap<&ExperimentId, &str> = self
            .experiments
            .iter()
            .map(|e| (e.id(), e.application_name()))
            .collect();

        for edge in &self.exclusions {
            let application_of = |id: &ExperimentId| {
                applications.get(id).copied().ok_or_else(|| {
                    DomainError::validation(format!(
                        "Exclusion {} references unknown experiment '{}'",
                        edge, id
                    ))
                })
            };

            if application_of(edge.first())? != application_of(edge.second())? {
                return Err(DomainError::validation(format!(
                    "Exclusion {} spans different applications",
                    edge
                )));
            }
        }

        Ok(())
    }

    /// Capture the current state of in-memory collaborators
    pub fn capture(
        directory: &InMemoryExperimentDirectory,
        store: &InMemoryExclusionStore,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            experiments: directory.all()?,
            exclusions: store.edges()?,
        })
    }
}
