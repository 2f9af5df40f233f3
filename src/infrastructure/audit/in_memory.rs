//! In-memory audit recorder

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::audit::{AuditRecorder, ChangeEvent};
use crate::domain::experiment::ExperimentId;
use crate::domain::DomainError;

/// Keeps recorded events in insertion order
#[derive(Debug, Default)]
pub struct InMemoryAuditRecorder {
    events: RwLock<Vec<ChangeEvent>>,
}

impl InMemoryAuditRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far
    pub fn events(&self) -> Result<Vec<ChangeEvent>, DomainError> {
        let events = self
            .events
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(events.clone())
    }

    /// Events recorded against one experiment
    pub fn events_for(&self, id: &ExperimentId) -> Result<Vec<ChangeEvent>, DomainError> {
        Ok(self
            .events()?
            .into_iter()
            .filter(|event| &event.experiment_id == id)
            .collect())
    }
}

#[async_trait]
impl AuditRecorder for InMemoryAuditRecorder {
    async fn record(&self, event: ChangeEvent) -> Result<(), DomainError> {
        let mut events = self
            .events
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        events.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::UserInfo;
    use crate::domain::experiment::Experiment;

    #[tokio::test]
    async fn test_records_in_order() {
        let recorder = InMemoryAuditRecorder::new();
        let e1 = Experiment::new(ExperimentId::new("E1").unwrap(), "one", "checkout");
        let e2 = Experiment::new(ExperimentId::new("E2").unwrap(), "two", "checkout");
        let user = UserInfo::new("alice");

        recorder
            .record(ChangeEvent::mutex_added(user.clone(), &e1, "two"))
            .await
            .unwrap();
        recorder
            .record(ChangeEvent::mutex_removed(user.clone(), &e2, "one"))
            .await
            .unwrap();
        recorder
            .record(ChangeEvent::mutex_removed(user, &e1, "two"))
            .await
            .unwrap();

        let events = recorder.events().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].added_label(), Some("two"));

        let for_e1 = recorder.events_for(e1.id()).unwrap();
        assert_eq!(for_e1.len(), 2);
        assert_eq!(for_e1[1].removed_label(), Some("two"));
    }
}
