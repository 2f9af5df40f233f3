//! Audit recorder writing events to the log

use async_trait::async_trait;
use tracing::info;

use crate::domain::audit::{AuditRecorder, ChangeEvent};
use crate::domain::DomainError;

/// Emits every change event as a structured `info` record on the `audit` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditRecorder;

impl TracingAuditRecorder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditRecorder for TracingAuditRecorder {
    async fn record(&self, event: ChangeEvent) -> Result<(), DomainError> {
        info!(
            target: "audit",
            event_id = %event.id,
            user = %event.user,
            experiment_id = %event.experiment_id,
            application = %event.application_name,
            property = %event.property_name,
            before = event.before_value.as_deref().unwrap_or(""),
            after = event.after_value.as_deref().unwrap_or(""),
            "Experiment changed"
        );

        Ok(())
    }
}
