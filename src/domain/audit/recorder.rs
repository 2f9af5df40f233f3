//! Audit recorder trait

use async_trait::async_trait;

use super::event::ChangeEvent;
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Sink for change events
///
/// Recording is best effort from the caller's point of view: a failed
/// `record` is logged and never undoes or fails the change it describes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuditRecorder: Send + Sync {
    /// Record a change event
    async fn record(&self, event: ChangeEvent) -> Result<(), DomainError>;
}
