//! Audit domain - change events and the recorder they are sent to

mod event;
mod recorder;

pub use event::{ChangeEvent, ChangeEventId, UserInfo, MUTEX_PROPERTY};
pub use recorder::AuditRecorder;

#[cfg(test)]
pub use recorder::MockAuditRecorder;
