//! Audit recorder implementations

mod in_memory;
mod tracing_recorder;

pub use in_memory::InMemoryAuditRecorder;
pub use tracing_recorder::TracingAuditRecorder;
