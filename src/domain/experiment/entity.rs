//! Experiment domain entities

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::{validate_experiment_id, ExperimentValidationError};

// ============================================================================
// ExperimentId
// ============================================================================

/// Unique identifier for an experiment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExperimentId(String);

impl ExperimentId {
    /// Create a new experiment ID with validation
    pub fn new(id: impl Into<String>) -> Result<Self, ExperimentValidationError> {
        let id = id.into();
        validate_experiment_id(&id)?;
        Ok(Self(id))
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ExperimentId {
    type Error = ExperimentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExperimentId> for String {
    fn from(id: ExperimentId) -> Self {
        id.0
    }
}

impl fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ExperimentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// ExperimentState
// ============================================================================

/// Lifecycle state of an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperimentState {
    /// Being configured, not yet serving traffic
    #[default]
    Draft,
    /// Serving traffic
    Running,
    /// Temporarily stopped
    Paused,
    /// Finished; no longer serving traffic
    Terminated,
    /// Removed from the platform
    Deleted,
}

impl ExperimentState {
    /// Terminated and deleted experiments cannot take part in exclusions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated | Self::Deleted)
    }

    /// Check if a transition to the target state is valid
    pub fn can_transition_to(&self, target: ExperimentState) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Running)
                | (Self::Draft, Self::Deleted)
                | (Self::Running, Self::Paused)
                | (Self::Running, Self::Terminated)
                | (Self::Paused, Self::Running)
                | (Self::Paused, Self::Terminated)
                | (Self::Terminated, Self::Deleted)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Terminated => "TERMINATED",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for ExperimentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Experiment
// ============================================================================

/// Experiment metadata as seen by the exclusion engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    id: ExperimentId,
    label: String,
    application_name: String,
    state: ExperimentState,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl Experiment {
    /// Create a draft experiment running from now for thirty days
    pub fn new(
        id: ExperimentId,
        label: impl Into<String>,
        application_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            label: label.into(),
            application_name: application_name.into(),
            state: ExperimentState::Draft,
            start_time: now,
            end_time: now + Duration::days(30),
        }
    }

    pub fn with_state(mut self, state: ExperimentState) -> Self {
        self.state = state;
        self
    }

    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn id(&self) -> &ExperimentId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn state(&self) -> ExperimentState {
        self.state
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Whether the end time lies strictly before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.end_time < now
    }

    /// Whether both experiments belong to the same application
    pub fn shares_application_with(&self, other: &Experiment) -> bool {
        self.application_name == other.application_name
    }

    /// Move to a new lifecycle state
    pub fn transition_to(&mut self, target: ExperimentState) -> Result<(), ExperimentValidationError> {
        if !self.state.can_transition_to(target) {
            return Err(ExperimentValidationError::InvalidStateTransition(
                self.state.to_string(),
                target.to_string(),
            ));
        }

        self.state = target;
        Ok(())
    }
}
