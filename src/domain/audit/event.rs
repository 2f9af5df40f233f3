//! Audit event entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::experiment::{Experiment, ExperimentId};

/// Property name attached to exclusion changes
pub const MUTEX_PROPERTY: &str = "mutex";

/// The user on whose behalf a change is made
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserInfo {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

/// Change event ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeEventId(String);

impl ChangeEventId {
    pub fn generate() -> Self {
        Self(format!("evt-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Append-only record of a change made to an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub id: ChangeEventId,
    pub user: UserInfo,
    pub experiment_id: ExperimentId,
    pub experiment_label: String,
    pub application_name: String,
    pub property_name: String,
    pub before_value: Option<String>,
    pub after_value: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChangeEvent {
    fn mutex(user: UserInfo, experiment: &Experiment) -> Self {
        Self {
            id: ChangeEventId::generate(),
            user,
            experiment_id: experiment.id().clone(),
            experiment_label: experiment.label().to_string(),
            application_name: experiment.application_name().to_string(),
            property_name: MUTEX_PROPERTY.to_string(),
            before_value: None,
            after_value: None,
            created_at: Utc::now(),
        }
    }

    /// `experiment` gained an exclusion with the experiment labelled `added`
    pub fn mutex_added(user: UserInfo, experiment: &Experiment, added: impl Into<String>) -> Self {
        let mut event = Self::mutex(user, experiment);
        event.after_value = Some(added.into());
        event
    }

    /// `experiment` lost its exclusion with the experiment labelled `removed`
    pub fn mutex_removed(
        user: UserInfo,
        experiment: &Experiment,
        removed: impl Into<String>,
    ) -> Self {
        let mut event = Self::mutex(user, experiment);
        event.before_value = Some(removed.into());
        event
    }

    /// Label of the experiment added to the exclusion set, if any
    pub fn added_label(&self) -> Option<&str> {
        self.after_value.as_deref()
    }

    /// Label of the experiment removed from the exclusion set, if any
    pub fn removed_label(&self) -> Option<&str> {
        self.before_value.as_deref()
    }
}
