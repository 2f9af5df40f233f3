//! Per-candidate results of a batch exclusion request

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a candidate could not be paired with the base experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    #[serde(rename = "candidate not found")]
    NotFound,
    #[serde(rename = "experiment cannot be mutually exclusive with itself")]
    SelfExclusion,
    #[serde(rename = "different application; exclusion requires same application")]
    DifferentApplication,
    #[serde(rename = "candidate in terminal state")]
    TerminalState,
    #[serde(rename = "candidate end time has passed")]
    EndTimePassed,
    #[serde(rename = "store error")]
    StoreError,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "candidate not found",
            Self::SelfExclusion => "experiment cannot be mutually exclusive with itself",
            Self::DifferentApplication => {
                "different application; exclusion requires same application"
            }
            Self::TerminalState => "candidate in terminal state",
            Self::EndTimePassed => "candidate end time has passed",
            Self::StoreError => "store error",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single candidate; a reason is carried only on failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExclusionStatus {
    Success,
    Failed { reason: RejectionReason },
}

/// Result of pairing one candidate with the base experiment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionOutcome {
    #[serde(rename = "experimentID1")]
    pub base_id: String,
    #[serde(rename = "experimentID2")]
    pub candidate_id: String,
    #[serde(flatten)]
    pub status: ExclusionStatus,
}

impl ExclusionOutcome {
    pub fn success(base_id: impl Into<String>, candidate_id: impl Into<String>) -> Self {
        Self {
            base_id: base_id.into(),
            candidate_id: candidate_id.into(),
            status: ExclusionStatus::Success,
        }
    }

    pub fn failed(
        base_id: impl Into<String>,
        candidate_id: impl Into<String>,
        reason: RejectionReason,
    ) -> Self {
        Self {
            base_id: base_id.into(),
            candidate_id: candidate_id.into(),
            status: ExclusionStatus::Failed { reason },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, ExclusionStatus::Success)
    }

    pub fn reason(&self) -> Option<RejectionReason> {
        match self.status {
            ExclusionStatus::Success => None,
            ExclusionStatus::Failed { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serializes_without_reason() {
        let outcome = ExclusionOutcome::success("E1", "E2");

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"experimentID1": "E1", "experimentID2": "E2", "status": "SUCCESS"})
        );
        assert!(outcome.is_success());
        assert_eq!(outcome.reason(), None);
    }

    #[test]
    fn test_failure_serializes_reason_text() {
        let outcome =
            ExclusionOutcome::failed("E1", "E3", RejectionReason::DifferentApplication);

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "experimentID1": "E1",
                "experimentID2": "E3",
                "status": "FAILED",
                "reason": "different application; exclusion requires same application"
            })
        );
        assert_eq!(outcome.reason(), Some(RejectionReason::DifferentApplication));
    }

    #[test]
    fn test_reason_display_matches_wire_text() {
        for reason in [
            RejectionReason::NotFound,
            RejectionReason::SelfExclusion,
            RejectionReason::DifferentApplication,
            RejectionReason::TerminalState,
            RejectionReason::EndTimePassed,
            RejectionReason::StoreError,
        ] {
            assert_eq!(
                serde_json::to_value(reason).unwrap(),
                json!(reason.to_string())
            );
        }
    }
}
