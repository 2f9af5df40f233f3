//! Exclusion edge entity

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::experiment::ExperimentId;
use crate::domain::DomainError;

/// Unordered pair of experiments that must not run concurrently
///
/// The pair is normalized on construction so `(a, b)` and `(b, a)` compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "(ExperimentId, ExperimentId)",
    into = "(ExperimentId, ExperimentId)"
)]
pub struct ExclusionEdge {
    first: ExperimentId,
    second: ExperimentId,
}

impl ExclusionEdge {
    /// Create an edge; an experiment cannot exclude itself
    pub fn new(a: ExperimentId, b: ExperimentId) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::validation(format!(
                "Experiment '{}' cannot be mutually exclusive with itself",
                a
            )));
        }

        let (first, second) = if a < b { (a, b) } else { (b, a) };

        Ok(Self { first, second })
    }

    pub fn first(&self) -> &ExperimentId {
        &self.first
    }

    pub fn second(&self) -> &ExperimentId {
        &self.second
    }

    /// The endpoint opposite `id`, if `id` is part of this edge
    pub fn other(&self, id: &ExperimentId) -> Option<&ExperimentId> {
        if &self.first == id {
            Some(&self.second)
        } else if &self.second == id {
            Some(&self.first)
        } else {
            None
        }
    }
}

impl TryFrom<(ExperimentId, ExperimentId)> for ExclusionEdge {
    type Error = DomainError;

    fn try_from((a, b): (ExperimentId, ExperimentId)) -> Result<Self, Self::Error> {
        Self::new(a, b)
    }
}

impl From<ExclusionEdge> for (ExperimentId, ExperimentId) {
    fn from(edge: ExclusionEdge) -> Self {
        (edge.first, edge.second)
    }
}

impl fmt::Display for ExclusionEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ExperimentId {
        ExperimentId::new(raw).unwrap()
    }

    #[test]
    fn test_edge_is_unordered() {
        let ab = ExclusionEdge::new(id("a"), id("b")).unwrap();
        let ba = ExclusionEdge::new(id("b"), id("a")).unwrap();

        assert_eq!(ab, ba);
        assert_eq!(ab.first().as_str(), "a");
        assert_eq!(ab.second().as_str(), "b");
    }

    #[test]
    fn test_self_edge_rejected() {
        let result = ExclusionEdge::new(id("a"), id("a"));
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_other_endpoint() {
        let edge = ExclusionEdge::new(id("a"), id("b")).unwrap();

        assert_eq!(edge.other(&id("a")), Some(&id("b")));
        assert_eq!(edge.other(&id("b")), Some(&id("a")));
        assert_eq!(edge.other(&id("c")), None);
    }

    #[test]
    fn test_serializes_as_pair() {
        let edge = ExclusionEdge::new(id("z"), id("m")).unwrap();
        let json = serde_json::to_string(&edge).unwrap();
        assert_eq!(json, r#"["m","z"]"#);

        let parsed: ExclusionEdge = serde_json::from_str(r#"["z","m"]"#).unwrap();
        assert_eq!(parsed, edge);
    }

    #[test]
    fn test_deserialize_rejects_self_edge() {
        let parsed: Result<ExclusionEdge, _> = serde_json::from_str(r#"["m","m"]"#);
        assert!(parsed.is_err());
    }
}
