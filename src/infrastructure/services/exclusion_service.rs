//! Exclusion service
//!
//! Validates and maintains mutual exclusion rules between experiments.
//! Experiments are looked up through the directory, edges are persisted by
//! the exclusion store and every successful mutation is reported to the
//! audit recorder.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::domain::audit::{AuditRecorder, ChangeEvent, UserInfo};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::exclusion::{ExclusionOutcome, ExclusionStore, RejectionReason};
use crate::domain::experiment::{Experiment, ExperimentDirectory, ExperimentId};
use crate::domain::DomainError;

/// Service managing mutual exclusion between experiments
pub struct ExclusionService {
    directory: Arc<dyn ExperimentDirectory>,
    store: Arc<dyn ExclusionStore>,
    recorder: Arc<dyn AuditRecorder>,
    clock: Arc<dyn Clock>,
}

impl ExclusionService {
    /// Create a new exclusion service validating against the system clock
    pub fn new(
        directory: Arc<dyn ExperimentDirectory>,
        store: Arc<dyn ExclusionStore>,
        recorder: Arc<dyn AuditRecorder>,
    ) -> Self {
        Self {
            directory,
            store,
            recorder,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for end time checks
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Experiments that are mutually exclusive with the given one
    pub async fn get_exclusions(&self, experiment_id: &str) -> Result<Vec<Experiment>, DomainError> {
        debug!(experiment_id = %experiment_id, "Listing exclusions");

        let id = self.parse_id(experiment_id)?;
        self.require(&id).await?;

        let ids = self.store.list_edges_for(&id).await?;
        self.resolve_all(ids).await
    }

    /// Experiments of the same application that are not exclusive with the given one
    ///
    /// Applies the same existence check as [`get_exclusions`](Self::get_exclusions).
    pub async fn get_non_exclusions(
        &self,
        experiment_id: &str,
    ) -> Result<Vec<Experiment>, DomainError> {
        debug!(experiment_id = %experiment_id, "Listing non-exclusions");

        let id = self.parse_id(experiment_id)?;
        let experiment = self.require(&id).await?;

        let ids = self.store.list_non_edges_for(&experiment).await?;
        self.resolve_all(ids).await
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Remove the exclusion between two experiments
    ///
    /// Removing an exclusion that does not exist succeeds. Store failures
    /// are returned to the caller.
    pub async fn delete_exclusion(
        &self,
        first_id: &str,
        second_id: &str,
        user: &UserInfo,
    ) -> Result<(), DomainError> {
        debug!(first_id = %first_id, second_id = %second_id, "Deleting exclusion");

        let first_id = self.parse_id(first_id)?;
        let second_id = self.parse_id(second_id)?;
        let first = self.require(&first_id).await?;
        let second = self.require(&second_id).await?;

        self.store.remove_edge(&first_id, &second_id).await?;
        info!(
            first_id = %first_id,
            second_id = %second_id,
            user = %user,
            "Exclusion deleted"
        );

        self.emit(ChangeEvent::mutex_removed(user.clone(), &first, second.label()))
            .await;

        Ok(())
    }

    /// Make each candidate mutually exclusive with the base experiment
    ///
    /// Fails as a whole only when the base experiment is missing, terminal or
    /// past its end time. Otherwise every candidate is validated and stored
    /// on its own and yields exactly one outcome, in input order.
    pub async fn create_exclusions(
        &self,
        base_id: &str,
        candidate_ids: &[impl AsRef<str>],
        user: &UserInfo,
    ) -> Result<Vec<ExclusionOutcome>, DomainError> {
        debug!(
            base_id = %base_id,
            candidates = candidate_ids.len(),
            "Creating exclusions"
        );

        let base_id = self.parse_id(base_id)?;
        let base = self.require(&base_id).await?;

        if base.state().is_terminal() {
            return Err(DomainError::invalid_state(format!(
                "Cannot define mutual exclusion rules for experiment '{}' in {} state",
                base_id,
                base.state()
            )));
        }

        let now = self.clock.now();

        if base.is_expired_at(now) {
            return Err(DomainError::expired(format!(
                "Experiment '{}' ended at {}",
                base_id,
                base.end_time()
            )));
        }

        let mut outcomes = Vec::with_capacity(candidate_ids.len());

        for candidate_id in candidate_ids {
            let outcome = self
                .pair(&base, candidate_id.as_ref(), now, user)
                .await;
            outcomes.push(outcome);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            base_id = %base_id,
            succeeded,
            failed = outcomes.len() - succeeded,
            user = %user,
            "Exclusions created"
        );

        Ok(outcomes)
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    async fn pair(
        &self,
        base: &Experiment,
        candidate_id: &str,
        now: DateTime<Utc>,
        user: &UserInfo,
    ) -> ExclusionOutcome {
        let base_id = base.id().as_str();

        let candidate = match self.validate_candidate(base, candidate_id, now).await {
            Ok(candidate) => candidate,
            Err(reason) => {
                debug!(
                    base_id = %base_id,
                    candidate_id = %candidate_id,
                    reason = %reason,
                    "Candidate rejected"
                );
                return ExclusionOutcome::failed(base_id, candidate_id, reason);
            }
        };

        if let Err(e) = self.store.add_edge(base.id(), candidate.id()).await {
            error!(
                base_id = %base_id,
                candidate_id = %candidate_id,
                error = %e,
                "Unable to store exclusion"
            );
            return ExclusionOutcome::failed(base_id, candidate_id, RejectionReason::StoreError);
        }

        self.emit(ChangeEvent::mutex_added(user.clone(), base, candidate.label()))
            .await;

        ExclusionOutcome::success(base_id, candidate_id)
    }

    async fn validate_candidate(
        &self,
        base: &Experiment,
        candidate_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Experiment, RejectionReason> {
        let id = ExperimentId::new(candidate_id).map_err(|_| RejectionReason::NotFound)?;

        let candidate = match self.directory.resolve(&id).await {
            Ok(Some(candidate)) => candidate,
            Ok(None) => return Err(RejectionReason::NotFound),
            Err(e) => {
                warn!(candidate_id = %candidate_id, error = %e, "Candidate lookup failed");
                return Err(RejectionReason::NotFound);
            }
        };

        if candidate.id() == base.id() {
            return Err(RejectionReason::SelfExclusion);
        }

        if !candidate.shares_application_with(base) {
            return Err(RejectionReason::DifferentApplication);
        }

        if candidate.state().is_terminal() {
            return Err(RejectionReason::TerminalState);
        }

        if candidate.is_expired_at(now) {
            return Err(RejectionReason::EndTimePassed);
        }

        Ok(candidate)
    }

    async fn require(&self, id: &ExperimentId) -> Result<Experiment, DomainError> {
        self.directory
            .resolve(id)
            .await?
            .ok_or_else(|| DomainError::experiment_not_found(id))
    }

    async fn resolve_all(&self, ids: Vec<ExperimentId>) -> Result<Vec<Experiment>, DomainError> {
        let mut experiments = Vec::with_capacity(ids.len());

        for id in ids {
            match self.directory.resolve(&id).await? {
                Some(experiment) => experiments.push(experiment),
                None => warn!(experiment_id = %id, "Store references unknown experiment"),
            }
        }

        Ok(experiments)
    }

    async fn emit(&self, event: ChangeEvent) {
        let experiment_id = event.experiment_id.clone();

        if let Err(e) = self.recorder.record(event).await {
            warn!(
                experiment_id = %experiment_id,
                error = %e,
                "Failed to record change event"
            );
        }
    }

    fn parse_id(&self, id: &str) -> Result<ExperimentId, DomainError> {
        ExperimentId::new(id).map_err(|_| DomainError::experiment_not_found(id))
    }
}
