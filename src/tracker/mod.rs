//! Fetch, evaluate and record the status of an RSO.
//!
//! This is the flow a status badge runs: show the cached status right away,
//! then fetch the membership list, evaluate it and record the outcome so the
//! next cached read is current.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{StatusCache, Storage};
use crate::eligibility::{EligibilityEvaluator, EligibilityVerdict};
use crate::source::MembershipSource;
use crate::types::status::{RsoId, RsoStatus};
use crate::RsoResult;

/// Outcome of one refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub rso_id: RsoId,

    /// Status after this evaluation.
    pub status: RsoStatus,

    /// Cached status before this evaluation.
    pub previous: RsoStatus,

    pub verdict: EligibilityVerdict,

    pub evaluated_at: DateTime<Utc>,
}

impl StatusReport {
    /// Builds a report for a verdict.
    pub fn new(rso_id: RsoId, previous: RsoStatus, verdict: EligibilityVerdict) -> Self {
        Self {
            rso_id,
            status: verdict.status(),
            previous,
            verdict,
            evaluated_at: Utc::now(),
        }
    }

    /// Status differs from the cached one.
    pub fn changed(&self) -> bool {
        self.status != self.previous
    }
}

/// Ties a membership source, an evaluator and a status cache together.
pub struct StatusTracker<M: MembershipSource, S: Storage> {
    source: M,
    evaluator: EligibilityEvaluator,
    cache: StatusCache<S>,
}

impl<M: MembershipSource, S: Storage> StatusTracker<M, S> {
    pub fn new(source: M, evaluator: EligibilityEvaluator, cache: StatusCache<S>) -> Self {
        Self {
            source,
            evaluator,
            cache,
        }
    }

    /// Best-effort status before any fetch.
    pub fn cached_status(&self, rso_id: RsoId) -> RsoStatus {
        self.cache.get(rso_id)
    }

    /// Fetches the members of `rso_id`, evaluates them and records the status.
    ///
    /// A failed fetch is returned as an error and leaves the cache untouched.
    pub async fn refresh(&self, rso_id: RsoId) -> RsoResult<StatusReport> {
        let previous = self.cache.get(rso_id);

        let members = self.source.fetch_members(rso_id).await.map_err(|e| {
            tracing::warn!(
                rso_id,
                source = self.source.name(),
                error = %e,
                "Membership fetch failed, keeping cached status"
            );
            e
        })?;

        let verdict = self.evaluator.evaluate(&members, rso_id);
        self.cache.record(rso_id, &verdict);

        Ok(StatusReport::new(rso_id, previous, verdict))
    }

    /// Refreshes several RSOs one after another.
    ///
    /// Each RSO gets its own result; one failure does not stop the rest.
    pub async fn refresh_all(&self, rso_ids: &[RsoId]) -> Vec<(RsoId, RsoResult<StatusReport>)> {
        let mut results = Vec::with_capacity(rso_ids.len());
        for &rso_id in rso_ids {
            results.push((rso_id, self.refresh(rso_id).await));
        }
        results
    }

    pub fn cache(&self) -> &StatusCache<S> {
        &self.cache
    }

    pub fn evaluator(&self) -> &EligibilityEvaluator {
        &self.evaluator
    }
}
