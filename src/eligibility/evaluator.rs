//! Eligibility evaluator.

use crate::members::MembershipRecord;
use crate::types::config::EligibilityConfig;
use crate::types::status::RsoId;

use super::domains::DomainTally;
use super::rules::EligibilityRule;
use super::verdict::EligibilityVerdict;

/// Applies an [`EligibilityRule`] to membership snapshots.
///
/// Evaluation is pure and total: every input, including the empty list,
/// produces a complete verdict.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    rule: EligibilityRule,
}

impl EligibilityEvaluator {
    pub fn new(rule: EligibilityRule) -> Self {
        Self { rule }
    }

    /// Creates an evaluator from the `[eligibility]` config section.
    pub fn from_config(config: &EligibilityConfig) -> Self {
        Self::new(EligibilityRule::from_config(config))
    }

    /// Evaluates one membership snapshot of `rso_id`.
    ///
    /// `rso_id` only tags the log output; it never changes the outcome.
    pub fn evaluate(&self, members: &[MembershipRecord], rso_id: RsoId) -> EligibilityVerdict {
        let total_members = members.len();
        let tally = DomainTally::from_members(members);
        let same_domain_count = tally.largest();
        let dominant_domain = tally.dominant().map(|(domain, _)| domain.to_string());

        let verdict = EligibilityVerdict {
            is_valid: self.rule.is_met(total_members, same_domain_count),
            total_members,
            same_domain_count,
            needed_members: self.rule.needed_members(total_members),
            needed_same_domain: self.rule.needed_same_domain(same_domain_count),
            dominant_domain,
        };

        tracing::debug!(
            rso_id,
            total_members,
            same_domain_count,
            domains = tally.len(),
            is_valid = verdict.is_valid,
            "RSO eligibility evaluated"
        );

        verdict
    }

    /// Current thresholds.
    pub fn rule(&self) -> &EligibilityRule {
        &self.rule
    }
}
