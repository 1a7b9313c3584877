//! Result of one eligibility evaluation.

use serde::{Deserialize, Serialize};

use crate::types::status::RsoStatus;

/// Structured eligibility outcome for one membership snapshot.
///
/// Field names serialize in camelCase (`isValid`, `totalMembers`, ...), the
/// shape UI callers already consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityVerdict {
    /// Both thresholds are met.
    pub is_valid: bool,

    /// All records in the snapshot, including ones without a usable email.
    pub total_members: usize,

    /// Members in the largest email domain.
    pub same_domain_count: usize,

    /// Members missing to reach the total threshold.
    pub needed_members: usize,

    /// Members missing in the largest domain.
    pub needed_same_domain: usize,

    /// Domain that produced `same_domain_count`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_domain: Option<String>,
}

impl EligibilityVerdict {
    /// Status label this verdict maps to.
    pub fn status(&self) -> RsoStatus {
        RsoStatus::from_validity(self.is_valid)
    }

    /// Requirement messages shown next to an inactive badge.
    pub fn shortfalls(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if self.is_valid {
            return messages;
        }
        if self.needed_members > 0 {
            messages.push(format!(
                "Needs {} more member(s) to activate",
                self.needed_members
            ));
        }
        if self.needed_same_domain > 0 {
            messages.push(format!(
                "Needs {} more member(s) with same email domain",
                self.needed_same_domain
            ));
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(total: usize, same: usize) -> EligibilityVerdict {
        EligibilityVerdict {
            is_valid: total >= 5 && same >= 4,
            total_members: total,
            same_domain_count: same,
            needed_members: 5usize.saturating_sub(total),
            needed_same_domain: 4usize.saturating_sub(same),
            dominant_domain: None,
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(verdict(5, 4).status(), RsoStatus::Active);
        assert_eq!(verdict(5, 3).status(), RsoStatus::Inactive);
    }

    #[test]
    fn test_shortfalls_only_for_missing_requirements() {
        assert!(verdict(6, 5).shortfalls().is_empty());

        let only_domain = verdict(6, 2).shortfalls();
        assert_eq!(
            only_domain,
            vec!["Needs 2 more member(s) with same email domain".to_string()]
        );

        let both = verdict(1, 1).shortfalls();
        assert_eq!(both.len(), 2);
        assert_eq!(both[0], "Needs 4 more member(s) to activate");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(verdict(0, 0)).unwrap();

        assert_eq!(json["isValid"], false);
        assert_eq!(json["totalMembers"], 0);
        assert_eq!(json["sameDomainCount"], 0);
        assert_eq!(json["neededMembers"], 5);
        assert_eq!(json["neededSameDomain"], 4);
        assert!(json.get("dominantDomain").is_none());
    }
}
