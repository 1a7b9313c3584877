//! Activation thresholds.

use crate::types::config::EligibilityConfig;

/// Minimum number of members for an ACTIVE RSO.
pub const REQUIRED_MEMBERS: usize = 5;

/// Minimum number of members sharing one email domain for an ACTIVE RSO.
pub const REQUIRED_SAME_DOMAIN: usize = 4;

/// Thresholds an RSO must meet to be ACTIVE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityRule {
    /// Minimum total members.
    pub min_members: usize,

    /// Minimum members in the largest email domain.
    pub min_same_domain: usize,
}

impl EligibilityRule {
    pub fn new(min_members: usize, min_same_domain: usize) -> Self {
        Self {
            min_members,
            min_same_domain,
        }
    }

    /// Creates a rule from the `[eligibility]` config section.
    pub fn from_config(config: &EligibilityConfig) -> Self {
        Self::new(config.min_members, config.min_same_domain)
    }

    /// Both thresholds are met.
    pub fn is_met(&self, total_members: usize, same_domain_count: usize) -> bool {
        total_members >= self.min_members && same_domain_count >= self.min_same_domain
    }

    /// Members still missing to reach the total threshold.
    pub fn needed_members(&self, total_members: usize) -> usize {
        self.min_members.saturating_sub(total_members)
    }

    /// Members still missing in the largest domain.
    pub fn needed_same_domain(&self, same_domain_count: usize) -> usize {
        self.min_same_domain.saturating_sub(same_domain_count)
    }
}

impl Default for EligibilityRule {
    fn default() -> Self {
        Self::new(REQUIRED_MEMBERS, REQUIRED_SAME_DOMAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let rule = EligibilityRule::default();
        assert_eq!(rule.min_members, 5);
        assert_eq!(rule.min_same_domain, 4);
    }

    #[test]
    fn test_is_met_requires_both() {
        let rule = EligibilityRule::default();

        assert!(rule.is_met(5, 4));
        assert!(rule.is_met(12, 9));
        assert!(!rule.is_met(4, 4));
        assert!(!rule.is_met(5, 3));
        assert!(!rule.is_met(0, 0));
    }

    #[test]
    fn test_needed_never_negative() {
        let rule = EligibilityRule::default();

        assert_eq!(rule.needed_members(0), 5);
        assert_eq!(rule.needed_members(3), 2);
        assert_eq!(rule.needed_members(40), 0);
        assert_eq!(rule.needed_same_domain(1), 3);
        assert_eq!(rule.needed_same_domain(7), 0);
    }

    #[test]
    fn test_from_config() {
        let config = EligibilityConfig {
            min_members: 10,
            min_same_domain: 6,
        };
        let rule = EligibilityRule::from_config(&config);

        assert_eq!(rule, EligibilityRule::new(10, 6));
        assert_eq!(rule.needed_members(5), 5);
    }
}
