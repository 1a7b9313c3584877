//! Per-domain member counting.

use std::collections::BTreeMap;

use crate::members::MembershipRecord;

/// Number of members per lower-cased email domain.
///
/// Members whose email is absent or malformed are not counted here at all;
/// there is no bucket for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainTally {
    counts: BTreeMap<String, usize>,
}

impl DomainTally {
    /// Counts the well-formed emails of a membership snapshot.
    pub fn from_members(members: &[MembershipRecord]) -> Self {
        let mut tally = Self::default();
        for member in members {
            if let Some(domain) = member.domain() {
                tally.add(domain);
            }
        }
        tally
    }

    /// Adds one member of `domain`.
    pub fn add(&mut self, domain: String) {
        *self.counts.entry(domain).or_insert(0) += 1;
    }

    /// Members counted for one domain (case-insensitive).
    pub fn count(&self, domain: &str) -> usize {
        self.counts
            .get(&domain.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Size of the largest domain, 0 when nothing was counted.
    pub fn largest(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// The largest domain; the lexicographically smallest one on ties.
    pub fn dominant(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (domain, &count) in &self.counts {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((domain.as_str(), count));
            }
        }
        best
    }

    /// Number of distinct domains.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
