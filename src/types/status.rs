//! Activation status label of an RSO.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::RsoError;

/// Identifier of an RSO as assigned by the backend.
pub type RsoId = u64;

/// Activation status of an RSO.
///
/// Serialized as the upper-case labels `"ACTIVE"` / `"INACTIVE"`, which is the
/// format persisted by the status cache.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsoStatus {
    /// Membership thresholds are met.
    Active,
    /// Thresholds not met, or nothing known yet.
    #[default]
    Inactive,
}

impl RsoStatus {
    /// Maps an eligibility outcome to a status.
    pub fn from_validity(is_valid: bool) -> Self {
        if is_valid {
            RsoStatus::Active
        } else {
            RsoStatus::Inactive
        }
    }

    /// Returns the persisted label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RsoStatus::Active => "ACTIVE",
            RsoStatus::Inactive => "INACTIVE",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RsoStatus::Active)
    }
}

impl fmt::Display for RsoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsoStatus {
    type Err = RsoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(RsoStatus::Active),
            "INACTIVE" => Ok(RsoStatus::Inactive),
            _ => Err(RsoError::InvalidStatus(s.to_string())),
        }
    }
}
