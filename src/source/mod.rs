//! Membership-list collaborators.
//!
//! Fetching the members of an RSO is the only asynchronous step around the
//! evaluator. The backend itself is out of reach of this crate; a
//! [`MembershipSource`] is whatever supplies the snapshot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::members::MembershipRecord;
use crate::types::status::RsoId;
use crate::{RsoError, RsoResult};

/// Supplies the current membership snapshot of an RSO.
#[async_trait]
pub trait MembershipSource: Send + Sync {
    /// Source name for logs.
    fn name(&self) -> &str;

    /// Fetches the members of `rso_id`.
    async fn fetch_members(&self, rso_id: RsoId) -> RsoResult<Vec<MembershipRecord>>;
}

/// Reads a JSON array of member records from a file.
///
/// The same file is returned for any RSO id; the caller picks the file that
/// belongs to the RSO being evaluated.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MembershipSource for JsonFileSource {
    fn name(&self) -> &str {
        "json_file"
    }

    async fn fetch_members(&self, rso_id: RsoId) -> RsoResult<Vec<MembershipRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RsoError::Source(rso_id, format!("{}: {}", self.path.display(), e))
        })?;

        let members: Vec<MembershipRecord> = serde_json::from_str(&content).map_err(|e| {
            RsoError::Source(rso_id, format!("{}: {}", self.path.display(), e))
        })?;

        tracing::debug!(
            rso_id,
            path = %self.path.display(),
            members = members.len(),
            "Membership list loaded"
        );

        Ok(members)
    }
}

/// Fixed in-memory membership lists.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    lists: HashMap<RsoId, Vec<MembershipRecord>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the members returned for `rso_id`.
    pub fn with_members(mut self, rso_id: RsoId, members: Vec<MembershipRecord>) -> Self {
        self.lists.insert(rso_id, members);
        self
    }
}

#[async_trait]
impl MembershipSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_members(&self, rso_id: RsoId) -> RsoResult<Vec<MembershipRecord>> {
        self.lists
            .get(&rso_id)
            .cloned()
            .ok_or_else(|| RsoError::Source(rso_id, "RSO not found".to_string()))
    }
}
