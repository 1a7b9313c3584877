//! Status cache over a [`Storage`] backend.

use std::collections::BTreeMap;

use crate::eligibility::EligibilityVerdict;
use crate::hooks::{HookContext, HookSystem, StorageOperation};
use crate::types::status::{RsoId, RsoStatus};

use super::storage::Storage;

type Entries = serde_json::Map<String, serde_json::Value>;

/// Storage key of the status table unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "rsoStatuses";

/// Last-known status per RSO.
///
/// Reads and writes never fail: an absent, unreadable or corrupted table is
/// treated as empty, and a rejected write is dropped. Both conditions are
/// reported through the [`HookSystem`].
///
/// Every write reads the whole table, changes one entry and writes the whole
/// table back, so entries of other RSOs survive.
pub struct StatusCache<S: Storage> {
    storage: S,
    key: String,
    hooks: HookSystem,
}

impl<S: Storage> StatusCache<S> {
    /// Creates a cache under [`DEFAULT_STORAGE_KEY`] with the default hooks.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
            hooks: HookSystem::with_defaults(),
        }
    }

    /// Uses a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Replaces the hook system.
    pub fn with_hooks(mut self, hooks: HookSystem) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the whole table.
    ///
    /// Entries whose key is not a canonical RSO id or whose value is not a
    /// known status are left out of this view but stay in storage.
    pub fn get_all(&self) -> BTreeMap<RsoId, RsoStatus> {
        let mut table = BTreeMap::new();
        for (raw_id, raw_status) in &self.read_entries() {
            let rso_id = parse_rso_id(raw_id);
            let status = raw_status
                .as_str()
                .and_then(|s| s.parse::<RsoStatus>().ok());

            match (rso_id, status) {
                (Some(rso_id), Some(status)) => {
                    table.insert(rso_id, status);
                }
                _ => {
                    tracing::warn!(
                        key = %self.key,
                        entry = %raw_id,
                        value = %raw_status,
                        "Skipping unreadable RSO status entry"
                    );
                }
            }
        }
        table
    }

    /// Returns the stored status of `rso_id`, INACTIVE when unknown.
    pub fn get(&self, rso_id: RsoId) -> RsoStatus {
        self.get_all().get(&rso_id).copied().unwrap_or_default()
    }

    /// Returns the stored status of `rso_id`, `None` when unknown.
    pub fn lookup(&self, rso_id: RsoId) -> Option<RsoStatus> {
        self.get_all().get(&rso_id).copied()
    }

    /// Stores `status` for `rso_id`, keeping every other entry.
    pub fn set(&self, rso_id: RsoId, status: RsoStatus) {
        let mut entries = self.read_entries();
        let previous = entries
            .insert(
                rso_id.to_string(),
                serde_json::Value::String(status.as_str().to_string()),
            )
            .and_then(|v| v.as_str().and_then(|s| s.parse::<RsoStatus>().ok()))
            .unwrap_or_default();

        if self.write_entries(&entries, StorageOperation::Write, Some(rso_id)) {
            self.hooks.dispatch(&HookContext::StatusRecorded {
                rso_id,
                status,
                previous,
            });
        }
    }

    /// Stores the status a verdict maps to and returns it.
    pub fn record(&self, rso_id: RsoId, verdict: &EligibilityVerdict) -> RsoStatus {
        let status = verdict.status();
        self.set(rso_id, status);
        status
    }

    /// Drops the entry of `rso_id`. Returns whether it existed.
    pub fn remove(&self, rso_id: RsoId) -> bool {
        let mut entries = self.read_entries();
        if entries.remove(&rso_id.to_string()).is_none() {
            return false;
        }
        self.write_entries(&entries, StorageOperation::Write, Some(rso_id))
    }

    /// Drops the whole table.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            self.hooks.dispatch(&HookContext::StorageFailed {
                key: &self.key,
                operation: StorageOperation::Remove,
                rso_id: None,
                error: &e.to_string(),
            });
        }
    }

    fn read_entries(&self) -> Entries {
        let payload = match self.storage.get_item(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Entries::new(),
            Err(e) => {
                self.hooks.dispatch(&HookContext::StorageFailed {
                    key: &self.key,
                    operation: StorageOperation::Read,
                    rso_id: None,
                    error: &e.to_string(),
                });
                return Entries::new();
            }
        };

        if payload.trim().is_empty() {
            return Entries::new();
        }

        match serde_json::from_str::<serde_json::Value>(&payload) {
            Ok(serde_json::Value::Object(entries)) => entries,
            Ok(_) => {
                self.report_corrupted(&payload, "expected a JSON object");
                Entries::new()
            }
            Err(e) => {
                self.report_corrupted(&payload, &e.to_string());
                Entries::new()
            }
        }
    }

    fn write_entries(
        &self,
        entries: &Entries,
        operation: StorageOperation,
        rso_id: Option<RsoId>,
    ) -> bool {
        let result = serde_json::to_string(entries)
            .map_err(crate::RsoError::from)
            .and_then(|payload| self.storage.set_item(&self.key, &payload));

        match result {
            Ok(()) => true,
            Err(e) => {
                self.hooks.dispatch(&HookContext::StorageFailed {
                    key: &self.key,
                    operation,
                    rso_id,
                    error: &e.to_string(),
                });
                false
            }
        }
    }

    fn report_corrupted(&self, payload: &str, error: &str) {
        self.hooks.dispatch(&HookContext::StorageCorrupted {
            key: &self.key,
            payload,
            error,
        });
    }
}

/// Parses a table key written as a plain decimal id.
///
/// `"+7"` or `"007"` would collide with `"7"`, so only the canonical form is
/// accepted.
fn parse_rso_id(raw: &str) -> Option<RsoId> {
    raw.parse::<RsoId>().ok().filter(|id| id.to_string() == raw)
}

impl<S: Storage + std::fmt::Debug> std::fmt::Debug for StatusCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusCache")
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("hooks", &self.hooks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStorage;
    use crate::eligibility::EligibilityEvaluator;
    use crate::hooks::MetricsHook;
    use crate::members::MembershipRecord;
    use crate::{RsoError, RsoResult};
    use std::sync::Arc;

    fn cache_with_metrics() -> (StatusCache<MemoryStorage>, Arc<MetricsHook>) {
        let metrics = Arc::new(MetricsHook::new());
        let mut hooks = HookSystem::new();
        hooks.register_shared(metrics.clone());
        let cache = StatusCache::new(MemoryStorage::new()).with_hooks(hooks);
        (cache, metrics)
    }

    // Storage whose every operation fails, like a disabled local store.
    struct UnavailableStorage;

    impl Storage for UnavailableStorage {
        fn get_item(&self, _key: &str) -> RsoResult<Option<String>> {
            Err(RsoError::storage("storage disabled"))
        }

        fn set_item(&self, _key: &str, _value: &str) -> RsoResult<()> {
            Err(RsoError::storage("storage disabled"))
        }

        fn remove_item(&self, _key: &str) -> RsoResult<()> {
            Err(RsoError::storage("storage disabled"))
        }
    }

    #[test]
    fn test_set_then_get() {
        let (cache, _) = cache_with_metrics();

        cache.set(7, RsoStatus::Active);

        assert_eq!(cache.get(7), RsoStatus::Active);
        assert_eq!(cache.lookup(7), Some(RsoStatus::Active));
    }

    #[test]
    fn test_unknown_id_defaults_to_inactive() {
        let (cache, _) = cache_with_metrics();

        assert_eq!(cache.get(404), RsoStatus::Inactive);
        assert_eq!(cache.lookup(404), None);
    }

    #[test]
    fn test_sibling_entries_survive_writes() {
        let (cache, _) = cache_with_metrics();

        cache.set(1, RsoStatus::Active);
        cache.set(2, RsoStatus::Inactive);

        assert_eq!(cache.get(1), RsoStatus::Active);
        assert_eq!(cache.get(2), RsoStatus::Inactive);
        assert_eq!(cache.get_all().len(), 2);
    }

    #[test]
    fn test_persisted_format() {
        let (cache, _) = cache_with_metrics();

        cache.set(12, RsoStatus::Inactive);
        cache.set(7, RsoStatus::Active);

        let raw = cache.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["7"], "ACTIVE");
        assert_eq!(json["12"], "INACTIVE");
    }

    #[test]
    fn test_corrupted_payload_reads_as_empty() {
        let (cache, metrics) = cache_with_metrics();
        cache
            .storage()
            .set_item(DEFAULT_STORAGE_KEY, "definitely not json")
            .unwrap();

        assert!(cache.get_all().is_empty());
        assert_eq!(cache.get(1), RsoStatus::Inactive);
        assert_eq!(metrics.corrupted_reads(), 2);
    }

    #[test]
    fn test_non_object_payload_is_corrupted() {
        let (cache, metrics) = cache_with_metrics();
        cache.storage().set_item(DEFAULT_STORAGE_KEY, "[1, 2]").unwrap();

        assert!(cache.get_all().is_empty());
        assert_eq!(metrics.corrupted_reads(), 1);
    }

    #[test]
    fn test_empty_payload_is_not_corrupted() {
        let (cache, metrics) = cache_with_metrics();
        cache.storage().set_item(DEFAULT_STORAGE_KEY, "").unwrap();

        assert!(cache.get_all().is_empty());
        assert_eq!(metrics.corrupted_reads(), 0);
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let (cache, metrics) = cache_with_metrics();
        cache
            .storage()
            .set_item(
                DEFAULT_STORAGE_KEY,
                r#"{"1": "ACTIVE", "two": "ACTIVE", "3": "PENDING", "4": 1, "5": "inactive"}"#,
            )
            .unwrap();

        let table = cache.get_all();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&1), Some(&RsoStatus::Active));
        assert_eq!(table.get(&5), Some(&RsoStatus::Inactive));
        assert_eq!(metrics.corrupted_reads(), 0);
    }

    #[test]
    fn test_unreadable_entries_survive_writes() {
        let (cache, _) = cache_with_metrics();
        cache
            .storage()
            .set_item(DEFAULT_STORAGE_KEY, r#"{"1": "PENDING", "2": "ACTIVE"}"#)
            .unwrap();

        cache.set(3, RsoStatus::Active);
        assert!(cache.remove(2));

        let raw = cache.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["1"], "PENDING");
        assert_eq!(json["3"], "ACTIVE");
        assert!(json.get("2").is_none());
        assert_eq!(cache.get_all().len(), 1);
    }

    #[test]
    fn test_non_canonical_ids_are_not_merged() {
        let (cache, _) = cache_with_metrics();
        cache
            .storage()
            .set_item(
                DEFAULT_STORAGE_KEY,
                r#"{"7": "INACTIVE", "+7": "ACTIVE", "007": "ACTIVE"}"#,
            )
            .unwrap();

        assert_eq!(cache.get(7), RsoStatus::Inactive);
        assert_eq!(cache.get_all().len(), 1);

        cache.set(7, RsoStatus::Active);
        let raw = cache.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["7"], "ACTIVE");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_previous_status_comes_from_stored_entry() {
        let (cache, metrics) = cache_with_metrics();
        cache
            .storage()
            .set_item(DEFAULT_STORAGE_KEY, r#"{"4": "ACTIVE"}"#)
            .unwrap();

        cache.set(4, RsoStatus::Active);

        assert_eq!(metrics.total_recorded(), 1);
        assert_eq!(metrics.total_changes(), 0);
    }

    #[test]
    fn test_write_after_corruption_recovers() {
        let (cache, _) = cache_with_metrics();
        cache.storage().set_item(DEFAULT_STORAGE_KEY, "{{{").unwrap();

        cache.set(3, RsoStatus::Active);

        assert_eq!(cache.get(3), RsoStatus::Active);
    }

    #[test]
    fn test_unavailable_storage_is_silent() {
        let metrics = Arc::new(MetricsHook::new());
        let mut hooks = HookSystem::new();
        hooks.register_shared(metrics.clone());
        let cache = StatusCache::new(UnavailableStorage).with_hooks(hooks);

        cache.set(9, RsoStatus::Active);
        cache.clear();

        assert_eq!(cache.get(9), RsoStatus::Inactive);
        assert_eq!(metrics.total_recorded(), 0);
        // read + write from set, remove from clear, read from get
        assert_eq!(metrics.storage_failures(), 4);
    }

    #[test]
    fn test_record_maps_verdict() {
        let (cache, metrics) = cache_with_metrics();
        let evaluator = EligibilityEvaluator::default();

        let members: Vec<MembershipRecord> = ["a@ucf.edu", "b@ucf.edu", "c@ucf.edu", "d@ucf.edu", "e@x.org"]
            .into_iter()
            .map(MembershipRecord::with_email)
            .collect();

        let verdict = evaluator.evaluate(&members, 21);
        assert_eq!(cache.record(21, &verdict), RsoStatus::Active);
        assert_eq!(cache.get(21), RsoStatus::Active);

        let verdict = evaluator.evaluate(&members[..3], 21);
        assert_eq!(cache.record(21, &verdict), RsoStatus::Inactive);
        assert_eq!(cache.get(21), RsoStatus::Inactive);

        assert_eq!(metrics.total_changes(), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let (cache, _) = cache_with_metrics();
        cache.set(1, RsoStatus::Active);
        cache.set(2, RsoStatus::Active);

        assert!(cache.remove(1));
        assert!(!cache.remove(1));
        assert_eq!(cache.lookup(1), None);
        assert_eq!(cache.get(2), RsoStatus::Active);

        cache.clear();
        assert!(cache.get_all().is_empty());
    }

    #[test]
    fn test_custom_key_isolates_tables() {
        let storage = Arc::new(MemoryStorage::new());
        let first = StatusCache::new(storage.clone()).with_key("first");
        let second = StatusCache::new(storage.clone()).with_key("second");

        first.set(1, RsoStatus::Active);

        assert_eq!(second.get(1), RsoStatus::Inactive);
        assert_eq!(storage.len(), 1);
    }
}
