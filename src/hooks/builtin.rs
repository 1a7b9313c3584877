//! Default hooks.
//!
//! - `LoggingHook`: writes every cache event to the log
//! - `MetricsHook`: counts recorded statuses and storage problems

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::status::RsoStatus;

use super::{Hook, HookContext, HookEvent};

const ALL_EVENTS: &[HookEvent] = &[
    HookEvent::StatusRecorded,
    HookEvent::StorageCorrupted,
    HookEvent::StorageFailed,
];

// ═══════════════════════════════════════════════════════════════════════════
// LoggingHook
// ═══════════════════════════════════════════════════════════════════════════

/// Hook that logs cache events through `tracing`.
///
/// Status changes are logged at `info`, unchanged statuses at `debug` and
/// storage problems at `warn`.
#[derive(Debug, Default)]
pub struct LoggingHook;

impl LoggingHook {
    pub fn new() -> Self {
        Self
    }
}

impl Hook for LoggingHook {
    fn name(&self) -> &str {
        "logging"
    }

    fn events(&self) -> &[HookEvent] {
        ALL_EVENTS
    }

    fn execute(&self, context: &HookContext<'_>) {
        match context {
            HookContext::StatusRecorded {
                rso_id,
                status,
                previous,
            } => {
                if status != previous {
                    tracing::info!(
                        rso_id = *rso_id,
                        status = %status,
                        previous = %previous,
                        "RSO status changed"
                    );
                } else {
                    tracing::debug!(rso_id = *rso_id, status = %status, "RSO status recorded");
                }
            }
            HookContext::StorageCorrupted {
                key,
                payload,
                error,
            } => {
                tracing::warn!(
                    key = %key,
                    payload_len = payload.len(),
                    error = %error,
                    "Stored RSO statuses are unreadable, treating as empty"
                );
            }
            HookContext::StorageFailed {
                key,
                operation,
                rso_id,
                error,
            } => {
                tracing::warn!(
                    key = %key,
                    operation = %operation,
                    rso_id = ?rso_id,
                    error = %error,
                    "RSO status storage unavailable"
                );
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MetricsHook
// ═══════════════════════════════════════════════════════════════════════════

/// Hook that counts cache activity.
#[derive(Debug, Default)]
pub struct MetricsHook {
    /// Statuses written.
    recorded: AtomicU64,

    /// Of which ACTIVE.
    active: AtomicU64,

    /// Of which INACTIVE.
    inactive: AtomicU64,

    /// Writes that changed the stored status.
    changes: AtomicU64,

    /// Reads that found an unreadable payload.
    corrupted_reads: AtomicU64,

    /// Storage operations that failed.
    storage_failures: AtomicU64,
}

impl MetricsHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_recorded(&self) -> u64 {
        self.recorded.load(Ordering::Relaxed)
    }

    pub fn total_active(&self) -> u64 {
        self.active.load(Ordering::Relaxed)
    }

    pub fn total_inactive(&self) -> u64 {
        self.inactive.load(Ordering::Relaxed)
    }

    pub fn total_changes(&self) -> u64 {
        self.changes.load(Ordering::Relaxed)
    }

    pub fn corrupted_reads(&self) -> u64 {
        self.corrupted_reads.load(Ordering::Relaxed)
    }

    pub fn storage_failures(&self) -> u64 {
        self.storage_failures.load(Ordering::Relaxed)
    }

    /// Share of recorded statuses that were ACTIVE.
    pub fn activation_rate(&self) -> f64 {
        let total = self.total_recorded();
        if total == 0 {
            0.0
        } else {
            self.total_active() as f64 / total as f64
        }
    }

    /// Returns a snapshot of the counters.
    pub fn metrics(&self) -> CacheMetrics {
        CacheMetrics {
            recorded: self.total_recorded(),
            active: self.total_active(),
            inactive: self.total_inactive(),
            changes: self.total_changes(),
            corrupted_reads: self.corrupted_reads(),
            storage_failures: self.storage_failures(),
            activation_rate: self.activation_rate(),
        }
    }
}

/// Counters collected by `MetricsHook`.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    pub recorded: u64,
    pub active: u64,
    pub inactive: u64,
    pub changes: u64,
    pub corrupted_reads: u64,
    pub storage_failures: u64,
    pub activation_rate: f64,
}

impl Hook for MetricsHook {
    fn name(&self) -> &str {
        "metrics"
    }

    fn events(&self) -> &[HookEvent] {
        ALL_EVENTS
    }

    fn execute(&self, context: &HookContext<'_>) {
        match context {
            HookContext::StatusRecorded {
                status, previous, ..
            } => {
                self.recorded.fetch_add(1, Ordering::Relaxed);
                match status {
                    RsoStatus::Active => self.active.fetch_add(1, Ordering::Relaxed),
                    RsoStatus::Inactive => self.inactive.fetch_add(1, Ordering::Relaxed),
                };
                if status != previous {
                    self.changes.fetch_add(1, Ordering::Relaxed);
                }
            }
            HookContext::StorageCorrupted { .. } => {
                self.corrupted_reads.fetch_add(1, Ordering::Relaxed);
            }
            HookContext::StorageFailed { .. } => {
                self.storage_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}
