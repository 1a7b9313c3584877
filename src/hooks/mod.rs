//! Hook system for the status cache.
//!
//! The cache never surfaces storage problems as errors. Hooks are how a
//! caller observes them, along with every status the cache records:
//!
//! - `status_recorded`: a status was written for an RSO
//! - `storage_corrupted`: the stored table could not be parsed and was
//!   treated as empty
//! - `storage_failed`: the storage backend rejected a read, write or removal

mod builtin;

pub use builtin::{CacheMetrics, LoggingHook, MetricsHook};

use std::sync::Arc;

use crate::types::status::{RsoId, RsoStatus};

// ═══════════════════════════════════════════════════════════════════════════
// Event types
// ═══════════════════════════════════════════════════════════════════════════

/// Event that triggers a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// A status was written.
    StatusRecorded,

    /// Stored payload was unreadable.
    StorageCorrupted,

    /// Storage backend failed.
    StorageFailed,
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookEvent::StatusRecorded => write!(f, "status_recorded"),
            HookEvent::StorageCorrupted => write!(f, "storage_corrupted"),
            HookEvent::StorageFailed => write!(f, "storage_failed"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Hook context
// ═══════════════════════════════════════════════════════════════════════════

/// Context passed to hooks.
pub enum HookContext<'a> {
    StatusRecorded {
        rso_id: RsoId,
        status: RsoStatus,
        /// Status stored before this write.
        previous: RsoStatus,
    },

    StorageCorrupted {
        /// Storage key that was read.
        key: &'a str,
        /// Raw stored payload.
        payload: &'a str,
        /// Parse failure description.
        error: &'a str,
    },

    StorageFailed {
        key: &'a str,
        operation: StorageOperation,
        /// RSO whose write was lost, if the operation targeted one.
        rso_id: Option<RsoId>,
        error: &'a str,
    },
}

/// Storage operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    Read,
    Write,
    Remove,
}

impl std::fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageOperation::Read => write!(f, "read"),
            StorageOperation::Write => write!(f, "write"),
            StorageOperation::Remove => write!(f, "remove"),
        }
    }
}

impl<'a> HookContext<'a> {
    /// Returns the event matching this context.
    pub fn event(&self) -> HookEvent {
        match self {
            HookContext::StatusRecorded { .. } => HookEvent::StatusRecorded,
            HookContext::StorageCorrupted { .. } => HookEvent::StorageCorrupted,
            HookContext::StorageFailed { .. } => HookEvent::StorageFailed,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Hook trait
// ═══════════════════════════════════════════════════════════════════════════

/// Observer of cache events.
///
/// Hooks run synchronously inside the cache call that produced the event and
/// cannot fail it.
pub trait Hook: Send + Sync {
    /// Hook name.
    fn name(&self) -> &str;

    /// Events this hook listens to.
    fn events(&self) -> &[HookEvent];

    /// Runs the hook.
    fn execute(&self, context: &HookContext<'_>);
}

// ═══════════════════════════════════════════════════════════════════════════
// Hook system
// ═══════════════════════════════════════════════════════════════════════════

/// Hook registry.
pub struct HookSystem {
    status_recorded: Vec<Arc<dyn Hook>>,
    storage_corrupted: Vec<Arc<dyn Hook>>,
    storage_failed: Vec<Arc<dyn Hook>>,
}

impl HookSystem {
    /// Creates an empty hook system.
    pub fn new() -> Self {
        Self {
            status_recorded: Vec::new(),
            storage_corrupted: Vec::new(),
            storage_failed: Vec::new(),
        }
    }

    /// Creates a system with the default hooks (logging).
    pub fn with_defaults() -> Self {
        let mut system = Self::new();
        system.register(LoggingHook::new());
        system
    }

    /// Registers a hook for every event it listens to.
    pub fn register<H: Hook + 'static>(&mut self, hook: H) {
        self.register_shared(Arc::new(hook));
    }

    /// Registers a hook the caller keeps a handle to (e.g. to read metrics).
    pub fn register_shared(&mut self, hook: Arc<dyn Hook>) {
        for event in hook.events() {
            tracing::debug!(hook_name = hook.name(), event = %event, "Registering hook");

            match event {
                HookEvent::StatusRecorded => self.status_recorded.push(hook.clone()),
                HookEvent::StorageCorrupted => self.storage_corrupted.push(hook.clone()),
                HookEvent::StorageFailed => self.storage_failed.push(hook.clone()),
            }
        }
    }

    /// Dispatches a context to the hooks of its event.
    pub fn dispatch(&self, context: &HookContext<'_>) {
        let hooks = match context.event() {
            HookEvent::StatusRecorded => &self.status_recorded,
            HookEvent::StorageCorrupted => &self.storage_corrupted,
            HookEvent::StorageFailed => &self.storage_failed,
        };

        for hook in hooks {
            hook.execute(context);
        }
    }

    /// Returns the total number of registrations.
    pub fn count(&self) -> usize {
        self.status_recorded.len() + self.storage_corrupted.len() + self.storage_failed.len()
    }

    /// Returns the number of hooks for a specific event.
    pub fn count_for_event(&self, event: HookEvent) -> usize {
        match event {
            HookEvent::StatusRecorded => self.status_recorded.len(),
            HookEvent::StorageCorrupted => self.storage_corrupted.len(),
            HookEvent::StorageFailed => self.storage_failed.len(),
        }
    }
}

impl Default for HookSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HookSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookSystem")
            .field("status_recorded", &self.status_recorded.len())
            .field("storage_corrupted", &self.storage_corrupted.len())
            .field("storage_failed", &self.storage_failed.len())
            .finish()
    }
}
