//! Persisted last-known status per RSO.
//!
//! The table lives as one JSON object under one storage key, e.g.
//! `{"7": "ACTIVE", "12": "INACTIVE"}`. It lets callers show a status badge
//! before a fresh membership list has been fetched and evaluated. Entries
//! never expire; they are overwritten by the next evaluation.

mod status;
mod storage;

pub use status::{StatusCache, DEFAULT_STORAGE_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
