//! # rso-status
//!
//! Activation eligibility and cached status for Registered Student
//! Organizations (RSOs).
//!
//! An RSO is ACTIVE when it has at least five members and at least four of
//! them share an email domain. The evaluation is a pure function of a
//! membership snapshot; the last outcome per RSO is kept in a small persisted
//! table so a status can be shown before a fresh snapshot is available.
//!
//! ## Modules
//!
//! - [`eligibility`] - Activation rule and evaluator
//! - [`cache`] - Persisted last-known status per RSO
//! - [`hooks`] - Observers for cache events and storage problems
//! - [`members`] - Membership records
//! - [`source`] - Membership-list collaborators
//! - [`tracker`] - Fetch, evaluate and record flow
//! - [`cli`] - Command line interface
//! - [`types`] - Shared types

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod eligibility;
pub mod hooks;
pub mod members;
pub mod source;
pub mod tracker;
pub mod types;

pub use types::config::Config;
pub use types::errors::{RsoError, RsoResult};
pub use types::status::{RsoId, RsoStatus};
