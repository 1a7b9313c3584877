//! Activation eligibility of an RSO.
//!
//! An RSO qualifies as ACTIVE when it has enough members in total and enough
//! of them share a single email domain. Evaluation is a pure function of a
//! membership snapshot; persisting the outcome is a separate step done by
//! [`crate::cache::StatusCache::record`].
//!
//! ## Example
//!
//! ```rust
//! use rso_status::eligibility::EligibilityEvaluator;
//! use rso_status::members::MembershipRecord;
//!
//! let members: Vec<MembershipRecord> = ["a@ucf.edu", "b@ucf.edu", "c@ucf.edu", "d@ucf.edu", "e@gmail.com"]
//!     .into_iter()
//!     .map(MembershipRecord::with_email)
//!     .collect();
//!
//! let verdict = EligibilityEvaluator::default().evaluate(&members, 7);
//! assert!(verdict.is_valid);
//! assert_eq!(verdict.same_domain_count, 4);
//! ```

mod domains;
mod evaluator;
mod rules;
mod verdict;

pub use domains::DomainTally;
pub use evaluator::EligibilityEvaluator;
pub use rules::{EligibilityRule, REQUIRED_MEMBERS, REQUIRED_SAME_DOMAIN};
pub use verdict::EligibilityVerdict;
