//! Domain model for pipeline tracking.
//!
//! # Responsibility
//! - Define the canonical project/company structures used by core logic.
//! - Keep input normalization explicit and independently testable.
//!
//! # Invariants
//! - Every domain object is identified by a monotonic integer id.
//! - `Company::value` is always a finite, non-negative number.

pub mod project;
pub mod status;
