//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the snapshot storage contract used by the state store.
//! - Isolate SQLite and JSON details from state orchestration.
//!
//! # Invariants
//! - The two snapshot keys are always written inside one transaction.
//! - Reads reject corrupt persisted state with a typed error instead of
//!   masking it.

pub mod snapshot_repo;
