//! State store orchestration.
//!
//! # Responsibility
//! - Own the single source of truth for projects and the pinned set.
//! - Mediate every mutation through the enumerated intents.
//!
//! # Invariants
//! - The persisted snapshot mirrors in-memory state after every mutation.
//! - The store stays storage-agnostic behind `SnapshotRepository`.

pub mod pipeline_store;
