//! Core domain logic for Pipetrack.
//! This crate is the single source of truth for pipeline-state invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{normalize_value, Company, CompanyId, Project, ProjectId};
pub use model::status::Status;
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository, StoredState, KEY_PINNED,
    KEY_PROJECTS,
};
pub use seed::seed_projects;
pub use store::pipeline_store::PipelineStore;
pub use view::visible_projects;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
