//! Derived project view: search filter plus display ordering.
//!
//! # Responsibility
//! - Produce the list of projects to render for a given search term.
//!
//! # Invariants
//! - Pinned projects always precede unpinned ones.
//! - Within each pin partition, ordering is descending by aggregate value;
//!   ties keep input order (the sort is stable).
//! - Matching is a case-insensitive substring test over the project name and
//!   every company name; an empty term matches everything.

use crate::model::project::{Project, ProjectId};

/// Computes the filtered, sorted project list for display.
///
/// Full recomputation per call; the expected data scale is tens of projects
/// with tens of companies each, so no incremental structure is kept.
pub fn visible_projects(
    projects: &[Project],
    pinned: &[ProjectId],
    search_term: &str,
) -> Vec<Project> {
    let needle = search_term.to_lowercase();
    let mut visible: Vec<Project> = projects
        .iter()
        .filter(|project| matches_term(project, &needle))
        .cloned()
        .collect();

    visible.sort_by(|a, b| {
        let a_pinned = pinned.contains(&a.id);
        let b_pinned = pinned.contains(&b.id);
        b_pinned
            .cmp(&a_pinned)
            .then_with(|| b.pipeline_value().total_cmp(&a.pipeline_value()))
    });

    visible
}

fn matches_term(project: &Project, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    project.name.to_lowercase().contains(needle)
        || project
            .companies
            .iter()
            .any(|company| company.name.to_lowercase().contains(needle))
}
