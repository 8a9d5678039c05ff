//! The pipeline state store.
//!
//! # Responsibility
//! - Hold projects and the pinned-project list in memory.
//! - Apply user intents as atomic state transitions.
//! - Persist the full snapshot after every successful mutation.
//!
//! # Invariants
//! - Ids issued by the store are strictly increasing and never reused.
//! - Invalid input degrades to a silent no-op, never an error; only storage
//!   failures surface as `Err`.
//! - A project's company list is re-sorted by status order after every
//!   add/edit intent.

use crate::model::project::{normalize_value, Company, CompanyId, Project, ProjectId};
use crate::model::status::Status;
use crate::repo::snapshot_repo::{RepoError, RepoResult, SnapshotRepository};
use crate::seed::seed_projects;
use crate::view;
use log::{debug, info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

/// Single source of truth for the pipeline state.
///
/// Generic over the snapshot repository so tests and alternative frontends
/// can supply their own storage.
pub struct PipelineStore<R: SnapshotRepository> {
    repo: R,
    projects: Vec<Project>,
    pinned: Vec<ProjectId>,
    last_id: i64,
}

impl<R: SnapshotRepository> PipelineStore<R> {
    /// Opens the store from persisted state.
    ///
    /// Missing keys fall back independently: no `projects` blob seeds the
    /// built-in dataset, no `pinnedProjects` blob yields an empty pin list.
    /// A corrupt blob is logged and answered with the full seed state.
    /// The resolved snapshot is persisted right away, so a fresh or recovered
    /// store is durable before the first intent. Storage transport errors
    /// still propagate.
    pub fn open(repo: R) -> RepoResult<Self> {
        let stored = match repo.load() {
            Ok(stored) => stored,
            Err(RepoError::Corrupt { key, message }) => {
                warn!(
                    "event=snapshot_fallback module=store status=recovered key={key} error={message}"
                );
                Default::default()
            }
            Err(err) => return Err(err),
        };

        let projects = stored.projects.unwrap_or_else(seed_projects);
        let pinned = stored.pinned.unwrap_or_default();
        let last_id = max_known_id(&projects);

        let mut store = Self {
            repo,
            projects,
            pinned,
            last_id,
        };
        store.persist()?;

        info!(
            "event=store_open module=store status=ok projects={} pinned={}",
            store.projects.len(),
            store.pinned.len()
        );
        Ok(store)
    }

    /// Current projects in insertion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Currently pinned project ids in pin order.
    pub fn pinned(&self) -> &[ProjectId] {
        &self.pinned
    }

    /// Whether the given project id is pinned.
    pub fn is_pinned(&self, project_id: ProjectId) -> bool {
        self.pinned.contains(&project_id)
    }

    /// Filtered and sorted project list for display.
    pub fn visible_projects(&self, search_term: &str) -> Vec<Project> {
        view::visible_projects(&self.projects, &self.pinned, search_term)
    }

    /// Appends a new empty project.
    ///
    /// Returns `None` without touching state when the name trims empty.
    pub fn add_project(&mut self, name: &str) -> RepoResult<Option<ProjectId>> {
        if name.trim().is_empty() {
            debug!("event=add_project module=store status=noop reason=empty_name");
            return Ok(None);
        }

        let id = self.next_id();
        self.projects.push(Project::new(id, name));
        self.persist()?;
        debug!("event=add_project module=store status=ok id={id}");
        Ok(Some(id))
    }

    /// Removes a project together with all its companies.
    ///
    /// Also drops the id from the pinned list, so deletion leaves no dead pin
    /// reference behind. Returns `false` when the project is absent.
    pub fn delete_project(&mut self, project_id: ProjectId) -> RepoResult<bool> {
        let Some(index) = self.project_index(project_id) else {
            debug!("event=delete_project module=store status=noop id={project_id}");
            return Ok(false);
        };

        self.projects.remove(index);
        self.pinned.retain(|id| *id != project_id);
        self.persist()?;
        debug!("event=delete_project module=store status=ok id={project_id}");
        Ok(true)
    }

    /// Sets a project's name verbatim.
    ///
    /// Deliberately permissive: empty names are accepted here, matching the
    /// edit affordance, while creation validates non-emptiness.
    pub fn rename_project(&mut self, project_id: ProjectId, new_name: &str) -> RepoResult<bool> {
        let Some(index) = self.project_index(project_id) else {
            debug!("event=rename_project module=store status=noop id={project_id}");
            return Ok(false);
        };

        self.projects[index].name = new_name.to_string();
        self.persist()?;
        debug!("event=rename_project module=store status=ok id={project_id}");
        Ok(true)
    }

    /// Appends a company to a project and re-sorts its company list.
    ///
    /// `raw_value` goes through [`normalize_value`]. Returns `None` when the
    /// name trims empty or the project is absent.
    pub fn add_company(
        &mut self,
        project_id: ProjectId,
        name: &str,
        status: Status,
        raw_value: &str,
    ) -> RepoResult<Option<CompanyId>> {
        if name.trim().is_empty() {
            debug!("event=add_company module=store status=noop reason=empty_name");
            return Ok(None);
        }
        let Some(index) = self.project_index(project_id) else {
            debug!("event=add_company module=store status=noop project={project_id}");
            return Ok(None);
        };

        let id = self.next_id();
        let value = normalize_value(raw_value);
        let project = &mut self.projects[index];
        project.companies.push(Company::new(id, name, status, value));
        project.sort_companies();
        self.persist()?;
        debug!("event=add_company module=store status=ok project={project_id} id={id}");
        Ok(Some(id))
    }

    /// Updates a company's status and value in place, then re-sorts.
    ///
    /// Returns `false` when project or company is absent.
    pub fn edit_company(
        &mut self,
        project_id: ProjectId,
        company_id: CompanyId,
        status: Status,
        raw_value: &str,
    ) -> RepoResult<bool> {
        let Some(index) = self.project_index(project_id) else {
            debug!("event=edit_company module=store status=noop project={project_id}");
            return Ok(false);
        };

        let project = &mut self.projects[index];
        let Some(company) = project
            .companies
            .iter_mut()
            .find(|company| company.id == company_id)
        else {
            debug!(
                "event=edit_company module=store status=noop project={project_id} id={company_id}"
            );
            return Ok(false);
        };

        company.status = status;
        company.value = normalize_value(raw_value);
        project.sort_companies();
        self.persist()?;
        debug!("event=edit_company module=store status=ok project={project_id} id={company_id}");
        Ok(true)
    }

    /// Removes one company from its project, leaving siblings untouched.
    pub fn delete_company(
        &mut self,
        project_id: ProjectId,
        company_id: CompanyId,
    ) -> RepoResult<bool> {
        let Some(index) = self.project_index(project_id) else {
            debug!("event=delete_company module=store status=noop project={project_id}");
            return Ok(false);
        };

        let companies = &mut self.projects[index].companies;
        let before = companies.len();
        companies.retain(|company| company.id != company_id);
        if companies.len() == before {
            debug!(
                "event=delete_company module=store status=noop project={project_id} id={company_id}"
            );
            return Ok(false);
        }

        self.persist()?;
        debug!("event=delete_company module=store status=ok project={project_id} id={company_id}");
        Ok(true)
    }

    /// Toggles a project's pinned flag.
    ///
    /// No existence validation, matching the intent contract. Returns whether
    /// the id is pinned after the toggle.
    pub fn toggle_pin(&mut self, project_id: ProjectId) -> RepoResult<bool> {
        let now_pinned = match self.pinned.iter().position(|id| *id == project_id) {
            Some(index) => {
                self.pinned.remove(index);
                false
            }
            None => {
                self.pinned.push(project_id);
                true
            }
        };
        self.persist()?;
        debug!("event=toggle_pin module=store status=ok id={project_id} pinned={now_pinned}");
        Ok(now_pinned)
    }

    /// Discards all state and restores the seed dataset with no pins.
    pub fn reset_to_default(&mut self) -> RepoResult<()> {
        self.projects = seed_projects();
        self.pinned.clear();
        self.last_id = self.last_id.max(max_known_id(&self.projects));
        self.persist()?;
        info!("event=reset_to_default module=store status=ok");
        Ok(())
    }

    fn project_index(&self, project_id: ProjectId) -> Option<usize> {
        self.projects
            .iter()
            .position(|project| project.id == project_id)
    }

    /// Issues a fresh id from the creation timestamp.
    ///
    /// Bumps past the last issued id when two creations land in the same
    /// millisecond, keeping ids strictly increasing.
    fn next_id(&mut self) -> i64 {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0);
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn persist(&mut self) -> RepoResult<()> {
        self.repo.save(&self.projects, &self.pinned)
    }
}

fn max_known_id(projects: &[Project]) -> i64 {
    projects
        .iter()
        .flat_map(|project| {
            std::iter::once(project.id).chain(project.companies.iter().map(|company| company.id))
        })
        .max()
        .unwrap_or(0)
}
