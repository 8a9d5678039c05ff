//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Load and save the full (projects, pinned) snapshot as JSON blobs under
//!   two well-known storage keys.
//! - Validate persisted state on read; corrupt blobs surface as `Corrupt`.
//!
//! # Invariants
//! - `save` writes both keys in a single transaction, so the persisted pair
//!   is always mutually consistent.
//! - Loaded company values pass through `clamp_value`, so invalid amounts in
//!   a hand-edited blob never enter memory.

use crate::db::DbError;
use crate::model::project::{clamp_value, Project, ProjectId};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the JSON array of projects.
pub const KEY_PROJECTS: &str = "projects";

/// Storage key holding the JSON array of pinned project ids.
pub const KEY_PINNED: &str = "pinnedProjects";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted blob under `key` does not parse into the expected shape.
    Corrupt {
        key: &'static str,
        message: String,
    },
    Encode(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Corrupt { key, message } => {
                write!(f, "corrupt snapshot blob under key `{key}`: {message}")
            }
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Corrupt { .. }
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw persisted state as found in storage.
///
/// Each field is `None` when its key has never been written; the state store
/// chooses the fallback (seed dataset for projects, empty pinned list).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredState {
    pub projects: Option<Vec<Project>>,
    pub pinned: Option<Vec<ProjectId>>,
}

/// Storage contract for the full pipeline snapshot.
pub trait SnapshotRepository {
    fn load(&self) -> RepoResult<StoredState>;
    fn save(&self, projects: &[Project], pinned: &[ProjectId]) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository over the `storage` key-value table.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a connection after verifying it has been fully migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = crate::db::migrations::latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'storage'
             );",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable("storage"));
        }

        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load(&self) -> RepoResult<StoredState> {
        let projects = match read_key(self.conn, KEY_PROJECTS)? {
            Some(blob) => {
                let mut projects: Vec<Project> =
                    serde_json::from_str(&blob).map_err(|err| RepoError::Corrupt {
                        key: KEY_PROJECTS,
                        message: err.to_string(),
                    })?;
                sanitize_projects(&mut projects);
                Some(projects)
            }
            None => None,
        };

        let pinned = match read_key(self.conn, KEY_PINNED)? {
            Some(blob) => {
                let pinned: Vec<ProjectId> =
                    serde_json::from_str(&blob).map_err(|err| RepoError::Corrupt {
                        key: KEY_PINNED,
                        message: err.to_string(),
                    })?;
                Some(pinned)
            }
            None => None,
        };

        Ok(StoredState { projects, pinned })
    }

    fn save(&self, projects: &[Project], pinned: &[ProjectId]) -> RepoResult<()> {
        let projects_blob = serde_json::to_string(projects).map_err(RepoError::Encode)?;
        let pinned_blob = serde_json::to_string(pinned).map_err(RepoError::Encode)?;

        let tx = self.conn.unchecked_transaction()?;
        write_key(&tx, KEY_PROJECTS, &projects_blob)?;
        write_key(&tx, KEY_PINNED, &pinned_blob)?;
        tx.commit()?;

        Ok(())
    }
}

fn read_key(conn: &Connection, key: &str) -> RepoResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM storage WHERE key = ?1;",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

fn write_key(conn: &Connection, key: &str, value: &str) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO storage (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
        params![key, value],
    )?;
    Ok(())
}

fn sanitize_projects(projects: &mut [Project]) {
    for project in projects {
        for company in &mut project.companies {
            company.value = clamp_value(company.value);
        }
    }
}
