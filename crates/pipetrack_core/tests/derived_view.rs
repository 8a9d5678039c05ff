use pipetrack_core::db::open_db_in_memory;
use pipetrack_core::{
    seed_projects, visible_projects, Company, PipelineStore, Project, SqliteSnapshotRepository,
    Status,
};
use rusqlite::Connection;

#[test]
fn seed_aggregates_drive_default_ordering() {
    let projects = seed_projects();
    let view = visible_projects(&projects, &[], "");

    // Alpha 50000, Beta 60000, Gamma 55000 -> descending by green value.
    let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Project Beta", "Project Gamma", "Project Alpha"]);
    assert_eq!(view[0].pipeline_value(), 60000.0);
    assert_eq!(view[1].pipeline_value(), 55000.0);
    assert_eq!(view[2].pipeline_value(), 50000.0);
}

#[test]
fn pinned_projects_precede_unpinned_regardless_of_value() {
    let projects = seed_projects();

    // Alpha has the lowest aggregate but is pinned.
    let view = visible_projects(&projects, &[1], "");
    let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Project Alpha", "Project Beta", "Project Gamma"]);
}

#[test]
fn pinned_partition_is_itself_value_ordered() {
    let projects = seed_projects();

    let view = visible_projects(&projects, &[1, 3], "");
    let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Project Gamma", "Project Alpha", "Project Beta"]);
}

#[test]
fn equal_aggregates_preserve_input_order() {
    let make = |id: i64, name: &str| Project {
        id,
        name: name.to_string(),
        companies: vec![Company::new(id * 100, "Same", Status::Green, 10000.0)],
    };
    let projects = vec![make(1, "First"), make(2, "Second"), make(3, "Third")];

    let view = visible_projects(&projects, &[], "");
    let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["First", "Second", "Third"]);

    // Same tie-break inside the pinned partition.
    let view = visible_projects(&projects, &[3, 2], "");
    let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Second", "Third", "First"]);
}

#[test]
fn search_matches_project_and_company_names_case_insensitively() {
    let projects = seed_projects();

    // "Tech" hits a company in every seed project (TechCorp, GlobalTech,
    // TechInnovate); CloudMasters alone would not match.
    let view = visible_projects(&projects, &[], "Tech");
    assert_eq!(view.len(), 3);

    let view = visible_projects(&projects, &[], "techcorp");
    let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Project Alpha"]);

    let view = visible_projects(&projects, &[], "CLOUDM");
    let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Project Gamma"]);

    // Project-name match, not only company names.
    let view = visible_projects(&projects, &[], "beta");
    let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Project Beta"]);

    assert!(visible_projects(&projects, &[], "zzz-no-match").is_empty());
}

#[test]
fn empty_term_matches_everything() {
    let projects = seed_projects();
    assert_eq!(visible_projects(&projects, &[], "").len(), 3);
}

#[test]
fn store_view_reflects_mutations_immediately() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    // Promote Gamma past Beta: 55000 + 25000 green beats 60000.
    store.edit_company(3, 303, Status::Green, "25000").unwrap();
    let names: Vec<String> = store
        .visible_projects("")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Project Gamma", "Project Beta", "Project Alpha"]);

    // Deleting a project removes it from every subsequent view.
    store.delete_project(3).unwrap();
    let names: Vec<String> = store
        .visible_projects("")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Project Beta", "Project Alpha"]);
}

fn open_store(conn: &Connection) -> PipelineStore<SqliteSnapshotRepository<'_>> {
    let repo = SqliteSnapshotRepository::try_new(conn).unwrap();
    PipelineStore::open(repo).unwrap()
}
