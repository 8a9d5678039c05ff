//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pipetrack_core` wiring
//!   independently of any UI runtime.
//! - Keep output deterministic for quick local sanity checks.

mod currency;

use currency::format_currency_eur;
use pipetrack_core::db::open_db_in_memory;
use pipetrack_core::{PipelineStore, SqliteSnapshotRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("pipetrack: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    println!("pipetrack_core version={}", pipetrack_core::core_version());

    // Seed an in-memory store and render the derived view end to end.
    let conn = open_db_in_memory().map_err(|err| err.to_string())?;
    let repo = SqliteSnapshotRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let store = PipelineStore::open(repo).map_err(|err| err.to_string())?;

    for project in store.visible_projects("") {
        let pin_marker = if store.is_pinned(project.id) { "*" } else { " " };
        println!(
            "{pin_marker} {} ({})",
            project.name,
            format_currency_eur(project.pipeline_value())
        );
        for company in &project.companies {
            println!(
                "    {:<16} {:<20} {}",
                company.name,
                company.status.label(),
                format_currency_eur(company.value)
            );
        }
    }

    Ok(())
}
