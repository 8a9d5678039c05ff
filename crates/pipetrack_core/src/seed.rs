//! Built-in seed dataset.
//!
//! Used on first start (no persisted snapshot), as the corrupt-snapshot
//! fallback, and by the reset-to-default intent. The data is fixed; tests
//! rely on the exact ids, names, statuses and values.

use crate::model::project::{Company, Project};
use crate::model::status::Status;

/// Returns the fixed three-project seed dataset.
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Project Alpha".to_string(),
            companies: vec![
                Company::new(101, "TechCorp", Status::Green, 50000.0),
                Company::new(102, "InnoSystems", Status::Blue, 30000.0),
                Company::new(103, "DataDynamics", Status::Yellow, 20000.0),
                Company::new(104, "CloudSolutions", Status::Red, 10000.0),
            ],
        },
        Project {
            id: 2,
            name: "Project Beta".to_string(),
            companies: vec![
                Company::new(201, "GlobalTech", Status::Green, 60000.0),
                Company::new(202, "FutureSoft", Status::Orange, 40000.0),
                Company::new(203, "SmartSystems", Status::Blue, 35000.0),
                Company::new(204, "IntelliData", Status::Gray, 15000.0),
            ],
        },
        Project {
            id: 3,
            name: "Project Gamma".to_string(),
            companies: vec![
                Company::new(301, "TechInnovate", Status::Yellow, 45000.0),
                Company::new(302, "DataPioneer", Status::Green, 55000.0),
                Company::new(303, "CloudMasters", Status::Blue, 25000.0),
                Company::new(304, "AIExperts", Status::Orange, 30000.0),
            ],
        },
    ]
}
