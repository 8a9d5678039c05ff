//! Project and company domain records.
//!
//! # Responsibility
//! - Define the canonical shapes persisted in the snapshot blob.
//! - Compute the derived project aggregate (never stored).
//! - Normalize user-supplied monetary input through one named step.
//!
//! # Invariants
//! - Ids are unique within their scope and never reused.
//! - `Company::value` is finite and non-negative; construction and
//!   normalization both enforce it.

use crate::model::status::Status;
use serde::{Deserialize, Serialize};

/// Stable identifier for a project, derived from its creation timestamp.
pub type ProjectId = i64;

/// Stable identifier for a company, derived from its creation timestamp.
pub type CompanyId = i64;

/// One business relationship inside a project's pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub status: Status,
    /// Monetary amount in currency units. Always finite and non-negative.
    pub value: f64,
}

impl Company {
    /// Creates a company, clamping `value` into the valid range.
    pub fn new(id: CompanyId, name: impl Into<String>, status: Status, value: f64) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            value: clamp_value(value),
        }
    }
}

/// A named grouping of prospective/active business relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub companies: Vec<Company>,
}

impl Project {
    /// Creates an empty project.
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            companies: Vec::new(),
        }
    }

    /// Derived aggregate: sum of values over onboarded (green) companies.
    ///
    /// Recomputed on demand; companies in any other stage contribute nothing.
    pub fn pipeline_value(&self) -> f64 {
        self.companies
            .iter()
            .filter(|company| company.status == Status::Green)
            .map(|company| company.value)
            .sum()
    }

    /// Re-sorts the company list by the fixed status order.
    ///
    /// Stable: companies sharing a status keep their relative order.
    pub fn sort_companies(&mut self) {
        self.companies
            .sort_by_key(|company| company.status.sort_rank());
    }
}

/// Parses raw monetary input into a valid company value.
///
/// The explicit normalization step: unparsable, non-finite or negative input
/// coerces to `0.0`, never to NaN or a negative number.
pub fn normalize_value(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) => clamp_value(value),
        Err(_) => 0.0,
    }
}

/// Clamps an already-numeric amount into the valid range.
pub fn clamp_value(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}
