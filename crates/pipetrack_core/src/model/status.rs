//! Pipeline status enumeration.
//!
//! # Responsibility
//! - Define the six fixed pipeline stages and their display labels.
//! - Provide the fixed ordering used when sorting a project's companies.
//!
//! # Invariants
//! - The variant set is closed; persisted snapshots may only contain these
//!   six lowercase color names.
//! - `Green` is the only stage that counts toward a project's aggregate.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Pipeline stage of a company, keyed by its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Still to be contacted.
    Red,
    /// Waiting for an answer.
    Orange,
    /// Showed interest.
    Yellow,
    /// Quote sent.
    Blue,
    /// Onboarded; the only stage counted in the project aggregate.
    Green,
    /// Proposal rejected.
    Gray,
}

impl Status {
    /// All stages in company-list sort order: won deals first, rejected last.
    pub const SORTED: [Status; 6] = [
        Status::Green,
        Status::Blue,
        Status::Yellow,
        Status::Orange,
        Status::Red,
        Status::Gray,
    ];

    /// Position in the fixed company-list sort order.
    pub fn sort_rank(self) -> usize {
        match self {
            Status::Green => 0,
            Status::Blue => 1,
            Status::Yellow => 2,
            Status::Orange => 3,
            Status::Red => 4,
            Status::Gray => 5,
        }
    }

    /// Human-readable stage label shown next to a company.
    pub fn label(self) -> &'static str {
        match self {
            Status::Red => "Da contattare",
            Status::Orange => "In attesa",
            Status::Yellow => "Interessata",
            Status::Blue => "Preventivo inviato",
            Status::Green => "A bordo",
            Status::Gray => "Proposta rifiutata",
        }
    }

    /// Lowercase color name, matching the persisted serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Red => "red",
            Status::Orange => "orange",
            Status::Yellow => "yellow",
            Status::Blue => "blue",
            Status::Green => "green",
            Status::Gray => "gray",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
