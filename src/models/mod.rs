pub mod category;
pub mod horse;
pub mod owner;
pub mod race;

pub use category::Category;
pub use horse::Horse;
pub use owner::Owner;
pub use race::{NewRace, Race};

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "MALE"),
            Gender::Female => write!(f, "FEMALE"),
        }
    }
}

// ---------------------------------------------------------------------------
// Region — training center a horse's stable belongs to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Miho,
    Ritto,
    Local,
}

impl Region {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MIHO" => Some(Region::Miho),
            "RITTO" => Some(Region::Ritto),
            "LOCAL" => Some(Region::Local),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Miho => write!(f, "MIHO"),
            Region::Ritto => write!(f, "RITTO"),
            Region::Local => write!(f, "LOCAL"),
        }
    }
}

// ---------------------------------------------------------------------------
// ScoringRule — which formula ranks a category's standings.
// The string form doubles as the URL path segment.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringRule {
    /// Base points weighted by win odds.
    Odds,
    /// Flat base points only (the "dart draft" pool).
    Dart,
}

impl ScoringRule {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "odds" => Some(ScoringRule::Odds),
            "dart" => Some(ScoringRule::Dart),
            _ => None,
        }
    }

    pub fn path_segment(&self) -> &'static str {
        match self {
            ScoringRule::Odds => "odds",
            ScoringRule::Dart => "dart",
        }
    }

    /// Display label used in page headings and breadcrumbs.
    pub fn label(&self) -> &'static str {
        match self {
            ScoringRule::Odds => "Odds-weighted POG",
            ScoringRule::Dart => "Dart POG",
        }
    }
}

impl fmt::Display for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}
