//! SortCriterion value object - how the catalog is ordered for display

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display ordering for the catalog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortCriterion {
    /// A to Z
    #[default]
    #[serde(rename = "name-asc")]
    NameAsc,
    /// Z to A
    #[serde(rename = "name-desc")]
    NameDesc,
    /// Most recently launched first
    #[serde(rename = "latest-used")]
    MostRecentlyUsed,
    /// Least recently launched (or never launched) first
    #[serde(rename = "no-longer-used")]
    LeastRecentlyUsed,
}

impl SortCriterion {
    /// All criteria, in menu order
    pub const ALL: [SortCriterion; 4] = [
        SortCriterion::NameAsc,
        SortCriterion::NameDesc,
        SortCriterion::MostRecentlyUsed,
        SortCriterion::LeastRecentlyUsed,
    ];

    /// Canonical textual key
    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriterion::NameAsc => "name-asc",
            SortCriterion::NameDesc => "name-desc",
            SortCriterion::MostRecentlyUsed => "latest-used",
            SortCriterion::LeastRecentlyUsed => "no-longer-used",
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name-asc" | "a-z" => Ok(SortCriterion::NameAsc),
            "name-desc" | "z-a" => Ok(SortCriterion::NameDesc),
            "latest-used" | "mru" => Ok(SortCriterion::MostRecentlyUsed),
            "no-longer-used" | "lru" => Ok(SortCriterion::LeastRecentlyUsed),
            other => Err(format!(
                "unknown sort criterion '{}' (expected one of: name-asc, name-desc, latest-used, no-longer-used)",
                other
            )),
        }
    }
}
