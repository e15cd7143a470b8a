//! Listing classification enums.
//!
//! Categories and conditions are stored by their display label (`"Like New"`)
//! so persisted records read the same way the sell form shows them.

use serde::{Deserialize, Serialize};

/// Error returned when a label does not name a known category or condition.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown label: {0}")]
pub struct UnknownLabel(pub String);

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Books,
    Electronics,
    Furniture,
    Clothing,
    Accessories,
    Sports,
    Transportation,
    Services,
    Tickets,
    Housing,
    Entertainment,
    Tutoring,
    Other,
}

impl Category {
    /// Every category, in the order the sell form lists them.
    pub const ALL: [Self; 13] = [
        Self::Books,
        Self::Electronics,
        Self::Furniture,
        Self::Clothing,
        Self::Accessories,
        Self::Sports,
        Self::Transportation,
        Self::Services,
        Self::Tickets,
        Self::Housing,
        Self::Entertainment,
        Self::Tutoring,
        Self::Other,
    ];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Books => "Books",
            Self::Electronics => "Electronics",
            Self::Furniture => "Furniture",
            Self::Clothing => "Clothing",
            Self::Accessories => "Accessories",
            Self::Sports => "Sports",
            Self::Transportation => "Transportation",
            Self::Services => "Services",
            Self::Tickets => "Tickets",
            Self::Housing => "Housing",
            Self::Entertainment => "Entertainment",
            Self::Tutoring => "Tutoring",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel(s.to_owned()))
    }
}

/// Item condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    /// Every condition, best first.
    pub const ALL: [Self; 5] = [Self::New, Self::LikeNew, Self::Good, Self::Fair, Self::Poor];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::LikeNew => "Like New",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Condition {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel(s.to_owned()))
    }
}
