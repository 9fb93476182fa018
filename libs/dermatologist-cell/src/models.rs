// libs/dermatologist-cell/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A dermatologist available for browsing and booking. Rows are owned by the
/// `dermatologists` table; this cell only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dermatologist {
    pub id: Uuid,
    pub name: String,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    /// Free text. May carry a "City, ST" pair or a remote-only marker such
    /// as "Telehealth" or "Online".
    pub location: Option<String>,
    pub available: bool,
}

impl Dermatologist {
    pub fn specialty_label(&self) -> &str {
        self.specialty.as_deref().unwrap_or("Dermatology")
    }
}

/// Which consultation modes a directory search should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityMode {
    #[default]
    All,
    Telehealth,
    InPerson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Location,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Location => write!(f, "location"),
        }
    }
}

/// Filter state for one directory browsing session. An empty location query
/// places no constraint; defaults match the cleared-filters state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DirectoryFilters {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub availability: AvailabilityMode,
    #[serde(default)]
    pub sort_by: SortKey,
}

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum DermatologistError {
    #[error("Dermatologist not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
