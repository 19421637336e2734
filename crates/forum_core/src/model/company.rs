//! Company record.
//!
//! # Invariants
//! - `industry_id` is required and must reference a persisted industry.
//! - Deleting the referenced industry deletes this company.

use super::industry::IndustryId;
use super::{require_short_text, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CompanyId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub uuid: CompanyId,
    pub name: String,
    /// Owning industry.
    pub industry_id: IndustryId,
}

impl Company {
    /// Creates an unsaved company filed under `industry_id`.
    pub fn new(name: impl Into<String>, industry_id: IndustryId) -> Self {
        Self::with_id(Uuid::new_v4(), name, industry_id)
    }

    pub fn with_id(uuid: CompanyId, name: impl Into<String>, industry_id: IndustryId) -> Self {
        Self {
            uuid,
            name: name.into(),
            industry_id,
        }
    }

    /// Checks field shape only; the store checks that `industry_id` exists.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_short_text(EntityKind::Company, "name", &self.name)
    }
}
