//! Industry record.
//!
//! Industries are the roots of the company hierarchy; deleting one removes
//! every company filed under it.

use super::{require_short_text, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type IndustryId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Industry {
    pub uuid: IndustryId,
    /// Display name, e.g. `Aviation`. Lookup key in practice.
    pub name: String,
}

impl Industry {
    /// Creates an unsaved industry with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    pub fn with_id(uuid: IndustryId, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_short_text(EntityKind::Industry, "name", &self.name)
    }
}
