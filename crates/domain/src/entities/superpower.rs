//! Superpower entity - reusable capabilities shared between heroes
//!
//! Superpowers are seeded once and then only read. Any number of heroes may
//! reference the same superpower, and deleting a hero never removes one.

use crate::error::DomainError;
use crate::ids::SuperpowerId;

pub const SUPERPOWER_NAME_MAX: usize = 120;
pub const SUPERPOWER_DESCRIPTION_MAX: usize = 500;

/// A persisted superpower.
#[derive(Debug, Clone, PartialEq)]
pub struct Superpower {
    pub id: SuperpowerId,
    /// Unique across all superpowers
    pub name: String,
    pub description: Option<String>,
}

/// A superpower that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSuperpower {
    pub name: String,
    pub description: Option<String>,
}

impl NewSuperpower {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Superpower name cannot be empty"));
        }
        if name.chars().count() > SUPERPOWER_NAME_MAX {
            return Err(DomainError::validation(format!(
                "Superpower name exceeds {SUPERPOWER_NAME_MAX} characters"
            )));
        }
        if let Some(description) = &description {
            if description.chars().count() > SUPERPOWER_DESCRIPTION_MAX {
                return Err(DomainError::validation(format!(
                    "Superpower description exceeds {SUPERPOWER_DESCRIPTION_MAX} characters"
                )));
            }
        }

        Ok(Self { name, description })
    }

    /// Attach the id the store assigned on insert.
    pub fn into_superpower(self, id: SuperpowerId) -> Superpower {
        Superpower {
            id,
            name: self.name,
            description: self.description,
        }
    }
}
