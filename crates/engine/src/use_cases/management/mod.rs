//! Management use cases for the hero catalog.
//!
//! Every public operation opens one store transaction, commits it on success
//! and lets it roll back on any error.

mod assembler;
mod hero;
mod lookup;
mod name_guard;
mod superpower;

pub use hero::HeroCrud;
pub use superpower::SuperpowerCatalog;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::validation::ValidationError;

/// Shared error type for catalog use cases.
#[derive(Debug, thiserror::Error)]
pub enum HeroError {
    #[error("{resource} not found with {key}: {value}")]
    NotFound {
        resource: &'static str,
        key: &'static str,
        value: String,
    },
    #[error("A {resource} with {field} '{value}' already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("Invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
    #[error("Repository error: {0}")]
    Store(RepoError),
}

fn summarize(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl HeroError {
    pub fn hero_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "Hero",
            key: "ID",
            value: id.to_string(),
        }
    }

    pub fn superpower_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "Superpower",
            key: "ID",
            value: id.to_string(),
        }
    }

    pub fn hero_name_taken(hero_name: impl ToString) -> Self {
        Self::Conflict {
            resource: "Hero",
            field: "heroName",
            value: hero_name.to_string(),
        }
    }
}

impl From<RepoError> for HeroError {
    fn from(err: RepoError) -> Self {
        match err {
            // The unique index caught a name that slipped past the pre-check.
            RepoError::Duplicate {
                entity_type,
                field,
                value,
            } => Self::Conflict {
                resource: entity_type,
                field,
                value,
            },
            other => Self::Store(other),
        }
    }
}

impl From<Vec<ValidationError>> for HeroError {
    fn from(violations: Vec<ValidationError>) -> Self {
        Self::InvalidInput(violations)
    }
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub hero: HeroCrud,
    pub superpower: SuperpowerCatalog,
}

impl ManagementUseCases {
    pub fn new(hero: HeroCrud, superpower: SuperpowerCatalog) -> Self {
        Self { hero, superpower }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use herodex_domain::NewSuperpower;
    use herodex_shared::HeroInput;

    use crate::infrastructure::memory::InMemoryCatalogStore;
    use crate::infrastructure::ports::CatalogStore;

    /// Store holding Super Strength (1), Flight (2) and Heat Vision (3).
    pub async fn store_with_powers() -> InMemoryCatalogStore {
        let store = InMemoryCatalogStore::new();
        let mut tx = store.begin().await.unwrap();
        for name in ["Super Strength", "Flight", "Heat Vision"] {
            let power = NewSuperpower::new(name, Some(format!("{name} description"))).unwrap();
            tx.insert_superpower(&power).await.unwrap();
        }
        tx.commit().await.unwrap();
        store
    }

    pub fn superman_input() -> HeroInput {
        HeroInput {
            real_name: "Clark Kent".to_string(),
            hero_name: "Superman".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1938, 4, 18).unwrap(),
            height: 1.91,
            weight: 107.0,
            superpower_ids: vec![1, 2],
        }
    }
}
