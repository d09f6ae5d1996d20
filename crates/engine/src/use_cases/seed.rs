//! Starter catalog written at startup.
//!
//! Superpowers are only seeded into an empty superpower table and heroes only
//! into an empty hero table, so restarting never duplicates or overwrites data.

use std::sync::Arc;

use chrono::NaiveDate;
use herodex_domain::{DomainError, NewHero, NewSuperpower, Superpower};

use crate::infrastructure::ports::{CatalogStore, CatalogTx, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// What a seeding run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub superpowers_created: usize,
    pub heroes_created: usize,
}

const SUPERPOWERS: &[(&str, &str)] = &[
    ("Super Strength", "Able to lift extremely heavy objects"),
    ("Flight", "Able to fly through the skies"),
    ("Heat Vision", "Able to fire heat beams from the eyes"),
    ("Super Speed", "Able to move at superhuman speeds"),
    ("Intelligence", "Superior mental capacity"),
    ("Martial Arts", "Advanced combat skills"),
    ("Agility", "Able to move quickly and precisely"),
    ("Spider Sense", "A sixth sense that warns of danger"),
    ("Indestructible Bracelets", "Bracelets that can block any attack"),
    ("Technology", "Advanced technological knowledge"),
];

struct StarterHero {
    real_name: &'static str,
    hero_name: &'static str,
    born: (i32, u32, u32),
    height: f64,
    weight: f64,
    superpowers: &'static [&'static str],
}

const HEROES: &[StarterHero] = &[
    StarterHero {
        real_name: "Clark Kent",
        hero_name: "Superman",
        born: (1938, 4, 18),
        height: 1.91,
        weight: 107.0,
        superpowers: &["Super Strength", "Flight", "Heat Vision", "Super Speed"],
    },
    StarterHero {
        real_name: "Bruce Wayne",
        hero_name: "Batman",
        born: (1939, 3, 30),
        height: 1.88,
        weight: 95.0,
        superpowers: &["Intelligence", "Martial Arts", "Technology"],
    },
    StarterHero {
        real_name: "Peter Parker",
        hero_name: "Spider-Man",
        born: (1962, 8, 10),
        height: 1.78,
        weight: 76.0,
        superpowers: &["Super Strength", "Agility", "Spider Sense"],
    },
];

pub struct SeedCatalog {
    store: Arc<dyn CatalogStore>,
}

impl SeedCatalog {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Fill empty tables with the starter catalog in a single transaction.
    pub async fn execute(&self) -> Result<SeedReport, SeedError> {
        let mut tx = self.store.begin().await?;
        let mut report = SeedReport::default();

        if tx.count_superpowers().await? == 0 {
            for (name, description) in SUPERPOWERS {
                let power = NewSuperpower::new(*name, Some((*description).to_string()))?;
                tx.insert_superpower(&power).await?;
                report.superpowers_created += 1;
            }
        }

        if tx.count_heroes().await? == 0 {
            let known = tx.list_superpowers().await?;
            for starter in HEROES {
                insert_starter(tx.as_mut(), starter, &known).await?;
                report.heroes_created += 1;
            }
        }

        tx.commit().await?;

        tracing::info!(
            superpowers_created = report.superpowers_created,
            heroes_created = report.heroes_created,
            "Catalog seeding finished"
        );
        Ok(report)
    }
}

async fn insert_starter(
    tx: &mut dyn CatalogTx,
    starter: &StarterHero,
    known: &[Superpower],
) -> Result<(), SeedError> {
    let (year, month, day) = starter.born;
    let born = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DomainError::validation(format!("invalid birth date for {}", starter.hero_name))
    })?;

    let mut superpower_ids = Vec::with_capacity(starter.superpowers.len());
    for name in starter.superpowers {
        match known.iter().find(|s| s.name == *name) {
            Some(power) => superpower_ids.push(power.id),
            None => tracing::warn!(
                hero_name = starter.hero_name,
                superpower = *name,
                "Starter superpower missing, skipping"
            ),
        }
    }

    let hero = NewHero::new(
        starter.real_name,
        starter.hero_name,
        born,
        starter.height,
        starter.weight,
    )
    .with_superpowers(superpower_ids);
    tx.insert_hero(&hero).await?;
    Ok(())
}
