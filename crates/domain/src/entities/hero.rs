//! Hero entity - the managed catalog record
//!
//! A hero references superpowers by id only. The edge set is the join
//! relation; resolving it into full [`Superpower`] records is a separate,
//! explicit step (see [`HeroWithSuperpowers`]).

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::entities::Superpower;
use crate::ids::{HeroId, SuperpowerId};

pub const HERO_NAME_MAX: usize = 120;
pub const REAL_NAME_MAX: usize = 120;

/// A persisted hero.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub id: HeroId,
    pub real_name: String,
    /// Public-facing name, unique across all heroes (exact match)
    pub hero_name: String,
    pub date_of_birth: NaiveDate,
    pub height: f64,
    pub weight: f64,
    /// Edges into the superpower arena; set semantics, no ordering meaning
    pub superpower_ids: BTreeSet<SuperpowerId>,
}

/// A hero that has not been stored yet. The store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHero {
    pub real_name: String,
    pub hero_name: String,
    pub date_of_birth: NaiveDate,
    pub height: f64,
    pub weight: f64,
    pub superpower_ids: BTreeSet<SuperpowerId>,
}

impl NewHero {
    pub fn new(
        real_name: impl Into<String>,
        hero_name: impl Into<String>,
        date_of_birth: NaiveDate,
        height: f64,
        weight: f64,
    ) -> Self {
        Self {
            real_name: real_name.into(),
            hero_name: hero_name.into(),
            date_of_birth,
            height,
            weight,
            superpower_ids: BTreeSet::new(),
        }
    }

    pub fn with_superpowers(mut self, ids: impl IntoIterator<Item = SuperpowerId>) -> Self {
        self.superpower_ids = ids.into_iter().collect();
        self
    }

    /// Attach the id the store assigned on insert.
    pub fn into_hero(self, id: HeroId) -> Hero {
        Hero {
            id,
            real_name: self.real_name,
            hero_name: self.hero_name,
            date_of_birth: self.date_of_birth,
            height: self.height,
            weight: self.weight,
            superpower_ids: self.superpower_ids,
        }
    }
}

impl Hero {
    /// Full replace: every mutable field, including the superpower set, is
    /// taken from `draft`. Only the id survives.
    pub fn overwrite(&mut self, draft: NewHero) {
        self.real_name = draft.real_name;
        self.hero_name = draft.hero_name;
        self.date_of_birth = draft.date_of_birth;
        self.height = draft.height;
        self.weight = draft.weight;
        self.superpower_ids = draft.superpower_ids;
    }
}

/// A hero together with its eagerly resolved superpowers.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroWithSuperpowers {
    pub hero: Hero,
    pub superpowers: Vec<Superpower>,
}
