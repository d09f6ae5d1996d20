//! Herodex Domain - heroes, superpowers, and the identifiers that link them.

pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{
    Hero, HeroWithSuperpowers, NewHero, NewSuperpower, Superpower, HERO_NAME_MAX,
    REAL_NAME_MAX, SUPERPOWER_DESCRIPTION_MAX, SUPERPOWER_NAME_MAX,
};
pub use error::DomainError;
pub use ids::{HeroId, SuperpowerId};
