//! Catalog entities.

mod hero;
mod superpower;

pub use hero::{Hero, HeroWithSuperpowers, NewHero, HERO_NAME_MAX, REAL_NAME_MAX};
pub use superpower::{
    NewSuperpower, Superpower, SUPERPOWER_DESCRIPTION_MAX, SUPERPOWER_NAME_MAX,
};
