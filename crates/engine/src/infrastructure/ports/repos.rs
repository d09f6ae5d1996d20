//! Catalog store port.
//!
//! Every top-level catalog operation runs inside one [`CatalogTx`]. Dropping
//! a transaction without calling [`CatalogTx::commit`] discards all of its
//! reads and writes.

use async_trait::async_trait;
use herodex_domain::{
    Hero, HeroId, HeroWithSuperpowers, NewHero, NewSuperpower, Superpower, SuperpowerId,
};

use super::error::RepoError;

// =============================================================================
// Catalog Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Open a unit of work that may write. Concurrent writers queue behind
    /// each other instead of failing.
    async fn begin(&self) -> Result<Box<dyn CatalogTx>, RepoError>;

    /// Open a unit of work that only reads.
    async fn begin_read_only(&self) -> Result<Box<dyn CatalogTx>, RepoError>;
}

/// Operations available inside one unit of work.
#[async_trait]
pub trait CatalogTx: Send {
    // Heroes
    /// Plain fetch: the hero and its superpower ids, nothing resolved.
    async fn find_hero_by_id(&mut self, id: HeroId) -> Result<Option<Hero>, RepoError>;
    async fn find_hero_with_superpowers(
        &mut self,
        id: HeroId,
    ) -> Result<Option<HeroWithSuperpowers>, RepoError>;
    async fn list_heroes_with_superpowers(&mut self)
        -> Result<Vec<HeroWithSuperpowers>, RepoError>;
    async fn hero_exists(&mut self, id: HeroId) -> Result<bool, RepoError>;
    async fn hero_name_exists(&mut self, hero_name: &str) -> Result<bool, RepoError>;
    async fn hero_name_exists_excluding(
        &mut self,
        hero_name: &str,
        exclude: HeroId,
    ) -> Result<bool, RepoError>;
    async fn count_heroes(&mut self) -> Result<u64, RepoError>;

    /// Insert a new hero and its superpower edges, returning the assigned id.
    async fn insert_hero(&mut self, hero: &NewHero) -> Result<HeroId, RepoError>;
    /// Overwrite a stored hero, replacing its whole superpower edge set.
    async fn update_hero(&mut self, hero: &Hero) -> Result<(), RepoError>;
    /// Remove a hero and its edges. Superpowers are left untouched.
    async fn delete_hero(&mut self, id: HeroId) -> Result<(), RepoError>;

    // Superpowers
    async fn find_superpower_by_id(
        &mut self,
        id: SuperpowerId,
    ) -> Result<Option<Superpower>, RepoError>;
    async fn list_superpowers(&mut self) -> Result<Vec<Superpower>, RepoError>;
    async fn count_superpowers(&mut self) -> Result<u64, RepoError>;
    async fn insert_superpower(&mut self, superpower: &NewSuperpower)
        -> Result<Superpower, RepoError>;

    async fn commit(self: Box<Self>) -> Result<(), RepoError>;
}
