//! In-memory catalog store for development and testing
//!
//! Transactions are serialized through a single lock. Each transaction works
//! on a private copy of the catalog and publishes it on commit, so a dropped
//! transaction leaves the shared state untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use herodex_domain::{
    Hero, HeroId, HeroWithSuperpowers, NewHero, NewSuperpower, Superpower, SuperpowerId,
};

use crate::infrastructure::ports::{CatalogStore, CatalogTx, RepoError};

/// Hero and superpower arenas plus the join relation between them. Hero
/// records are kept with an empty `superpower_ids`; the edge set is the only
/// source of links.
#[derive(Debug, Clone)]
struct CatalogState {
    heroes: BTreeMap<HeroId, Hero>,
    superpowers: BTreeMap<SuperpowerId, Superpower>,
    edges: BTreeSet<(HeroId, SuperpowerId)>,
    next_hero_id: i64,
    next_superpower_id: i64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            heroes: BTreeMap::new(),
            superpowers: BTreeMap::new(),
            edges: BTreeSet::new(),
            next_hero_id: 1,
            next_superpower_id: 1,
        }
    }
}

impl CatalogState {
    fn edges_of(&self, hero_id: HeroId) -> BTreeSet<SuperpowerId> {
        self.edges
            .range((hero_id, SuperpowerId::new(i64::MIN))..=(hero_id, SuperpowerId::new(i64::MAX)))
            .map(|&(_, superpower_id)| superpower_id)
            .collect()
    }

    fn hydrate(&self, hero: &Hero) -> Hero {
        Hero {
            superpower_ids: self.edges_of(hero.id),
            ..hero.clone()
        }
    }

    fn resolve(&self, hero: &Hero) -> HeroWithSuperpowers {
        let hero = self.hydrate(hero);
        let superpowers = hero
            .superpower_ids
            .iter()
            .filter_map(|id| self.superpowers.get(id).cloned())
            .collect();
        HeroWithSuperpowers { hero, superpowers }
    }

    /// Store `hero` in the arena and make its superpower set the hero's only edges.
    fn put_hero(&mut self, mut hero: Hero) {
        let superpower_ids = std::mem::take(&mut hero.superpower_ids);
        self.edges.retain(|&(hero_id, _)| hero_id != hero.id);
        self.edges
            .extend(superpower_ids.into_iter().map(|superpower_id| (hero.id, superpower_id)));
        self.heroes.insert(hero.id, hero);
    }

    fn name_taken(&self, hero_name: &str, exclude: Option<HeroId>) -> bool {
        self.heroes
            .values()
            .any(|h| h.hero_name == hero_name && Some(h.id) != exclude)
    }

    fn check_edges<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a SuperpowerId>,
    ) -> Result<(), RepoError> {
        for id in ids {
            if !self.superpowers.contains_key(id) {
                return Err(RepoError::constraint(format!(
                    "hero references unknown superpower {id}"
                )));
            }
        }
        Ok(())
    }
}

/// In-memory catalog store
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    state: Arc<Mutex<CatalogState>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn begin(&self) -> Result<Box<dyn CatalogTx>, RepoError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryCatalogTx { guard, working }))
    }

    async fn begin_read_only(&self) -> Result<Box<dyn CatalogTx>, RepoError> {
        self.begin().await
    }
}

struct InMemoryCatalogTx {
    guard: OwnedMutexGuard<CatalogState>,
    working: CatalogState,
}

#[async_trait]
impl CatalogTx for InMemoryCatalogTx {
    async fn find_hero_by_id(&mut self, id: HeroId) -> Result<Option<Hero>, RepoError> {
        Ok(self.working.heroes.get(&id).map(|hero| self.working.hydrate(hero)))
    }

    async fn find_hero_with_superpowers(
        &mut self,
        id: HeroId,
    ) -> Result<Option<HeroWithSuperpowers>, RepoError> {
        Ok(self
            .working
            .heroes
            .get(&id)
            .map(|hero| self.working.resolve(hero)))
    }

    async fn list_heroes_with_superpowers(
        &mut self,
    ) -> Result<Vec<HeroWithSuperpowers>, RepoError> {
        Ok(self
            .working
            .heroes
            .values()
            .map(|hero| self.working.resolve(hero))
            .collect())
    }

    async fn hero_exists(&mut self, id: HeroId) -> Result<bool, RepoError> {
        Ok(self.working.heroes.contains_key(&id))
    }

    async fn hero_name_exists(&mut self, hero_name: &str) -> Result<bool, RepoError> {
        Ok(self.working.name_taken(hero_name, None))
    }

    async fn hero_name_exists_excluding(
        &mut self,
        hero_name: &str,
        exclude: HeroId,
    ) -> Result<bool, RepoError> {
        Ok(self.working.name_taken(hero_name, Some(exclude)))
    }

    async fn count_heroes(&mut self) -> Result<u64, RepoError> {
        Ok(self.working.heroes.len() as u64)
    }

    async fn insert_hero(&mut self, hero: &NewHero) -> Result<HeroId, RepoError> {
        if self.working.name_taken(&hero.hero_name, None) {
            return Err(RepoError::duplicate("Hero", "heroName", &hero.hero_name));
        }
        self.working.check_edges(&hero.superpower_ids)?;

        let id = HeroId::new(self.working.next_hero_id);
        self.working.next_hero_id += 1;
        self.working.put_hero(hero.clone().into_hero(id));
        Ok(id)
    }

    async fn update_hero(&mut self, hero: &Hero) -> Result<(), RepoError> {
        if !self.working.heroes.contains_key(&hero.id) {
            return Err(RepoError::not_found("Hero", hero.id));
        }
        if self.working.name_taken(&hero.hero_name, Some(hero.id)) {
            return Err(RepoError::duplicate("Hero", "heroName", &hero.hero_name));
        }
        self.working.check_edges(&hero.superpower_ids)?;

        self.working.put_hero(hero.clone());
        Ok(())
    }

    async fn delete_hero(&mut self, id: HeroId) -> Result<(), RepoError> {
        self.working.heroes.remove(&id);
        self.working.edges.retain(|&(hero_id, _)| hero_id != id);
        Ok(())
    }

    async fn find_superpower_by_id(
        &mut self,
        id: SuperpowerId,
    ) -> Result<Option<Superpower>, RepoError> {
        Ok(self.working.superpowers.get(&id).cloned())
    }

    async fn list_superpowers(&mut self) -> Result<Vec<Superpower>, RepoError> {
        Ok(self.working.superpowers.values().cloned().collect())
    }

    async fn count_superpowers(&mut self) -> Result<u64, RepoError> {
        Ok(self.working.superpowers.len() as u64)
    }

    async fn insert_superpower(
        &mut self,
        superpower: &NewSuperpower,
    ) -> Result<Superpower, RepoError> {
        if self
            .working
            .superpowers
            .values()
            .any(|s| s.name == superpower.name)
        {
            return Err(RepoError::duplicate("Superpower", "name", &superpower.name));
        }

        let id = SuperpowerId::new(self.working.next_superpower_id);
        self.working.next_superpower_id += 1;
        let stored = superpower.clone().into_superpower(id);
        self.working.superpowers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let Self { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
