//! Hero CRUD operations.

use std::sync::Arc;

use herodex_domain::HeroId;
use herodex_shared::{HeroInput, HeroView};

use crate::infrastructure::ports::CatalogStore;
use crate::use_cases::validation::validate_hero_input;

use super::{assembler, lookup, name_guard, HeroError};

pub struct HeroCrud {
    store: Arc<dyn CatalogStore>,
}

impl HeroCrud {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<HeroView>, HeroError> {
        let mut tx = self.store.begin_read_only().await?;
        let heroes = tx.list_heroes_with_superpowers().await?;
        tx.commit().await?;

        Ok(heroes.iter().map(assembler::entity_to_response).collect())
    }

    pub async fn get(&self, hero_id: HeroId) -> Result<HeroView, HeroError> {
        let mut tx = self.store.begin_read_only().await?;
        let hero = tx
            .find_hero_with_superpowers(hero_id)
            .await?
            .ok_or_else(|| HeroError::hero_not_found(hero_id))?;
        tx.commit().await?;

        Ok(assembler::entity_to_response(&hero))
    }

    /// Create a hero. A taken name is reported before any unknown superpower.
    pub async fn create(&self, input: HeroInput) -> Result<HeroView, HeroError> {
        validate_hero_input(&input)?;

        let mut tx = self.store.begin().await?;
        name_guard::assert_name_available_for_create(tx.as_mut(), &input.hero_name).await?;
        let superpowers = lookup::resolve_superpowers(tx.as_mut(), &input.superpower_ids).await?;

        let draft = assembler::request_to_entity(&input, &superpowers);
        let hero_id = tx.insert_hero(&draft).await?;
        let saved = tx
            .find_hero_with_superpowers(hero_id)
            .await?
            .ok_or_else(|| HeroError::hero_not_found(hero_id))?;
        tx.commit().await?;

        Ok(assembler::entity_to_response(&saved))
    }

    /// Fully replace a hero. Checks run in order: hero exists, name free,
    /// superpowers resolve.
    pub async fn update(&self, hero_id: HeroId, input: HeroInput) -> Result<HeroView, HeroError> {
        validate_hero_input(&input)?;

        let mut tx = self.store.begin().await?;
        let mut hero = tx
            .find_hero_by_id(hero_id)
            .await?
            .ok_or_else(|| HeroError::hero_not_found(hero_id))?;
        name_guard::assert_name_available_for_update(tx.as_mut(), &input.hero_name, hero_id)
            .await?;
        let superpowers = lookup::resolve_superpowers(tx.as_mut(), &input.superpower_ids).await?;

        assembler::apply_update(&mut hero, &input, &superpowers);
        tx.update_hero(&hero).await?;
        let saved = tx
            .find_hero_with_superpowers(hero_id)
            .await?
            .ok_or_else(|| HeroError::hero_not_found(hero_id))?;
        tx.commit().await?;

        Ok(assembler::entity_to_response(&saved))
    }

    pub async fn delete(&self, hero_id: HeroId) -> Result<(), HeroError> {
        let mut tx = self.store.begin().await?;
        if !tx.hero_exists(hero_id).await? {
            return Err(HeroError::hero_not_found(hero_id));
        }
        tx.delete_hero(hero_id).await?;
        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herodex_domain::{
        Hero, HeroWithSuperpowers, NewHero, NewSuperpower, Superpower, SuperpowerId,
    };

    use crate::infrastructure::memory::InMemoryCatalogStore;
    use crate::infrastructure::ports::{CatalogTx, MockCatalogStore, RepoError};
    use crate::use_cases::management::test_support::{store_with_powers, superman_input};
    use crate::use_cases::management::SuperpowerCatalog;

    async fn crud() -> (InMemoryCatalogStore, HeroCrud) {
        let store = store_with_powers().await;
        let crud = HeroCrud::new(Arc::new(store.clone()));
        (store, crud)
    }

    fn batman_input() -> HeroInput {
        HeroInput {
            real_name: "Bruce Wayne".to_string(),
            hero_name: "Batman".to_string(),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1939, 3, 30).unwrap(),
            height: 1.88,
            weight: 95.0,
            superpower_ids: vec![1],
        }
    }

    #[tokio::test]
    async fn create_returns_hero_with_resolved_superpowers() {
        let (_, crud) = crud().await;

        let input = superman_input();
        let view = crud.create(input.clone()).await.unwrap();

        assert_eq!(view.real_name, input.real_name);
        assert_eq!(view.hero_name, input.hero_name);
        assert_eq!(view.date_of_birth, input.date_of_birth);
        assert_eq!(view.height, input.height);
        assert_eq!(view.weight, input.weight);
        let names: Vec<_> = view.superpowers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Super Strength", "Flight"]);

        let fetched = crud.get(HeroId::new(view.id)).await.unwrap();
        assert_eq!(fetched, view);
    }

    #[tokio::test]
    async fn duplicate_name_conflicts_and_store_is_unchanged() {
        let (_, crud) = crud().await;
        crud.create(superman_input()).await.unwrap();

        let err = crud.create(superman_input()).await.unwrap_err();
        assert!(matches!(
            err,
            HeroError::Conflict { resource: "Hero", field: "heroName", ref value } if value == "Superman"
        ));
        assert_eq!(crud.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn conflict_wins_over_unknown_superpower_on_create() {
        let (_, crud) = crud().await;
        crud.create(superman_input()).await.unwrap();

        let mut input = superman_input();
        input.superpower_ids = vec![999];
        assert!(matches!(
            crud.create(input).await,
            Err(HeroError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_superpower_on_create_persists_nothing() {
        let (_, crud) = crud().await;

        let mut input = superman_input();
        input.superpower_ids = vec![1, 999];
        let err = crud.create(input).await.unwrap_err();

        assert!(matches!(
            err,
            HeroError::NotFound { resource: "Superpower", ref value, .. } if value == "999"
        ));
        assert!(crud.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_touching_the_store() {
        let mut store = MockCatalogStore::new();
        store.expect_begin().never();
        let crud = HeroCrud::new(Arc::new(store));

        let mut input = superman_input();
        input.hero_name = "  ".to_string();
        input.superpower_ids.clear();

        match crud.create(input).await {
            Err(HeroError::InvalidInput(violations)) => assert_eq!(violations.len(), 2),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_missing_hero_is_not_found() {
        let (_, crud) = crud().await;

        let err = crud.get(HeroId::new(999)).await.unwrap_err();
        assert!(matches!(
            err,
            HeroError::NotFound { resource: "Hero", key: "ID", ref value } if value == "999"
        ));
    }

    #[tokio::test]
    async fn update_replaces_every_field_and_keeps_own_name() {
        let (_, crud) = crud().await;
        let created = crud.create(superman_input()).await.unwrap();

        let mut input = superman_input();
        input.real_name = "Kal-El".to_string();
        input.weight = 110.0;
        input.superpower_ids = vec![3];
        let updated = crud.update(HeroId::new(created.id), input).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.hero_name, "Superman");
        assert_eq!(updated.real_name, "Kal-El");
        assert_eq!(updated.weight, 110.0);
        let names: Vec<_> = updated.superpowers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Heat Vision"]);
    }

    #[tokio::test]
    async fn update_checks_run_in_order() {
        let (_, crud) = crud().await;
        crud.create(superman_input()).await.unwrap();
        let batman = crud.create(batman_input()).await.unwrap();

        // Missing hero beats a taken name and an unknown superpower.
        let mut input = superman_input();
        input.superpower_ids = vec![999];
        assert!(matches!(
            crud.update(HeroId::new(999), input.clone()).await,
            Err(HeroError::NotFound { resource: "Hero", .. })
        ));

        // Taken name beats an unknown superpower.
        assert!(matches!(
            crud.update(HeroId::new(batman.id), input).await,
            Err(HeroError::Conflict { .. })
        ));

        let mut input = batman_input();
        input.superpower_ids = vec![2, 999];
        assert!(matches!(
            crud.update(HeroId::new(batman.id), input).await,
            Err(HeroError::NotFound { resource: "Superpower", .. })
        ));

        let unchanged = crud.get(HeroId::new(batman.id)).await.unwrap();
        assert_eq!(unchanged, batman);
    }

    #[tokio::test]
    async fn delete_removes_hero_but_keeps_superpowers() {
        let (store, crud) = crud().await;
        let created = crud.create(superman_input()).await.unwrap();
        let id = HeroId::new(created.id);

        crud.delete(id).await.unwrap();

        assert!(matches!(crud.get(id).await, Err(HeroError::NotFound { .. })));
        assert!(matches!(crud.delete(id).await, Err(HeroError::NotFound { .. })));
        let superpowers = SuperpowerCatalog::new(Arc::new(store)).list_all().await.unwrap();
        assert_eq!(superpowers.len(), 3);
    }

    #[tokio::test]
    async fn reads_are_idempotent() {
        let (_, crud) = crud().await;
        crud.create(superman_input()).await.unwrap();
        crud.create(batman_input()).await.unwrap();

        let first = crud.list().await.unwrap();
        let second = crud.list().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn store_fault_surfaces_as_store_error() {
        let mut store = MockCatalogStore::new();
        store
            .expect_begin_read_only()
            .returning(|| Err(RepoError::database("begin", "unable to open database file")));
        store
            .expect_begin()
            .returning(|| Err(RepoError::database("begin", "unable to open database file")));
        let crud = HeroCrud::new(Arc::new(store));

        assert!(matches!(crud.list().await, Err(HeroError::Store(_))));
        assert!(matches!(
            crud.delete(HeroId::new(1)).await,
            Err(HeroError::Store(_))
        ));
    }

    /// Store whose name lookups always miss, so only the unique index can
    /// catch a taken name.
    struct NameBlindStore(InMemoryCatalogStore);

    struct NameBlindTx(Box<dyn CatalogTx>);

    #[async_trait::async_trait]
    impl CatalogStore for NameBlindStore {
        async fn begin(&self) -> Result<Box<dyn CatalogTx>, RepoError> {
            Ok(Box::new(NameBlindTx(self.0.begin().await?)))
        }

        async fn begin_read_only(&self) -> Result<Box<dyn CatalogTx>, RepoError> {
            self.begin().await
        }
    }

    #[async_trait::async_trait]
    impl CatalogTx for NameBlindTx {
        async fn find_hero_by_id(&mut self, id: HeroId) -> Result<Option<Hero>, RepoError> {
            self.0.find_hero_by_id(id).await
        }
        async fn find_hero_with_superpowers(
            &mut self,
            id: HeroId,
        ) -> Result<Option<HeroWithSuperpowers>, RepoError> {
            self.0.find_hero_with_superpowers(id).await
        }
        async fn list_heroes_with_superpowers(
            &mut self,
        ) -> Result<Vec<HeroWithSuperpowers>, RepoError> {
            self.0.list_heroes_with_superpowers().await
        }
        async fn hero_exists(&mut self, id: HeroId) -> Result<bool, RepoError> {
            self.0.hero_exists(id).await
        }
        async fn hero_name_exists(&mut self, _: &str) -> Result<bool, RepoError> {
            Ok(false)
        }
        async fn hero_name_exists_excluding(
            &mut self,
            _: &str,
            _: HeroId,
        ) -> Result<bool, RepoError> {
            Ok(false)
        }
        async fn count_heroes(&mut self) -> Result<u64, RepoError> {
            self.0.count_heroes().await
        }
        async fn insert_hero(&mut self, hero: &NewHero) -> Result<HeroId, RepoError> {
            self.0.insert_hero(hero).await
        }
        async fn update_hero(&mut self, hero: &Hero) -> Result<(), RepoError> {
            self.0.update_hero(hero).await
        }
        async fn delete_hero(&mut self, id: HeroId) -> Result<(), RepoError> {
            self.0.delete_hero(id).await
        }
        async fn find_superpower_by_id(
            &mut self,
            id: SuperpowerId,
        ) -> Result<Option<Superpower>, RepoError> {
            self.0.find_superpower_by_id(id).await
        }
        async fn list_superpowers(&mut self) -> Result<Vec<Superpower>, RepoError> {
            self.0.list_superpowers().await
        }
        async fn count_superpowers(&mut self) -> Result<u64, RepoError> {
            self.0.count_superpowers().await
        }
        async fn insert_superpower(
            &mut self,
            superpower: &NewSuperpower,
        ) -> Result<Superpower, RepoError> {
            self.0.insert_superpower(superpower).await
        }
        async fn commit(self: Box<Self>) -> Result<(), RepoError> {
            self.0.commit().await
        }
    }

    #[tokio::test]
    async fn unique_index_violation_surfaces_as_conflict() {
        let crud = HeroCrud::new(Arc::new(NameBlindStore(store_with_powers().await)));
        crud.create(superman_input()).await.unwrap();

        let err = crud.create(superman_input()).await.unwrap_err();
        assert!(matches!(
            err,
            HeroError::Conflict { resource: "Hero", field: "heroName", ref value } if value == "Superman"
        ));

        let created = crud.create(batman_input()).await.unwrap();
        let mut input = batman_input();
        input.hero_name = "Superman".to_string();
        assert!(matches!(
            crud.update(HeroId::new(created.id), input).await,
            Err(HeroError::Conflict { field: "heroName", .. })
        ));
    }
}
