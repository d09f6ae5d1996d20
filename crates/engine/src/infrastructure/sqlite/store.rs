//! SQLite implementation of the catalog store.
//!
//! Each [`CatalogTx`] wraps one `sqlx` transaction. Unique-index violations on
//! `heroes.hero_name` surface as [`RepoError::Duplicate`], which covers the
//! window between a name pre-check and the write.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use herodex_domain::{
    Hero, HeroId, HeroWithSuperpowers, NewHero, NewSuperpower, Superpower, SuperpowerId,
};

use crate::infrastructure::ports::{CatalogStore, CatalogTx, RepoError};

/// SQLite catalog store. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open `database_url`, create the schema, and wrap the pool.
    pub async fn connect(database_url: &str) -> Result<Self, RepoError> {
        let pool = super::open_pool(database_url).await?;
        super::ensure_schema(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn begin(&self) -> Result<Box<dyn CatalogTx>, RepoError> {
        // Take the write lock up front; a deferred transaction that reads and
        // then writes fails with SQLITE_BUSY instead of waiting.
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| RepoError::database("begin", e))?;
        Ok(Box::new(SqliteCatalogTx { tx }))
    }

    async fn begin_read_only(&self) -> Result<Box<dyn CatalogTx>, RepoError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("begin_read_only", e))?;
        Ok(Box::new(SqliteCatalogTx { tx }))
    }
}

struct SqliteCatalogTx {
    tx: Transaction<'static, Sqlite>,
}

const HERO_COLUMNS: &str = "id, real_name, hero_name, date_of_birth, height, weight";

fn decode(e: sqlx::Error) -> RepoError {
    RepoError::database("decode", e)
}

/// Classify a write failure. Unique violations become `Duplicate`, broken
/// references become constraint violations.
fn write_error<'a>(
    operation: &'static str,
    entity_type: &'static str,
    field: &'static str,
    value: &'a str,
) -> impl FnOnce(sqlx::Error) -> RepoError + 'a {
    move |e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::duplicate(entity_type, field, value)
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            RepoError::constraint(format!("{operation}: {}", db.message()))
        }
        _ => RepoError::database(operation, e),
    }
}

fn superpower_from_row(row: &SqliteRow) -> Result<Superpower, RepoError> {
    Ok(Superpower {
        id: SuperpowerId::new(row.try_get("id").map_err(decode)?),
        name: row.try_get("name").map_err(decode)?,
        description: row.try_get("description").map_err(decode)?,
    })
}

fn hero_from_row(
    row: &SqliteRow,
    superpower_ids: BTreeSet<SuperpowerId>,
) -> Result<Hero, RepoError> {
    Ok(Hero {
        id: HeroId::new(row.try_get("id").map_err(decode)?),
        real_name: row.try_get("real_name").map_err(decode)?,
        hero_name: row.try_get("hero_name").map_err(decode)?,
        date_of_birth: row.try_get("date_of_birth").map_err(decode)?,
        height: row.try_get("height").map_err(decode)?,
        weight: row.try_get("weight").map_err(decode)?,
        superpower_ids,
    })
}

impl SqliteCatalogTx {
    async fn fetch_hero_row(&mut self, id: HeroId) -> Result<Option<SqliteRow>, RepoError> {
        sqlx::query(&format!("SELECT {HERO_COLUMNS} FROM heroes WHERE id = ?"))
            .bind(id.get())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("find_hero", e))
    }

    async fn superpowers_of(&mut self, id: HeroId) -> Result<Vec<Superpower>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.name, s.description
            FROM superpowers s
            JOIN heroes_superpowers hs ON hs.superpower_id = s.id
            WHERE hs.hero_id = ?
            ORDER BY s.id
            "#,
        )
        .bind(id.get())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| RepoError::database("superpowers_of", e))?;

        rows.iter().map(superpower_from_row).collect()
    }

    async fn insert_edges(
        &mut self,
        hero_id: HeroId,
        superpower_ids: &BTreeSet<SuperpowerId>,
    ) -> Result<(), RepoError> {
        for superpower_id in superpower_ids {
            let value = superpower_id.to_string();
            sqlx::query("INSERT INTO heroes_superpowers (hero_id, superpower_id) VALUES (?, ?)")
                .bind(hero_id.get())
                .bind(superpower_id.get())
                .execute(&mut *self.tx)
                .await
                .map_err(write_error("insert_edges", "Superpower", "id", &value))?;
        }
        Ok(())
    }

    async fn count(&mut self, table: &'static str) -> Result<u64, RepoError> {
        let row = sqlx::query(&format!("SELECT COUNT(*) AS total FROM {table}"))
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("count", e))?;
        let total: i64 = row.try_get("total").map_err(decode)?;
        Ok(total.max(0) as u64)
    }
}

#[async_trait]
impl CatalogTx for SqliteCatalogTx {
    async fn find_hero_by_id(&mut self, id: HeroId) -> Result<Option<Hero>, RepoError> {
        let Some(row) = self.fetch_hero_row(id).await? else {
            return Ok(None);
        };

        let edge_rows =
            sqlx::query("SELECT superpower_id FROM heroes_superpowers WHERE hero_id = ?")
                .bind(id.get())
                .fetch_all(&mut *self.tx)
                .await
                .map_err(|e| RepoError::database("find_hero_by_id", e))?;
        let superpower_ids = edge_rows
            .iter()
            .map(|r| r.try_get::<i64, _>("superpower_id").map(SuperpowerId::new))
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(decode)?;

        hero_from_row(&row, superpower_ids).map(Some)
    }

    async fn find_hero_with_superpowers(
        &mut self,
        id: HeroId,
    ) -> Result<Option<HeroWithSuperpowers>, RepoError> {
        let Some(row) = self.fetch_hero_row(id).await? else {
            return Ok(None);
        };

        let superpowers = self.superpowers_of(id).await?;
        let hero = hero_from_row(&row, superpowers.iter().map(|s| s.id).collect())?;
        Ok(Some(HeroWithSuperpowers { hero, superpowers }))
    }

    async fn list_heroes_with_superpowers(
        &mut self,
    ) -> Result<Vec<HeroWithSuperpowers>, RepoError> {
        let hero_rows = sqlx::query(&format!("SELECT {HERO_COLUMNS} FROM heroes ORDER BY id"))
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("list_heroes", e))?;

        let edge_rows = sqlx::query(
            r#"
            SELECT hs.hero_id, s.id, s.name, s.description
            FROM heroes_superpowers hs
            JOIN superpowers s ON s.id = hs.superpower_id
            ORDER BY hs.hero_id, s.id
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| RepoError::database("list_heroes", e))?;

        let mut by_hero: BTreeMap<i64, Vec<Superpower>> = BTreeMap::new();
        for row in &edge_rows {
            let hero_id: i64 = row.try_get("hero_id").map_err(decode)?;
            by_hero
                .entry(hero_id)
                .or_default()
                .push(superpower_from_row(row)?);
        }

        hero_rows
            .iter()
            .map(|row| {
                let hero_id: i64 = row.try_get("id").map_err(decode)?;
                let superpowers = by_hero.remove(&hero_id).unwrap_or_default();
                let hero = hero_from_row(row, superpowers.iter().map(|s| s.id).collect())?;
                Ok(HeroWithSuperpowers { hero, superpowers })
            })
            .collect()
    }

    async fn hero_exists(&mut self, id: HeroId) -> Result<bool, RepoError> {
        let row = sqlx::query("SELECT 1 FROM heroes WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("hero_exists", e))?;
        Ok(row.is_some())
    }

    async fn hero_name_exists(&mut self, hero_name: &str) -> Result<bool, RepoError> {
        let row = sqlx::query("SELECT 1 FROM heroes WHERE hero_name = ?")
            .bind(hero_name)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("hero_name_exists", e))?;
        Ok(row.is_some())
    }

    async fn hero_name_exists_excluding(
        &mut self,
        hero_name: &str,
        exclude: HeroId,
    ) -> Result<bool, RepoError> {
        let row = sqlx::query("SELECT 1 FROM heroes WHERE hero_name = ? AND id <> ?")
            .bind(hero_name)
            .bind(exclude.get())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("hero_name_exists_excluding", e))?;
        Ok(row.is_some())
    }

    async fn count_heroes(&mut self) -> Result<u64, RepoError> {
        self.count("heroes").await
    }

    async fn insert_hero(&mut self, hero: &NewHero) -> Result<HeroId, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO heroes (real_name, hero_name, date_of_birth, height, weight)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&hero.real_name)
        .bind(&hero.hero_name)
        .bind(hero.date_of_birth)
        .bind(hero.height)
        .bind(hero.weight)
        .execute(&mut *self.tx)
        .await
        .map_err(write_error("insert_hero", "Hero", "heroName", &hero.hero_name))?;

        let id = HeroId::new(result.last_insert_rowid());
        self.insert_edges(id, &hero.superpower_ids).await?;
        Ok(id)
    }

    async fn update_hero(&mut self, hero: &Hero) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE heroes
            SET real_name = ?, hero_name = ?, date_of_birth = ?, height = ?, weight = ?
            WHERE id = ?
            "#,
        )
        .bind(&hero.real_name)
        .bind(&hero.hero_name)
        .bind(hero.date_of_birth)
        .bind(hero.height)
        .bind(hero.weight)
        .bind(hero.id.get())
        .execute(&mut *self.tx)
        .await
        .map_err(write_error("update_hero", "Hero", "heroName", &hero.hero_name))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Hero", hero.id));
        }

        sqlx::query("DELETE FROM heroes_superpowers WHERE hero_id = ?")
            .bind(hero.id.get())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("update_hero", e))?;
        self.insert_edges(hero.id, &hero.superpower_ids).await
    }

    async fn delete_hero(&mut self, id: HeroId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM heroes_superpowers WHERE hero_id = ?")
            .bind(id.get())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("delete_hero", e))?;
        sqlx::query("DELETE FROM heroes WHERE id = ?")
            .bind(id.get())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("delete_hero", e))?;
        Ok(())
    }

    async fn find_superpower_by_id(
        &mut self,
        id: SuperpowerId,
    ) -> Result<Option<Superpower>, RepoError> {
        let row = sqlx::query("SELECT id, name, description FROM superpowers WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("find_superpower_by_id", e))?;
        row.as_ref().map(superpower_from_row).transpose()
    }

    async fn list_superpowers(&mut self) -> Result<Vec<Superpower>, RepoError> {
        let rows = sqlx::query("SELECT id, name, description FROM superpowers ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| RepoError::database("list_superpowers", e))?;
        rows.iter().map(superpower_from_row).collect()
    }

    async fn count_superpowers(&mut self) -> Result<u64, RepoError> {
        self.count("superpowers").await
    }

    async fn insert_superpower(
        &mut self,
        superpower: &NewSuperpower,
    ) -> Result<Superpower, RepoError> {
        let result = sqlx::query("INSERT INTO superpowers (name, description) VALUES (?, ?)")
            .bind(&superpower.name)
            .bind(&superpower.description)
            .execute(&mut *self.tx)
            .await
            .map_err(write_error(
                "insert_superpower",
                "Superpower",
                "name",
                &superpower.name,
            ))?;

        let id = SuperpowerId::new(result.last_insert_rowid());
        Ok(superpower.clone().into_superpower(id))
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        self.tx
            .commit()
            .await
            .map_err(|e| RepoError::database("commit", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    async fn temp_store() -> (TempDir, SqliteCatalogStore) {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("heroes.db").display());
        let store = SqliteCatalogStore::connect(&url).await.unwrap();
        (dir, store)
    }

    fn batman() -> NewHero {
        NewHero::new(
            "Bruce Wayne",
            "Batman",
            NaiveDate::from_ymd_opt(1939, 3, 30).unwrap(),
            1.88,
            95.0,
        )
    }

    async fn seed_powers(store: &SqliteCatalogStore, names: &[&str]) -> Vec<Superpower> {
        let mut tx = store.begin().await.unwrap();
        let mut powers = Vec::new();
        for name in names {
            let power = NewSuperpower::new(*name, Some(format!("{name} power"))).unwrap();
            powers.push(tx.insert_superpower(&power).await.unwrap());
        }
        tx.commit().await.unwrap();
        powers
    }

    #[tokio::test]
    async fn hero_round_trips_with_superpowers() {
        let (_dir, store) = temp_store().await;
        let powers = seed_powers(&store, &["Intelligence", "Martial Arts"]).await;

        let mut tx = store.begin().await.unwrap();
        let id = tx
            .insert_hero(&batman().with_superpowers(powers.iter().map(|p| p.id)))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let stored = tx.find_hero_with_superpowers(id).await.unwrap().unwrap();
        assert_eq!(stored.hero.hero_name, "Batman");
        assert_eq!(
            stored.hero.date_of_birth,
            NaiveDate::from_ymd_opt(1939, 3, 30).unwrap()
        );
        assert_eq!(stored.superpowers, powers);

        let plain = tx.find_hero_by_id(id).await.unwrap().unwrap();
        assert_eq!(plain.superpower_ids.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_hero_name_maps_to_duplicate() {
        let (_dir, store) = temp_store().await;

        let mut tx = store.begin().await.unwrap();
        tx.insert_hero(&batman()).await.unwrap();
        let err = tx.insert_hero(&batman()).await.unwrap_err();

        assert!(matches!(
            err,
            RepoError::Duplicate { entity_type: "Hero", field: "heroName", ref value } if value == "Batman"
        ));
    }

    #[tokio::test]
    async fn update_replaces_superpower_edges() {
        let (_dir, store) = temp_store().await;
        let powers = seed_powers(&store, &["Flight", "Agility", "Technology"]).await;

        let mut tx = store.begin().await.unwrap();
        let id = tx
            .insert_hero(&batman().with_superpowers([powers[0].id, powers[1].id]))
            .await
            .unwrap();
        let mut hero = tx.find_hero_by_id(id).await.unwrap().unwrap();
        hero.superpower_ids = [powers[2].id].into_iter().collect();
        tx.update_hero(&hero).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let stored = tx.find_hero_with_superpowers(id).await.unwrap().unwrap();
        assert_eq!(stored.superpowers, vec![powers[2].clone()]);
    }

    #[tokio::test]
    async fn delete_keeps_superpowers() {
        let (_dir, store) = temp_store().await;
        let powers = seed_powers(&store, &["Flight"]).await;

        let mut tx = store.begin().await.unwrap();
        let id = tx
            .insert_hero(&batman().with_superpowers([powers[0].id]))
            .await
            .unwrap();
        tx.delete_hero(id).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert!(!tx.hero_exists(id).await.unwrap());
        assert_eq!(tx.list_superpowers().await.unwrap(), powers);
    }

    #[tokio::test]
    async fn uncommitted_transaction_rolls_back() {
        let (_dir, store) = temp_store().await;

        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_hero(&batman()).await.unwrap();
        }

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.count_heroes().await.unwrap(), 0);
        assert!(tx.list_heroes_with_superpowers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn name_check_excludes_own_id() {
        let (_dir, store) = temp_store().await;

        let mut tx = store.begin().await.unwrap();
        let id = tx.insert_hero(&batman()).await.unwrap();

        assert!(tx.hero_name_exists("Batman").await.unwrap());
        assert!(!tx.hero_name_exists_excluding("Batman", id).await.unwrap());
        assert!(tx
            .hero_name_exists_excluding("Batman", HeroId::new(id.get() + 1))
            .await
            .unwrap());
    }
}
