//! Hero-name uniqueness checks.

use herodex_domain::HeroId;

use crate::infrastructure::ports::CatalogTx;

use super::HeroError;

pub(super) async fn assert_name_available_for_create(
    tx: &mut dyn CatalogTx,
    hero_name: &str,
) -> Result<(), HeroError> {
    if tx.hero_name_exists(hero_name).await? {
        return Err(HeroError::hero_name_taken(hero_name));
    }
    Ok(())
}

/// Same as the create check, except the hero being updated may keep its name.
pub(super) async fn assert_name_available_for_update(
    tx: &mut dyn CatalogTx,
    hero_name: &str,
    excluding: HeroId,
) -> Result<(), HeroError> {
    if tx.hero_name_exists_excluding(hero_name, excluding).await? {
        return Err(HeroError::hero_name_taken(hero_name));
    }
    Ok(())
}
