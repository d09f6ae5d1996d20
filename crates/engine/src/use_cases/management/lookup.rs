//! Superpower lookup: turn requested ids into stored records.

use std::collections::BTreeSet;

use herodex_domain::{Superpower, SuperpowerId};

use crate::infrastructure::ports::CatalogTx;

use super::HeroError;

/// Resolve `ids` in input order. Repeated ids are resolved once. Fails on the
/// first id with no stored superpower and does not look at the rest.
pub(super) async fn resolve_superpowers(
    tx: &mut dyn CatalogTx,
    ids: &[i64],
) -> Result<Vec<Superpower>, HeroError> {
    let mut seen = BTreeSet::new();
    let mut resolved = Vec::with_capacity(ids.len());

    for &raw in ids {
        let id = SuperpowerId::new(raw);
        if !seen.insert(id) {
            continue;
        }
        let superpower = tx
            .find_superpower_by_id(id)
            .await?
            .ok_or_else(|| HeroError::superpower_not_found(id))?;
        resolved.push(superpower);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::CatalogStore;
    use crate::use_cases::management::test_support::store_with_powers;

    #[tokio::test]
    async fn resolves_in_input_order_and_collapses_repeats() {
        let store = store_with_powers().await;
        let mut tx = store.begin().await.unwrap();

        let powers = resolve_superpowers(tx.as_mut(), &[3, 1, 3]).await.unwrap();
        let names: Vec<_> = powers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Heat Vision", "Super Strength"]);
    }

    #[tokio::test]
    async fn first_missing_id_is_reported() {
        let store = store_with_powers().await;
        let mut tx = store.begin().await.unwrap();

        let err = resolve_superpowers(tx.as_mut(), &[1, 999, 998])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HeroError::NotFound { resource: "Superpower", key: "ID", ref value } if value == "999"
        ));
    }
}
