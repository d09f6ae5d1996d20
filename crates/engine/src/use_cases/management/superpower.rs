//! Superpower listing.

use std::sync::Arc;

use herodex_shared::SuperpowerView;

use crate::infrastructure::ports::CatalogStore;

use super::{assembler, HeroError};

pub struct SuperpowerCatalog {
    store: Arc<dyn CatalogStore>,
}

impl SuperpowerCatalog {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Every superpower, in the order the store returns them.
    pub async fn list_all(&self) -> Result<Vec<SuperpowerView>, HeroError> {
        let mut tx = self.store.begin_read_only().await?;
        let superpowers = tx.list_superpowers().await?;
        tx.commit().await?;

        Ok(superpowers.iter().map(assembler::superpower_to_view).collect())
    }
}
