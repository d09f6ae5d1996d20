//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{CatalogStore, ClockPort};
use crate::use_cases::{
    self,
    management::{HeroCrud, SuperpowerCatalog},
};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub clock: Arc<dyn ClockPort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub management: use_cases::ManagementUseCases,
    pub seed: use_cases::SeedCatalog,
}

impl App {
    /// Wire every use case to the same catalog store.
    pub fn new(store: Arc<dyn CatalogStore>, clock: Arc<dyn ClockPort>) -> Self {
        let management = use_cases::ManagementUseCases::new(
            HeroCrud::new(store.clone()),
            SuperpowerCatalog::new(store.clone()),
        );
        let seed = use_cases::SeedCatalog::new(store);

        Self {
            use_cases: UseCases { management, seed },
            clock,
        }
    }
}
