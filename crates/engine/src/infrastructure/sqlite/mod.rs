//! SQLite-backed catalog storage.

mod connection;
mod store;

pub use connection::{ensure_schema, open_pool};
pub use store::SqliteCatalogStore;
