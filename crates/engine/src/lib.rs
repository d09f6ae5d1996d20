//! Herodex engine: the hero catalog service.
//!
//! Layers, outermost first: `api` (axum routes), `use_cases` (catalog
//! operations), `infrastructure` (SQLite and in-memory stores behind the
//! port traits).

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
