//! Use cases - User story orchestration.
//!
//! `management` serves the public catalog operations; `seed` runs once at
//! startup.

pub mod management;
pub mod seed;
pub mod validation;

pub use management::ManagementUseCases;
pub use seed::SeedCatalog;
