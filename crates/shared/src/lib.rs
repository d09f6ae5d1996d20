//! Herodex Shared - wire types for the catalog REST API
//!
//! This crate contains the request and response shapes exchanged with HTTP
//! clients:
//! - Hero input and hero/superpower views
//! - The JSON error envelope
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and chrono
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - use raw `i64` in DTOs

pub mod requests;
pub mod responses;

pub use requests::HeroInput;
pub use responses::{ErrorResponse, FieldErrorData, HeroView, SuperpowerView};
