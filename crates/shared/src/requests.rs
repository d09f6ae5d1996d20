//! Request bodies accepted by the catalog API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body for creating a hero or fully replacing an existing one.
///
/// Every field is required; an update with this shape overwrites all of the
/// hero's attributes and its whole superpower set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroInput {
    pub real_name: String,
    pub hero_name: String,
    /// Serialized as `YYYY-MM-DD`
    pub date_of_birth: NaiveDate,
    pub height: f64,
    pub weight: f64,
    /// Ids of existing superpowers; duplicates are treated as one
    pub superpower_ids: Vec<i64>,
}
