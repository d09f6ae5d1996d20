//! Response bodies returned by the catalog API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Public projection of a superpower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperpowerView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Public projection of a hero with its resolved superpowers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroView {
    pub id: i64,
    pub real_name: String,
    pub hero_name: String,
    pub date_of_birth: NaiveDate,
    pub height: f64,
    pub weight: f64,
    pub superpowers: Vec<SuperpowerView>,
}

// =============================================================================
// Error envelope
// =============================================================================

/// JSON body sent with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Short error classification (e.g., "Resource not found")
    pub error: String,
    /// Human-readable detail
    pub message: String,
    /// Request path that failed
    pub path: String,
    pub timestamp: DateTime<Utc>,
    /// Per-field violations, present only for invalid input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldErrorData>>,
}

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrorData {
    pub field: String,
    pub message: String,
    /// Value the client sent, absent when the field was missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<serde_json::Value>,
}
