//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use herodex_domain::HeroId;
use herodex_shared::{HeroInput, HeroView, SuperpowerView};
use serde_json::Value;

use super::error::{ApiError, ApiFailure, ErrorContext};
use crate::app::App;
use crate::use_cases::management::HeroError;
use crate::use_cases::validation::ValidationError;

/// Fields every hero body must carry with a non-null value.
const HERO_FIELDS: [&str; 6] = [
    "realName",
    "heroName",
    "dateOfBirth",
    "height",
    "weight",
    "superpowerIds",
];

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/heroes", get(list_heroes).post(create_hero))
        .route(
            "/api/heroes/{id}",
            get(get_hero).put(update_hero).delete(delete_hero),
        )
        .route("/api/superpowers", get(list_superpowers))
}

async fn health() -> &'static str {
    "OK"
}

fn hero_id(
    ctx: &ErrorContext,
    path: Result<Path<i64>, PathRejection>,
) -> Result<HeroId, ApiFailure> {
    let Path(id) = path.map_err(|e| ctx.fail(ApiError::bad_request(e.body_text())))?;
    Ok(HeroId::new(id))
}

/// Parse a hero body, returning the raw JSON alongside the typed input.
///
/// Absent or null fields are reported as field errors; values of the wrong
/// type are a plain 400.
fn hero_body(
    ctx: &ErrorContext,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(Value, HeroInput), ApiFailure> {
    let Json(raw) = body.map_err(|e| ctx.fail(ApiError::bad_request(e.body_text())))?;
    if !raw.is_object() {
        return Err(ctx.fail(ApiError::bad_request("Request body must be a JSON object")));
    }

    let missing: Vec<_> = HERO_FIELDS
        .into_iter()
        .filter(|field| raw.get(field).filter(|v| !v.is_null()).is_none())
        .map(|field_name| ValidationError::Missing { field_name })
        .collect();
    if !missing.is_empty() {
        return Err(ctx.fail(HeroError::InvalidInput(missing)));
    }

    let input = serde_json::from_value(raw.clone())
        .map_err(|e| ctx.fail(ApiError::bad_request(e.to_string())))?;
    Ok((raw, input))
}

// =============================================================================
// Heroes
// =============================================================================

async fn list_heroes(
    State(app): State<Arc<App>>,
    ctx: ErrorContext,
) -> Result<Json<Vec<HeroView>>, ApiFailure> {
    let heroes = app
        .use_cases
        .management
        .hero
        .list()
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(Json(heroes))
}

async fn get_hero(
    State(app): State<Arc<App>>,
    ctx: ErrorContext,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<HeroView>, ApiFailure> {
    let id = hero_id(&ctx, path)?;
    let hero = app
        .use_cases
        .management
        .hero
        .get(id)
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(Json(hero))
}

async fn create_hero(
    State(app): State<Arc<App>>,
    ctx: ErrorContext,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<HeroView>), ApiFailure> {
    let (raw, input) = hero_body(&ctx, body)?;
    let hero = app
        .use_cases
        .management
        .hero
        .create(input)
        .await
        .map_err(|e| ctx.fail(ApiError::from(e).with_rejected_values(&raw)))?;

    tracing::info!(hero_id = hero.id, hero_name = %hero.hero_name, "Hero created");
    Ok((StatusCode::CREATED, Json(hero)))
}

async fn update_hero(
    State(app): State<Arc<App>>,
    ctx: ErrorContext,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<HeroView>, ApiFailure> {
    let id = hero_id(&ctx, path)?;
    let (raw, input) = hero_body(&ctx, body)?;
    let hero = app
        .use_cases
        .management
        .hero
        .update(id, input)
        .await
        .map_err(|e| ctx.fail(ApiError::from(e).with_rejected_values(&raw)))?;

    tracing::info!(hero_id = hero.id, "Hero updated");
    Ok(Json(hero))
}

async fn delete_hero(
    State(app): State<Arc<App>>,
    ctx: ErrorContext,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiFailure> {
    let id = hero_id(&ctx, path)?;
    app.use_cases
        .management
        .hero
        .delete(id)
        .await
        .map_err(|e| ctx.fail(e))?;

    tracing::info!(hero_id = %id, "Hero deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Superpowers
// =============================================================================

async fn list_superpowers(
    State(app): State<Arc<App>>,
    ctx: ErrorContext,
) -> Result<Json<Vec<SuperpowerView>>, ApiFailure> {
    let superpowers = app
        .use_cases
        .management
        .superpower
        .list_all()
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(Json(superpowers))
}
