//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use fichas_domain::{Character, CharacterId, DamageExpression};
use fichas_shared::{
    ApplyEditsRequest, CharacterInput, ParseDamageRequest, ParseDamageResponse, RollBody,
    RollResponse, SystemInfo,
};

use crate::api::auth::Identity;
use crate::api::error::ApiError;
use crate::app::App;

/// Largest accepted request body (sheets carry inline images).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/systems", get(list_systems))
        .route("/api/characters", post(create_character))
        .route("/api/characters/my-characters", get(list_my_characters))
        .route("/api/characters/all", get(list_all_characters))
        .route(
            "/api/characters/{id}",
            get(get_character)
                .put(replace_character)
                .delete(delete_character),
        )
        .route("/api/characters/{id}/edits", post(apply_edits))
        .route("/api/characters/{id}/rolls", post(roll))
        .route("/api/dice/damage/parse", post(parse_damage))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

async fn health() -> &'static str {
    "OK"
}

async fn list_systems(State(app): State<Arc<App>>) -> Json<Vec<SystemInfo>> {
    let systems = app
        .systems
        .list_systems_with_names()
        .into_iter()
        .map(|(id, name)| SystemInfo {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();
    Json(systems)
}

// Unparseable ids cannot name a stored sheet.
fn character_id(raw: &str) -> Result<CharacterId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

// =============================================================================
// Characters
// =============================================================================

async fn create_character(
    State(app): State<Arc<App>>,
    Identity(actor): Identity,
    body: Result<Json<CharacterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Character>), ApiError> {
    let Json(input) = body?;
    let character = app.use_cases.characters.create(&actor, input).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

async fn list_my_characters(
    State(app): State<Arc<App>>,
    Identity(actor): Identity,
) -> Result<Json<Vec<Character>>, ApiError> {
    Ok(Json(app.use_cases.characters.list_mine(&actor).await?))
}

async fn list_all_characters(
    State(app): State<Arc<App>>,
    Identity(actor): Identity,
) -> Result<Json<Vec<Character>>, ApiError> {
    Ok(Json(app.use_cases.characters.list_all(&actor).await?))
}

async fn get_character(
    State(app): State<Arc<App>>,
    Identity(actor): Identity,
    Path(id): Path<String>,
) -> Result<Json<Character>, ApiError> {
    let id = character_id(&id)?;
    Ok(Json(app.use_cases.characters.get(&actor, id).await?))
}

async fn replace_character(
    State(app): State<Arc<App>>,
    Identity(actor): Identity,
    Path(id): Path<String>,
    body: Result<Json<CharacterInput>, JsonRejection>,
) -> Result<Json<Character>, ApiError> {
    let id = character_id(&id)?;
    let Json(input) = body?;
    Ok(Json(
        app.use_cases.characters.replace(&actor, id, input).await?,
    ))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    Identity(actor): Identity,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = character_id(&id)?;
    app.use_cases.characters.delete(&actor, id).await?;
    Ok(Json(json!({ "message": "Ficha deletada com sucesso" })))
}

async fn apply_edits(
    State(app): State<Arc<App>>,
    Identity(actor): Identity,
    Path(id): Path<String>,
    body: Result<Json<ApplyEditsRequest>, JsonRejection>,
) -> Result<Json<Character>, ApiError> {
    let id = character_id(&id)?;
    let Json(request) = body?;
    Ok(Json(
        app.use_cases
            .characters
            .apply_edits(&actor, id, &request.edits)
            .await?,
    ))
}

async fn roll(
    State(app): State<Arc<App>>,
    Identity(actor): Identity,
    Path(id): Path<String>,
    body: Result<Json<RollBody>, JsonRejection>,
) -> Result<Json<RollResponse>, ApiError> {
    let id = character_id(&id)?;
    let Json(request) = body?;
    Ok(Json(app.use_cases.characters.roll(&actor, id, request).await?))
}

// =============================================================================
// Dice
// =============================================================================

async fn parse_damage(
    body: Result<Json<ParseDamageRequest>, JsonRejection>,
) -> Result<Json<ParseDamageResponse>, ApiError> {
    let Json(request) = body?;
    let expression = DamageExpression::parse(&request.expression)?;
    Ok(Json(ParseDamageResponse {
        expression: expression.to_string(),
        terms: expression.terms().to_vec(),
    }))
}
