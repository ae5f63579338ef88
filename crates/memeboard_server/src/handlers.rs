//! Request handlers for the memecoin routes.
//!
//! # Responsibility
//! - Bind HTTP verbs and bodies to core service operations.
//! - Enforce the strict request-body policy (unknown fields rejected).
//!
//! # Invariants
//! - The update path forwards the description only; no other column can be
//!   reached through it.
//! - Id parsing failures return the same `validation_error` envelope as
//!   empty names.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use log::info;
use memeboard_core::{core_version, CoinId, CreateCoinRequest, Memecoin};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// Body for `POST /memecoins`. Unknown fields are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCoinBody {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body for `PATCH /memecoins/{id}`. Only the description is updatable;
/// payloads naming any other field are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCoinBody {
    pub description: String,
}

/// Confirmation envelope for update/delete operations.
#[derive(Debug, Serialize)]
pub struct ConfirmationResponse {
    pub message: &'static str,
}

/// Response for a successful poke: the id and its new score.
#[derive(Debug, Serialize)]
pub struct PokeResponse {
    pub id: CoinId,
    pub popularity_score: i64,
}

/// Liveness probe payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn create_coin(
    State(state): State<AppState>,
    Json(body): Json<CreateCoinBody>,
) -> Result<(StatusCode, Json<Memecoin>), ApiError> {
    let request = CreateCoinRequest {
        name: body.name,
        description: body.description,
    };
    let coin = state.with_service(|service| service.create_coin(&request))?;
    info!(
        "event=coin_create module=http status=ok id={} name_len={}",
        coin.id,
        coin.name.len()
    );
    Ok((StatusCode::CREATED, Json(coin)))
}

pub async fn get_coin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Memecoin>, ApiError> {
    let id = parse_coin_id(&id)?;
    let coin = state
        .with_service(|service| service.get_coin(id, false))?
        .ok_or_else(|| ApiError::not_found("memecoin not found"))?;
    Ok(Json(coin))
}

pub async fn update_coin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCoinBody>,
) -> Result<Json<ConfirmationResponse>, ApiError> {
    let id = parse_coin_id(&id)?;
    state.with_service(|service| service.update_description(id, &body.description))?;
    info!("event=coin_update module=http status=ok id={id}");
    Ok(Json(ConfirmationResponse {
        message: "memecoin updated",
    }))
}

pub async fn delete_coin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConfirmationResponse>, ApiError> {
    let id = parse_coin_id(&id)?;
    state.with_service(|service| service.soft_delete_coin(id))?;
    info!("event=coin_delete module=http status=ok id={id}");
    Ok(Json(ConfirmationResponse {
        message: "memecoin deleted",
    }))
}

pub async fn poke_coin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PokeResponse>, ApiError> {
    let id = parse_coin_id(&id)?;
    let popularity_score = state.with_service(|service| service.poke_coin(id))?;
    info!("event=coin_poke module=http status=ok id={id} score={popularity_score}");
    Ok(Json(PokeResponse {
        id,
        popularity_score,
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: core_version(),
    })
}

fn parse_coin_id(raw: &str) -> Result<CoinId, ApiError> {
    raw.parse::<CoinId>()
        .map_err(|_| ApiError::validation(format!("invalid id format: `{raw}`")))
}
