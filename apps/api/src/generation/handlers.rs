//! Axum route handlers for the Ideas API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::errors::AppError;
use crate::generation::generator::generate_ideas;
use crate::models::idea::GenerationOutcome;
use crate::models::request::GenerationRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvCheckResponse {
    pub has_key: bool,
}

/// POST /api/v1/ideas
///
/// Generates three mood-calibrated career ideas. A payload the model got wrong
/// comes back as `status: "no_usable_ideas"` with a 200, not as an error.
pub async fn handle_generate_ideas(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationOutcome>, AppError> {
    let Json(request) =
        payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    // Dropping the handler future (client gone) cancels any pending retries.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let outcome = generate_ideas(
        state.llm.as_ref(),
        state.config.category_policy,
        request,
        &cancel,
    )
    .await?;

    Ok(Json(outcome))
}

/// GET /api/v1/env-check
///
/// Reports whether the provider credential is configured. Never echoes the key.
pub async fn handle_env_check(State(state): State<AppState>) -> Json<EnvCheckResponse> {
    Json(EnvCheckResponse {
        has_key: state.config.has_api_key(),
    })
}
