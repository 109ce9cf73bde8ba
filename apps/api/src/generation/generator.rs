//! Idea generation: orchestrates one request from raw input to outcome.
//!
//! Flow: validate input → mood profile → compose prompt → schema-constrained
//!       LLM call → validate shape → tagged outcome.
//!
//! Nothing here is persisted and nothing is retried except what `LlmClient`
//! retries at the transport level. Shape failures come back as
//! `GenerationOutcome::NoUsableIdeas` so the caller can re-roll with a new seed.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::composer::{compose_prompt, expected_locked_category};
use crate::generation::mood::{mood_profile, resolve_mood};
use crate::generation::schema::{ideas_schema, SCHEMA_NAME};
use crate::generation::validator::validate_ideas;
use crate::llm_client::{CompletionRequest, LlmClient};
use crate::models::idea::{CategoryPolicy, GenerationOutcome, GenerationResult};
use crate::models::request::GenerationRequest;

/// Runs the full idea generation pipeline for one request.
///
/// Errors:
/// - `Validation` when `mood` is missing (checked before anything else)
/// - `Configuration` when no provider credential is configured
/// - `Upstream` / `Cancelled` from the LLM call
pub async fn generate_ideas(
    llm: Option<&LlmClient>,
    policy: CategoryPolicy,
    request: GenerationRequest,
    cancel: &CancellationToken,
) -> Result<GenerationOutcome, AppError> {
    // Received
    let raw_mood = request.mood.ok_or_else(|| {
        AppError::Validation("Missing required field: mood (number 0–10)".to_string())
    })?;

    let llm = llm.ok_or_else(|| {
        AppError::Configuration("Missing OPENAI_API_KEY environment variable".to_string())
    })?;

    let request_id = Uuid::new_v4();

    // ProfileComputed
    let profile = mood_profile(resolve_mood(raw_mood));
    info!(
        %request_id,
        mood = profile.mood,
        tier = ?profile.tier,
        temperature = profile.temperature,
        "Mood profile computed"
    );

    // PromptBuilt
    let novelty_seed = request
        .novelty_seed
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let locked = expected_locked_category(policy, &profile);
    let prompt = compose_prompt(&request, &profile, policy, &novelty_seed);
    let schema = ideas_schema(locked);
    info!(
        %request_id,
        excluded_titles = request.previous_titles.len(),
        policy = ?policy,
        "Prompt composed"
    );

    // ModelCalled
    let raw = llm
        .generate(
            &CompletionRequest {
                system: &prompt.system,
                user: &prompt.user,
                temperature: profile.temperature,
                schema_name: SCHEMA_NAME,
                schema: &schema,
            },
            cancel,
        )
        .await
        .map_err(|e| {
            warn!(%request_id, "Idea generation LLM call failed: {e}");
            AppError::from(e)
        })?;

    // Validated | Rejected
    match validate_ideas(&raw, locked) {
        Ok(ideas) => {
            info!(%request_id, "Generated {} ideas", ideas.len());
            Ok(GenerationOutcome::Ok(GenerationResult {
                ideas,
                mood: profile.mood,
                temperature: profile.temperature,
            }))
        }
        Err(shape) => {
            warn!(
                %request_id,
                "Model payload rejected: {shape} (payload starts {:?})",
                raw.chars().take(80).collect::<String>()
            );
            Ok(GenerationOutcome::NoUsableIdeas {
                message: format!("No usable ideas this time: {shape}. Try again for a fresh batch."),
                raw,
            })
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
