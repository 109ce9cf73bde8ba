// Idea generation pipeline.
// Implements: mood profile, prompt composition, output schema, validation, orchestration.
// All LLM calls go through llm_client, never direct provider calls here.

pub mod composer;
pub mod generator;
pub mod handlers;
pub mod mood;
pub mod prompts;
pub mod schema;
pub mod validator;
