//! Response validation. Turns the model's text into exactly three ideas or a `ShapeError`.
//!
//! Parse order: `{ "ideas": [...] }` first, then a bare `[...]` for providers
//! that ignore the wrapper. Nothing is repaired: a wrong payload is reported,
//! and that includes fields outside the schema.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::generation::schema::IDEA_COUNT;
use crate::llm_client::strip_json_fences;
use crate::models::idea::{Category, Idea};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("Model returned content that is not a JSON ideas payload")]
    Unparseable,

    #[error("Malformed ideas payload (need 3 items, got {found})")]
    WrongCount { found: usize },

    #[error("Idea {index} has an empty '{field}' field")]
    BlankField { index: usize, field: &'static str },

    #[error("Ideas must include categories: practical, creative, absurd")]
    CategoriesNotDistinct,

    #[error("All ideas must use category '{expected}'")]
    CategoryNotLocked { expected: Category },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IdeasEnvelope {
    ideas: Vec<Idea>,
}

/// Validates a raw model payload.
///
/// `locked` is `Some(category)` under the locked policy, `None` for diverse.
/// Accepted ideas come back in the order the model produced them.
pub fn validate_ideas(raw: &str, locked: Option<Category>) -> Result<Vec<Idea>, ShapeError> {
    let ideas = parse_ideas(raw)?;

    if ideas.len() != IDEA_COUNT {
        return Err(ShapeError::WrongCount { found: ideas.len() });
    }

    for (index, idea) in ideas.iter().enumerate() {
        if let Some(field) = first_blank_field(idea) {
            return Err(ShapeError::BlankField { index, field });
        }
    }

    match locked {
        None => {
            let seen: HashSet<Category> = ideas.iter().map(|i| i.category).collect();
            let expected: HashSet<Category> = Category::ALL.into_iter().collect();
            if seen != expected {
                return Err(ShapeError::CategoriesNotDistinct);
            }
        }
        Some(expected) => {
            if ideas.iter().any(|i| i.category != expected) {
                return Err(ShapeError::CategoryNotLocked { expected });
            }
        }
    }

    Ok(ideas)
}

fn parse_ideas(raw: &str) -> Result<Vec<Idea>, ShapeError> {
    let text = strip_json_fences(raw);

    if let Ok(envelope) = serde_json::from_str::<IdeasEnvelope>(text) {
        if !envelope.ideas.is_empty() {
            return Ok(envelope.ideas);
        }
    }

    serde_json::from_str::<Vec<Idea>>(text).map_err(|_| {
        // An envelope with an empty array parses but yields nothing usable.
        match serde_json::from_str::<IdeasEnvelope>(text) {
            Ok(_) => ShapeError::WrongCount { found: 0 },
            Err(_) => ShapeError::Unparseable,
        }
    })
}

fn first_blank_field(idea: &Idea) -> Option<&'static str> {
    [
        ("title", &idea.title),
        ("why", &idea.why),
        ("plan", &idea.plan),
        ("opener", &idea.opener),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
}
