//! Strict output schema handed to the provider for first-line shape enforcement.

use serde_json::{json, Value};

use crate::models::idea::Category;

pub const SCHEMA_NAME: &str = "career_ideas";

/// Number of ideas every response must carry.
pub const IDEA_COUNT: usize = 3;

const IDEA_FIELDS: [&str; 6] = [
    "category",
    "title",
    "why",
    "plan",
    "opener",
    "suggested_timeframe",
];

/// Builds the JSON schema for the `ideas` envelope.
///
/// With a locked category the `category` enum narrows to that single value.
pub fn ideas_schema(locked: Option<Category>) -> Value {
    let categories: Vec<&str> = match locked {
        Some(category) => vec![category.as_str()],
        None => Category::ALL.iter().map(Category::as_str).collect(),
    };

    let mut properties = serde_json::Map::new();
    for field in IDEA_FIELDS {
        let property = if field == "category" {
            json!({ "type": "string", "enum": categories })
        } else {
            json!({ "type": "string" })
        };
        properties.insert(field.to_string(), property);
    }

    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["ideas"],
        "properties": {
            "ideas": {
                "type": "array",
                "minItems": IDEA_COUNT,
                "maxItems": IDEA_COUNT,
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": IDEA_FIELDS,
                    "properties": properties,
                }
            }
        }
    })
}
