use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three idea flavours, from safest to most speculative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Practical,
    Creative,
    Absurd,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Practical, Category::Creative, Category::Absurd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Practical => "practical",
            Category::Creative => "creative",
            Category::Absurd => "absurd",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How categories are assigned across the three ideas of one response.
///
/// Fixed per deployment (`IDEA_CATEGORY_POLICY`). The prompt, the provider
/// schema and the validator all read the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryPolicy {
    /// One idea per category.
    #[default]
    Diverse,
    /// All three ideas share the category selected from the mood tier.
    Locked,
}

impl FromStr for CategoryPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diverse" => Ok(CategoryPolicy::Diverse),
            "locked" => Ok(CategoryPolicy::Locked),
            other => Err(anyhow::anyhow!("unknown category policy '{other}'")),
        }
    }
}

/// A single career idea as returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Idea {
    pub category: Category,
    pub title: String,
    pub why: String,
    /// 4–8 short steps separated by `\n`.
    pub plan: String,
    /// One-sentence outreach opener.
    pub opener: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_timeframe: Option<String>,
}

/// A validated generation: exactly three ideas plus the knobs that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub ideas: Vec<Idea>,
    pub mood: u8,
    pub temperature: f64,
}

/// What a generation request resolves to when nothing failed hard.
///
/// `NoUsableIdeas` is the soft content-shape failure: the provider answered,
/// but the payload was unusable. Callers may retry with a new novelty seed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Ok(GenerationResult),
    NoUsableIdeas { message: String, raw: String },
}
