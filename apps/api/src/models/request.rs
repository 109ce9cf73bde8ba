use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Inbound body for `POST /api/v1/ideas`.
///
/// Everything except `mood` is optional. `mood` stays an `Option` here so a
/// missing value surfaces as a validation error from the generator instead of
/// a generic JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub mood: Option<f64>,
    #[serde(default)]
    pub target_role: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub background: String,
    #[serde(default, deserialize_with = "string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub interests: Vec<String>,
    #[serde(default)]
    pub additional_context: String,
    #[serde(default)]
    pub constraints: Option<Constraints>,
    #[serde(default)]
    pub time_horizon: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub previous_titles: Vec<String>,
    #[serde(default)]
    pub novelty_seed: Option<NoveltySeed>,
}

/// Caller constraints: either structured toggles or free text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Constraints {
    Flags(ConstraintFlags),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintFlags {
    #[serde(default)]
    pub remote_only: bool,
    #[serde(default)]
    pub no_coding: bool,
    #[serde(default)]
    pub part_time_ok: bool,
    #[serde(default)]
    pub budget_ceiling: Option<String>,
    #[serde(default)]
    pub custom: Option<String>,
}

impl Constraints {
    /// Renders the constraints as prompt lines, one per active constraint.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Constraints::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    vec![]
                } else {
                    vec![text.to_string()]
                }
            }
            Constraints::Flags(flags) => {
                let mut lines = Vec::new();
                if flags.remote_only {
                    lines.push("Remote-only: every idea must be doable fully remotely.".to_string());
                }
                if flags.no_coding {
                    lines.push(
                        "No coding: rely on no-code / low-code tools; do not require writing software."
                            .to_string(),
                    );
                }
                if flags.part_time_ok {
                    lines.push(
                        "Part-time OK: ideas may fit alongside other work (evenings, weekends)."
                            .to_string(),
                    );
                }
                if let Some(cap) = flags.budget_ceiling.as_deref().map(str::trim) {
                    if !cap.is_empty() {
                        lines.push(format!("Budget ceiling: spend no more than {cap}."));
                    }
                }
                if let Some(custom) = flags.custom.as_deref().map(str::trim) {
                    if !custom.is_empty() {
                        lines.push(custom.to_string());
                    }
                }
                lines
            }
        }
    }
}

/// Opaque token that nudges the model away from repeating itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoveltySeed {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for NoveltySeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoveltySeed::Text(s) => f.write_str(s),
            NoveltySeed::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Accepts either a JSON array of strings or a single comma-separated string.
/// Blank entries are dropped; order is preserved.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    let items = match raw {
        None => vec![],
        Some(Raw::List(items)) => items,
        Some(Raw::Joined(s)) => s.split(',').map(str::to_string).collect(),
    };

    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_request_defaults_everything_but_mood() {
        let req: GenerationRequest = serde_json::from_value(json!({ "mood": 5 })).unwrap();
        assert_eq!(req.mood, Some(5.0));
        assert!(req.target_role.is_empty());
        assert!(req.skills.is_empty());
        assert!(req.previous_titles.is_empty());
        assert!(req.constraints.is_none());
        assert!(req.novelty_seed.is_none());
    }

    #[test]
    fn test_missing_mood_deserializes_as_none() {
        let req: GenerationRequest =
            serde_json::from_value(json!({ "targetRole": "PM" })).unwrap();
        assert!(req.mood.is_none());
        assert_eq!(req.target_role, "PM");
    }

    #[test]
    fn test_interests_accept_comma_separated_string() {
        let req: GenerationRequest = serde_json::from_value(json!({
            "mood": 3,
            "interests": "climate tech, fintech, ,edtech"
        }))
        .unwrap();
        assert_eq!(req.interests, vec!["climate tech", "fintech", "edtech"]);
    }

    #[test]
    fn test_skills_accept_array_and_null() {
        let req: GenerationRequest = serde_json::from_value(json!({
            "mood": 3,
            "skills": ["SQL", " Python "],
            "previousTitles": null
        }))
        .unwrap();
        assert_eq!(req.skills, vec!["SQL", "Python"]);
        assert!(req.previous_titles.is_empty());
    }

    #[test]
    fn test_constraint_flags_render_lines() {
        let req: GenerationRequest = serde_json::from_value(json!({
            "mood": 3,
            "constraints": { "remoteOnly": true, "noCoding": true, "budgetCeiling": "$200" }
        }))
        .unwrap();
        let lines = req.constraints.unwrap().lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Remote-only"));
        assert!(lines[1].starts_with("No coding"));
        assert!(lines[2].contains("$200"));
    }

    #[test]
    fn test_constraint_free_text() {
        let req: GenerationRequest = serde_json::from_value(json!({
            "mood": 3,
            "constraints": "must stay in Lisbon"
        }))
        .unwrap();
        assert_eq!(req.constraints.unwrap().lines(), vec!["must stay in Lisbon"]);
    }

    #[test]
    fn test_novelty_seed_string_or_number() {
        let a: GenerationRequest =
            serde_json::from_value(json!({ "mood": 1, "noveltySeed": "abc" })).unwrap();
        assert_eq!(a.novelty_seed.unwrap().to_string(), "abc");

        let b: GenerationRequest =
            serde_json::from_value(json!({ "mood": 1, "noveltySeed": 1712345 })).unwrap();
        assert_eq!(b.novelty_seed.unwrap().to_string(), "1712345");
    }

    #[test]
    fn test_non_numeric_mood_is_rejected() {
        let r = serde_json::from_value::<GenerationRequest>(json!({ "mood": "happy" }));
        assert!(r.is_err());
    }
}
