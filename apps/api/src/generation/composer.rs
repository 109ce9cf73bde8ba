//! Prompt composition: fills the idea templates from the request and mood profile.
//!
//! The validator can only check shape, so everything the model must honour
//! semantically (artifact, tools, channel, metric, constraints, exclusions)
//! has to be spelled out here.

use crate::generation::mood::MoodProfile;
use crate::generation::prompts::{
    DEFAULT_TIME_HORIZON, DIVERSE_CATEGORY_RULE, IDEAS_SYSTEM_TEMPLATE, IDEAS_USER_TEMPLATE,
    LOCKED_CATEGORY_RULE, NO_CONSTRAINTS, NO_EXCLUSIONS,
};
use crate::llm_client::prompts::{ARTIFACT_INSTRUCTION, JSON_ONLY_SYSTEM, NOVELTY_INSTRUCTION};
use crate::models::idea::{Category, CategoryPolicy};
use crate::models::request::GenerationRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub system: String,
    pub user: String,
}

/// Builds the system and user instructions for one generation call.
pub fn compose_prompt(
    request: &GenerationRequest,
    profile: &MoodProfile,
    policy: CategoryPolicy,
    novelty_seed: &str,
) -> ComposedPrompt {
    let time_horizon = request
        .time_horizon
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or(DEFAULT_TIME_HORIZON);

    let system = fill_template(
        IDEAS_SYSTEM_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_SYSTEM),
            ("category_rule", &category_rule(policy, profile)),
            ("artifact_instruction", ARTIFACT_INSTRUCTION),
            ("time_horizon", time_horizon),
        ],
    );

    let user = fill_template(
        IDEAS_USER_TEMPLATE,
        &[
            ("profile", &profile_block(request)),
            ("mood", &mood_block(profile)),
            ("constraints", &constraints_block(request)),
            ("exclusions", &exclusions_block(&request.previous_titles)),
            ("novelty_instruction", NOVELTY_INSTRUCTION),
            ("seed", novelty_seed),
        ],
    );

    ComposedPrompt { system, user }
}

/// Substitutes `{name}` slots in one left-to-right pass.
///
/// Inserted values are never re-scanned, so caller text containing `{seed}` or
/// similar reaches the model verbatim. Braces that do not name a known slot
/// (the JSON shape in the system template) are copied through unchanged.
fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let slot = after.find('}').and_then(|close| {
            let name = &after[..close];
            slots
                .iter()
                .find(|(slot_name, _)| *slot_name == name)
                .map(|(_, value)| (close, *value))
        });
        match slot {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// The category the validator must see on all three ideas, if any.
pub fn expected_locked_category(policy: CategoryPolicy, profile: &MoodProfile) -> Option<Category> {
    match policy {
        CategoryPolicy::Diverse => None,
        CategoryPolicy::Locked => Some(profile.tier.locked_category()),
    }
}

fn category_rule(policy: CategoryPolicy, profile: &MoodProfile) -> String {
    match expected_locked_category(policy, profile) {
        None => DIVERSE_CATEGORY_RULE.to_string(),
        Some(category) => LOCKED_CATEGORY_RULE.replace("{category}", category.as_str()),
    }
}

fn profile_block(request: &GenerationRequest) -> String {
    let mut lines = Vec::new();

    push_field(&mut lines, "Target role", &request.target_role);
    push_field(&mut lines, "Industry", &request.industry);
    push_field(&mut lines, "Background", &request.background);
    if !request.skills.is_empty() {
        lines.push(format!("- Skills: {}", request.skills.join(", ")));
    }
    if !request.interests.is_empty() {
        lines.push(format!("- Interests: {}", request.interests.join(", ")));
    }
    push_field(&mut lines, "Additional context", &request.additional_context);

    if lines.is_empty() {
        return "- No details provided. Suggest broadly useful moves for a job seeker.".to_string();
    }
    lines.join("\n")
}

fn push_field(lines: &mut Vec<String>, label: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        lines.push(format!("- {label}: {value}"));
    }
}

fn mood_block(profile: &MoodProfile) -> String {
    let mix = Category::ALL
        .iter()
        .map(|c| format!("{c} {}%", (profile.weights.get(*c) * 100.0).round() as u32))
        .collect::<Vec<_>>()
        .join(", ");
    [
        format!("- Mood: {}/10 ({})", profile.mood, profile.label()),
        format!("- Overall flavour mix: {mix}"),
        format!("- Scope: {}", profile.scope()),
        format!("- Budget: {}", profile.budget()),
        format!("- Risk: {}", profile.risk()),
    ]
    .join("\n")
}

fn constraints_block(request: &GenerationRequest) -> String {
    let lines = request
        .constraints
        .as_ref()
        .map(|c| c.lines())
        .unwrap_or_default();
    if lines.is_empty() {
        return NO_CONSTRAINTS.to_string();
    }
    lines
        .iter()
        .map(|l| format!("- {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn exclusions_block(previous_titles: &[String]) -> String {
    if previous_titles.is_empty() {
        return NO_EXCLUSIONS.to_string();
    }
    let mut lines: Vec<String> = previous_titles
        .iter()
        .map(|t| format!("- \"{t}\""))
        .collect();
    lines.push("Do NOT suggest any of these titles again, or close variants of them.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::mood::mood_profile;
    use crate::models::request::{ConstraintFlags, Constraints};

    fn analyst_request() -> GenerationRequest {
        GenerationRequest {
            mood: Some(2.0),
            target_role: "Data Analyst".to_string(),
            industry: "Healthcare".to_string(),
            skills: vec!["SQL".to_string()],
            interests: vec!["dashboards".to_string()],
            ..GenerationRequest::default()
        }
    }

    #[test]
    fn test_user_prompt_carries_profile_fields() {
        let p = compose_prompt(&analyst_request(), &mood_profile(2), CategoryPolicy::Diverse, "s1");
        assert!(p.user.contains("- Target role: Data Analyst"));
        assert!(p.user.contains("- Industry: Healthcare"));
        assert!(p.user.contains("- Skills: SQL"));
        assert!(p.user.contains("- Interests: dashboards"));
        assert!(!p.user.contains("Background"));
    }

    #[test]
    fn test_mood_block_reflects_profile() {
        let p = compose_prompt(&analyst_request(), &mood_profile(2), CategoryPolicy::Diverse, "s1");
        assert!(p.user.contains("Mood: 2/10 (Realistic)"));
        assert!(p.user.contains("Scope: tight, incremental"));
        assert!(p.user.contains("Budget: under $500 and within 1 week"));
        assert!(p.user.contains("Risk: minimize risk; high feasibility"));
        assert!(p.user.contains("absurd 0%"));
    }

    #[test]
    fn test_previous_titles_become_exclusion_list() {
        let mut req = analyst_request();
        req.previous_titles = vec!["Build a dashboard".to_string()];
        let p = compose_prompt(&req, &mood_profile(2), CategoryPolicy::Diverse, "s1");
        assert!(p.user.contains("Build a dashboard"));
        assert!(p.user.contains("Do NOT suggest any of these titles again"));
    }

    #[test]
    fn test_no_previous_titles_uses_placeholder() {
        let p = compose_prompt(&analyst_request(), &mood_profile(2), CategoryPolicy::Diverse, "s1");
        assert!(p.user.contains(NO_EXCLUSIONS));
    }

    #[test]
    fn test_novelty_seed_is_embedded() {
        let p = compose_prompt(
            &analyst_request(),
            &mood_profile(2),
            CategoryPolicy::Diverse,
            "seed-8f2a",
        );
        assert!(p.user.contains("Novelty seed: seed-8f2a"));
    }

    #[test]
    fn test_constraints_are_surfaced() {
        let mut req = analyst_request();
        req.constraints = Some(Constraints::Flags(ConstraintFlags {
            remote_only: true,
            part_time_ok: true,
            custom: Some("No travel before June".to_string()),
            ..ConstraintFlags::default()
        }));
        let p = compose_prompt(&req, &mood_profile(5), CategoryPolicy::Diverse, "s");
        assert!(p.user.contains("- Remote-only"));
        assert!(p.user.contains("- Part-time OK"));
        assert!(p.user.contains("- No travel before June"));
        assert!(!p.user.contains(NO_CONSTRAINTS));
    }

    #[test]
    fn test_system_prompt_states_hard_contract() {
        let p = compose_prompt(&analyst_request(), &mood_profile(2), CategoryPolicy::Diverse, "s");
        assert!(p.system.contains("EXACTLY 3 ideas"));
        assert!(p.system.contains("one \"practical\" idea"));
        assert!(p.system.contains("4 to 8 short steps"));
        assert!(p.system.contains("shareable artifact"));
        assert!(p.system.contains("distribution channel"));
        assert!(p.system.contains("measurable success metric"));
        assert!(p.system.contains("30 days plan"));
        assert!(!p.system.contains("{category_rule}"));
        assert!(!p.system.contains("{artifact_instruction}"));
    }

    #[test]
    fn test_locked_policy_names_single_category() {
        let p = compose_prompt(&analyst_request(), &mood_profile(9), CategoryPolicy::Locked, "s");
        assert!(p.system.contains("ALL 3 ideas must have category \"absurd\""));
        assert!(!p.system.contains(DIVERSE_CATEGORY_RULE));
    }

    #[test]
    fn test_custom_time_horizon() {
        let mut req = analyst_request();
        req.time_horizon = Some("90 days".to_string());
        let p = compose_prompt(&req, &mood_profile(4), CategoryPolicy::Diverse, "s");
        assert!(p.system.contains("90 days plan"));
        assert!(!p.system.contains("{time_horizon}"));
    }

    #[test]
    fn test_caller_text_with_slot_names_is_kept_verbatim() {
        let mut req = analyst_request();
        req.previous_titles = vec!["Publish the {seed} report".to_string()];
        req.background = "I run a {constraints} newsletter".to_string();
        req.time_horizon = Some("{json_only} weeks".to_string());
        let p = compose_prompt(&req, &mood_profile(5), CategoryPolicy::Diverse, "S123");

        assert!(p.user.contains("- \"Publish the {seed} report\""));
        assert!(p.user.contains("- Background: I run a {constraints} newsletter"));
        assert!(p.user.contains("Novelty seed: S123"));
        assert_eq!(p.user.matches("S123").count(), 1);
        assert_eq!(p.user.matches(NO_CONSTRAINTS).count(), 1);
        assert!(p.system.contains("{json_only} weeks plan"));
    }

    #[test]
    fn test_fill_template_leaves_unknown_braces() {
        let out = fill_template("{\"a\": {x}} {y", &[("x", "{x}1")]);
        assert_eq!(out, "{\"a\": {x}1} {y");
    }

    #[test]
    fn test_composition_is_deterministic() {
        let a = compose_prompt(&analyst_request(), &mood_profile(6), CategoryPolicy::Diverse, "x");
        let b = compose_prompt(&analyst_request(), &mood_profile(6), CategoryPolicy::Diverse, "x");
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_request_still_produces_profile_line() {
        let req = GenerationRequest {
            mood: Some(5.0),
            ..GenerationRequest::default()
        };
        let p = compose_prompt(&req, &mood_profile(5), CategoryPolicy::Diverse, "s");
        assert!(p.user.contains("No details provided"));
    }
}
