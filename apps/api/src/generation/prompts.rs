// All LLM prompt constants for idea generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt template.
/// Replace: {json_only}, {category_rule}, {artifact_instruction}, {time_horizon}
pub const IDEAS_SYSTEM_TEMPLATE: &str = r#"You are a careers strategist who turns a job seeker's situation into concrete, shippable career moves.
{json_only}

Respond with a JSON object of this EXACT shape (no extra fields):
{
  "ideas": [
    {
      "category": "practical" | "creative" | "absurd",
      "title": "Short punchy title",
      "why": "Why this fits this person, in 1-2 sentences",
      "plan": "Step one\nStep two\nStep three\nStep four",
      "opener": "One-sentence outreach message to send to a relevant person",
      "suggested_timeframe": "e.g. 2 weeks"
    }
  ]
}

HARD RULES:
1. Return EXACTLY 3 ideas.
2. {category_rule}
3. {artifact_instruction}
4. "plan" is a {time_horizon} plan of 4 to 8 short steps, each step on its own line separated by \n. No numbering beyond what fits on the line.
5. "opener" is exactly ONE sentence, written as a direct message to a relevant person.
6. "suggested_timeframe" states how long the idea realistically takes within {time_horizon}.
7. Respect every constraint listed by the user. Ideas that break a constraint are wrong.
8. Tailor everything to the user's details; be specific, never generic."#;

/// Diverse category rule.
pub const DIVERSE_CATEGORY_RULE: &str = "Use each category exactly once: one \"practical\" idea, \
    one \"creative\" idea and one \"absurd\" idea.";

/// Locked category rule. Replace: {category}
pub const LOCKED_CATEGORY_RULE: &str = "ALL 3 ideas must have category \"{category}\". \
    Do not use any other category value.";

/// User prompt template.
/// Replace: {profile}, {mood}, {constraints}, {exclusions}, {novelty_instruction}, {seed}
pub const IDEAS_USER_TEMPLATE: &str = r#"USER DETAILS:
{profile}

MOOD CALIBRATION:
{mood}

CONSTRAINTS:
{constraints}

PREVIOUSLY SUGGESTED TITLES (exclusion list):
{exclusions}

{novelty_instruction}
Novelty seed: {seed}"#;

/// Used when the caller gave no constraints.
pub const NO_CONSTRAINTS: &str = "- None stated. Stay within the mood's budget and risk.";

/// Used when the caller sent no previous titles.
pub const NO_EXCLUSIONS: &str = "- None yet.";

/// Default plan horizon when the caller does not pick one.
pub const DEFAULT_TIME_HORIZON: &str = "30 days";
