// Shared prompt fragments used across generation prompts.
// Feature-specific templates live next to the feature (see generation::prompts).

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Every idea has to end in something a hiring manager can click on.
pub const ARTIFACT_INSTRUCTION: &str = "\
    CRITICAL: Every idea must produce a concrete, shareable artifact \
    (portfolio piece, live demo, dashboard, case study, short video, or similar). \
    Name plausible tools or platforms to build it with, name the distribution channel \
    where it will be shared (LinkedIn, GitHub, a niche community, a newsletter, ...), \
    and state ONE measurable success metric.";

/// Discourages repeats across calls for the same user.
pub const NOVELTY_INSTRUCTION: &str = "\
    Treat the novelty seed below as a source of variety: do not reuse stock ideas, \
    and never repeat any title from the exclusion list, even reworded.";
