//! Mood profile: maps the 0–10 mood slider to generation knobs.
//!
//! Pure and total: the same mood always yields the same profile, bit for bit.
//! Tier boundaries are `< 3`, `3..=7`, `> 7` and are shared by the scope/budget/risk
//! strings, the display label and the locked-category mapping.

use serde::Serialize;

use crate::models::idea::Category;

pub const MIN_MOOD: u8 = 0;
pub const MAX_MOOD: u8 = 10;
/// Used when the caller's mood is not a finite number.
pub const NEUTRAL_MOOD: u8 = 5;

const MIN_TEMPERATURE: f64 = 0.2;
const TEMPERATURE_SPAN: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodTier {
    /// Conservative: mood 0–2.
    Low,
    /// Balanced: mood 3–7.
    Mid,
    /// Maximal: mood 8–10.
    High,
}

impl MoodTier {
    pub fn from_mood(mood: u8) -> Self {
        if mood < 3 {
            MoodTier::Low
        } else if mood <= 7 {
            MoodTier::Mid
        } else {
            MoodTier::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodTier::Low => "Realistic",
            MoodTier::Mid => "Optimistic",
            MoodTier::High => "Delusional",
        }
    }

    pub fn scope(&self) -> &'static str {
        match self {
            MoodTier::Low => "tight, incremental",
            MoodTier::Mid => "balanced, ambitious but feasible",
            MoodTier::High => "wild, moonshot, rule-bending",
        }
    }

    pub fn budget(&self) -> &'static str {
        match self {
            MoodTier::Low => "under $500 and within 1 week",
            MoodTier::Mid => "reasonable budget within 1–4 weeks",
            MoodTier::High => "ignore budget; optimize for spectacle",
        }
    }

    pub fn risk(&self) -> &'static str {
        match self {
            MoodTier::Low => "minimize risk; high feasibility",
            MoodTier::Mid => "moderate risk; good upside",
            MoodTier::High => "accept high risk and unknowns",
        }
    }

    /// Category used for all three ideas under the locked policy.
    pub fn locked_category(&self) -> Category {
        match self {
            MoodTier::Low => Category::Creative,
            MoodTier::Mid => Category::Practical,
            MoodTier::High => Category::Absurd,
        }
    }
}

/// Normalized category mixture. Components are non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryWeights {
    pub practical: f64,
    pub creative: f64,
    pub absurd: f64,
}

impl CategoryWeights {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Practical => self.practical,
            Category::Creative => self.creative,
            Category::Absurd => self.absurd,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodProfile {
    pub mood: u8,
    pub tier: MoodTier,
    pub weights: CategoryWeights,
    pub temperature: f64,
}

impl MoodProfile {
    pub fn label(&self) -> &'static str {
        self.tier.label()
    }

    pub fn scope(&self) -> &'static str {
        self.tier.scope()
    }

    pub fn budget(&self) -> &'static str {
        self.tier.budget()
    }

    pub fn risk(&self) -> &'static str {
        self.tier.risk()
    }
}

/// Clamps any caller-supplied number into the 0–10 slider range and rounds it.
pub fn resolve_mood(raw: f64) -> u8 {
    if !raw.is_finite() {
        return NEUTRAL_MOOD;
    }
    raw.clamp(MIN_MOOD as f64, MAX_MOOD as f64).round() as u8
}

/// Computes the profile for an already-resolved mood. Values above 10 are clamped.
pub fn mood_profile(mood: u8) -> MoodProfile {
    let mood = mood.min(MAX_MOOD);
    let m = mood as f64;

    let practical = (1.0 - m / 6.0).max(0.0);
    let absurd = ((m - 4.0) / 6.0).max(0.0);
    let creative = 1.0 - (m - 5.0).abs() / 5.0;

    let sum = practical + creative + absurd;
    let sum = if sum > 0.0 { sum } else { 1.0 };

    MoodProfile {
        mood,
        tier: MoodTier::from_mood(mood),
        weights: CategoryWeights {
            practical: practical / sum,
            creative: creative / sum,
            absurd: absurd / sum,
        },
        temperature: MIN_TEMPERATURE + (m / MAX_MOOD as f64) * TEMPERATURE_SPAN,
    }
}
