use std::time::Duration;

use crate::models::domain::GenerationTier;

const PRIMARY_TIMEOUT: u64 = 30;
const SIMPLIFIED_TIMEOUT: u64 = 20;

const PRIMARY_TEMPERATURE: f32 = 0.8;
const SIMPLIFIED_TEMPERATURE: f32 = 0.7;

const SIMPLIFIED_MAX_TOKENS: u32 = 600;
const SIMPLIFIED_WORDS: u32 = 150;
const MAX_TOKEN_BUDGET: u32 = 4096;
// Room for the quiz, image prompts and JSON syntax on top of the story itself.
const QUIZ_TOKEN_OVERHEAD: u32 = 900;

/// Target story length for a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthProfile {
    pub words: u32,
}

impl LengthProfile {
    pub fn for_grade(grade: u8) -> Self {
        let words = match grade {
            0..=2 => 300,
            3..=5 => 500,
            6..=8 => 750,
            _ => 1000,
        };
        Self { words }
    }

    pub fn simplified() -> Self {
        Self {
            words: SIMPLIFIED_WORDS,
        }
    }

    /// Completion budget for a story of this length plus its quiz.
    pub fn token_budget(&self) -> u32 {
        (self.words * 2 + QUIZ_TOKEN_OVERHEAD).min(MAX_TOKEN_BUDGET)
    }
}

/// Call parameters for one tier of the generation chain.
#[derive(Debug, Clone, PartialEq)]
pub struct TierSpec {
    pub tier: GenerationTier,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl TierSpec {
    pub fn new(tier: GenerationTier) -> Self {
        Self {
            tier,
            max_tokens: SIMPLIFIED_MAX_TOKENS,
            temperature: PRIMARY_TEMPERATURE,
            timeout: Duration::from_secs(PRIMARY_TIMEOUT),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self
    }
}

pub fn primary_tier(profile: LengthProfile) -> TierSpec {
    TierSpec::new(GenerationTier::Primary)
        .with_max_tokens(profile.token_budget())
        .with_temperature(PRIMARY_TEMPERATURE)
        .with_timeout(PRIMARY_TIMEOUT)
}

pub fn simplified_tier() -> TierSpec {
    TierSpec::new(GenerationTier::Simplified)
        .with_max_tokens(SIMPLIFIED_MAX_TOKENS)
        .with_temperature(SIMPLIFIED_TEMPERATURE)
        .with_timeout(SIMPLIFIED_TIMEOUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_profile_grows_with_grade() {
        assert_eq!(LengthProfile::for_grade(1).words, 300);
        assert_eq!(LengthProfile::for_grade(4).words, 500);
        assert_eq!(LengthProfile::for_grade(7).words, 750);
        assert_eq!(LengthProfile::for_grade(12).words, 1000);
    }

    #[test]
    fn token_budget_is_capped() {
        assert_eq!(LengthProfile::for_grade(1).token_budget(), 1500);
        assert_eq!(LengthProfile::for_grade(12).token_budget(), 2900);
        assert_eq!(LengthProfile { words: 5000 }.token_budget(), MAX_TOKEN_BUDGET);
    }

    #[test]
    fn simplified_tier_is_smaller_and_faster_than_primary() {
        let primary = primary_tier(LengthProfile::for_grade(1));
        let simplified = simplified_tier();

        assert_eq!(primary.tier, GenerationTier::Primary);
        assert_eq!(primary.timeout, Duration::from_secs(PRIMARY_TIMEOUT));
        assert_eq!(simplified.tier, GenerationTier::Simplified);
        assert_eq!(simplified.timeout, Duration::from_secs(SIMPLIFIED_TIMEOUT));
        assert!(simplified.max_tokens < primary.max_tokens);
        assert!(simplified.timeout < primary.timeout);
    }
}
