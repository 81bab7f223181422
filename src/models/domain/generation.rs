use serde::Serialize;

use crate::models::domain::story::StoryQuizResult;

/// One validated generation request. Built by the pipeline after keyword
/// resolution and dropped when the request completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub lexile: u32,
    pub grade: u8,
    pub theme: String,
    pub raw_interests: String,
    pub story_title: Option<String>,
}

/// The strategy that produced a story, most ambitious first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationTier {
    Primary,
    Simplified,
    Builtin,
}

impl std::fmt::Display for GenerationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationTier::Primary => write!(f, "primary"),
            GenerationTier::Simplified => write!(f, "simplified"),
            GenerationTier::Builtin => write!(f, "builtin"),
        }
    }
}

/// Result of running the generation fallback chain.
///
/// A failed primary attempt still carries the story produced by a lower
/// tier, so "no story and no error" cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(StoryQuizResult),
    Fallback {
        story: StoryQuizResult,
        tier: GenerationTier,
        reason: String,
    },
}

impl GenerationOutcome {
    pub fn story(&self) -> &StoryQuizResult {
        match self {
            GenerationOutcome::Success(story) => story,
            GenerationOutcome::Fallback { story, .. } => story,
        }
    }

    /// Diagnostic reason the primary tier was abandoned.
    pub fn reason(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Success(_) => None,
            GenerationOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn tier(&self) -> GenerationTier {
        match self {
            GenerationOutcome::Success(_) => GenerationTier::Primary,
            GenerationOutcome::Fallback { tier, .. } => *tier,
        }
    }

    pub fn into_parts(self) -> (StoryQuizResult, Option<String>) {
        match self {
            GenerationOutcome::Success(story) => (story, None),
            GenerationOutcome::Fallback { story, reason, .. } => (story, Some(reason)),
        }
    }
}
