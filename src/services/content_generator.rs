use std::sync::Arc;

use serde_json::Value;

use crate::{
    constants::{
        fallback_story::fallback_story,
        prompts::{SIMPLIFIED_SYSTEM_PROMPT, STORY_SYSTEM_PROMPT},
    },
    errors::ProviderError,
    models::{
        domain::{GenerationOutcome, GenerationTier, StoryQuizResult},
        dto::generation_payload::StoryPayload,
    },
    services::{
        generation_tiers::{primary_tier, simplified_tier, LengthProfile, TierSpec},
        model_service::{CompletionRequest, TextModel},
        prompt_builder,
    },
};

/// Runs the text provider through the primary, simplified and built-in tiers.
pub struct ContentGenerator {
    model: Option<Arc<dyn TextModel>>,
}

impl ContentGenerator {
    pub fn new(model: Option<Arc<dyn TextModel>>) -> Self {
        Self { model }
    }

    /// Always yields a story. A failed primary attempt is reported through
    /// `GenerationOutcome::Fallback` together with the story that replaced it.
    pub async fn generate(&self, lexile: u32, grade: u8, theme: &str) -> GenerationOutcome {
        let Some(model) = self.model.as_ref() else {
            let err = ProviderError::Configuration(
                "no text provider credentials configured".to_string(),
            );
            log::warn!("Skipping text provider: {}. Using built-in story", err);
            return builtin(err.to_string());
        };

        let primary = self.primary(model.as_ref(), lexile, grade, theme).await;
        let primary_reason = match primary {
            Ok(story) => {
                log::info!("Primary generation succeeded for theme '{}'", theme);
                return GenerationOutcome::Success(story);
            }
            Err(err) => {
                log::warn!(
                    "Primary generation failed for theme '{}': {}. Retrying with simplified prompt",
                    theme,
                    err
                );
                err.to_string()
            }
        };

        match self.simplified(model.as_ref(), grade, theme).await {
            Ok(story) => GenerationOutcome::Fallback {
                story,
                tier: GenerationTier::Simplified,
                reason: primary_reason,
            },
            Err(err) => {
                log::warn!(
                    "Simplified generation failed for theme '{}': {}. Using built-in story",
                    theme,
                    err
                );
                builtin(format!(
                    "{}; simplified retry failed: {}",
                    primary_reason, err
                ))
            }
        }
    }

    async fn primary(
        &self,
        model: &dyn TextModel,
        lexile: u32,
        grade: u8,
        theme: &str,
    ) -> Result<StoryQuizResult, ProviderError> {
        let tier = primary_tier(LengthProfile::for_grade(grade));
        let prompt = prompt_builder::build(lexile, grade, theme);
        let text = model
            .complete(completion(&tier, STORY_SYSTEM_PROMPT, prompt))
            .await?;

        parse_completion(theme, &text)
    }

    async fn simplified(
        &self,
        model: &dyn TextModel,
        grade: u8,
        theme: &str,
    ) -> Result<StoryQuizResult, ProviderError> {
        let tier = simplified_tier();
        let prompt = prompt_builder::build_simplified(grade, theme);
        let text = model
            .complete(completion(&tier, SIMPLIFIED_SYSTEM_PROMPT, prompt))
            .await?;

        parse_completion(theme, &text)
    }
}

fn completion(tier: &TierSpec, system: &str, prompt: String) -> CompletionRequest {
    CompletionRequest {
        system: system.to_string(),
        prompt,
        max_tokens: tier.max_tokens,
        temperature: tier.temperature,
        timeout: tier.timeout,
    }
}

fn builtin(reason: String) -> GenerationOutcome {
    GenerationOutcome::Fallback {
        story: fallback_story(),
        tier: GenerationTier::Builtin,
        reason,
    }
}

/// Interprets a provider response from either tier.
///
/// A JSON object is held to the story schema; anything else that is not
/// blank becomes a single-paragraph story without a quiz.
pub fn parse_completion(theme: &str, text: &str) -> Result<StoryQuizResult, ProviderError> {
    let body = strip_code_fence(text);

    let Some(value) = json_object(body) else {
        return plain_text_story(theme, body);
    };
    if let Some(err) = declined_reason(&value) {
        return Err(err);
    }

    serde_json::from_value::<StoryPayload>(value)
        .map_err(|e| ProviderError::Schema(e.to_string()))?
        .into_story()
        .map_err(ProviderError::Schema)
}

fn plain_text_story(theme: &str, body: &str) -> Result<StoryQuizResult, ProviderError> {
    if body.trim().is_empty() {
        return Err(ProviderError::Transport("provider returned no text".to_string()));
    }
    log::debug!("Provider answered with plain text; using it as a single paragraph");
    Ok(StoryQuizResult::from_plain_text(theme, body))
}

fn declined_reason(value: &Value) -> Option<ProviderError> {
    let error = value.get("error")?;
    let reason = match error {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    Some(ProviderError::Declined(reason))
}

/// Parses the body as a JSON object, or the outermost `{...}` span inside it.
fn json_object(body: &str) -> Option<Value> {
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(body) {
        return Some(value);
    }

    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end <= start {
        return None;
    }

    match serde_json::from_str::<Value>(&body[start..=end]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (`json`) on the opening fence line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}
