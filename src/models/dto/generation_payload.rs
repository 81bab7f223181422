use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::domain::story::{
    QuizQuestion, StoryQuizResult, DEFAULT_QUIZ_TITLE, MAX_PARAGRAPHS,
};

/// Story body as either a list of paragraphs or one block of text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum ParagraphText {
    Many(Vec<String>),
    One(String),
}

impl ParagraphText {
    /// Non-empty, trimmed paragraphs. A single block is split on blank lines.
    pub fn into_paragraphs(self) -> Vec<String> {
        let raw = match self {
            ParagraphText::Many(items) => items,
            ParagraphText::One(text) => text
                .replace("\r\n", "\n")
                .split("\n\n")
                .map(str::to_string)
                .collect(),
        };

        raw.into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerPayload {
    Text(String),
    Index(i64),
}

/// The structured object the text provider is instructed to return.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct StoryPayload {
    #[serde(alias = "title")]
    pub story_title: String,
    /// Between one and five paragraphs.
    #[serde(alias = "paragraphs")]
    pub story_text: ParagraphText,
    /// One illustration description per paragraph, same order.
    #[serde(default, alias = "image_prompts")]
    pub paragraph_image_prompts: Vec<String>,
    #[serde(default)]
    pub quiz_title: Option<String>,
    pub questions: Vec<QuestionPayload>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct QuestionPayload {
    #[serde(alias = "prompt")]
    pub question: String,
    #[serde(alias = "options")]
    pub choices: Vec<String>,
    /// The exact text of the correct choice.
    #[serde(alias = "correct_answer")]
    pub answer: AnswerPayload,
    #[serde(default)]
    pub explanation: String,
}

impl StoryPayload {
    /// Coerces the payload into a story, or explains which required part is
    /// unusable. Questions whose answer matches no choice are dropped; a story
    /// left without any questions is still a story.
    pub fn into_story(self) -> Result<StoryQuizResult, String> {
        let title = self.story_title.trim().to_string();
        if title.is_empty() {
            return Err("story_title is empty".to_string());
        }

        let mut paragraphs = self.story_text.into_paragraphs();
        if paragraphs.is_empty() {
            return Err("story_text has no paragraphs".to_string());
        }
        if paragraphs.len() > MAX_PARAGRAPHS {
            log::debug!(
                "Truncating {} paragraphs to {}",
                paragraphs.len(),
                MAX_PARAGRAPHS
            );
            paragraphs.truncate(MAX_PARAGRAPHS);
        }

        let mut paragraph_image_prompts: Vec<String> = self
            .paragraph_image_prompts
            .into_iter()
            .map(|p| p.trim().to_string())
            .collect();
        paragraph_image_prompts.truncate(paragraphs.len());

        let total = self.questions.len();
        let questions: Vec<QuizQuestion> = self
            .questions
            .into_iter()
            .filter_map(QuestionPayload::into_question)
            .collect();
        if questions.len() < total {
            log::warn!(
                "Dropped {} of {} quiz questions with unusable answers",
                total - questions.len(),
                total
            );
        }
        let quiz_title = self
            .quiz_title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_QUIZ_TITLE.to_string());

        Ok(StoryQuizResult {
            title,
            paragraphs,
            paragraph_image_prompts,
            quiz_title,
            questions,
        })
    }
}

impl QuestionPayload {
    fn into_question(self) -> Option<QuizQuestion> {
        let prompt = self.question.trim().to_string();
        let choices: Vec<String> = self
            .choices
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if prompt.is_empty() || choices.len() < 2 {
            return None;
        }

        let correct_answer = resolve_answer(&self.answer, &choices)?;

        Some(QuizQuestion {
            prompt,
            choices,
            correct_answer,
            explanation: self.explanation.trim().to_string(),
        })
    }
}

/// Maps the provider's answer onto one of the choices: exact text, text in a
/// different case, a letter label (`"B"`, `"b)"`), or a zero-based index.
fn resolve_answer(answer: &AnswerPayload, choices: &[String]) -> Option<String> {
    match answer {
        AnswerPayload::Index(index) => usize::try_from(*index)
            .ok()
            .and_then(|i| choices.get(i))
            .cloned(),
        AnswerPayload::Text(text) => {
            let text = text.trim();
            if let Some(exact) = choices.iter().find(|c| c.as_str() == text) {
                return Some(exact.clone());
            }
            if let Some(folded) = choices.iter().find(|c| c.eq_ignore_ascii_case(text)) {
                return Some(folded.clone());
            }

            let label = text.trim_end_matches([')', '.', ':']).trim();
            let mut chars = label.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) if letter.is_ascii_alphabetic() => {
                    let index = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
                    choices.get(index).cloned()
                }
                _ => None,
            }
        }
    }
}
