use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::domain::{
    archived_story::ArchivedQuiz, ArchivedStory, QuizQuestion, StoryQuizResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDto {
    pub title: String,
    pub text: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_prompts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestionDto {
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDto {
    pub title: String,
    pub questions: Vec<QuizQuestionDto>,
}

/// Response body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentResponseDto {
    pub story: StoryDto,
    pub quiz: QuizDto,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_image_url: Option<String>,
    pub lexile: u32,
    pub grade: u8,
    /// Diagnostics keyed by subsystem. Present keys mean degraded, not failed.
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl From<&StoryQuizResult> for StoryDto {
    fn from(story: &StoryQuizResult) -> Self {
        StoryDto {
            title: story.title.clone(),
            text: story.paragraphs.clone(),
            image_prompts: story.paragraph_image_prompts.clone(),
        }
    }
}

impl From<&QuizQuestion> for QuizQuestionDto {
    fn from(question: &QuizQuestion) -> Self {
        QuizQuestionDto {
            question: question.prompt.clone(),
            choices: question.choices.clone(),
            answer: question.correct_answer.clone(),
            explanation: question.explanation.clone(),
        }
    }
}

impl From<QuizQuestionDto> for QuizQuestion {
    fn from(dto: QuizQuestionDto) -> Self {
        QuizQuestion {
            prompt: dto.question,
            choices: dto.choices,
            correct_answer: dto.answer,
            explanation: dto.explanation,
        }
    }
}

impl From<&StoryQuizResult> for QuizDto {
    fn from(story: &StoryQuizResult) -> Self {
        QuizDto {
            title: story.quiz_title.clone(),
            questions: story.questions.iter().map(QuizQuestionDto::from).collect(),
        }
    }
}

impl QuizDto {
    pub fn into_archived_quiz(self) -> ArchivedQuiz {
        ArchivedQuiz {
            title: self.title,
            questions: self.questions.into_iter().map(QuizQuestion::from).collect(),
        }
    }
}

/// Rebuilds a story from its wire halves.
pub fn story_quiz_from_wire(story: StoryDto, quiz: QuizDto) -> StoryQuizResult {
    StoryQuizResult {
        title: story.title,
        paragraphs: story.text,
        paragraph_image_prompts: story.image_prompts,
        quiz_title: quiz.title,
        questions: quiz.questions.into_iter().map(QuizQuestion::from).collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct ArchiveStoryResponse {
    pub success: bool,
    pub post_id: String,
}

#[derive(Debug, Serialize)]
pub struct StoryListResponse {
    pub items: Vec<ArchivedStory>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}
