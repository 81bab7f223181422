use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::story::{QuizQuestion, StoryQuizResult};

pub const SOURCE_GENERATOR: &str = "generator";
pub const SOURCE_API: &str = "api";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoryImages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArchivedQuiz {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

/// A story persisted in the story archive.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArchivedStory {
    pub id: String,
    pub title: String,
    pub paragraphs: Vec<String>,
    pub images: StoryImages,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<ArchivedQuiz>,
    pub categories: Vec<String>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ArchivedStory {
    pub fn new(
        title: &str,
        paragraphs: Vec<String>,
        images: StoryImages,
        quiz: Option<ArchivedQuiz>,
        categories: Vec<String>,
        source: &str,
    ) -> Self {
        ArchivedStory {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            paragraphs,
            images,
            quiz,
            categories,
            source: source.to_string(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn from_generated(
        story: &StoryQuizResult,
        images: StoryImages,
        categories: Vec<String>,
    ) -> Self {
        let quiz = (!story.questions.is_empty()).then(|| ArchivedQuiz {
            title: story.quiz_title.clone(),
            questions: story.questions.clone(),
        });

        ArchivedStory::new(
            &story.title,
            story.paragraphs.clone(),
            images,
            quiz,
            categories,
            SOURCE_GENERATOR,
        )
    }
}
