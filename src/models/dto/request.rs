use serde::Deserialize;
use validator::Validate;

use crate::models::domain::archived_story::{ArchivedStory, StoryImages, SOURCE_API};
use crate::models::domain::GenerationRequest;
use crate::models::dto::generation_payload::ParagraphText;
use crate::models::dto::response::QuizDto;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateContentRequestDto {
    #[validate(range(min = 1, message = "Lexile must be at least 1"))]
    pub lexile: i64,

    #[validate(range(min = 1, max = 12, message = "Grade must be between 1 and 12"))]
    pub grade: i64,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub interests: String,

    #[serde(default)]
    #[validate(length(max = 200))]
    pub story_title: Option<String>,
}

impl GenerateContentRequestDto {
    /// Story title with surrounding whitespace removed; blank titles count as absent.
    pub fn normalized_title(&self) -> Option<&str> {
        self.story_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Builds the request the generator works from. Call after `validate()`.
    pub fn into_generation_request(self, theme: String) -> GenerationRequest {
        let story_title = self.normalized_title().map(str::to_string);
        GenerationRequest {
            lexile: u32::try_from(self.lexile.max(1)).unwrap_or(u32::MAX),
            grade: self.grade.clamp(1, 12) as u8,
            theme,
            raw_interests: self.interests,
            story_title,
        }
    }
}

/// Body of `POST /api/archive`, for clients archiving a story they already hold.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ArchiveStoryRequestDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub text: ParagraphText,
    #[serde(default)]
    pub images: StoryImages,
    #[serde(default)]
    pub quiz: Option<QuizDto>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ArchiveStoryRequestDto {
    pub fn into_archived_story(self) -> Option<ArchivedStory> {
        let paragraphs = self.text.into_paragraphs();
        if paragraphs.is_empty() {
            return None;
        }

        let categories = self
            .categories
            .into_iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();

        Some(ArchivedStory::new(
            self.title.trim(),
            paragraphs,
            self.images,
            self.quiz.map(QuizDto::into_archived_quiz),
            categories,
            SOURCE_API,
        ))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StoryListParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,

    pub category: Option<String>,

    #[validate(length(max = 100))]
    pub search: Option<String>,
}

impl Default for StoryListParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
            category: None,
            search: None,
        }
    }
}

impl StoryListParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).min(100)
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn request(lexile: i64, grade: i64) -> GenerateContentRequestDto {
        GenerateContentRequestDto {
            lexile,
            grade,
            interests: "dogs, space".to_string(),
            story_title: None,
        }
    }

    #[test]
    fn test_valid_generate_request() {
        assert!(request(650, 4).validate().is_ok());
    }

    #[test]
    fn test_lexile_must_be_positive() {
        assert!(request(0, 4).validate().is_err());
    }

    #[test]
    fn test_lexile_has_no_upper_bound() {
        let dto: GenerateContentRequestDto =
            serde_json::from_str(r#"{"lexile": 2100, "grade": 12, "interests": "dog"}"#).unwrap();
        assert!(dto.validate().is_ok());

        let generation = dto.into_generation_request("dog".to_string());
        assert_eq!(generation.lexile, 2100);
    }

    #[test]
    fn test_oversized_lexile_saturates() {
        let generation = request(i64::MAX, 4).into_generation_request("dog".to_string());
        assert_eq!(generation.lexile, u32::MAX);
    }

    #[test]
    fn test_grade_must_be_within_school_years() {
        assert!(request(650, 0).validate().is_err());
        assert!(request(650, 13).validate().is_err());
        assert!(request(650, 12).validate().is_ok());
    }

    #[test]
    fn test_generate_request_deserializes_without_optional_fields() {
        let dto: GenerateContentRequestDto =
            serde_json::from_str(r#"{"lexile": 500, "grade": 3}"#).unwrap();
        assert_eq!(dto.interests, "");
        assert!(dto.story_title.is_none());
    }

    #[test]
    fn test_blank_title_is_treated_as_absent() {
        let mut dto = request(500, 3);
        dto.story_title = Some("   ".to_string());

        let generation = dto.into_generation_request("dog".to_string());
        assert_eq!(generation.story_title, None);
        assert_eq!(generation.theme, "dog");
        assert_eq!(generation.lexile, 500);
        assert_eq!(generation.grade, 3);
    }

    #[test]
    fn test_archive_request_accepts_string_text() {
        let dto: ArchiveStoryRequestDto = serde_json::from_str(
            r#"{"title": "Sea", "text": "One.\n\nTwo.", "categories": [" Ocean ", ""]}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());

        let story = dto.into_archived_story().unwrap();
        assert_eq!(story.paragraphs, vec!["One.", "Two."]);
        assert_eq!(story.categories, vec!["ocean"]);
        assert_eq!(story.source, SOURCE_API);
    }

    #[test]
    fn test_archive_request_rejects_blank_text() {
        let dto: ArchiveStoryRequestDto =
            serde_json::from_str(r#"{"title": "Sea", "text": ["  "]}"#).unwrap();
        assert!(dto.into_archived_story().is_none());
    }

    #[test]
    fn test_story_list_params_limits() {
        let params = StoryListParams {
            limit: Some(500),
            category: Some("  ".to_string()),
            ..StoryListParams::default()
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.category(), None);
    }
}
