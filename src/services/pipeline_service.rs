use std::{collections::BTreeMap, sync::Arc};

use crate::{
    models::{
        domain::{archived_story::StoryImages, ArchivedStory, StoryQuizResult},
        dto::{
            request::GenerateContentRequestDto,
            response::{GenerateContentResponseDto, QuizDto, StoryDto},
        },
    },
    repositories::StoryArchive,
    services::{
        content_generator::ContentGenerator,
        image_resolver::ImageResolver,
        keyword_resolver::{self, FALLBACK_KEYWORD},
    },
};

pub const GENERATION_ERROR_KEY: &str = "generation";

/// Composes keyword resolution, story generation and image resolution for one
/// request.
pub struct PipelineService {
    generator: ContentGenerator,
    images: ImageResolver,
    stories: Arc<dyn StoryArchive>,
    secondary_image_enabled: bool,
}

impl PipelineService {
    pub fn new(
        generator: ContentGenerator,
        images: ImageResolver,
        stories: Arc<dyn StoryArchive>,
        secondary_image_enabled: bool,
    ) -> Self {
        Self {
            generator,
            images,
            stories,
            secondary_image_enabled,
        }
    }

    /// Runs the pipeline for a validated request. Provider and archive failures
    /// surface only as entries in `errors`.
    pub async fn run(&self, request: GenerateContentRequestDto) -> GenerateContentResponseDto {
        let keyword = keyword_resolver::resolve(&request.interests, request.normalized_title());
        let generation = request.into_generation_request(keyword);
        log::info!(
            "Generating story for grade {} (lexile {}) on '{}'",
            generation.grade,
            generation.lexile,
            generation.theme
        );

        let outcome = self
            .generator
            .generate(generation.lexile, generation.grade, &generation.theme)
            .await;
        let tier = outcome.tier();
        let (story, reason) = outcome.into_parts();

        let mut errors = BTreeMap::new();
        if let Some(reason) = reason.filter(|r| !r.trim().is_empty()) {
            log::warn!("Story for '{}' came from the {} tier", generation.theme, tier);
            errors.insert(GENERATION_ERROR_KEY.to_string(), reason);
        }

        let image_url = self
            .images
            .resolve(&generation.theme, Some(&story.title))
            .await;

        let second_image_url = if self.secondary_image_enabled {
            let keyword = secondary_image_keyword(&story, &generation.theme);
            Some(self.images.resolve(&keyword, Some(&story.title)).await)
        } else {
            None
        };

        let images = StoryImages {
            primary: Some(image_url.clone()),
            secondary: second_image_url.clone(),
        };
        self.archive(&story, images, &generation.theme).await;

        GenerateContentResponseDto {
            story: StoryDto::from(&story),
            quiz: QuizDto::from(&story),
            image_url,
            second_image_url,
            lexile: generation.lexile,
            grade: generation.grade,
            errors,
        }
    }

    async fn archive(&self, story: &StoryQuizResult, images: StoryImages, keyword: &str) {
        let archived = ArchivedStory::from_generated(story, images, vec![keyword.to_string()]);
        if let Err(e) = self.stories.archive(archived).await {
            log::error!("Failed to archive story '{}': {}", story.title, e);
        }
    }
}

/// Keyword for the second illustration: the second paragraph's prompt, then
/// the story title, then the request keyword.
pub fn secondary_image_keyword(story: &StoryQuizResult, keyword: &str) -> String {
    story
        .image_prompt(1)
        .or_else(|| Some(story.title.trim()).filter(|t| !t.is_empty()))
        .or_else(|| Some(keyword.trim()).filter(|k| !k.is_empty()))
        .unwrap_or(FALLBACK_KEYWORD)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::domain::ImageRecord;
    use crate::repositories::image_repository::MockImageArchive;
    use crate::repositories::story_repository::MockStoryArchive;
    use crate::services::model_service::MockTextModel;
    use crate::test_utils::fixtures::{sample_request, sample_story, sample_story_json};

    fn cached_archive() -> MockImageArchive {
        let mut archive = MockImageArchive::new();
        archive.expect_find_by_keyword().returning(|keyword| {
            Ok(Some(ImageRecord::new(
                keyword,
                &format!("https://cdn.example.com/{}.jpg", keyword),
                &format!("http://localhost:8080/media/{}", keyword.len()),
                "image/jpeg",
            )))
        });
        archive
            .expect_fallback_asset_url()
            .returning(|| "http://localhost:8080/assets/fallback.jpg".to_string());
        archive
    }

    fn pipeline(model: MockTextModel, stories: MockStoryArchive, secondary: bool) -> PipelineService {
        PipelineService::new(
            ContentGenerator::new(Some(Arc::new(model))),
            ImageResolver::new(Arc::new(cached_archive()), None),
            Arc::new(stories),
            secondary,
        )
    }

    fn working_model() -> MockTextModel {
        let mut model = MockTextModel::new();
        model
            .expect_complete()
            .returning(|_| Ok(sample_story_json()));
        model
    }

    #[test]
    fn secondary_keyword_priority() {
        let mut story = sample_story();
        assert_eq!(
            secondary_image_keyword(&story, "robot"),
            "a robot reading a book by lamplight"
        );

        story.paragraph_image_prompts.truncate(1);
        assert_eq!(secondary_image_keyword(&story, "robot"), "Rosie the Robot");

        story.title = "  ".to_string();
        assert_eq!(secondary_image_keyword(&story, "robot"), "robot");
        assert_eq!(secondary_image_keyword(&story, ""), FALLBACK_KEYWORD);
    }

    #[tokio::test]
    async fn successful_run_has_no_errors_and_archives_story() {
        let mut stories = MockStoryArchive::new();
        stories
            .expect_archive()
            .times(1)
            .returning(|story| {
                assert_eq!(story.categories, vec!["robot".to_string()]);
                assert_eq!(story.source, "generator");
                assert!(story.images.primary.is_some());
                Ok(story.id)
            });

        let response = pipeline(working_model(), stories, true)
            .run(sample_request("robots and trains", None))
            .await;

        assert!(response.errors.is_empty());
        assert_eq!(response.story.title, "Rosie the Robot");
        assert_eq!(response.quiz.questions.len(), 1);
        assert_eq!(response.lexile, 650);
        assert_eq!(response.grade, 4);
        assert!(response.second_image_url.is_some());
    }

    #[tokio::test]
    async fn archive_failure_is_not_propagated() {
        let mut stories = MockStoryArchive::new();
        stories
            .expect_archive()
            .returning(|_| Err(AppError::DatabaseError("down".to_string())));

        let response = pipeline(working_model(), stories, false)
            .run(sample_request("robots", None))
            .await;

        assert!(response.errors.is_empty());
        assert!(response.second_image_url.is_none());
        assert!(!response.image_url.is_empty());
    }

    #[tokio::test]
    async fn provider_refusal_is_reported_under_generation() {
        let mut model = MockTextModel::new();
        model
            .expect_complete()
            .returning(|_| Ok(r#"{"error": "cannot write that"}"#.to_string()));
        let mut stories = MockStoryArchive::new();
        stories.expect_archive().returning(|story| Ok(story.id));

        let response = pipeline(model, stories, false)
            .run(sample_request("robots", None))
            .await;

        assert!(response.errors[GENERATION_ERROR_KEY].contains("cannot write that"));
        assert_eq!(response.story.title, "The Magical Playground");
        assert!(!response.story.text.is_empty());
    }
}
