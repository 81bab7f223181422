use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{ImageArchive, MongoImageArchive, MongoStoryArchive, StoryArchive},
    services::{
        ContentGenerator, ImageResolver, ImageSearch, OpenAiModelService, PipelineService,
        PixabayImageSearch, TextModel,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when the archives are not backed by MongoDB.
    pub db: Option<Database>,
    pub pipeline: Arc<PipelineService>,
    pub image_archive: Arc<dyn ImageArchive>,
    pub story_archive: Arc<dyn StoryArchive>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let image_archive = Arc::new(MongoImageArchive::new(&db, &config));
        image_archive.ensure_indexes().await?;

        let story_archive = Arc::new(MongoStoryArchive::new(&db));
        story_archive.ensure_indexes().await?;

        let text_model = OpenAiModelService::from_config(&config)
            .map(|model| Arc::new(model) as Arc<dyn TextModel>);
        let image_search = PixabayImageSearch::from_config(&config)
            .map(|search| Arc::new(search) as Arc<dyn ImageSearch>);

        Ok(Self::from_parts(
            config,
            Some(db),
            image_archive,
            story_archive,
            text_model,
            image_search,
        ))
    }

    /// Wires the pipeline from already-built collaborators.
    pub fn from_parts(
        config: Config,
        db: Option<Database>,
        image_archive: Arc<dyn ImageArchive>,
        story_archive: Arc<dyn StoryArchive>,
        text_model: Option<Arc<dyn TextModel>>,
        image_search: Option<Arc<dyn ImageSearch>>,
    ) -> Self {
        let pipeline = PipelineService::new(
            ContentGenerator::new(text_model),
            ImageResolver::new(image_archive.clone(), image_search),
            story_archive.clone(),
            config.secondary_image_enabled,
        );

        Self {
            config: Arc::new(config),
            db,
            pipeline: Arc::new(pipeline),
            image_archive,
            story_archive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::image_repository::MockImageArchive;
    use crate::repositories::story_repository::MockStoryArchive;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_parts_without_database() {
        let state = AppState::from_parts(
            Config::test_config(),
            None,
            Arc::new(MockImageArchive::new()),
            Arc::new(MockStoryArchive::new()),
            None,
            None,
        );

        assert!(state.db.is_none());
        assert_eq!(state.config.mongo_db_name, "lexiquest-test");
    }
}
