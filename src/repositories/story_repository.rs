use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document, Regex},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::{Database, STORIES_COLLECTION},
    errors::AppResult,
    models::domain::ArchivedStory,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryArchive: Send + Sync {
    /// Persists the story and returns its id.
    async fn archive(&self, story: ArchivedStory) -> AppResult<String>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ArchivedStory>>;
    /// Newest first. `search` matches titles case-insensitively.
    async fn list(
        &self,
        category: Option<String>,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<ArchivedStory>, i64)>;
}

pub struct MongoStoryArchive {
    collection: Collection<ArchivedStory>,
}

impl MongoStoryArchive {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(STORIES_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for stories collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        let category_index = IndexModel::builder()
            .keys(doc! { "categories": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("categories_created_at".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes(vec![id_index, category_index])
            .await?;

        log::info!("Successfully created indexes for stories collection");
        Ok(())
    }
}

/// Builds the list filter; `search` is matched literally.
pub fn list_filter(category: Option<&str>, search: Option<&str>) -> Document {
    let mut filter = doc! {};
    if let Some(category) = category {
        filter.insert("categories", category.to_lowercase());
    }
    if let Some(search) = search {
        filter.insert(
            "title",
            Regex {
                pattern: regex::escape(search),
                options: "i".to_string(),
            },
        );
    }
    filter
}

#[async_trait]
impl StoryArchive for MongoStoryArchive {
    async fn archive(&self, story: ArchivedStory) -> AppResult<String> {
        self.collection.insert_one(&story).await?;
        log::info!("Archived story {} ('{}')", story.id, story.title);
        Ok(story.id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<ArchivedStory>> {
        let story = self.collection.find_one(doc! { "id": id }).await?;
        Ok(story)
    }

    async fn list(
        &self,
        category: Option<String>,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<ArchivedStory>, i64)> {
        let filter = list_filter(category.as_deref(), search.as_deref());

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(Some(offset.max(0) as u64))
            .limit(Some(limit))
            .build();

        let cursor = self.collection.find(filter).with_options(find_options).await?;
        let items: Vec<ArchivedStory> = cursor.try_collect().await?;

        Ok((items, total))
    }
}
