use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, spec::BinarySubtype, Binary, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    config::Config,
    db::{Database, IMAGES_COLLECTION, IMAGE_BLOBS_COLLECTION},
    errors::AppResult,
    models::domain::image_record::{content_type_for_source, image_id_for_source, ImageRecord},
};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Stored image bytes and their MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBlob {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Persistent store of downloaded images.
///
/// Keyword lookups are a cache; `source_url` is the identity, and storing the
/// same source twice returns the existing record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageArchive: Send + Sync {
    async fn find_by_keyword(&self, keyword: &str) -> AppResult<Option<ImageRecord>>;
    async fn find_by_source_url(&self, source_url: &str) -> AppResult<Option<ImageRecord>>;
    async fn store(&self, bytes: Vec<u8>, keyword: &str, source_url: &str)
        -> AppResult<ImageRecord>;
    fn fallback_asset_url(&self) -> String;
    async fn load_blob(&self, id: &str) -> AppResult<Option<ImageBlob>>;
}

pub struct MongoImageArchive {
    records: Collection<ImageRecord>,
    blobs: Collection<Document>,
    config: Config,
}

impl MongoImageArchive {
    pub fn new(db: &Database, config: &Config) -> Self {
        Self {
            records: db.get_collection(IMAGES_COLLECTION),
            blobs: db.get_collection(IMAGE_BLOBS_COLLECTION),
            config: config.clone(),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for images collections");

        let source_index = IndexModel::builder()
            .keys(doc! { "source_url": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("source_url_unique".to_string())
                    .build(),
            )
            .build();
        let keyword_index = IndexModel::builder()
            .keys(doc! { "keyword": 1 })
            .options(IndexOptions::builder().name("keyword".to_string()).build())
            .build();
        let blob_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.records
            .create_indexes(vec![source_index, keyword_index])
            .await?;
        self.blobs.create_index(blob_index).await?;

        log::info!("Successfully created indexes for images collections");
        Ok(())
    }
}

#[async_trait]
impl ImageArchive for MongoImageArchive {
    async fn find_by_keyword(&self, keyword: &str) -> AppResult<Option<ImageRecord>> {
        let record = self.records.find_one(doc! { "keyword": keyword }).await?;
        Ok(record)
    }

    async fn find_by_source_url(&self, source_url: &str) -> AppResult<Option<ImageRecord>> {
        let record = self
            .records
            .find_one(doc! { "source_url": source_url })
            .await?;
        Ok(record)
    }

    async fn store(
        &self,
        bytes: Vec<u8>,
        keyword: &str,
        source_url: &str,
    ) -> AppResult<ImageRecord> {
        let id = image_id_for_source(source_url);
        let content_type = content_type_for_source(source_url);

        let data = Binary {
            subtype: BinarySubtype::Generic,
            bytes,
        };

        // Upsert so a concurrent store of the same source writes the bytes once.
        self.blobs
            .update_one(
                doc! { "id": &id },
                doc! { "$setOnInsert": {
                    "id": &id,
                    "content_type": content_type,
                    "data": data,
                    "created_at": Utc::now().to_rfc3339(),
                }},
            )
            .upsert(true)
            .await?;

        let record = ImageRecord::new(keyword, source_url, &self.config.media_url(&id), content_type);
        match self.records.insert_one(&record).await {
            Ok(_) => {
                log::info!("Stored image {} for keyword '{}'", record.id, keyword);
                Ok(record)
            }
            Err(e) if is_duplicate_key(&e) => {
                log::info!("Image for {} already stored; reusing it", source_url);
                match self.find_by_source_url(source_url).await? {
                    Some(existing) => Ok(existing),
                    None => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn fallback_asset_url(&self) -> String {
        self.config.fallback_image_url.clone()
    }

    async fn load_blob(&self, id: &str) -> AppResult<Option<ImageBlob>> {
        let Some(document) = self.blobs.find_one(doc! { "id": id }).await? else {
            return Ok(None);
        };

        let content_type = document
            .get_str("content_type")
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = match document.get_binary_generic("data") {
            Ok(bytes) => bytes.clone(),
            Err(e) => {
                log::warn!("Image blob {} has no readable data: {}", id, e);
                return Ok(None);
            }
        };

        Ok(Some(ImageBlob {
            content_type,
            bytes,
        }))
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}
