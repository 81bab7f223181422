use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A downloaded image kept in the archive.
///
/// `id` is derived from `source_url`, so the same upstream image always maps
/// to the same record.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageRecord {
    pub id: String,
    pub keyword: String,
    pub source_url: String,
    pub local_url: String,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ImageRecord {
    pub fn new(keyword: &str, source_url: &str, local_url: &str, content_type: &str) -> Self {
        ImageRecord {
            id: image_id_for_source(source_url),
            keyword: keyword.to_string(),
            source_url: source_url.to_string(),
            local_url: local_url.to_string(),
            content_type: content_type.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

pub fn image_id_for_source(source_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Guesses the MIME type from the extension of the source URL path.
pub fn content_type_for_source(source_url: &str) -> &'static str {
    let path = source_url
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if path.ends_with(".png") {
        "image/png"
    } else if path.ends_with(".gif") {
        "image/gif"
    } else if path.ends_with(".webp") {
        "image/webp"
    } else {
        "image/jpeg"
    }
}
