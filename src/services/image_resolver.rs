use std::sync::Arc;

use crate::{
    repositories::ImageArchive,
    services::{
        image_search_service::ImageSearch,
        keyword_resolver::{is_safe_keyword, FALLBACK_KEYWORD},
    },
};

/// Marker found in the provider's stock "no match" image URLs.
pub const FALLBACK_SOURCE_MARKER: &str = "children-books";

/// Resolves a keyword to a reusable image URL. Never fails: every error path
/// ends at the archive's static fallback asset.
pub struct ImageResolver {
    archive: Arc<dyn ImageArchive>,
    search: Option<Arc<dyn ImageSearch>>,
}

impl ImageResolver {
    pub fn new(archive: Arc<dyn ImageArchive>, search: Option<Arc<dyn ImageSearch>>) -> Self {
        Self { archive, search }
    }

    pub async fn resolve(&self, keyword: &str, context_title: Option<&str>) -> String {
        let keyword = keyword.trim().to_lowercase();
        let context = context_title.unwrap_or(keyword.as_str());

        match self.archive.find_by_keyword(&keyword).await {
            Ok(Some(record)) => {
                log::info!("Image cache hit for keyword '{}'", keyword);
                return record.local_url;
            }
            Ok(None) => {}
            Err(e) => log::warn!("Image cache lookup for '{}' failed: {}", keyword, e),
        }

        let fallback = self.archive.fallback_asset_url();

        let Some(search) = self.search.as_ref() else {
            log::info!("No image provider configured; using fallback image for '{}'", context);
            return fallback;
        };

        let query = if is_safe_keyword(&keyword) {
            keyword.as_str()
        } else {
            log::debug!("Keyword '{}' is not whitelisted; searching '{}'", keyword, FALLBACK_KEYWORD);
            FALLBACK_KEYWORD
        };

        let source_url = match search.search(query).await {
            Ok(urls) => match urls.into_iter().next() {
                Some(url) => url,
                None => {
                    log::info!("No images found for '{}'; using fallback image", query);
                    return fallback;
                }
            },
            Err(e) => {
                log::warn!("Image search for '{}' failed: {}; using fallback image", query, e);
                return fallback;
            }
        };

        if is_fallback_source(&source_url, &fallback) {
            log::info!("Provider returned its stock image for '{}'; using fallback image", query);
            return fallback;
        }

        match self.archive.find_by_source_url(&source_url).await {
            Ok(Some(record)) => {
                log::info!("Image {} already stored; reusing it for '{}'", source_url, keyword);
                return record.local_url;
            }
            Ok(None) => {}
            Err(e) => log::warn!("Image source lookup for {} failed: {}", source_url, e),
        }

        let bytes = match search.download(&source_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Downloading {} failed: {}; using fallback image", source_url, e);
                return fallback;
            }
        };

        match self.archive.store(bytes, &keyword, &source_url).await {
            Ok(record) => {
                log::info!("Uploaded image {} for '{}' ({})", record.id, keyword, context);
                record.local_url
            }
            Err(e) => {
                log::error!("Storing image {} failed: {}; using fallback image", source_url, e);
                fallback
            }
        }
    }
}

pub fn is_fallback_source(source_url: &str, fallback_url: &str) -> bool {
    source_url == fallback_url || source_url.contains(FALLBACK_SOURCE_MARKER)
}
