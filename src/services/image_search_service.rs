use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{config::Config, errors::ProviderError};

const SEARCH_TIMEOUT_SECS: u64 = 20;
const RESULTS_PER_PAGE: &str = "5";

/// A safe-search image provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Ranked image URLs for a keyword, best first. May be empty.
    async fn search(&self, keyword: &str) -> Result<Vec<String>, ProviderError>;

    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct PixabayResponse {
    #[serde(default)]
    hits: Vec<PixabayHit>,
}

#[derive(Debug, Deserialize)]
struct PixabayHit {
    #[serde(default, rename = "largeImageURL")]
    large_image_url: Option<String>,
    #[serde(default, rename = "webformatURL")]
    webformat_url: Option<String>,
}

impl PixabayHit {
    fn best_url(self) -> Option<String> {
        self.large_image_url
            .or(self.webformat_url)
            .filter(|url| !url.trim().is_empty())
    }
}

pub struct PixabayImageSearch {
    client: reqwest::Client,
    api_key: SecretString,
    api_base: String,
}

impl PixabayImageSearch {
    pub fn new(api_key: SecretString, api_base: &str) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_base: api_base.to_string(),
        })
    }

    /// Returns `None` when no API key is configured or the client cannot be built.
    pub fn from_config(config: &Config) -> Option<Self> {
        let key = config.pixabay_api_key.clone()?;
        match Self::new(key, &config.pixabay_api_base) {
            Ok(search) => Some(search),
            Err(e) => {
                log::error!("Failed to build image search client: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl ImageSearch for PixabayImageSearch {
    async fn search(&self, keyword: &str) -> Result<Vec<String>, ProviderError> {
        let response = self
            .client
            .get(&self.api_base)
            .query(&[
                ("key", self.api_key.expose_secret()),
                ("q", keyword),
                ("image_type", "photo"),
                ("orientation", "horizontal"),
                ("per_page", RESULTS_PER_PAGE),
                ("safesearch", "true"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: PixabayResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Schema(e.to_string()))?;

        Ok(body.hits.into_iter().filter_map(PixabayHit::best_url).collect())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        if bytes.is_empty() {
            return Err(ProviderError::Transport(format!("empty image body from {}", url)));
        }

        Ok(bytes.to_vec())
    }
}
