use std::env;
use secrecy::SecretString;

/// Path of the bundled image served by this server.
pub const FALLBACK_ASSET_PATH: &str = "/assets/fallback.svg";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    /// Base URL this server is reachable at; stored images are served below it.
    pub public_base_url: String,
    pub cors_allowed_origin: Option<String>,
    pub openai_api_key: Option<SecretString>,
    pub openai_api_base: String,
    pub openai_model: String,
    pub pixabay_api_key: Option<SecretString>,
    pub pixabay_api_base: String,
    pub fallback_image_url: String,
    pub secondary_image_enabled: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "lexiquest-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            fallback_image_url: non_empty_var("FALLBACK_IMAGE_URL")
                .unwrap_or_else(|| bundled_fallback_url(&public_base_url)),
            public_base_url,
            cors_allowed_origin: non_empty_var("CORS_ALLOWED_ORIGIN"),
            openai_api_key: non_empty_var("OPENAI_API_KEY").map(SecretString::from),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            pixabay_api_key: non_empty_var("PIXABAY_API_KEY").map(SecretString::from),
            pixabay_api_base: env::var("PIXABAY_API_BASE")
                .unwrap_or_else(|_| "https://pixabay.com/api/".to_string()),
            secondary_image_enabled: env::var("SECONDARY_IMAGE_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Logs which providers will be skipped. Missing credentials are not fatal:
    /// the pipeline degrades to its built-in story and the static fallback image.
    pub fn log_provider_status(&self) {
        if self.openai_api_key.is_none() {
            log::warn!("OPENAI_API_KEY not set; stories will use the built-in fallback");
        }
        if self.pixabay_api_key.is_none() {
            log::warn!("PIXABAY_API_KEY not set; images will use the static fallback asset");
        }
    }

    /// Public URL of a stored image blob.
    pub fn media_url(&self, id: &str) -> String {
        format!("{}/media/{}", self.public_base_url, id)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "lexiquest-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            public_base_url: "http://localhost:8080".to_string(),
            cors_allowed_origin: None,
            openai_api_key: Some(SecretString::from("test-openai-key".to_string())),
            openai_api_base: "http://localhost:9999/v1".to_string(),
            openai_model: "gpt-4".to_string(),
            pixabay_api_key: Some(SecretString::from("test-pixabay-key".to_string())),
            pixabay_api_base: "http://localhost:9999/api/".to_string(),
            fallback_image_url: bundled_fallback_url("http://localhost:8080"),
            secondary_image_enabled: true,
        }
    }
}

/// The bundled fallback image as served by this server.
pub fn bundled_fallback_url(public_base_url: &str) -> String {
    format!("{}{}", public_base_url, FALLBACK_ASSET_PATH)
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
