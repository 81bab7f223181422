pub mod asset_handler;
pub mod generate_handler;
pub mod health_handler;
pub mod media_handler;
pub mod story_handler;

use actix_web::web;

use crate::errors::AppError;

pub use asset_handler::fallback_asset;
pub use generate_handler::generate_content;
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use media_handler::get_media;
pub use story_handler::{archive_story, get_story, list_stories};

/// Registers every route. Malformed JSON bodies are reported like other
/// validation errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .service(generate_content)
    .service(archive_story)
    .service(list_stories)
    .service(get_story)
    .service(get_media)
    .service(fallback_asset)
    .service(health_check)
    .service(health_check_live)
    .service(health_check_ready);
}
