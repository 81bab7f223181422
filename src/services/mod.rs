pub mod content_generator;
pub mod generation_tiers;
pub mod image_resolver;
pub mod image_search_service;
pub mod keyword_resolver;
pub mod model_service;
pub mod pipeline_service;
pub mod prompt_builder;

pub use content_generator::ContentGenerator;
pub use image_resolver::ImageResolver;
pub use image_search_service::{ImageSearch, PixabayImageSearch};
pub use model_service::{OpenAiModelService, TextModel};
pub use pipeline_service::PipelineService;
