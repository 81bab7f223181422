pub mod image_repository;
pub mod story_repository;

pub use image_repository::{ImageArchive, ImageBlob, MongoImageArchive};
pub use story_repository::{MongoStoryArchive, StoryArchive};
