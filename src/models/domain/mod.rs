pub mod archived_story;
pub mod generation;
pub mod image_record;
pub mod story;
pub use archived_story::{ArchivedQuiz, ArchivedStory, StoryImages};
pub use generation::{GenerationOutcome, GenerationRequest, GenerationTier};
pub use image_record::ImageRecord;
pub use story::{QuizQuestion, StoryQuizResult};
