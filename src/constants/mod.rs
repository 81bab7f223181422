pub mod fallback_story;
pub mod prompts;
