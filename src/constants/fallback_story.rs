use crate::models::domain::{QuizQuestion, StoryQuizResult};

pub const FALLBACK_STORY_TITLE: &str = "The Magical Playground";
pub const FALLBACK_QUIZ_TITLE: &str = "The Magical Playground Quiz";

pub const FALLBACK_PARAGRAPHS: [&str; 4] = [
    "On the first warm morning of spring, Maya and her little brother Leo ran to the playground at the end of their street. Something was different. The slide shimmered with every color of the rainbow, and the swings hummed a soft, happy tune.",
    "When Maya sat on a swing, it carried her gently up toward the clouds. From high above she could see the whole town: the bakery, the library, and the park where her friends were flying kites. Leo laughed as the seesaw bounced him like a bunny.",
    "Near the sandbox they found a small brass key. A friendly voice from the old oak tree said, \"This playground is magic only when friends share it.\" Maya and Leo called their neighbors, and soon every child on the street was playing together.",
    "As the sun set, the colors faded and the swings grew quiet. Maya tucked the brass key into the oak tree for the next children to find. Walking home, Leo said, \"The best magic was having everyone there.\" Maya smiled, because she knew he was right.",
];

/// The story served when every generation attempt has failed.
pub fn fallback_story() -> StoryQuizResult {
    StoryQuizResult {
        title: FALLBACK_STORY_TITLE.to_string(),
        paragraphs: FALLBACK_PARAGRAPHS.iter().map(|p| p.to_string()).collect(),
        paragraph_image_prompts: Vec::new(),
        quiz_title: FALLBACK_QUIZ_TITLE.to_string(),
        questions: vec![
            QuizQuestion {
                prompt: "What did Maya and Leo find near the sandbox?".to_string(),
                choices: vec![
                    "A red ball".to_string(),
                    "A small brass key".to_string(),
                    "A kite".to_string(),
                    "A library book".to_string(),
                ],
                correct_answer: "A small brass key".to_string(),
                explanation: "The story says they found a small brass key near the sandbox."
                    .to_string(),
            },
            QuizQuestion {
                prompt: "According to the oak tree, when is the playground magic?".to_string(),
                choices: vec![
                    "Only at night".to_string(),
                    "Only when it rains".to_string(),
                    "Only when friends share it".to_string(),
                    "Only on holidays".to_string(),
                ],
                correct_answer: "Only when friends share it".to_string(),
                explanation: "The voice said the playground is magic only when friends share it."
                    .to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_story_shape() {
        let story = fallback_story();

        assert_eq!(story.title, "The Magical Playground");
        assert_eq!(story.paragraphs.len(), 4);
        assert_eq!(story.questions.len(), 2);
        assert!(story.has_content());
        assert!(story.questions.iter().all(|q| q.is_consistent()));
    }
}
