use serde::{Deserialize, Serialize};

pub const DEFAULT_QUIZ_TITLE: &str = "Comprehension Quiz";
pub const MAX_PARAGRAPHS: usize = 5;

/// A generated reading passage together with its comprehension quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoryQuizResult {
    pub title: String,
    pub paragraphs: Vec<String>,
    /// Aligned index-to-index with `paragraphs`; may be empty.
    #[serde(default)]
    pub paragraph_image_prompts: Vec<String>,
    pub quiz_title: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_answer: String, // always one of `choices`
    pub explanation: String,
}

impl StoryQuizResult {
    /// A story made of a single paragraph of free text and no quiz.
    ///
    /// Used when a provider answers conversationally instead of with
    /// structured data.
    pub fn from_plain_text(theme: &str, text: &str) -> Self {
        StoryQuizResult {
            title: plain_story_title(theme),
            paragraphs: vec![text.trim().to_string()],
            paragraph_image_prompts: Vec::new(),
            quiz_title: DEFAULT_QUIZ_TITLE.to_string(),
            questions: Vec::new(),
        }
    }

    pub fn has_content(&self) -> bool {
        self.paragraphs.iter().any(|p| !p.trim().is_empty())
    }

    /// Illustration prompt for the paragraph at `index`, if one was supplied.
    pub fn image_prompt(&self, index: usize) -> Option<&str> {
        self.paragraph_image_prompts
            .get(index)
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
    }
}

impl QuizQuestion {
    pub fn is_consistent(&self) -> bool {
        self.choices.iter().any(|c| c == &self.correct_answer)
    }
}

fn plain_story_title(theme: &str) -> String {
    let theme = theme.trim();
    if theme.is_empty() {
        return "A Story For You".to_string();
    }

    let capitalised: Vec<String> = theme
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    format!("A Story About {}", capitalised.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_story_has_single_paragraph_and_no_quiz() {
        let story = StoryQuizResult::from_plain_text("space", "  Once there was a rocket.  ");

        assert_eq!(story.title, "A Story About Space");
        assert_eq!(story.paragraphs, vec!["Once there was a rocket.".to_string()]);
        assert_eq!(story.quiz_title, DEFAULT_QUIZ_TITLE);
        assert!(story.questions.is_empty());
        assert!(story.has_content());
    }

    #[test]
    fn plain_text_title_capitalises_multi_word_themes() {
        let story = StoryQuizResult::from_plain_text("children books", "text");
        assert_eq!(story.title, "A Story About Children Books");
    }

    #[test]
    fn image_prompt_skips_blank_entries() {
        let mut story = StoryQuizResult::from_plain_text("cat", "text");
        story.paragraph_image_prompts = vec!["a cat".to_string(), "   ".to_string()];

        assert_eq!(story.image_prompt(0), Some("a cat"));
        assert_eq!(story.image_prompt(1), None);
        assert_eq!(story.image_prompt(2), None);
    }

    #[test]
    fn question_consistency_requires_answer_among_choices() {
        let question = QuizQuestion {
            prompt: "What color is the sky?".to_string(),
            choices: vec!["Blue".to_string(), "Green".to_string()],
            correct_answer: "Blue".to_string(),
            explanation: "The sky is blue on a clear day.".to_string(),
        };
        assert!(question.is_consistent());

        let broken = QuizQuestion {
            correct_answer: "Purple".to_string(),
            ..question
        };
        assert!(!broken.is_consistent());
    }
}
