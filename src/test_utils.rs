#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{QuizQuestion, StoryQuizResult};
    use crate::models::dto::request::GenerateContentRequestDto;

    /// A two-paragraph story with illustration prompts and a one-question quiz.
    pub fn sample_story() -> StoryQuizResult {
        StoryQuizResult {
            title: "Rosie the Robot".to_string(),
            paragraphs: vec![
                "Rosie the robot lived in a quiet library.".to_string(),
                "Every night she dusted the shelves and read a new book.".to_string(),
            ],
            paragraph_image_prompts: vec![
                "a friendly robot in a library".to_string(),
                "a robot reading a book by lamplight".to_string(),
            ],
            quiz_title: "Rosie's Quiz".to_string(),
            questions: vec![QuizQuestion {
                prompt: "Where did Rosie live?".to_string(),
                choices: vec![
                    "A castle".to_string(),
                    "A library".to_string(),
                    "A boat".to_string(),
                    "A garden".to_string(),
                ],
                correct_answer: "A library".to_string(),
                explanation: "The story says Rosie lived in a quiet library.".to_string(),
            }],
        }
    }

    /// The JSON a well-behaved text provider returns for `sample_story`.
    pub fn sample_story_json() -> String {
        serde_json::json!({
            "story_title": "Rosie the Robot",
            "story_text": [
                "Rosie the robot lived in a quiet library.",
                "Every night she dusted the shelves and read a new book."
            ],
            "paragraph_image_prompts": [
                "a friendly robot in a library",
                "a robot reading a book by lamplight"
            ],
            "quiz_title": "Rosie's Quiz",
            "questions": [{
                "question": "Where did Rosie live?",
                "choices": ["A castle", "A library", "A boat", "A garden"],
                "answer": "A library",
                "explanation": "The story says Rosie lived in a quiet library."
            }]
        })
        .to_string()
    }

    pub fn sample_request(interests: &str, story_title: Option<&str>) -> GenerateContentRequestDto {
        GenerateContentRequestDto {
            lexile: 650,
            grade: 4,
            interests: interests.to_string(),
            story_title: story_title.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::dto::generation_payload::StoryPayload;

    #[test]
    fn test_fixture_story_is_consistent() {
        let story = sample_story();
        assert!(story.has_content());
        assert!(story.questions.iter().all(|q| q.is_consistent()));
        assert_eq!(story.paragraphs.len(), story.paragraph_image_prompts.len());
    }

    #[test]
    fn test_fixture_json_parses_to_fixture_story() {
        let payload: StoryPayload = serde_json::from_str(&sample_story_json()).unwrap();
        assert_eq!(payload.into_story().unwrap(), sample_story());
    }

    #[test]
    fn test_fixture_request() {
        let request = sample_request("dogs", Some("Space Dogs"));
        assert_eq!(request.grade, 4);
        assert_eq!(request.story_title.as_deref(), Some("Space Dogs"));
    }
}
