use once_cell::sync::Lazy;

use crate::{
    constants::prompts::{
        CHOICES_PER_QUESTION, ERROR_FORMAT_RULE, NEVER_REFUSE_RULE, OUTPUT_FORMAT_RULES,
        QUESTION_COUNT, SAFETY_RULES, SIMPLIFIED_STORY_PROMPT, STORY_AUTHOR_PREAMBLE,
    },
    models::dto::generation_payload::StoryPayload,
    services::generation_tiers::LengthProfile,
};

// Rendered from the same type the response parser deserializes into.
static STORY_PAYLOAD_SCHEMA: Lazy<String> = Lazy::new(|| {
    serde_json::to_string(&schemars::schema_for!(StoryPayload)).unwrap_or_default()
});

/// Renders the primary instruction for a story and quiz.
pub fn build(lexile: u32, grade: u8, theme: &str) -> String {
    let profile = LengthProfile::for_grade(grade);
    let mut prompt = format!(
        "{STORY_AUTHOR_PREAMBLE} Write an original, positive, age-appropriate story for a student in grade {grade} with a Lexile level of {lexile}. The story should be about {theme}. {SAFETY_RULES} {NEVER_REFUSE_RULE} Length: about {words} words. After the story, create {QUESTION_COUNT} multiple-choice comprehension questions ({CHOICES_PER_QUESTION} choices each), with the correct answer and a 1-sentence explanation.\n\n{OUTPUT_FORMAT_RULES}\n\n{ERROR_FORMAT_RULE}",
        theme = theme.trim(),
        words = profile.words,
    );

    if !STORY_PAYLOAD_SCHEMA.is_empty() {
        prompt.push_str("\n\nThe JSON object must validate against this JSON Schema:\n");
        prompt.push_str(&STORY_PAYLOAD_SCHEMA);
    }

    prompt
}

/// Renders the relaxed instruction used after the primary attempt failed.
pub fn build_simplified(grade: u8, theme: &str) -> String {
    SIMPLIFIED_STORY_PROMPT
        .replace("{grade}", &grade.to_string())
        .replace("{theme}", theme.trim())
        .replace("{words}", &LengthProfile::simplified().words.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_encodes_request_parameters() {
        let prompt = build(820, 5, "dinosaur");

        assert!(prompt.contains("grade 5"));
        assert!(prompt.contains("Lexile level of 820"));
        assert!(prompt.contains("about dinosaur"));
        assert!(prompt.contains("about 500 words"));
        assert!(prompt.contains("5 multiple-choice"));
    }

    #[test]
    fn prompt_carries_safety_and_never_refuse_rules() {
        let prompt = build(400, 2, "space");

        assert!(prompt.contains("no violence, fear, bullying"));
        assert!(prompt.contains("Never refuse"));
    }

    #[test]
    fn prompt_names_every_parsed_field() {
        let prompt = build(400, 2, "space");

        for key in [
            "story_title",
            "story_text",
            "paragraph_image_prompts",
            "quiz_title",
            "questions",
            "\"error\"",
        ] {
            assert!(prompt.contains(key), "prompt is missing {key}");
        }
    }

    #[test]
    fn prompt_embeds_payload_schema() {
        let prompt = build(400, 2, "space");
        assert!(prompt.contains("JSON Schema"));
        assert!(prompt.contains("StoryPayload"));
    }

    #[test]
    fn simplified_prompt_asks_for_plain_text() {
        let prompt = build_simplified(3, " ocean ");

        assert!(prompt.contains("grade 3"));
        assert!(prompt.contains("about ocean"));
        assert!(prompt.contains("no JSON"));
        assert!(!prompt.contains('{'));
    }
}
