use once_cell::sync::Lazy;
use regex::Regex;

pub const FALLBACK_KEYWORD: &str = "children books";

/// Child-safe topics. Doubles as the gate for what may be sent to an image search.
pub const SAFE_KEYWORDS: &[&str] = &[
    "animals", "nature", "reading", "books", "school", "sports", "adventure", "science", "art",
    "music", "friendship", "kindness", "history", "space", "math", "technology", "robot",
    "garden", "tree", "forest", "mountain", "ocean", "sea", "river", "flower", "insect", "bird",
    "dog", "cat", "horse", "dinosaur", "transportation", "train", "car", "plane", "boat",
    "exploration", "discovery", "imagination", "fun", "learning", "play", "children", "kids",
    "student", "story", "library", "teacher", "classroom", "puzzle", "game", "drawing",
    "painting", "craft", "lego", "block", "magic", "superhero", "princess", "castle", "knight",
    "dragon", "pirate", "detective", "mystery", "holiday", "festival", "celebration", "family",
    "community", "help", "respect", "courage", "fish",
];

static INTEREST_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,;]+").expect("INTEREST_SEPARATOR is a valid regex pattern"));

pub fn is_safe_keyword(keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    SAFE_KEYWORDS.contains(&keyword.as_str())
}

/// Picks the topical keyword for a request.
///
/// A non-empty title wins: the first whitelist word found inside it, or the
/// lower-cased title itself. Otherwise the first interest token on the
/// whitelist (plurals match their singular entry). Falls back to
/// [`FALLBACK_KEYWORD`].
pub fn resolve(interests: &str, story_title: Option<&str>) -> String {
    if let Some(title) = story_title.map(str::trim).filter(|t| !t.is_empty()) {
        let title = title.to_lowercase();
        return SAFE_KEYWORDS
            .iter()
            .find(|safe| title.contains(*safe))
            .map(|safe| safe.to_string())
            .unwrap_or(title);
    }

    let interests = interests.to_lowercase();
    INTEREST_SEPARATOR
        .split(&interests)
        .filter(|token| !token.is_empty())
        .find_map(whitelist_entry)
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_KEYWORD.to_string())
}

fn whitelist_entry(token: &str) -> Option<&'static str> {
    let candidates = [
        Some(token),
        token.strip_suffix('s'),
        token.strip_suffix("es"),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| SAFE_KEYWORDS.iter().copied().find(|safe| *safe == candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interests_resolve_to_first_whitelisted_token() {
        let keyword = resolve("dogs and robots", None);
        assert!(keyword == "dog" || keyword == "robot", "got {keyword}");
        assert_eq!(keyword, "dog");
    }

    #[test]
    fn interests_without_whitelisted_token_fall_back() {
        assert_eq!(resolve("xyz123", None), FALLBACK_KEYWORD);
        assert_eq!(resolve("", None), FALLBACK_KEYWORD);
    }

    #[test]
    fn interests_split_on_commas_and_semicolons() {
        assert_eq!(resolve("Xbox;PIRATE, space", None), "pirate");
    }

    #[test]
    fn exact_plural_entries_are_kept() {
        assert_eq!(resolve("animals", None), "animals");
        assert_eq!(resolve("kids", None), "kids");
    }

    #[test]
    fn title_uses_first_whitelist_substring() {
        assert_eq!(resolve("dinosaur", Some("The Dragon's Garden")), "garden");
    }

    #[test]
    fn unmatched_title_is_returned_lowercased() {
        assert_eq!(resolve("dog", Some("  Zephyr Quest ")), "zephyr quest");
    }

    #[test]
    fn blank_title_uses_interests() {
        assert_eq!(resolve("horses", Some("   ")), "horse");
    }

    #[test]
    fn resolve_is_deterministic() {
        assert_eq!(resolve("cats; music", None), resolve("cats; music", None));
    }

    #[test]
    fn safe_keyword_check_ignores_case() {
        assert!(is_safe_keyword("Ocean"));
        assert!(!is_safe_keyword("zephyr quest"));
        assert!(!is_safe_keyword(FALLBACK_KEYWORD));
    }
}
