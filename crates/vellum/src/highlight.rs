//! Highlighted words: text containing a listed word or phrase fades to an
//! accent colour once it first scrolls into view.

use vellum_core::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightRules {
    /// Whole words, matched case-insensitively.
    words: Vec<String>,
    /// Substrings, matched case-insensitively.
    phrases: Vec<String>,
    pub color: Color,
    /// Fade duration in seconds.
    pub transition_duration: f32,
}

impl Default for HighlightRules {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            phrases: Vec::new(),
            color: Color::RED,
            transition_duration: 0.5,
        }
    }
}

impl HighlightRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_words(words);
        self
    }

    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_phrases(phrases);
        self
    }

    pub fn with_transition_duration(mut self, seconds: f32) -> Self {
        self.transition_duration = seconds;
        self
    }

    /// Add words at runtime. Duplicates and blanks are ignored.
    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        push_normalized(&mut self.words, words);
    }

    pub fn add_phrases<I, S>(&mut self, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        push_normalized(&mut self.phrases, phrases);
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.phrases.is_empty()
    }

    /// Whether `text` contains a listed word or phrase.
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.phrases.iter().any(|phrase| lower.contains(phrase.as_str()))
            || self
                .words
                .iter()
                .any(|word| contains_whole_word(&lower, word))
    }

    /// Fade progress `[0, 1]` after `elapsed` seconds.
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.transition_duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.transition_duration).clamp(0.0, 1.0)
    }
}

fn push_normalized<I, S>(target: &mut Vec<String>, items: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for item in items {
        let item = item.as_ref().trim().to_lowercase();
        if !item.is_empty() && !target.contains(&item) {
            target.push(item);
        }
    }
}

/// Word characters for boundary checks. Apostrophes stay inside words so
/// "doesn't" is one word.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

fn contains_whole_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(start, matched)| {
        let end = start + matched.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> HighlightRules {
        HighlightRules::new()
            .with_words(["future", "Doesn't"])
            .with_phrases(["next level"])
    }

    #[test]
    fn test_whole_word_matching() {
        let rules = rules();
        assert!(rules.matches("Build the FUTURE today"));
        assert!(rules.matches("future."));
        assert!(!rules.matches("futures"));
        assert!(!rules.matches("the futurey look"));
        assert!(rules.matches("It doesn't matter"));
    }

    #[test]
    fn test_phrase_substring_matching() {
        let rules = rules();
        assert!(rules.matches("Take it to the Next Level!"));
        assert!(rules.matches("next levels"));
        assert!(!rules.matches("next-level"));
    }

    #[test]
    fn test_runtime_additions() {
        let mut rules = HighlightRules::new();
        assert!(rules.is_empty());
        assert!(!rules.matches("care"));

        rules.add_words(["care", " care ", ""]);
        assert_eq!(rules.words(), &["care".to_string()]);
        assert!(rules.matches("We care."));

        rules.set_color(Color::WHITE);
        assert_eq!(rules.color, Color::WHITE);
    }

    #[test]
    fn test_progress_clamps() {
        let rules = HighlightRules::new();
        assert_eq!(rules.progress(0.0), 0.0);
        assert_eq!(rules.progress(0.25), 0.5);
        assert_eq!(rules.progress(3.0), 1.0);
        assert_eq!(rules.with_transition_duration(0.0).progress(0.0), 1.0);
    }
}
