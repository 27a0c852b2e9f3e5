//! Banned-word filter for comment text.

use crate::config::SiteConfig;

/// Fixed list of substrings that make comment text unacceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannedWordFilter {
    words: Vec<String>,
}

impl BannedWordFilter {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.banned_words.clone())
    }

    /// Returns the first banned word contained in `text`.
    ///
    /// Matching is a case-sensitive substring search.
    pub fn find(&self, text: &str) -> Option<&str> {
        self.words
            .iter()
            .find(|word| text.contains(word.as_str()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::BannedWordFilter;
    use crate::config::SiteConfig;

    #[test]
    fn finds_banned_word_inside_text() {
        let filter = BannedWordFilter::from_config(&SiteConfig::default());
        assert_eq!(
            filter.find("Какой-то текст, редиска, еще текст"),
            Some("редиска")
        );
        assert_eq!(filter.find("Просто текст."), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let filter = BannedWordFilter::new(vec!["негодяй".to_string()]);
        assert_eq!(filter.find("НЕГОДЯЙ"), None);
        assert_eq!(filter.find("вот негодяй"), Some("негодяй"));
    }
}
