//! Site configuration surface.
//!
//! # Responsibility
//! - Hold the tunables shared by feeds and mutation services.
//! - Parse and validate JSON configuration documents.
//!
//! # Invariants
//! - `news_count_on_home_page` and `slug_max_length` are positive.
//! - `banned_words` contains no blank entries.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default home-feed page size.
pub const NEWS_COUNT_ON_HOME_PAGE: u32 = 10;
/// Default banned-word list for comment text.
pub const DEFAULT_BANNED_WORDS: &[&str] = &["редиска", "негодяй"];
/// Field error shown when comment text contains a banned word.
pub const BANNED_WORD_WARNING: &str = "Не ругайтесь!";
/// Suffix appended to a conflicting slug in the duplicate-slug field error.
pub const DUPLICATE_SLUG_SUFFIX: &str =
    " - такой slug уже существует, придумайте уникальное значение!";
/// Default maximum slug length; derived slugs are truncated to it.
pub const SLUG_MAX_LENGTH: usize = 100;

/// How edit/delete requests from anonymous identities are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymousMutation {
    /// Same answer as for a non-owner: the item does not exist.
    #[default]
    NotFound,
    /// Redirect to login carrying the requested URL.
    LoginRedirect,
}

/// Site-wide tunables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub news_count_on_home_page: u32,
    pub banned_words: Vec<String>,
    pub banned_word_warning: String,
    pub duplicate_slug_suffix: String,
    pub slug_max_length: usize,
    pub anonymous_mutation: AnonymousMutation,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            news_count_on_home_page: NEWS_COUNT_ON_HOME_PAGE,
            banned_words: DEFAULT_BANNED_WORDS
                .iter()
                .map(|word| (*word).to_string())
                .collect(),
            banned_word_warning: BANNED_WORD_WARNING.to_string(),
            duplicate_slug_suffix: DUPLICATE_SLUG_SUFFIX.to_string(),
            slug_max_length: SLUG_MAX_LENGTH,
            anonymous_mutation: AnonymousMutation::default(),
        }
    }
}

impl SiteConfig {
    /// Parses a JSON document; absent keys keep their defaults.
    ///
    /// # Errors
    /// - `ConfigError::Parse` when the document is not valid JSON for this shape.
    /// - `ConfigError::Invalid` when a value violates config invariants.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks config invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.news_count_on_home_page == 0 {
            return Err(ConfigError::Invalid {
                key: "news_count_on_home_page",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.slug_max_length == 0 {
            return Err(ConfigError::Invalid {
                key: "slug_max_length",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.banned_words.iter().any(|word| word.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                key: "banned_words",
                message: "entries must not be blank".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration parse/validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Invalid { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid site config: {message}"),
            Self::Invalid { key, message } => write!(f, "invalid site config `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {}
