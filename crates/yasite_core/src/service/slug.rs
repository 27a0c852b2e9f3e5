//! Slug derivation and validation for notes.
//!
//! # Invariants
//! - Derived slugs contain only `[a-z0-9_-]` and never start or end with `-`.
//! - Cyrillic letters are transliterated with a fixed Russian table.

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("valid separator regex"));
static VALID_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug regex"));

/// Field error shown for a supplied slug with disallowed characters.
pub const INVALID_SLUG_MESSAGE: &str =
    "Значение должно состоять только из латинских букв, цифр, знаков подчеркивания или дефиса.";

/// Derives a URL-safe slug from free text, truncated to `max_len` chars.
///
/// `slugify("Апандра", 100) == "apandra"`.
pub fn slugify(value: &str, max_len: usize) -> String {
    let mut ascii = String::with_capacity(value.len());
    for ch in value.chars().flat_map(char::to_lowercase) {
        if let Some(latin) = transliterate(ch) {
            ascii.push_str(latin);
        } else if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch.is_whitespace() {
            ascii.push(ch);
        }
    }

    let collapsed = SEPARATOR_RUN_RE.replace_all(ascii.trim(), "-");
    let truncated: String = trim_separators(&collapsed).chars().take(max_len).collect();
    trim_separators(&truncated).to_string()
}

fn trim_separators(value: &str) -> &str {
    value.trim_matches(|ch: char| ch == '-' || ch == '_')
}

/// Returns whether a requester-supplied slug is well formed.
pub fn is_valid_slug(value: &str) -> bool {
    VALID_SLUG_RE.is_match(value)
}

fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}
