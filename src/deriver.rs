//! Password derivation from a rendered story.
//!
//! Pure and repeatable: the same story, placeholder set and word map always
//! give the same word order and password.

use crate::types::Category;
use std::ops::Range;

/// Word characters for boundary purposes: ASCII letters, digits and `_`
fn is_word_char(c: Option<char>) -> bool {
    matches!(c, Some(c) if c.is_ascii_alphanumeric() || c == '_')
}

/// A word boundary sits between a word character and a non-word character,
/// or between a word character and either end of the text.
fn is_boundary(text: &str, index: usize) -> bool {
    let before = text[..index].chars().next_back();
    let after = text[index..].chars().next();
    is_word_char(before) != is_word_char(after)
}

/// Length in bytes of `word` matched case-insensitively at the start of `text`
fn match_len(text: &str, word: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    for w in word.chars() {
        let (_, t) = text_chars.next()?;
        if !t.to_lowercase().eq(w.to_lowercase()) {
            return None;
        }
    }
    Some(text_chars.next().map(|(i, _)| i).unwrap_or(text.len()))
}

/// Byte range of the first case-insensitive whole-word occurrence of `word`
/// in `text`
pub fn find_word_span(text: &str, word: &str) -> Option<Range<usize>> {
    let starts = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()));

    for start in starts {
        if !is_boundary(text, start) {
            continue;
        }
        if let Some(len) = match_len(&text[start..], word) {
            if is_boundary(text, start + len) {
                return Some(start..start + len);
            }
        }
    }
    None
}

/// Byte offset of the first case-insensitive whole-word occurrence of `word`
/// in `text`. Word characters are ASCII letters, digits and `_`, matching
/// the usual `\b` semantics.
pub fn find_word(text: &str, word: &str) -> Option<usize> {
    find_word_span(text, word).map(|span| span.start)
}

/// Upper-case the first character, keep the rest as it is
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Order the words of the used placeholders by where they first appear in
/// `story`.
///
/// Only categories in `used` are considered. A word with no whole-word match,
/// or one whose match position was already claimed by an identical word, is
/// left out.
pub fn ordered_words(story: &str, used: &[Category], words: &[(Category, String)]) -> Vec<String> {
    let mut found: Vec<(usize, &str)> = Vec::new();

    for (category, word) in words {
        if !used.contains(category) {
            continue;
        }
        let Some(position) = find_word(story, word) else {
            continue;
        };
        let taken = found
            .iter()
            .any(|(p, w)| *p == position && w.to_lowercase() == word.to_lowercase());
        if !taken {
            found.push((position, word.as_str()));
        }
    }

    found.sort_by_key(|(position, _)| *position);
    found.into_iter().map(|(_, word)| word.to_string()).collect()
}

/// Concatenate the words, each with its first letter upper-cased
pub fn password_from_words(words: &[String]) -> String {
    words.iter().map(|word| capitalize(word)).collect()
}

/// `(story, used placeholders, word map) -> (words, password)`
pub fn derive(story: &str, used: &[Category], words: &[(Category, String)]) -> (Vec<String>, String) {
    let ordered = ordered_words(story, used, words);
    let password = password_from_words(&ordered);
    (ordered, password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_map(pairs: &[(Category, &str)]) -> Vec<(Category, String)> {
        pairs.iter().map(|(c, w)| (*c, w.to_string())).collect()
    }

    #[test]
    fn test_find_word_boundaries() {
        assert_eq!(find_word("The red fox with the box.", "fox"), Some(8));
        assert_eq!(find_word("The red fox with the box.", "box"), Some(21));
        // Inside a longer word is not a match
        assert_eq!(find_word("The boxer left.", "box"), None);
        assert_eq!(find_word("A sandbox.", "box"), None);
        // Punctuation counts as a boundary
        assert_eq!(find_word("Look, a fox!", "fox"), Some(8));
        assert_eq!(find_word("fox", "fox"), Some(0));
    }

    #[test]
    fn test_find_word_case_insensitive() {
        assert_eq!(find_word("Red fox.", "red"), Some(0));
        assert_eq!(find_word("the GOLDEN ring", "golden"), Some(4));
    }

    #[test]
    fn test_find_word_first_occurrence() {
        assert_eq!(find_word("moon, moon and moon", "moon"), Some(0));
        assert_eq!(find_word("The moonlit moon.", "moon"), Some(12));
    }

    #[test]
    fn test_find_word_non_ascii_text() {
        assert_eq!(find_word("Café fox", "fox"), Some(6));
        // Non-ASCII letters are not word characters
        assert_eq!(find_word("naïve", "ve"), Some(4));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("red"), "Red");
        assert_eq!(capitalize("Red"), "Red");
        assert_eq!(capitalize("mcFly"), "McFly");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_derive_example_story() {
        let used = [Category::Character, Category::Object, Category::Colour];
        let words = word_map(&[
            (Category::Character, "fox"),
            (Category::Place, "moon"),
            (Category::Object, "box"),
            (Category::Action, "runs"),
            (Category::Colour, "red"),
        ]);

        let (ordered, password) = derive("The red fox with the box.", &used, &words);
        assert_eq!(ordered, vec!["red", "fox", "box"]);
        assert_eq!(password, "RedFoxBox");
    }

    #[test]
    fn test_unused_placeholders_ignored() {
        // "moon" appears in the text but {place} was not in the template
        let used = [Category::Character];
        let words = word_map(&[(Category::Character, "fox"), (Category::Place, "moon")]);
        let (ordered, _) = derive("The fox saw the moon.", &used, &words);
        assert_eq!(ordered, vec!["fox"]);
    }

    #[test]
    fn test_missing_word_dropped() {
        let used = [Category::Character, Category::Object];
        let words = word_map(&[(Category::Character, "fox"), (Category::Object, "box")]);
        let (ordered, password) = derive("The fox with the boxes.", &used, &words);
        assert_eq!(ordered, vec!["fox"]);
        assert_eq!(password, "Fox");
    }

    #[test]
    fn test_identical_words_kept_once() {
        let used = [Category::Object, Category::Colour];
        let words = word_map(&[(Category::Object, "coral"), (Category::Colour, "coral")]);
        let (ordered, password) = derive("A coral coral.", &used, &words);
        assert_eq!(ordered, vec!["coral"]);
        assert_eq!(password, "Coral");
    }

    #[test]
    fn test_password_is_repeatable() {
        let words = vec!["golden".to_string(), "wizard".to_string(), "wand".to_string()];
        let first = password_from_words(&words);
        assert_eq!(first, "GoldenWizardWand");
        assert_eq!(password_from_words(&words), first);
    }
}
