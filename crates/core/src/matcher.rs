//! Keyword and token matching over normalized user text.
//!
//! Everything here works on plain strings: callers normalize once with
//! [`normalize`] and then run any number of cheap containment checks.

/// Result of scanning text for the first run of ASCII digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegerLiteral {
    Value(u32),
    /// Digits were present but do not fit in a `u32`.
    Overflow,
}

pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// True when any phrase occurs as a plain substring of `haystack`.
pub fn contains_any(haystack: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| haystack.contains(phrase))
}

/// Substring match bounded on both sides by a non-alphanumeric character or
/// a string edge. `"toothbrushing"` does not contain the word `"toothbrush"`.
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    haystack.match_indices(needle).any(|(start, matched)| {
        let end = start + matched.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// The first maximal run of ASCII digits anywhere in `text`, if any.
pub fn first_integer(text: &str) -> Option<IntegerLiteral> {
    let start = text.find(|character: char| character.is_ascii_digit())?;
    let digits = &text[start..];
    let end = digits.find(|character: char| !character.is_ascii_digit()).unwrap_or(digits.len());

    Some(match digits[..end].parse::<u32>() {
        Ok(value) => IntegerLiteral::Value(value),
        Err(_) => IntegerLiteral::Overflow,
    })
}
