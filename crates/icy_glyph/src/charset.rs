use std::{collections::HashSet, fmt::Display};

pub const DEFAULT_NUMBERS: &str = "1234567890";
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DEFAULT_SYMBOLS: &str = "+-*/=.,_?!\"'£$%^&*()@#:;~";

/// Ordered set of unique, non whitespace characters to render.
///
/// The order is the order of first appearance in the source text, it determines the
/// order of the rendered glyphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CharacterSet {
    chars: Vec<char>,
}

impl CharacterSet {
    /// Drops whitespace and duplicates from `raw`, keeping the first occurrence of every character.
    pub fn normalize(raw: &str) -> Self {
        let mut seen = HashSet::new();
        let chars = raw.chars().filter(|ch| !ch.is_whitespace() && seen.insert(*ch)).collect();
        Self { chars }
    }

    /// Digits, lower case and upper case latin letters followed by common punctuation.
    pub fn default_set() -> Self {
        let raw = format!("{DEFAULT_NUMBERS}{DEFAULT_ALPHABET}{}{DEFAULT_SYMBOLS}", DEFAULT_ALPHABET.to_uppercase());
        Self::normalize(&raw)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, char> {
        self.chars.iter()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }
}

impl Display for CharacterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in &self.chars {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl From<&str> for CharacterSet {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl<'a> IntoIterator for &'a CharacterSet {
    type Item = &'a char;
    type IntoIter = std::slice::Iter<'a, char>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_duplicates_and_whitespace() {
        assert_eq!(CharacterSet::normalize("aa a").to_string(), "a");
        assert_eq!(CharacterSet::normalize(" \t\nb a\u{3000}b").to_string(), "ba");
    }

    #[test]
    fn test_first_occurrence_order() {
        assert_eq!(CharacterSet::normalize("cabbage").chars(), &['c', 'a', 'b', 'g', 'e']);
        assert_eq!(CharacterSet::normalize("aA1").chars(), &['a', 'A', '1']);
    }

    #[test]
    fn test_idempotent() {
        for raw in ["", "   ", "hello world", "ÄäÖöÜü ßß", "🦀a🦀b", "aA1 aA1"] {
            let once = CharacterSet::normalize(raw);
            let twice = CharacterSet::normalize(&once.to_string());
            assert_eq!(once, twice, "normalize not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(CharacterSet::normalize("").is_empty());
        assert!(CharacterSet::normalize(" \r\n\t").is_empty());
    }

    #[test]
    fn test_default_set() {
        let set = CharacterSet::default_set();
        assert_eq!(set.chars()[0], '1');
        assert!(set.contains('z'));
        assert!(set.contains('Z'));
        assert!(set.contains('£'));
        // '*' is listed twice in the symbols
        assert_eq!(set.iter().filter(|ch| **ch == '*').count(), 1);
        assert_eq!(set.len(), 10 + 26 + 26 + DEFAULT_SYMBOLS.chars().count() - 1);
    }
}
