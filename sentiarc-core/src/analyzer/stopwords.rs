//! Stop-word filtering.
//!
//! Removes very common words ("the", "of", "and") before lexicon joins and
//! word counts. The built-in list is the Snowball English list; larger lists
//! (SMART, onix) can be loaded from a file with one word per line.

use std::path::Path;

use rustc_hash::FxHashSet;
use sentiarc_types::{Result, Token};
use tracing::debug;

use crate::analyzer::normalizer::TextNormalizer;

#[rustfmt::skip]
const SNOWBALL_ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "her",
    "hers", "herself", "it", "its", "itself", "they", "them", "their", "theirs",
    "themselves", "what", "which", "who", "whom", "this", "that", "these", "those",
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "would", "should", "could", "ought",
    "i'm", "you're", "he's", "she's", "it's", "we're", "they're", "i've", "you've",
    "we've", "they've", "i'd", "you'd", "he'd", "she'd", "we'd", "they'd", "i'll",
    "you'll", "he'll", "she'll", "we'll", "they'll", "isn't", "aren't", "wasn't",
    "weren't", "hasn't", "haven't", "hadn't", "doesn't", "don't", "didn't", "won't",
    "wouldn't", "shan't", "shouldn't", "can't", "cannot", "couldn't", "mustn't",
    "let's", "that's", "who's", "what's", "here's", "there's", "when's", "where's",
    "why's", "how's", "a", "an", "the", "and", "but", "if", "or", "because", "as",
    "until", "while", "of", "at", "by", "for", "with", "about", "against", "between",
    "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further",
    "then", "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor",
    "not", "only", "own", "same", "so", "than", "too", "very",
];

/// A set of words to drop.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: FxHashSet<String>,
}

impl StopWords {
    /// Creates an empty set (filters nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Snowball English list.
    pub fn english() -> Self {
        SNOWBALL_ENGLISH.iter().copied().collect()
    }

    /// Parses one word per line; blank lines and `#` comments are ignored.
    ///
    /// Entries are normalized the same way document text is, so `Don't`
    /// in the file matches `don't` in a token.
    pub fn parse(text: &str) -> Self {
        let normalizer = TextNormalizer::default();
        let mut words = FxHashSet::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let word = normalizer.normalize(line);
            if !word.is_empty() {
                words.insert(word);
            }
        }
        Self { words }
    }

    /// Loads a stop-word file.
    ///
    /// # Errors
    /// Returns `SentimentError::Io` if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let set = Self::parse(&text);
        debug!(path = %path.display(), words = set.len(), "loaded stop words");
        Ok(set)
    }

    /// Adds every word of `other`.
    pub fn extend(&mut self, other: StopWords) {
        self.words.extend(other.words);
    }

    /// Number of distinct stop words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` if `word` is a stop word.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Drops stop-word tokens in place (anti-join on `word`).
    pub fn retain(&self, tokens: &mut Vec<Token>) {
        if self.words.is_empty() {
            return;
        }
        let before = tokens.len();
        tokens.retain(|t| !self.contains(&t.word));
        debug!(removed = before - tokens.len(), kept = tokens.len(), "removed stop words");
    }
}

impl<'a> FromIterator<&'a str> for StopWords {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(str::to_owned).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_contains_common_words() {
        let sw = StopWords::english();
        for w in ["the", "and", "of", "she", "don't"] {
            assert!(sw.contains(w), "{w} should be a stop word");
        }
        assert!(!sw.contains("darcy"));
    }

    #[test]
    fn retain_drops_stop_words() {
        let sw = StopWords::english();
        let mut tokens = vec![
            Token::new(0, 1, "the"),
            Token::new(0, 1, "happy"),
            Token::new(0, 2, "of"),
            Token::new(0, 2, "marriage"),
        ];
        sw.retain(&mut tokens);
        let words: Vec<_> = tokens.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, vec!["happy", "marriage"]);
    }

    #[test]
    fn empty_set_keeps_everything() {
        let mut tokens = vec![Token::new(0, 1, "the")];
        StopWords::new().retain(&mut tokens);
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn parse_skips_comments_and_normalizes() {
        let sw = StopWords::parse("# custom list\nMiss\n\n  Don't \nsir\n");
        assert_eq!(sw.len(), 3);
        assert!(sw.contains("miss"));
        assert!(sw.contains("don't"));
    }

    #[test]
    fn extend_merges_lists() {
        let mut sw = StopWords::english();
        let before = sw.len();
        sw.extend(StopWords::parse("miss\nthe"));
        assert_eq!(sw.len(), before + 1);
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stop.txt");
        std::fs::write(&path, "mr\nmrs\n").unwrap();
        let sw = StopWords::from_path(&path).unwrap();
        assert!(sw.contains("mrs"));
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = StopWords::from_path("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, sentiarc_types::SentimentError::Io(_)));
    }
}
