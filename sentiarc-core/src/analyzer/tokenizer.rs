//! Line-aware word tokenizer.
//!
//! Walks a document one line at a time, normalizes each line and emits every
//! word together with the line it came from and the chapter it belongs to.
//! Line numbers are 1-based, so a document with fewer than `window_size`
//! lines lands entirely in window 0.
//!
//! ```text
//! "CHAPTER I\n\nIt is a truth universally acknowledged"
//!   -> ("chapter", line 1, chapter 1) ("i", line 1, chapter 1)
//!      ("it", line 3, chapter 1) ("is", line 3, chapter 1) ...
//! ```
//!
//! Words are emitted as slices of an internal line buffer through a callback,
//! so the hot path never allocates per word. [`LineTokenizer::tokenize_document`]
//! materializes owned [`Token`]s when the caller needs them.

use core::str;

use memchr::memchr_iter;
use sentiarc_types::{DocId, Token};

use crate::analyzer::normalizer::{NormalizerConfig, TextNormalizer};

/// Where a word was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePos {
    /// 1-based line number
    pub line: u32,
    /// Chapter counter, 0 before the first heading
    pub chapter: u32,
}

/// Splits a normalized line on single ASCII spaces.
///
/// The input must come from [`TextNormalizer`]: no leading, trailing or
/// repeated spaces.
#[inline]
pub fn split_words<'n, F>(normalized: &'n str, mut emit: F)
where
    F: FnMut(&'n str),
{
    let bytes = normalized.as_bytes();

    debug_assert!(
        bytes.first().is_none_or(|&b| b != b' ') && bytes.last().is_none_or(|&b| b != b' '),
        "split_words: edge whitespace, normalizer contract violated"
    );

    let mut start = 0usize;
    for i in memchr_iter(b' ', bytes) {
        if start < i {
            emit(&normalized[start..i]);
        }
        start = i + 1;
    }
    if start < bytes.len() {
        emit(&normalized[start..]);
    }
}

/// Returns `true` for lines such as `CHAPTER I` or `Chapter 12`.
///
/// The word `chapter` must start the line (ignoring indentation and case)
/// and be followed by whitespace and an arabic digit or a roman numeral
/// letter (i, v, x, l, c).
pub fn is_chapter_heading(line: &str) -> bool {
    let line = line.trim_start().as_bytes();
    const KEYWORD: &[u8] = b"chapter";

    if line.len() <= KEYWORD.len() || !line[..KEYWORD.len()].eq_ignore_ascii_case(KEYWORD) {
        return false;
    }

    let rest = &line[KEYWORD.len()..];
    if !rest[0].is_ascii_whitespace() {
        return false;
    }

    rest.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| {
            b.is_ascii_digit() || matches!(b.to_ascii_lowercase(), b'i' | b'v' | b'x' | b'l' | b'c')
        })
}

/// Tokenizer that tracks line and chapter position.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTokenizer {
    normalizer: TextNormalizer,
}

impl LineTokenizer {
    /// Creates a tokenizer with the given normalizer settings.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self {
            normalizer: TextNormalizer::new(config),
        }
    }

    /// Tokenizes `text` and emits `(word, position)` for every word.
    ///
    /// Both `\n` and `\r\n` line endings are accepted. Lines are counted
    /// even when they contain no words, so blank lines still advance the
    /// line number.
    pub fn tokenize<F>(&self, text: &str, mut emit: F)
    where
        F: FnMut(&str, LinePos),
    {
        let bytes = text.as_bytes();
        let mut buf = String::with_capacity(128);
        let mut pos = LinePos {
            line: 0,
            chapter: 0,
        };
        let mut start = 0usize;

        let mut visit = |raw: &str, pos: &mut LinePos| {
            pos.line = pos.line.saturating_add(1);
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            if is_chapter_heading(raw) {
                pos.chapter += 1;
            }
            self.normalizer.normalize_into(raw, &mut buf);
            let at = *pos;
            split_words(&buf, |word| emit(word, at));
        };

        for i in memchr_iter(b'\n', bytes) {
            visit(&text[start..i], &mut pos);
            start = i + 1;
        }
        if start < bytes.len() {
            visit(&text[start..], &mut pos);
        }
    }

    /// Tokenizes a whole document into owned tokens.
    pub fn tokenize_document(&self, doc_id: DocId, text: &str) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(text.len() / 6);
        self.tokenize(text, |word, at| {
            tokens.push(Token::new(doc_id, at.line, word).with_chapter(at.chapter));
        });
        tokens
    }
}
