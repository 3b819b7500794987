//! Frequency tables for charts and word clouds.
//!
//! - [`word_counts`]: most common words in a token stream
//! - [`sentiment_word_counts`]: how often each word contributed to each label
//! - [`chapter_negativity`]: share of negative words per chapter

use rustc_hash::FxHashMap;
use serde::Serialize;
use sentiarc_types::{DocId, Polarity, ScoredToken, Sentiment, Token};

use crate::lexicon::Lexicon;

/// A word and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// The word
    pub word: String,
    /// Occurrences
    pub n: u64,
}

/// A word's contribution to one polarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    /// The word
    pub word: String,
    /// Label or score it was joined with
    pub polarity: Polarity,
    /// Occurrences
    pub n: u64,
}

/// Negative-word share of one chapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChapterNegativity {
    /// Document identifier
    pub doc_id: DocId,
    /// Chapter counter (1-based)
    pub chapter: u32,
    /// Words in the lexicon's negative set
    pub negative_words: u64,
    /// All words in the chapter
    pub words: u64,
    /// negative_words / words
    pub ratio: f64,
}

/// Counts words, most frequent first; ties break alphabetically.
pub fn word_counts(tokens: &[Token]) -> Vec<WordCount> {
    let mut counts: FxHashMap<&str, u64> = FxHashMap::default();
    for token in tokens {
        *counts.entry(token.word.as_str()).or_default() += 1;
    }

    let mut out: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, n)| WordCount {
            word: word.to_owned(),
            n,
        })
        .collect();
    out.sort_unstable_by(|a, b| b.n.cmp(&a.n).then_with(|| a.word.cmp(&b.word)));
    out
}

/// Counts `(word, polarity)` pairs, most frequent first.
///
/// Ties break by word, then by polarity so the order is deterministic.
pub fn sentiment_word_counts(scored: &[ScoredToken]) -> Vec<Contribution> {
    let mut counts: FxHashMap<(&str, Polarity), u64> = FxHashMap::default();
    for token in scored {
        *counts.entry((token.word.as_str(), token.polarity)).or_default() += 1;
    }

    let mut out: Vec<Contribution> = counts
        .into_iter()
        .map(|((word, polarity), n)| Contribution {
            word: word.to_owned(),
            polarity,
            n,
        })
        .collect();
    out.sort_unstable_by(|a, b| {
        b.n.cmp(&a.n)
            .then_with(|| a.word.cmp(&b.word))
            .then_with(|| polarity_rank(a.polarity).cmp(&polarity_rank(b.polarity)))
    });
    out
}

fn polarity_rank(p: Polarity) -> (u8, i32) {
    match p {
        Polarity::Label(l) => (0, l as i32),
        Polarity::Score(s) => (1, s),
    }
}

/// Top `n` contributors per polarity, for side-by-side bar charts.
pub fn top_contributions(rows: &[Contribution], n: usize) -> Vec<Contribution> {
    let mut taken: FxHashMap<Polarity, usize> = FxHashMap::default();
    rows.iter()
        .filter(|row| {
            let seen = taken.entry(row.polarity).or_default();
            *seen += 1;
            *seen <= n
        })
        .cloned()
        .collect()
}

/// Ratio of negative words to all words, per `(doc_id, chapter)`.
///
/// `lexicon` decides which words are negative (any `negative` label).
/// Tokens before the first chapter heading (chapter 0) are skipped. Rows are
/// sorted by `(doc_id, chapter)`.
pub fn chapter_negativity(tokens: &[Token], lexicon: &Lexicon) -> Vec<ChapterNegativity> {
    let negative = Polarity::Label(Sentiment::Negative);
    let mut totals: FxHashMap<(DocId, u32), (u64, u64)> = FxHashMap::default();

    for token in tokens.iter().filter(|t| t.chapter > 0) {
        let (neg, all) = totals.entry((token.doc_id, token.chapter)).or_default();
        *all += 1;
        if lexicon.get(&token.word).contains(&negative) {
            *neg += 1;
        }
    }

    let mut out: Vec<ChapterNegativity> = totals
        .into_iter()
        .map(|((doc_id, chapter), (negative_words, words))| ChapterNegativity {
            doc_id,
            chapter,
            negative_words,
            words,
            ratio: negative_words as f64 / words as f64,
        })
        .collect();
    out.sort_unstable_by_key(|r| (r.doc_id, r.chapter));
    out
}

/// The chapter with the highest negative ratio in each document.
///
/// On a tie the earlier chapter wins.
pub fn most_negative_chapters(rows: &[ChapterNegativity]) -> Vec<ChapterNegativity> {
    let mut best: FxHashMap<DocId, ChapterNegativity> = FxHashMap::default();
    for row in rows {
        best.entry(row.doc_id)
            .and_modify(|b| {
                if row.ratio > b.ratio || (row.ratio == b.ratio && row.chapter < b.chapter) {
                    *b = *row;
                }
            })
            .or_insert(*row);
    }
    let mut out: Vec<_> = best.into_values().collect();
    out.sort_unstable_by_key(|r| r.doc_id);
    out
}
