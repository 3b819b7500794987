//! Sentiment lexicons and the token join.
//!
//! A lexicon maps a word to one or more polarities. Three families are
//! supported, all loaded from plain two-column files:
//!
//! | kind    | rows              | mode        |
//! |---------|-------------------|-------------|
//! | `bing`  | `word,positive`   | categorical |
//! | `nrc`   | `word,joy`        | categorical |
//! | `afinn` | `word,-3`         | scored      |
//!
//! The map is built once and reused for every join. Joining has inner-join
//! semantics: tokens whose word is not in the lexicon are dropped, and a
//! word with several entries (common in nrc) yields one scored token per
//! entry.

use core::fmt;
use core::str::FromStr;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use sentiarc_types::{
    AggregationMode, Polarity, PolarityCounts, Result, ScoredToken, Sentiment, SentimentError,
    Token,
};

/// Lexicon family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LexiconKind {
    /// Bing Liu's opinion lexicon: positive/negative labels.
    Bing,
    /// NRC word-emotion association lexicon: polarity plus eight emotions.
    Nrc,
    /// AFINN: integer scores from -5 to 5.
    Afinn,
}

impl LexiconKind {
    /// Every kind, in the order analyses report them.
    pub const ALL: [LexiconKind; 3] = [LexiconKind::Afinn, LexiconKind::Bing, LexiconKind::Nrc];

    /// Lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            LexiconKind::Bing => "bing",
            LexiconKind::Nrc => "nrc",
            LexiconKind::Afinn => "afinn",
        }
    }

    /// The aggregation mode entries of this family need.
    pub const fn mode(self) -> AggregationMode {
        match self {
            LexiconKind::Bing | LexiconKind::Nrc => AggregationMode::Categorical,
            LexiconKind::Afinn => AggregationMode::Scored,
        }
    }
}

impl fmt::Display for LexiconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LexiconKind {
    type Err = SentimentError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SentimentError::UnknownLexicon(s.to_owned()))
    }
}

type Entries = SmallVec<[Polarity; 2]>;

/// Word -> polarities map for one lexicon family.
#[derive(Debug, Clone)]
pub struct Lexicon {
    kind: LexiconKind,
    entries: FxHashMap<String, Entries>,
}

fn parse_error(line: usize, reason: impl Into<String>) -> SentimentError {
    SentimentError::LexiconParse {
        line,
        reason: reason.into(),
    }
}

impl Lexicon {
    /// Creates an empty lexicon.
    pub fn new(kind: LexiconKind) -> Self {
        Self {
            kind,
            entries: FxHashMap::default(),
        }
    }

    /// Parses `word<sep>value` rows, where `<sep>` is a comma or a tab.
    ///
    /// Blank lines and `#` comments are skipped, as is a leading header row
    /// whose first column is `word`. Words are trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns `SentimentError::LexiconParse` for a row without a separator,
    /// an empty word, an unknown label, a non-integer afinn score, an
    /// emotion label in a bing file, or an afinn word listed with two
    /// different scores.
    pub fn parse(kind: LexiconKind, text: &str) -> Result<Self> {
        let mut lexicon = Self::new(kind);
        let mut seen_row = false;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (word, value) = line
                .split_once(|c: char| c == ',' || c == '\t')
                .ok_or_else(|| parse_error(line_no, "expected `word,value`"))?;
            let word = word.trim().trim_matches('"').to_lowercase();
            let value = value.trim().trim_matches('"');

            if !seen_row {
                seen_row = true;
                if word == "word" {
                    continue;
                }
            }
            if word.is_empty() {
                return Err(parse_error(line_no, "empty word"));
            }

            let polarity = match kind {
                LexiconKind::Afinn => value
                    .parse::<i32>()
                    .map(Polarity::Score)
                    .map_err(|_| parse_error(line_no, format!("score {value:?} is not an integer")))?,
                LexiconKind::Bing | LexiconKind::Nrc => {
                    let label = Sentiment::from_label(value)
                        .ok_or_else(|| parse_error(line_no, format!("unknown label {value:?}")))?;
                    if kind == LexiconKind::Bing && !label.is_polar() {
                        return Err(parse_error(
                            line_no,
                            format!("bing only has positive/negative labels, got {label}"),
                        ));
                    }
                    Polarity::Label(label)
                }
            };

            let slot = lexicon.entries.entry(word).or_default();
            if slot.contains(&polarity) {
                continue;
            }
            if let (Polarity::Score(_), Some(existing)) = (polarity, slot.first()) {
                return Err(parse_error(
                    line_no,
                    format!("conflicting afinn scores {existing} and {polarity}"),
                ));
            }
            slot.push(polarity);
        }

        Ok(lexicon)
    }

    /// Loads a lexicon file.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors and the parse errors of [`Lexicon::parse`].
    pub fn from_path(kind: LexiconKind, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let lexicon = Self::parse(kind, &text)?;
        info!(
            kind = %kind,
            path = %path.display(),
            words = lexicon.len(),
            entries = lexicon.entry_count(),
            "loaded lexicon"
        );
        Ok(lexicon)
    }

    /// Adds one entry, ignoring exact duplicates.
    ///
    /// # Errors
    ///
    /// Returns `SentimentError::EntryMismatch` if the polarity does not match
    /// the lexicon family.
    pub fn insert(&mut self, word: &str, polarity: Polarity) -> Result<()> {
        if polarity.mode() != self.kind.mode() {
            return Err(SentimentError::EntryMismatch {
                word: word.to_owned(),
                expected: self.kind.mode(),
                found: polarity.mode(),
            });
        }
        let slot = self.entries.entry(word.to_lowercase()).or_default();
        if !slot.contains(&polarity) {
            slot.push(polarity);
        }
        Ok(())
    }

    /// Lexicon family.
    #[inline]
    pub fn kind(&self) -> LexiconKind {
        self.kind
    }

    /// Aggregation mode of this lexicon's entries.
    #[inline]
    pub fn mode(&self) -> AggregationMode {
        self.kind.mode()
    }

    /// Number of distinct words.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the lexicon has no words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of (word, polarity) entries.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(SmallVec::len).sum()
    }

    /// Polarities of `word`; empty if the word is unknown.
    #[inline]
    pub fn get(&self, word: &str) -> &[Polarity] {
        self.entries.get(word).map(|e| e.as_slice()).unwrap_or(&[])
    }

    /// Returns `true` if `word` has at least one entry.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Copy that keeps only the given labels.
    ///
    /// Used to narrow nrc to positive/negative before aggregation, or to a
    /// single emotion such as joy. Words left without entries are removed.
    /// Score entries are kept as they are.
    pub fn restrict(&self, labels: &[Sentiment]) -> Self {
        let entries = self
            .entries
            .iter()
            .filter_map(|(word, polarities)| {
                let kept: Entries = polarities
                    .iter()
                    .copied()
                    .filter(|p| match p {
                        Polarity::Label(l) => labels.contains(l),
                        Polarity::Score(_) => true,
                    })
                    .collect();
                (!kept.is_empty()).then(|| (word.clone(), kept))
            })
            .collect();
        Self {
            kind: self.kind,
            entries,
        }
    }

    /// Words carrying `label`, sorted.
    pub fn words_with(&self, label: Sentiment) -> Vec<&str> {
        let mut words: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, p)| p.contains(&Polarity::Label(label)))
            .map(|(w, _)| w.as_str())
            .collect();
        words.sort_unstable();
        words
    }

    /// Number of entries per label, in [`Sentiment::ALL`] order, zeros omitted.
    pub fn label_counts(&self) -> Vec<(Sentiment, usize)> {
        let mut counts = [0usize; Sentiment::ALL.len()];
        for p in self.entries.values().flatten() {
            if let Polarity::Label(l) = p {
                counts[*l as usize] += 1;
            }
        }
        Sentiment::ALL
            .into_iter()
            .zip(counts)
            .filter(|&(_, n)| n > 0)
            .collect()
    }

    /// How many entries lean positive and negative.
    ///
    /// Labels count by name; scores count by sign (zero scores count as
    /// neither).
    pub fn polarity_balance(&self) -> PolarityCounts {
        let mut balance = PolarityCounts::default();
        for p in self.entries.values().flatten() {
            match *p {
                Polarity::Label(Sentiment::Positive) => balance.positive += 1,
                Polarity::Label(Sentiment::Negative) => balance.negative += 1,
                Polarity::Score(s) if s > 0 => balance.positive += 1,
                Polarity::Score(s) if s < 0 => balance.negative += 1,
                _ => {}
            }
        }
        balance
    }

    /// Joins tokens against the lexicon.
    ///
    /// # Errors
    ///
    /// Returns `SentimentError::MalformedToken` for a token with an empty
    /// word or line number 0. No output is produced in that case.
    pub fn join(&self, tokens: &[Token]) -> Result<Vec<ScoredToken>> {
        let mut scored = Vec::with_capacity(tokens.len() / 8);

        for token in tokens {
            if token.word.is_empty() {
                return Err(SentimentError::MalformedToken {
                    doc_id: token.doc_id,
                    line: token.line,
                    reason: "empty word",
                });
            }
            if token.line == 0 {
                return Err(SentimentError::MalformedToken {
                    doc_id: token.doc_id,
                    line: token.line,
                    reason: "line numbers are 1-based",
                });
            }

            for &polarity in self.get(&token.word) {
                scored.push(ScoredToken {
                    doc_id: token.doc_id,
                    line: token.line,
                    word: token.word.clone(),
                    polarity,
                });
            }
        }

        debug!(
            kind = %self.kind,
            tokens = tokens.len(),
            scored = scored.len(),
            "joined tokens against lexicon"
        );
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BING: &str = "word,sentiment\ngood,positive\nbad,negative\nhappy,positive\n";
    const NRC: &str = "# nrc sample\nhappy\tjoy\nhappy\tpositive\nhappy\ttrust\nabandon\tfear\nabandon\tnegative\n";
    const AFINN: &str = "word,value\nabandon,-2\ngood,3\nmeh,0\n";

    #[test]
    fn kind_from_str() {
        assert_eq!("bing".parse::<LexiconKind>().unwrap(), LexiconKind::Bing);
        assert_eq!(" AFINN ".parse::<LexiconKind>().unwrap(), LexiconKind::Afinn);
        assert!(matches!(
            "vader".parse::<LexiconKind>(),
            Err(SentimentError::UnknownLexicon(_))
        ));
    }

    #[test]
    fn kind_modes() {
        assert_eq!(LexiconKind::Bing.mode(), AggregationMode::Categorical);
        assert_eq!(LexiconKind::Nrc.mode(), AggregationMode::Categorical);
        assert_eq!(LexiconKind::Afinn.mode(), AggregationMode::Scored);
    }

    #[test]
    fn parse_bing_skips_header() {
        let lex = Lexicon::parse(LexiconKind::Bing, BING).unwrap();
        assert_eq!(lex.len(), 3);
        assert_eq!(lex.get("good"), &[Polarity::Label(Sentiment::Positive)]);
        assert!(!lex.contains("word"));
    }

    #[test]
    fn parse_nrc_multi_entries() {
        let lex = Lexicon::parse(LexiconKind::Nrc, NRC).unwrap();
        assert_eq!(lex.len(), 2);
        assert_eq!(lex.entry_count(), 5);
        assert_eq!(lex.get("happy").len(), 3);
    }

    #[test]
    fn parse_afinn_scores() {
        let lex = Lexicon::parse(LexiconKind::Afinn, AFINN).unwrap();
        assert_eq!(lex.get("abandon"), &[Polarity::Score(-2)]);
        assert_eq!(lex.get("meh"), &[Polarity::Score(0)]);
    }

    #[test]
    fn parse_dedups_repeated_rows() {
        let lex = Lexicon::parse(LexiconKind::Bing, "good,positive\nGood,positive\n").unwrap();
        assert_eq!(lex.entry_count(), 1);
    }

    #[test]
    fn parse_errors_report_line() {
        let err = Lexicon::parse(LexiconKind::Bing, "good,positive\nbroken\n").unwrap_err();
        assert!(matches!(err, SentimentError::LexiconParse { line: 2, .. }));

        let err = Lexicon::parse(LexiconKind::Afinn, "good,great").unwrap_err();
        assert!(matches!(err, SentimentError::LexiconParse { line: 1, .. }));

        let err = Lexicon::parse(LexiconKind::Nrc, "good,neutral").unwrap_err();
        assert!(err.to_string().contains("unknown label"));

        let err = Lexicon::parse(LexiconKind::Bing, "happy,joy").unwrap_err();
        assert!(err.to_string().contains("bing only has"));

        let err = Lexicon::parse(LexiconKind::Afinn, "good,3\ngood,2").unwrap_err();
        assert!(err.to_string().contains("conflicting"));

        let err = Lexicon::parse(LexiconKind::Bing, " ,positive").unwrap_err();
        assert!(err.to_string().contains("empty word"));
    }

    #[test]
    fn insert_checks_mode() {
        let mut lex = Lexicon::new(LexiconKind::Afinn);
        lex.insert("Good", Polarity::Score(3)).unwrap();
        assert!(lex.contains("good"));
        let err = lex
            .insert("bad", Polarity::Label(Sentiment::Negative))
            .unwrap_err();
        assert!(matches!(err, SentimentError::EntryMismatch { .. }));
        assert_eq!(err.to_string(), "lexicon entry \"bad\" is categorical, expected scored");
        assert!(!lex.contains("bad"));
    }

    #[test]
    fn join_is_inner_join() {
        let lex = Lexicon::parse(LexiconKind::Bing, BING).unwrap();
        let tokens = vec![
            Token::new(0, 1, "good"),
            Token::new(0, 1, "weather"),
            Token::new(0, 2, "bad"),
        ];
        let scored = lex.join(&tokens).unwrap();
        assert_eq!(
            scored,
            vec![
                ScoredToken::labeled(0, 1, "good", Sentiment::Positive),
                ScoredToken::labeled(0, 2, "bad", Sentiment::Negative),
            ]
        );
    }

    #[test]
    fn join_fans_out_multi_entry_words() {
        let lex = Lexicon::parse(LexiconKind::Nrc, NRC).unwrap();
        let scored = lex.join(&[Token::new(0, 1, "happy")]).unwrap();
        assert_eq!(scored.len(), 3);
    }

    #[test]
    fn join_rejects_malformed_tokens() {
        let lex = Lexicon::parse(LexiconKind::Bing, BING).unwrap();
        let err = lex.join(&[Token::new(0, 1, "")]).unwrap_err();
        assert!(matches!(err, SentimentError::MalformedToken { .. }));
        let err = lex.join(&[Token::new(0, 0, "good")]).unwrap_err();
        assert!(matches!(err, SentimentError::MalformedToken { line: 0, .. }));
    }

    #[test]
    fn join_empty_input() {
        let lex = Lexicon::parse(LexiconKind::Bing, BING).unwrap();
        assert!(lex.join(&[]).unwrap().is_empty());
    }

    #[test]
    fn restrict_narrows_nrc() {
        let lex = Lexicon::parse(LexiconKind::Nrc, NRC).unwrap();
        let polar = lex.restrict(&[Sentiment::Positive, Sentiment::Negative]);
        assert_eq!(polar.get("happy"), &[Polarity::Label(Sentiment::Positive)]);
        assert_eq!(polar.entry_count(), 2);

        let joy = lex.restrict(&[Sentiment::Joy]);
        assert_eq!(joy.len(), 1);
        assert!(!joy.contains("abandon"));
    }

    #[test]
    fn words_with_label_sorted() {
        let lex = Lexicon::parse(LexiconKind::Bing, BING).unwrap();
        assert_eq!(lex.words_with(Sentiment::Positive), vec!["good", "happy"]);
    }

    #[test]
    fn label_counts_and_balance() {
        let nrc = Lexicon::parse(LexiconKind::Nrc, NRC).unwrap();
        assert_eq!(
            nrc.label_counts(),
            vec![
                (Sentiment::Positive, 1),
                (Sentiment::Negative, 1),
                (Sentiment::Fear, 1),
                (Sentiment::Joy, 1),
                (Sentiment::Trust, 1),
            ]
        );

        let afinn = Lexicon::parse(LexiconKind::Afinn, AFINN).unwrap();
        assert_eq!(
            afinn.polarity_balance(),
            PolarityCounts {
                positive: 1,
                negative: 1
            }
        );
        assert!(afinn.label_counts().is_empty());
    }

    #[test]
    fn from_path_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bing.csv");
        std::fs::write(&path, BING).unwrap();
        let lex = Lexicon::from_path(LexiconKind::Bing, &path).unwrap();
        assert_eq!(lex.kind(), LexiconKind::Bing);
        assert_eq!(lex.len(), 3);
    }
}
