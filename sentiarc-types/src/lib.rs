//! Core types, configuration and errors for the sentiarc toolkit.
//!
//! This crate holds the data model shared by the analysis core and the CLI:
//!
//! - **Tokens**: words tagged with the document, line and chapter they came from
//! - **Polarities**: categorical labels (bing/nrc) or signed scores (afinn)
//! - **Windows**: per-document runs of lines that sentiment is summed over
//! - **Errors**: the single error enum every fallible operation returns

#![warn(missing_docs)]

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique document identifier.
///
/// Documents are numbered in the order they were added to the corpus.
pub type DocId = u32;

/// Default number of lines per sentiment window.
pub const DEFAULT_WINDOW_SIZE: u32 = 80;

/// Sentiment label carried by categorical lexicons.
///
/// bing only uses `Positive`/`Negative`; nrc adds the eight emotion
/// categories. `#[repr(u8)]` keeps the label one byte wide so that
/// per-word entry lists stay inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Sentiment {
    /// Positive polarity
    Positive = 0,
    /// Negative polarity
    Negative = 1,
    /// nrc emotion: anger
    Anger = 2,
    /// nrc emotion: anticipation
    Anticipation = 3,
    /// nrc emotion: disgust
    Disgust = 4,
    /// nrc emotion: fear
    Fear = 5,
    /// nrc emotion: joy
    Joy = 6,
    /// nrc emotion: sadness
    Sadness = 7,
    /// nrc emotion: surprise
    Surprise = 8,
    /// nrc emotion: trust
    Trust = 9,
}

impl Sentiment {
    /// Every label, in declaration order.
    pub const ALL: [Sentiment; 10] = [
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Anger,
        Sentiment::Anticipation,
        Sentiment::Disgust,
        Sentiment::Fear,
        Sentiment::Joy,
        Sentiment::Sadness,
        Sentiment::Surprise,
        Sentiment::Trust,
    ];

    /// Lowercase name as it appears in lexicon files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Anger => "anger",
            Sentiment::Anticipation => "anticipation",
            Sentiment::Disgust => "disgust",
            Sentiment::Fear => "fear",
            Sentiment::Joy => "joy",
            Sentiment::Sadness => "sadness",
            Sentiment::Surprise => "surprise",
            Sentiment::Trust => "trust",
        }
    }

    /// Parses a label name, ignoring ASCII case and surrounding whitespace.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label))
    }

    /// Returns `true` for the two labels that feed net sentiment.
    #[inline(always)]
    #[must_use]
    pub const fn is_polar(self) -> bool {
        matches!(self, Sentiment::Positive | Sentiment::Negative)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a window's net sentiment is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Count positive and negative labels; net = positive - negative.
    Categorical,
    /// Sum signed integer scores.
    Scored,
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMode::Categorical => f.write_str("categorical"),
            AggregationMode::Scored => f.write_str("scored"),
        }
    }
}

/// The sentiment a lexicon assigns to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Categorical label (bing, nrc).
    Label(Sentiment),
    /// Signed score (afinn, usually -5..=5).
    Score(i32),
}

impl Polarity {
    /// The aggregation mode this polarity belongs to.
    #[inline(always)]
    #[must_use]
    pub const fn mode(self) -> AggregationMode {
        match self {
            Polarity::Label(_) => AggregationMode::Categorical,
            Polarity::Score(_) => AggregationMode::Scored,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Label(s) => s.fmt(f),
            Polarity::Score(v) => write!(f, "{v:+}"),
        }
    }
}

/// A single word occurrence in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Document the word came from
    pub doc_id: DocId,
    /// 1-based line number within the document
    pub line: u32,
    /// Chapter counter (0 before the first chapter heading)
    pub chapter: u32,
    /// Normalized lowercase word
    pub word: String,
}

impl Token {
    /// Creates a token outside of any chapter.
    pub fn new(doc_id: DocId, line: u32, word: impl Into<String>) -> Self {
        Self {
            doc_id,
            line,
            chapter: 0,
            word: word.into(),
        }
    }

    /// Sets the chapter counter.
    #[must_use]
    pub fn with_chapter(mut self, chapter: u32) -> Self {
        self.chapter = chapter;
        self
    }
}

/// A token joined with one lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredToken {
    /// Document the word came from
    pub doc_id: DocId,
    /// 1-based line number within the document
    pub line: u32,
    /// Normalized lowercase word
    pub word: String,
    /// Sentiment the lexicon assigned
    pub polarity: Polarity,
}

impl ScoredToken {
    /// Creates a categorically labelled token.
    pub fn labeled(doc_id: DocId, line: u32, word: impl Into<String>, label: Sentiment) -> Self {
        Self {
            doc_id,
            line,
            word: word.into(),
            polarity: Polarity::Label(label),
        }
    }

    /// Creates a token with a numeric score.
    pub fn scored(doc_id: DocId, line: u32, word: impl Into<String>, score: i32) -> Self {
        Self {
            doc_id,
            line,
            word: word.into(),
            polarity: Polarity::Score(score),
        }
    }

    /// Index of the window this token falls into.
    ///
    /// `window_size` must be non-zero; callers validate it first.
    #[inline(always)]
    #[must_use]
    pub const fn window(&self, window_size: u32) -> u32 {
        self.line / window_size
    }
}

/// Positive and negative label counts inside one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PolarityCounts {
    /// Number of positive labels
    pub positive: u32,
    /// Number of negative labels
    pub negative: u32,
}

impl PolarityCounts {
    /// positive - negative
    #[inline(always)]
    #[must_use]
    pub const fn net(self) -> i64 {
        self.positive as i64 - self.negative as i64
    }
}

/// Net sentiment of one (document, window) pair.
///
/// Ordering is by document, then window, which is the order a narrative
/// arc is plotted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowSentiment {
    /// Document identifier
    pub doc_id: DocId,
    /// Window index: `line / window_size`
    pub window: u32,
    /// Label counts; present in categorical mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<PolarityCounts>,
    /// Net sentiment
    pub net: i64,
}

impl WindowSentiment {
    /// Creates a categorical window; `net` is derived from the counts.
    #[must_use]
    pub const fn categorical(doc_id: DocId, window: u32, counts: PolarityCounts) -> Self {
        Self {
            doc_id,
            window,
            counts: Some(counts),
            net: counts.net(),
        }
    }

    /// Creates a scored window.
    #[must_use]
    pub const fn scored(doc_id: DocId, window: u32, net: i64) -> Self {
        Self {
            doc_id,
            window,
            counts: None,
            net,
        }
    }
}

impl fmt::Display for WindowSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc={} window={}", self.doc_id, self.window)?;
        if let Some(c) = self.counts {
            write!(f, " +{} -{}", c.positive, c.negative)?;
        }
        write!(f, " net={}", self.net)
    }
}

/// Errors produced anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong
        reason: String,
    },
    /// A token's polarity does not match the requested aggregation mode.
    #[error("token {word:?} (doc {doc_id}, line {line}) is {found}, expected {expected}")]
    ModeMismatch {
        /// Document of the offending token
        doc_id: DocId,
        /// Line of the offending token
        line: u32,
        /// Word of the offending token
        word: String,
        /// Mode the aggregator was asked for
        expected: AggregationMode,
        /// Mode implied by the token's polarity
        found: AggregationMode,
    },
    /// A lexicon entry's polarity does not match the lexicon family.
    #[error("lexicon entry {word:?} is {found}, expected {expected}")]
    EntryMismatch {
        /// Word of the rejected entry
        word: String,
        /// Mode of the lexicon family
        expected: AggregationMode,
        /// Mode implied by the entry's polarity
        found: AggregationMode,
    },
    /// A token failed validation at the lexicon join.
    #[error("malformed token (doc {doc_id}, line {line}): {reason}")]
    MalformedToken {
        /// Document of the offending token
        doc_id: DocId,
        /// Line of the offending token
        line: u32,
        /// What was wrong
        reason: &'static str,
    },
    /// Streaming input went backwards in (document, window) order.
    #[error(
        "unsorted input: window ({doc_id}, {window}) arrived after ({prev_doc_id}, {prev_window})"
    )]
    UnsortedInput {
        /// Document of the late token
        doc_id: DocId,
        /// Window of the late token
        window: u32,
        /// Document of the window already open
        prev_doc_id: DocId,
        /// Index of the window already open
        prev_window: u32,
    },
    /// A lexicon row could not be parsed.
    #[error("lexicon line {line}: {reason}")]
    LexiconParse {
        /// 1-based line in the lexicon source
        line: usize,
        /// What was wrong
        reason: String,
    },
    /// A lexicon name was not one of bing, nrc or afinn.
    #[error("unknown lexicon {0:?} (expected bing, nrc or afinn)")]
    UnknownLexicon(String),
    /// A document could not be added to the corpus.
    #[error("invalid document: {reason}")]
    InvalidDocument {
        /// What was wrong
        reason: String,
    },
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the workspace.
pub type Result<T, E = SentimentError> = core::result::Result<T, E>;

/// Pipeline configuration.
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArcConfig {
    /// Lines per sentiment window. Default: 80
    pub window_size: u32,
    /// Drop stop words before joining against a lexicon. Default: true
    pub remove_stop_words: bool,
    /// Fold Latin diacritics while normalizing ("café" -> "cafe"). Default: false
    pub strip_diacritics: bool,
    /// Rows printed by ranking commands. Default: 10
    pub top_n: usize,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            remove_stop_words: true,
            strip_diacritics: false,
            top_n: 10,
        }
    }
}

impl ArcConfig {
    /// Default configuration with a different window size.
    pub const fn with_window(window_size: u32) -> Self {
        Self {
            window_size,
            remove_stop_words: true,
            strip_diacritics: false,
            top_n: 10,
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// Returns `SentimentError::InvalidConfiguration` if `window_size` or
    /// `top_n` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(SentimentError::InvalidConfiguration {
                reason: "window_size must be a positive integer".into(),
            });
        }
        if self.top_n == 0 {
            return Err(SentimentError::InvalidConfiguration {
                reason: "top_n must be a positive integer".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_is_1_byte() {
        assert_eq!(size_of::<Sentiment>(), 1);
    }

    #[test]
    fn sentiment_label_roundtrip() {
        for s in Sentiment::ALL {
            assert_eq!(Sentiment::from_label(s.as_str()), Some(s));
        }
        assert_eq!(Sentiment::from_label(" Positive "), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_label("neutral"), None);
    }

    #[test]
    fn only_positive_and_negative_are_polar() {
        let polar: Vec<_> = Sentiment::ALL.into_iter().filter(|s| s.is_polar()).collect();
        assert_eq!(polar, vec![Sentiment::Positive, Sentiment::Negative]);
    }

    #[test]
    fn polarity_mode() {
        assert_eq!(
            Polarity::Label(Sentiment::Joy).mode(),
            AggregationMode::Categorical
        );
        assert_eq!(Polarity::Score(-3).mode(), AggregationMode::Scored);
    }

    #[test]
    fn window_index_is_integer_division() {
        let t = ScoredToken::scored(0, 79, "x", 1);
        assert_eq!(t.window(80), 0);
        let t = ScoredToken::scored(0, 80, "x", 1);
        assert_eq!(t.window(80), 1);
        let t = ScoredToken::scored(0, 161, "x", 1);
        assert_eq!(t.window(80), 2);
    }

    #[test]
    fn categorical_window_derives_net() {
        let w = WindowSentiment::categorical(
            3,
            1,
            PolarityCounts {
                positive: 2,
                negative: 5,
            },
        );
        assert_eq!(w.net, -3);
        assert_eq!(format!("{w}"), "doc=3 window=1 +2 -5 net=-3");
    }

    #[test]
    fn windows_order_by_doc_then_window() {
        let mut ws = vec![
            WindowSentiment::scored(1, 0, 4),
            WindowSentiment::scored(0, 2, -1),
            WindowSentiment::scored(0, 1, 9),
        ];
        ws.sort();
        let keys: Vec<_> = ws.iter().map(|w| (w.doc_id, w.window)).collect();
        assert_eq!(keys, vec![(0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn scored_window_omits_counts_in_json() {
        let json = serde_json::to_string(&WindowSentiment::scored(0, 0, 2)).unwrap();
        assert_eq!(json, r#"{"doc_id":0,"window":0,"net":2}"#);

        let json = serde_json::to_string(&WindowSentiment::categorical(
            0,
            1,
            PolarityCounts {
                positive: 1,
                negative: 0,
            },
        ))
        .unwrap();
        assert_eq!(
            json,
            r#"{"doc_id":0,"window":1,"counts":{"positive":1,"negative":0},"net":1}"#
        );
    }

    #[test]
    fn default_config_is_valid() {
        let config = ArcConfig::default();
        assert_eq!(config.window_size, 80);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_window_is_invalid() {
        let err = ArcConfig::with_window(0).validate().unwrap_err();
        assert!(matches!(err, SentimentError::InvalidConfiguration { .. }));
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: ArcConfig = serde_json::from_str(r#"{"window_size": 40}"#).unwrap();
        assert_eq!(config.window_size, 40);
        assert!(config.remove_stop_words);
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn config_rejects_unknown_fields() {
        let parsed = serde_json::from_str::<ArcConfig>(r#"{"windows": 40}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn error_messages() {
        let err = SentimentError::UnknownLexicon("vader".into());
        assert_eq!(
            err.to_string(),
            r#"unknown lexicon "vader" (expected bing, nrc or afinn)"#
        );

        let err = SentimentError::ModeMismatch {
            doc_id: 0,
            line: 3,
            word: "good".into(),
            expected: AggregationMode::Scored,
            found: AggregationMode::Categorical,
        };
        assert_eq!(
            err.to_string(),
            r#"token "good" (doc 0, line 3) is categorical, expected scored"#
        );
    }
}
