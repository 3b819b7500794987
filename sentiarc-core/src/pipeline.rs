//! End-to-end pipeline: corpus -> tokens -> lexicon join -> windows.

use core::fmt;

use sentiarc_types::{ArcConfig, Result, Token, WindowSentiment};
use tracing::info;

use crate::analyzer::{LineTokenizer, NormalizerConfig, StopWords};
use crate::arc::aggregate;
use crate::corpus::Corpus;
use crate::lexicon::Lexicon;

/// Counters from one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArcStats {
    /// Documents tokenized
    pub documents: usize,
    /// Tokens left after stop-word removal
    pub tokens: usize,
    /// Tokens that matched the lexicon (one per entry)
    pub scored: usize,
    /// Windows emitted
    pub windows: usize,
}

impl fmt::Display for ArcStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} docs, {} tokens, {} scored, {} windows",
            self.documents, self.tokens, self.scored, self.windows
        )
    }
}

/// Windows of one arc plus the counters that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentArc {
    /// Windows sorted by `(doc_id, window)`
    pub windows: Vec<WindowSentiment>,
    /// Run counters
    pub stats: ArcStats,
}

/// Configured tokenizer and stop-word filter.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: ArcConfig,
    tokenizer: LineTokenizer,
    stop_words: StopWords,
}

impl Pipeline {
    /// Creates a pipeline using the built-in English stop words.
    ///
    /// # Errors
    /// `SentimentError::InvalidConfiguration` if the config does not validate.
    pub fn new(config: ArcConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tokenizer: LineTokenizer::new(NormalizerConfig {
                strip_diacritics: config.strip_diacritics,
            }),
            stop_words: StopWords::english(),
        })
    }

    /// Replaces the stop-word list.
    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &ArcConfig {
        &self.config
    }

    /// Tokenizes the corpus and applies stop-word removal if enabled.
    pub fn tokens(&self, corpus: &Corpus) -> Vec<Token> {
        let mut tokens = corpus.tokens(&self.tokenizer);
        if self.config.remove_stop_words {
            self.stop_words.retain(&mut tokens);
        }
        tokens
    }

    /// Builds the sentiment arc of every document against `lexicon`.
    ///
    /// # Errors
    /// Propagates join and aggregation errors.
    pub fn arc(&self, corpus: &Corpus, lexicon: &Lexicon) -> Result<SentimentArc> {
        let tokens = self.tokens(corpus);
        let scored = lexicon.join(&tokens)?;
        let windows = aggregate(&scored, self.config.window_size, lexicon.mode())?;

        let stats = ArcStats {
            documents: corpus.len(),
            tokens: tokens.len(),
            scored: scored.len(),
            windows: windows.len(),
        };
        info!(lexicon = %lexicon.kind(), %stats, "sentiment arc ready");
        Ok(SentimentArc { windows, stats })
    }
}
