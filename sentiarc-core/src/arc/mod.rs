//! Windowed sentiment aggregation.
//!
//! Scored tokens are bucketed by `(doc_id, line / window_size)` and each
//! bucket is folded into one [`WindowSentiment`]:
//!
//! - **Categorical**: count `positive` and `negative` labels (a missing label
//!   counts 0), `net = positive - negative`. Emotion labels add to neither
//!   count but still place the window in the arc.
//! - **Scored**: `net` is the sum of the scores.
//!
//! Windows without a joined token are never emitted; the arc is
//! sparse, not zero-filled.
//!
//! Two drivers share the same fold:
//! - [`aggregate`] groups an arbitrary token slice in one pass
//! - [`WindowStream`] closes windows as soon as sorted input moves past them

mod batch;
mod compare;
mod stream;

pub use batch::aggregate;
pub use compare::{compare_lexicons, MethodWindow};
pub use stream::WindowStream;

use sentiarc_types::{
    AggregationMode, DocId, Polarity, PolarityCounts, Result, ScoredToken, Sentiment,
    SentimentError, WindowSentiment,
};

pub(crate) fn check_window_size(window_size: u32) -> Result<()> {
    if window_size == 0 {
        return Err(SentimentError::InvalidConfiguration {
            reason: "window_size must be a positive integer".into(),
        });
    }
    Ok(())
}

/// Running totals for one window.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Accumulator {
    counts: PolarityCounts,
    sum: i64,
    joined: u32,
}

impl Accumulator {
    /// Folds one token in. State is untouched on error.
    #[inline]
    pub(crate) fn add(&mut self, token: &ScoredToken, mode: AggregationMode) -> Result<()> {
        match (mode, token.polarity) {
            (AggregationMode::Categorical, Polarity::Label(label)) => match label {
                Sentiment::Positive => self.counts.positive += 1,
                Sentiment::Negative => self.counts.negative += 1,
                _ => {}
            },
            (AggregationMode::Scored, Polarity::Score(score)) => self.sum += i64::from(score),
            (expected, found) => {
                return Err(SentimentError::ModeMismatch {
                    doc_id: token.doc_id,
                    line: token.line,
                    word: token.word.clone(),
                    expected,
                    found: found.mode(),
                })
            }
        }
        self.joined += 1;
        Ok(())
    }

    #[inline]
    pub(crate) fn finish(
        self,
        doc_id: DocId,
        window: u32,
        mode: AggregationMode,
    ) -> Option<WindowSentiment> {
        if self.joined == 0 {
            return None;
        }
        Some(match mode {
            AggregationMode::Categorical => WindowSentiment::categorical(doc_id, window, self.counts),
            AggregationMode::Scored => WindowSentiment::scored(doc_id, window, self.sum),
        })
    }
}
