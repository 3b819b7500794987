//! Incremental aggregation over sorted input.
//!
//! Holds a single open window. A token with the same `(doc_id, window)` key
//! is folded in; a token with a larger key closes and returns the open
//! window first. A smaller key means the input was not sorted by
//! `(doc_id, line)` and is rejected, since the window it belongs to may
//! already have been emitted.

use sentiarc_types::{
    AggregationMode, DocId, Result, ScoredToken, SentimentError, WindowSentiment,
};

use crate::arc::{check_window_size, Accumulator};

/// Streaming window aggregator.
#[derive(Debug, Clone)]
pub struct WindowStream {
    window_size: u32,
    mode: AggregationMode,
    open: Option<((DocId, u32), Accumulator)>,
}

impl WindowStream {
    /// Creates an aggregator.
    ///
    /// # Errors
    /// Returns `SentimentError::InvalidConfiguration` if `window_size` is 0.
    pub fn new(window_size: u32, mode: AggregationMode) -> Result<Self> {
        check_window_size(window_size)?;
        Ok(Self {
            window_size,
            mode,
            open: None,
        })
    }

    /// Feeds one token; returns the window it closed, if any.
    ///
    /// # Errors
    ///
    /// `SentimentError::UnsortedInput` if the token's key precedes the open
    /// window, `SentimentError::ModeMismatch` if its polarity does not match
    /// the mode. The stream state is unchanged on error.
    pub fn push(&mut self, token: &ScoredToken) -> Result<Option<WindowSentiment>> {
        let key = (token.doc_id, token.window(self.window_size));

        match &mut self.open {
            Some((open_key, acc)) if *open_key == key => {
                acc.add(token, self.mode)?;
                Ok(None)
            }
            Some((open_key, _)) if key < *open_key => Err(SentimentError::UnsortedInput {
                doc_id: key.0,
                window: key.1,
                prev_doc_id: open_key.0,
                prev_window: open_key.1,
            }),
            _ => {
                let mut acc = Accumulator::default();
                acc.add(token, self.mode)?;
                let closed = self.open.replace((key, acc));
                Ok(closed.and_then(|((doc_id, window), acc)| acc.finish(doc_id, window, self.mode)))
            }
        }
    }

    /// Closes the open window, if any.
    pub fn finish(&mut self) -> Option<WindowSentiment> {
        let ((doc_id, window), acc) = self.open.take()?;
        acc.finish(doc_id, window, self.mode)
    }

    /// Drives the stream over a sorted sequence and collects every window.
    ///
    /// # Errors
    /// Same as [`WindowStream::push`]; nothing is returned on error.
    pub fn run<'a, I>(mut self, tokens: I) -> Result<Vec<WindowSentiment>>
    where
        I: IntoIterator<Item = &'a ScoredToken>,
    {
        let mut out = Vec::new();
        for token in tokens {
            out.extend(self.push(token)?);
        }
        out.extend(self.finish());
        Ok(out)
    }
}
