//! One-shot grouped aggregation.

use rustc_hash::FxHashMap;
use sentiarc_types::{AggregationMode, DocId, Result, ScoredToken, WindowSentiment};
use tracing::debug;

use crate::arc::{check_window_size, Accumulator};

/// Aggregates scored tokens into per-window net sentiment.
///
/// Input order does not matter. The result is sorted by
/// `(doc_id, window)`, ready to plot as a narrative arc.
///
/// # Errors
///
/// - `SentimentError::InvalidConfiguration` if `window_size` is 0
/// - `SentimentError::ModeMismatch` if a token's polarity does not match
///   `mode`
///
/// Nothing is returned on error; an empty slice yields an empty result.
///
/// # Example
///
/// ```
/// use sentiarc_core::arc::aggregate;
/// use sentiarc_types::{AggregationMode, ScoredToken};
///
/// let tokens = [ScoredToken::scored(0, 5, "love", 3), ScoredToken::scored(0, 6, "worry", -1)];
/// let arc = aggregate(&tokens, 80, AggregationMode::Scored).unwrap();
/// assert_eq!(arc.len(), 1);
/// assert_eq!(arc[0].net, 2);
/// ```
pub fn aggregate(
    tokens: &[ScoredToken],
    window_size: u32,
    mode: AggregationMode,
) -> Result<Vec<WindowSentiment>> {
    check_window_size(window_size)?;

    let mut groups: FxHashMap<(DocId, u32), Accumulator> = FxHashMap::default();
    for token in tokens {
        groups
            .entry((token.doc_id, token.window(window_size)))
            .or_default()
            .add(token, mode)?;
    }

    let mut windows: Vec<WindowSentiment> = groups
        .into_iter()
        .filter_map(|((doc_id, window), acc)| acc.finish(doc_id, window, mode))
        .collect();
    windows.sort_unstable();

    debug!(
        tokens = tokens.len(),
        windows = windows.len(),
        window_size,
        %mode,
        "aggregated sentiment windows"
    );
    Ok(windows)
}
