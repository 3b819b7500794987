//! Side-by-side arcs from several lexicons.

use std::borrow::Cow;

use serde::Serialize;
use sentiarc_types::{Result, Sentiment, Token, WindowSentiment};
use tracing::info;

use crate::arc::aggregate;
use crate::lexicon::{Lexicon, LexiconKind};

/// A window tagged with the lexicon that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MethodWindow {
    /// Lexicon family
    pub method: LexiconKind,
    /// The aggregated window
    #[serde(flatten)]
    pub sentiment: WindowSentiment,
}

/// Builds one arc per lexicon over the same tokens.
///
/// nrc is narrowed to its positive/negative entries first so that every
/// method measures the same thing. Rows are grouped by lexicon, in the order
/// given, and sorted by `(doc_id, window)` within each group.
///
/// # Errors
/// Propagates join and aggregation errors.
pub fn compare_lexicons(
    tokens: &[Token],
    lexicons: &[&Lexicon],
    window_size: u32,
) -> Result<Vec<MethodWindow>> {
    let mut rows = Vec::new();

    for lexicon in lexicons {
        let lexicon: Cow<'_, Lexicon> = match lexicon.kind() {
            LexiconKind::Nrc => {
                Cow::Owned(lexicon.restrict(&[Sentiment::Positive, Sentiment::Negative]))
            }
            _ => Cow::Borrowed(*lexicon),
        };

        let scored = lexicon.join(tokens)?;
        let windows = aggregate(&scored, window_size, lexicon.mode())?;
        info!(
            method = %lexicon.kind(),
            scored = scored.len(),
            windows = windows.len(),
            "built sentiment arc"
        );

        rows.extend(windows.into_iter().map(|sentiment| MethodWindow {
            method: lexicon.kind(),
            sentiment,
        }));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiarc_types::PolarityCounts;

    fn tokens() -> Vec<Token> {
        vec![
            Token::new(0, 1, "happy"),
            Token::new(0, 2, "abandon"),
            Token::new(0, 90, "happy"),
        ]
    }

    #[test]
    fn one_group_per_lexicon() {
        let afinn = Lexicon::parse(LexiconKind::Afinn, "happy,3\nabandon,-2").unwrap();
        let bing = Lexicon::parse(LexiconKind::Bing, "happy,positive").unwrap();
        let rows = compare_lexicons(&tokens(), &[&afinn, &bing], 80).unwrap();

        let afinn_rows: Vec<_> = rows.iter().filter(|r| r.method == LexiconKind::Afinn).collect();
        assert_eq!(afinn_rows.len(), 2);
        assert_eq!(afinn_rows[0].sentiment, WindowSentiment::scored(0, 0, 1));
        assert_eq!(afinn_rows[1].sentiment, WindowSentiment::scored(0, 1, 3));

        let bing_rows: Vec<_> = rows.iter().filter(|r| r.method == LexiconKind::Bing).collect();
        assert_eq!(bing_rows.len(), 2);
        assert_eq!(rows[0].method, LexiconKind::Afinn);
    }

    #[test]
    fn nrc_emotions_ignored() {
        let nrc = Lexicon::parse(
            LexiconKind::Nrc,
            "happy,joy\nhappy,positive\nabandon,fear\nabandon,negative\nabandon,sadness",
        )
        .unwrap();
        let rows = compare_lexicons(&tokens(), &[&nrc], 80).unwrap();
        assert_eq!(
            rows[0].sentiment.counts,
            Some(PolarityCounts {
                positive: 1,
                negative: 1
            })
        );
    }

    #[test]
    fn rows_serialize_flat() {
        let row = MethodWindow {
            method: LexiconKind::Bing,
            sentiment: WindowSentiment::scored(2, 4, -3),
        };
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"method":"bing","doc_id":2,"window":4,"net":-3}"#
        );
    }

    #[test]
    fn invalid_window_size_propagates() {
        let bing = Lexicon::parse(LexiconKind::Bing, "happy,positive").unwrap();
        assert!(compare_lexicons(&tokens(), &[&bing], 0).is_err());
    }
}
