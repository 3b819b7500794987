//! Property tests for windowed aggregation.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use sentiarc_core::arc::{aggregate, WindowStream};
use sentiarc_types::{AggregationMode, ScoredToken, Sentiment, WindowSentiment};

fn labeled_tokens() -> impl Strategy<Value = Vec<ScoredToken>> {
    prop::collection::vec((0u32..3, 0u32..600, 0usize..Sentiment::ALL.len()), 0..200).prop_map(
        |rows| {
            rows.into_iter()
                .map(|(doc, line, label)| {
                    ScoredToken::labeled(doc, line, "w", Sentiment::ALL[label])
                })
                .collect()
        },
    )
}

fn scored_tokens() -> impl Strategy<Value = Vec<ScoredToken>> {
    prop::collection::vec((0u32..3, 0u32..600, -5i32..=5), 0..200).prop_map(|rows| {
        rows.into_iter()
            .map(|(doc, line, score)| ScoredToken::scored(doc, line, "w", score))
            .collect()
    })
}

fn joined_keys(tokens: &[ScoredToken], window_size: u32) -> BTreeSet<(u32, u32)> {
    tokens
        .iter()
        .map(|t| (t.doc_id, t.window(window_size)))
        .collect()
}

fn windows_per_doc(windows: &[WindowSentiment]) -> BTreeMap<u32, usize> {
    let mut out = BTreeMap::new();
    for w in windows {
        *out.entry(w.doc_id).or_default() += 1;
    }
    out
}

proptest! {
    #[test]
    fn categorical_net_is_positive_minus_negative(tokens in labeled_tokens(), size in 1u32..200) {
        for w in aggregate(&tokens, size, AggregationMode::Categorical).unwrap() {
            let counts = w.counts.expect("categorical windows carry counts");
            prop_assert_eq!(w.net, i64::from(counts.positive) - i64::from(counts.negative));
        }
    }

    #[test]
    fn scored_net_is_exact_sum(tokens in scored_tokens(), size in 1u32..200) {
        let mut expected: BTreeMap<(u32, u32), i64> = BTreeMap::new();
        for t in &tokens {
            if let sentiarc_types::Polarity::Score(s) = t.polarity {
                *expected.entry((t.doc_id, t.window(size))).or_default() += i64::from(s);
            }
        }
        let got: BTreeMap<(u32, u32), i64> = aggregate(&tokens, size, AggregationMode::Scored)
            .unwrap()
            .into_iter()
            .map(|w| ((w.doc_id, w.window), w.net))
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn one_window_per_distinct_key(tokens in labeled_tokens(), size in 1u32..200) {
        let windows = aggregate(&tokens, size, AggregationMode::Categorical).unwrap();
        let keys: BTreeSet<_> = windows.iter().map(|w| (w.doc_id, w.window)).collect();
        prop_assert_eq!(keys.len(), windows.len());
        prop_assert_eq!(keys, joined_keys(&tokens, size));
    }

    #[test]
    fn aggregation_is_idempotent(tokens in scored_tokens(), size in 1u32..200) {
        let first = aggregate(&tokens, size, AggregationMode::Scored).unwrap();
        let second = aggregate(&tokens, size, AggregationMode::Scored).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn input_order_does_not_matter(tokens in labeled_tokens(), size in 1u32..200) {
        let mut reversed = tokens.clone();
        reversed.reverse();
        prop_assert_eq!(
            aggregate(&tokens, size, AggregationMode::Categorical).unwrap(),
            aggregate(&reversed, size, AggregationMode::Categorical).unwrap()
        );
    }

    #[test]
    fn doubling_window_never_adds_windows(tokens in scored_tokens(), size in 1u32..300) {
        let narrow = windows_per_doc(&aggregate(&tokens, size, AggregationMode::Scored).unwrap());
        let wide = windows_per_doc(&aggregate(&tokens, size * 2, AggregationMode::Scored).unwrap());
        for (doc, n) in wide {
            prop_assert!(n <= narrow[&doc]);
        }
    }

    #[test]
    fn unit_window_is_one_per_scored_line(tokens in scored_tokens()) {
        let lines: BTreeSet<_> = tokens.iter().map(|t| (t.doc_id, t.line)).collect();
        let windows = aggregate(&tokens, 1, AggregationMode::Scored).unwrap();
        prop_assert_eq!(windows.len(), lines.len());
        for w in &windows {
            prop_assert!(lines.contains(&(w.doc_id, w.window)));
        }
    }

    #[test]
    fn stream_matches_batch_on_sorted_input(tokens in labeled_tokens(), size in 1u32..200) {
        let mut tokens = tokens;
        tokens.sort_by_key(|t| (t.doc_id, t.line));
        let batch = aggregate(&tokens, size, AggregationMode::Categorical).unwrap();
        let streamed = WindowStream::new(size, AggregationMode::Categorical)
            .unwrap()
            .run(&tokens)
            .unwrap();
        prop_assert_eq!(batch, streamed);
    }
}
