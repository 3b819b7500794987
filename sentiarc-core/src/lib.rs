//! Windowed lexicon sentiment analysis for novels.
//!
//! The pipeline has four stages:
//!
//! 1. [`corpus`]: titled documents stored in one [`arena`]
//! 2. [`analyzer`]: line-aware tokenization and stop-word removal
//! 3. [`lexicon`]: bing / nrc / afinn lexicons and the token join
//! 4. [`arc`]: per-window net sentiment, batch or streaming
//!
//! [`counts`] builds the frequency tables used for contribution charts and
//! word clouds; [`pipeline`] wires the stages together.
//!
//! ```
//! use sentiarc_core::{Corpus, Lexicon, LexiconKind, Pipeline};
//! use sentiarc_types::ArcConfig;
//!
//! let mut corpus = Corpus::new();
//! corpus.push("Sample", "A happy beginning.\nA sad ending.").unwrap();
//! let bing = Lexicon::parse(LexiconKind::Bing, "happy,positive\nsad,negative").unwrap();
//!
//! let arc = Pipeline::new(ArcConfig::default()).unwrap().arc(&corpus, &bing).unwrap();
//! assert_eq!(arc.windows.len(), 1);
//! assert_eq!(arc.windows[0].net, 0);
//! ```

pub mod analyzer;
pub mod arc;
pub mod arena;
pub mod config;
pub mod corpus;
pub mod counts;
pub mod lexicon;
pub mod pipeline;

pub use arc::{aggregate, compare_lexicons, WindowStream};
pub use corpus::Corpus;
pub use lexicon::{Lexicon, LexiconKind};
pub use pipeline::{ArcStats, Pipeline, SentimentArc};
