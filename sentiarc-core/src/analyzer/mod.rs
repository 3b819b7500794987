//! Text analysis pipeline.
//!
//! This module turns raw document text into word tokens:
//! - **Normalizer**: lowercases a line and reduces it to space-separated words
//! - **Tokenizer**: walks a document line by line, tracking line and chapter
//! - **Stop words**: drops common words before lexicon joins and counts

pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use stopwords::StopWords;
pub use tokenizer::{LinePos, LineTokenizer};
