//! Document collection.
//!
//! A corpus is an ordered list of titled documents. Texts live in an
//! [`Arena`]; the position of a document in the corpus is its [`DocId`].

use std::fs;
use std::path::Path;

use sentiarc_types::{DocId, Result, SentimentError, Token};
use tracing::{debug, info};

use crate::analyzer::LineTokenizer;
use crate::arena::Arena;

/// Titled documents stored back to back.
#[derive(Debug, Default)]
pub struct Corpus {
    texts: Arena,
    titles: Vec<String>,
}

impl Corpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `SentimentError::InvalidDocument` if the title is empty or
    /// already used, if the text contains NUL bytes (a binary file), or if
    /// the corpus would exceed 4 GiB.
    pub fn push(&mut self, title: &str, text: &str) -> Result<DocId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SentimentError::InvalidDocument {
                reason: "document title is empty".into(),
            });
        }
        if self.titles.iter().any(|t| t == title) {
            return Err(SentimentError::InvalidDocument {
                reason: format!("duplicate document title {title:?}"),
            });
        }
        if memchr::memchr(0, text.as_bytes()).is_some() {
            return Err(SentimentError::InvalidDocument {
                reason: format!("{title:?} contains NUL bytes"),
            });
        }

        let doc_id = self
            .texts
            .push(text)
            .ok_or_else(|| SentimentError::InvalidDocument {
                reason: format!("{title:?} does not fit in the corpus arena"),
            })?;
        self.titles.push(title.to_owned());
        debug!(doc_id, title, bytes = text.len(), "added document");
        Ok(doc_id)
    }

    /// Loads every `*.txt` file in `dir`, ordered by file name.
    ///
    /// The file stem becomes the document title.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors and the validation errors of [`Corpus::push`].
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        paths.sort();

        let mut corpus = Self::new();
        for path in &paths {
            let text = fs::read_to_string(path)?;
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            corpus.push(&title, &text)?;
        }

        info!(
            dir = %dir.display(),
            documents = corpus.len(),
            bytes = corpus.texts.total_bytes(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    /// Number of documents.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Returns `true` if the corpus has no documents.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Title of a document.
    pub fn title(&self, doc_id: DocId) -> Option<&str> {
        self.titles.get(doc_id as usize).map(String::as_str)
    }

    /// Text of a document.
    pub fn text(&self, doc_id: DocId) -> Option<&str> {
        self.texts.get(doc_id)
    }

    /// Looks a document up by title.
    pub fn doc_id(&self, title: &str) -> Option<DocId> {
        self.titles
            .iter()
            .position(|t| t == title)
            .map(|i| i as DocId)
    }

    /// Iterates over `(doc_id, title, text)`.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &str, &str)> + '_ {
        self.texts
            .iter()
            .map(|(id, text)| (id, self.titles[id as usize].as_str(), text))
    }

    /// Tokenizes every document, in document order.
    pub fn tokens(&self, tokenizer: &LineTokenizer) -> Vec<Token> {
        let mut out = Vec::new();
        for (doc_id, _, text) in self.iter() {
            out.extend(tokenizer.tokenize_document(doc_id, text));
        }
        debug!(tokens = out.len(), "tokenized corpus");
        out
    }
}
