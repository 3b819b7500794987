//! Bump Allocator for Corpus Text
//!
//! Stores every document of a corpus in a single contiguous buffer so that
//! loading six novels costs one growing allocation instead of six. Documents
//! are referenced by (offset, length) spans.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena Buffer: [emma][persuasion][pride & prejudice]...[free space]
//!               ^     ^           ^
//! Spans:       (0,n0) (n0,n1)     (n0+n1,n2) ...
//! ```
//!
//! Lengths are `u32`, so a single document may be up to 4 GiB; the buffer as a
//! whole is bounded by the same limit because offsets are `u32` too.

use sentiarc_types::DocId;

/// Document reference - 8 bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocSpan {
    offset: u32,
    len: u32,
}

impl DocSpan {
    /// Creates a new document span.
    #[inline(always)]
    pub const fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }

    /// Returns the byte offset in the arena.
    #[inline(always)]
    pub const fn offset(self) -> usize {
        self.offset as usize
    }

    /// Returns the byte length.
    #[inline(always)]
    pub const fn len(self) -> usize {
        self.len as usize
    }
}

/// Bump allocator for document text.
#[derive(Debug, Default)]
pub struct Arena {
    buffer: Vec<u8>,
    spans: Vec<DocSpan>,
}

impl Arena {
    /// Creates a new empty arena.
    pub fn new() -> Self {
        Self::with_capacity(1024 * 1024, 8)
    }

    /// Creates a new arena with pre-allocated capacity.
    pub fn with_capacity(buffer_cap: usize, doc_cap: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(buffer_cap),
            spans: Vec::with_capacity(doc_cap),
        }
    }

    /// Returns the number of documents stored.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns true if no documents are stored.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Total bytes of text stored.
    #[inline(always)]
    pub fn total_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Appends a document and returns its id.
    ///
    /// Returns `None` if the arena would grow past `u32::MAX` bytes.
    pub fn push(&mut self, text: &str) -> Option<DocId> {
        let offset = u32::try_from(self.buffer.len()).ok()?;
        let len = u32::try_from(text.len()).ok()?;
        offset.checked_add(len)?;
        let doc_id = DocId::try_from(self.spans.len()).ok()?;

        self.buffer.extend_from_slice(text.as_bytes());
        self.spans.push(DocSpan::new(offset, len));
        Some(doc_id)
    }

    /// Gets a document by ID.
    #[inline(always)]
    pub fn get(&self, doc_id: DocId) -> Option<&str> {
        let span = self.spans.get(doc_id as usize)?;
        let bytes = &self.buffer[span.offset()..span.offset() + span.len()];

        // SAFETY: every span covers exactly the bytes of one `&str` passed to
        // `push`, and the buffer is append-only, so the slice is valid UTF-8.
        Some(unsafe { std::str::from_utf8_unchecked(bytes) })
    }

    /// Iterates over `(doc_id, text)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &str)> + '_ {
        (0..self.spans.len() as DocId).filter_map(move |id| self.get(id).map(|text| (id, text)))
    }
}
