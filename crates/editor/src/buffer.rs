// Chunk: docs/chunks/editor_context - Buffers and views owned by an explicit context
// Chunk: docs/chunks/c_family_lexer - Span classification for buffers

//! A text buffer paired with its language and a lazily rebuilt span list.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use gapline_buffer::{BufferError, DirtyLines, TextBuffer};
use gapline_syntax::{Language, Span};
use tracing::debug;

/// Stable identifier of a buffer within an [`EditorContext`](crate::EditorContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub(crate) u64);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer#{}", self.0)
    }
}

/// One open document.
///
/// Every content mutation goes through this type so the span list can be
/// marked stale in the same call. The spans are only rebuilt when someone
/// asks for them, so a burst of keystrokes costs one re-lex.
#[derive(Debug)]
pub struct Buffer {
    id: BufferId,
    text: TextBuffer,
    language: Language,
    path: Option<PathBuf>,
    spans: Vec<Span>,
    /// True when `spans` no longer describes `text`.
    stale: bool,
}

impl Buffer {
    pub(crate) fn new(
        id: BufferId,
        text: TextBuffer,
        language: Language,
        path: Option<PathBuf>,
    ) -> Self {
        Self {
            id,
            text,
            language,
            path,
            spans: Vec::new(),
            stale: true,
        }
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Read access to the underlying text.
    pub fn text(&self) -> &TextBuffer {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Changes the language and invalidates the spans.
    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            self.language = language;
            self.stale = true;
        }
    }

    /// The path this buffer was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns true if the span list must be rebuilt before use.
    pub fn is_dirty(&self) -> bool {
        self.stale
    }

    /// Content encoded as UTF-8, for the host to write out.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.text.content().into_bytes()
    }

    // ==================== Spans ====================

    /// Returns the span list, re-lexing first if the text changed.
    pub fn spans(&mut self) -> &[Span] {
        if self.stale {
            self.relex();
        }
        &self.spans
    }

    /// Returns the spans overlapping `[start, end)`.
    ///
    /// Spans are sorted and contiguous, so both ends are found by binary
    /// search. An empty range has no spans.
    pub fn spans_in_range(&mut self, start: usize, end: usize) -> &[Span] {
        if start >= end {
            return &[];
        }
        let spans = self.spans();
        let first = spans.partition_point(|span| span.end() <= start);
        let last = spans.partition_point(|span| span.start < end);
        &spans[first..last.max(first)]
    }

    fn relex(&mut self) {
        let started = Instant::now();
        let language = self.language;
        let chars = self.text.make_contiguous();
        self.spans = gapline_syntax::lex(chars, language);
        self.stale = false;
        debug!(
            buffer = %self.id,
            spans = self.spans.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "re-lexed buffer"
        );
    }

    // ==================== Mutations ====================

    pub fn insert_char(&mut self, offset: usize, ch: char) -> Result<DirtyLines, BufferError> {
        let dirty = self.text.insert_char(offset, ch)?;
        self.stale = true;
        Ok(dirty)
    }

    pub fn insert_str(&mut self, offset: usize, s: &str) -> Result<DirtyLines, BufferError> {
        let dirty = self.text.insert_str(offset, s)?;
        self.stale = true;
        Ok(dirty)
    }

    pub fn remove_char(&mut self, offset: usize) -> Result<(char, DirtyLines), BufferError> {
        let removed = self.text.remove_char(offset)?;
        self.stale = true;
        Ok(removed)
    }

    /// Removes `[start, end)`.
    pub fn remove_range(&mut self, start: usize, end: usize) -> Result<DirtyLines, BufferError> {
        let dirty = self.text.remove_range(start, end)?;
        self.stale = true;
        Ok(dirty)
    }
}
