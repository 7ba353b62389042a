// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing
// Chunk: docs/chunks/crlf_line_table - Per-line length table with CR, LF and CRLF terminators

//! TextBuffer is the main public API for text storage.
//!
//! It pairs a gap buffer (character storage) with a line index (line
//! boundaries) and keeps them consistent: every single-character insert or
//! remove patches the line table in the same call.
//!
//! The buffer is addressed by character offsets. Cursor state lives with the
//! views that edit the buffer, not here.

use crate::gap_buffer::{GapBuffer, DEFAULT_GAP_RESERVE};
use crate::line_index::LineIndex;
use crate::types::{BufferError, DirtyLines, Position};

/// Character storage plus an always-consistent line table.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    buffer: GapBuffer,
    line_index: LineIndex,
    /// Mutation counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self::with_reserve(DEFAULT_GAP_RESERVE)
    }

    /// Creates an empty text buffer whose gap grows by `reserve` cells.
    pub fn with_reserve(reserve: usize) -> Self {
        Self {
            buffer: GapBuffer::with_reserve(reserve),
            line_index: LineIndex::new(),
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    /// Creates a text buffer initialized with the given content.
    ///
    /// Note: We don't implement `FromStr` because it requires returning `Result`,
    /// but parsing a string into a TextBuffer cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        Self::from_chars(content.chars(), DEFAULT_GAP_RESERVE)
    }

    /// Creates a text buffer from a raw byte stream handed over by a loader.
    ///
    /// Bytes are decoded as UTF-8; invalid sequences become U+FFFD.
    pub fn from_bytes(bytes: &[u8], reserve: usize) -> Self {
        Self::from_chars(String::from_utf8_lossy(bytes).chars(), reserve)
    }

    fn from_chars<I>(chars: I, reserve: usize) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let buffer = GapBuffer::from_chars(chars, reserve);
        let mut line_index = LineIndex::new();
        line_index.rebuild(buffer.chars());

        Self {
            buffer,
            line_index,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    // ==================== Character Accessors ====================

    /// Returns the total character count in the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the character at `offset`.
    pub fn get_char(&self, offset: usize) -> Result<char, BufferError> {
        self.buffer.get(offset)
    }

    /// Returns the character at `offset`, or `None` past the end.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.buffer.char_at(offset)
    }

    /// Returns the offset of the character boundary after `offset`.
    pub fn find_next_char(&self, offset: usize) -> usize {
        self.buffer.find_next_char(offset)
    }

    /// Returns the offset of the character boundary before `offset`.
    pub fn find_prev_char(&self, offset: usize) -> usize {
        self.buffer.find_prev_char(offset)
    }

    /// Returns an iterator over every character in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.buffer.chars()
    }

    /// Returns the entire buffer content as a String.
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    /// Returns `[start, end)` as a String, clamped to the buffer.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.buffer.slice(start, end)
    }

    /// Resolves the gap and returns the whole content as one slice.
    pub fn make_contiguous(&mut self) -> &[char] {
        self.buffer.make_contiguous()
    }

    // ==================== Line Accessors ====================

    /// Returns the number of lines in the buffer.
    ///
    /// Always at least 1 (even for an empty buffer).
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Returns the offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> Result<usize, BufferError> {
        self.line_index
            .line_start(line)
            .ok_or(BufferError::LineOutOfRange {
                line,
                line_count: self.line_count(),
            })
    }

    /// Returns the line containing `offset`.
    ///
    /// `offset == len()` is valid and maps to the last line.
    pub fn line_at_offset(&self, offset: usize) -> Result<usize, BufferError> {
        let len = self.len();
        if offset > len {
            return Err(BufferError::IndexOutOfRange { index: offset, len });
        }
        Ok(self.line_index.line_at_offset(offset))
    }

    /// Returns the length of `line` including its terminator.
    pub fn line_len(&self, line: usize) -> Result<usize, BufferError> {
        self.line_index
            .line_len(line)
            .ok_or(BufferError::LineOutOfRange {
                line,
                line_count: self.line_count(),
            })
    }

    /// Returns how many characters of `line` make up its terminator (0, 1 or 2).
    pub fn terminator_len(&self, line: usize) -> Result<usize, BufferError> {
        let start = self.line_start(line)?;
        let len = self.line_len(line)?;
        if len == 0 {
            return Ok(0);
        }
        let end = start + len;
        Ok(match self.char_at(end - 1) {
            Some('\n') if len >= 2 && self.char_at(end - 2) == Some('\r') => 2,
            Some('\n') | Some('\r') => 1,
            _ => 0,
        })
    }

    /// Returns the length of `line` without its terminator.
    pub fn line_content_len(&self, line: usize) -> Result<usize, BufferError> {
        Ok(self.line_len(line)? - self.terminator_len(line)?)
    }

    /// Returns the content of `line` without its terminator.
    pub fn line_content(&self, line: usize) -> Result<String, BufferError> {
        let start = self.line_start(line)?;
        let len = self.line_content_len(line)?;
        Ok(self.buffer.slice(start, start + len))
    }

    /// Converts a character offset to a (line, column) position.
    pub fn offset_to_position(&self, offset: usize) -> Result<Position, BufferError> {
        let line = self.line_at_offset(offset)?;
        let start = self.line_start(line)?;
        Ok(Position::new(line, offset - start))
    }

    /// Converts a (line, column) position to a character offset.
    ///
    /// The column is clamped to the line's content so the result never lands
    /// inside or past the terminator.
    pub fn position_to_offset(&self, pos: Position) -> Result<usize, BufferError> {
        let start = self.line_start(pos.line)?;
        Ok(start + pos.col.min(self.line_content_len(pos.line)?))
    }

    // ==================== Validation ====================

    /// Rebuilds the line table from the character data in one pass.
    ///
    /// Loads already build the table; this is the recovery path for callers
    /// that suspect the incremental table has drifted.
    pub fn refresh_line_tables(&mut self) {
        let before = self.line_index.line_count();
        self.line_index.rebuild(self.buffer.chars());
        tracing::debug!(
            before,
            after = self.line_index.line_count(),
            "refreshed line tables"
        );
    }

    /// Debug assertion: verifies that the incremental line_index matches
    /// a fresh rebuild from the buffer content.
    ///
    /// The length sum is checked on every mutation; the full O(n) rebuild
    /// only every 64th mutation so tight editing loops stay fast.
    #[cfg(debug_assertions)]
    fn assert_line_index_consistent(&mut self) {
        debug_assert_eq!(
            self.line_index.total_len(),
            self.buffer.len(),
            "line table length sum diverged from buffer length"
        );

        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }
        let mut expected = LineIndex::new();
        expected.rebuild(self.buffer.chars());
        assert_eq!(
            self.line_index.lengths(),
            expected.lengths(),
            "line_index drift detected after {} mutations (buffer len {})",
            self.debug_mutation_count,
            self.buffer.len(),
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_line_index_consistent(&mut self) {}

    // ==================== Mutations ====================

    /// Inserts `ch` at `offset`, patching the line table.
    pub fn insert_char(&mut self, offset: usize, ch: char) -> Result<DirtyLines, BufferError> {
        let len = self.len();
        if offset > len {
            return Err(BufferError::IndexOutOfRange { index: offset, len });
        }

        let prev = offset.checked_sub(1).and_then(|o| self.char_at(o));
        let next = self.char_at(offset);
        let line = self.line_index.line_at_offset(offset);
        let lines_before = self.line_count();

        self.buffer.insert(offset, ch)?;
        self.line_index.on_insert(offset, ch, prev, next);
        self.assert_line_index_consistent();

        Ok(self.dirty_after_edit(line, ch, prev, lines_before))
    }

    /// Removes the character at `offset`, patching the line table.
    ///
    /// Returns the removed character together with the dirty region.
    pub fn remove_char(&mut self, offset: usize) -> Result<(char, DirtyLines), BufferError> {
        let removed = self.buffer.get(offset)?;
        let prev = offset.checked_sub(1).and_then(|o| self.char_at(o));
        let next = self.char_at(offset + 1);
        let line = self.line_index.line_at_offset(offset);
        let lines_before = self.line_count();

        self.buffer.remove(offset)?;
        self.line_index.on_remove(offset, removed, prev, next);
        self.assert_line_index_consistent();

        Ok((removed, self.dirty_after_edit(line, removed, prev, lines_before)))
    }

    /// Removes every character in `[start, end)`.
    pub fn remove_range(&mut self, start: usize, end: usize) -> Result<DirtyLines, BufferError> {
        let len = self.len();
        if start > end || end > len {
            return Err(BufferError::IndexOutOfRange { index: end, len });
        }

        let mut dirty = DirtyLines::None;
        for _ in start..end {
            let (_, d) = self.remove_char(start)?;
            dirty.merge(d);
        }
        Ok(dirty)
    }

    /// Inserts a string at `offset`, one character at a time.
    pub fn insert_str(&mut self, offset: usize, s: &str) -> Result<DirtyLines, BufferError> {
        let mut dirty = DirtyLines::None;
        for (i, ch) in s.chars().enumerate() {
            dirty.merge(self.insert_char(offset + i, ch)?);
        }
        Ok(dirty)
    }

    /// Lines touched by a single-character edit on `line`.
    ///
    /// Terminator edits, and edits right after a CR (which may complete or
    /// break a CRLF on the previous line), dirty everything below.
    fn dirty_after_edit(
        &self,
        line: usize,
        ch: char,
        prev: Option<char>,
        lines_before: usize,
    ) -> DirtyLines {
        if prev == Some('\r') {
            DirtyLines::FromLineToEnd(line.saturating_sub(1))
        } else if matches!(ch, '\r' | '\n') || lines_before != self.line_count() {
            DirtyLines::FromLineToEnd(line)
        } else {
            DirtyLines::Single(line)
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.buffer, f)
    }
}
