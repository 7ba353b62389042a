// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing
// Chunk: docs/chunks/gap_reserve_growth - Fixed-increment growth and indexed insert/remove

//! Gap buffer implementation for efficient text editing.
//!
//! A gap buffer is a character array with a movable gap at the edit point.
//! Insertions and removals at the gap are O(1); moving the gap is O(distance)
//! but amortizes well because edits cluster around the cursor.
//!
//! Cells are whole `char`s, so every logical index is a code point index.
//! UTF-8 only exists at the load boundary (see `TextBuffer::from_bytes`).

use crate::types::BufferError;

/// Gap size used when no reserve is configured.
pub const DEFAULT_GAP_RESERVE: usize = 64;

/// A gap buffer for efficient text storage and manipulation.
///
/// Storage layout is `[pre-gap content | gap | post-gap content]`.
#[derive(Debug, Clone)]
pub struct GapBuffer {
    data: Vec<char>,
    /// Index where the gap starts (first unused cell).
    gap_start: usize,
    /// Index where the gap ends (first used cell after the gap).
    gap_end: usize,
    /// Minimum number of cells added whenever the gap runs out.
    reserve: usize,
}

impl GapBuffer {
    /// Creates a new empty gap buffer with the default reserve.
    pub fn new() -> Self {
        Self::with_reserve(DEFAULT_GAP_RESERVE)
    }

    /// Creates an empty gap buffer whose gap is `reserve` cells wide and which
    /// grows by at least `reserve` cells at a time.
    pub fn with_reserve(reserve: usize) -> Self {
        let reserve = reserve.max(1);
        Self {
            data: vec!['\0'; reserve],
            gap_start: 0,
            gap_end: reserve,
            reserve,
        }
    }

    /// Creates a gap buffer holding `chars`, with the gap placed at the end.
    pub fn from_chars<I>(chars: I, reserve: usize) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let reserve = reserve.max(1);
        let mut data: Vec<char> = chars.into_iter().collect();
        let len = data.len();
        data.resize(len + reserve, '\0');

        Self {
            gap_start: len,
            gap_end: data.len(),
            data,
            reserve,
        }
    }

    /// Returns the logical length of the buffer (excluding the gap).
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of allocated cells, gap included.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Returns the current gap position in logical coordinates.
    pub fn gap_position(&self) -> usize {
        self.gap_start
    }

    /// Moves the gap to the logical position `pos` (clamped to the length).
    ///
    /// Only the run of cells between the old and the new gap position is
    /// copied.
    pub fn move_gap_to(&mut self, pos: usize) {
        let pos = pos.min(self.len());

        if pos < self.gap_start {
            // [pos..gap_start] slides to the right edge of the gap.
            let shift = self.gap_start - pos;
            self.data
                .copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start = pos;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            // [gap_end..gap_end + shift] slides to the left edge of the gap.
            let shift = pos - self.gap_start;
            self.data
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Grows storage until the gap holds at least `min_size` cells.
    ///
    /// The gap keeps its logical position: the post-gap run is copied to the
    /// tail of the enlarged storage.
    fn ensure_gap(&mut self, min_size: usize) {
        let gap_len = self.gap_len();
        if gap_len >= min_size {
            return;
        }

        let old_capacity = self.data.len();
        let growth = self.reserve.max(min_size - gap_len);
        let new_capacity = old_capacity + growth;
        let post_gap_len = old_capacity - self.gap_end;

        tracing::trace!(
            old_capacity,
            new_capacity,
            gap_start = self.gap_start,
            "growing gap buffer"
        );

        self.data.resize(new_capacity, '\0');
        if post_gap_len > 0 {
            self.data
                .copy_within(self.gap_end..old_capacity, new_capacity - post_gap_len);
        }
        self.gap_end = new_capacity - post_gap_len;
    }

    /// Inserts `ch` so that it ends up at logical `index`.
    pub fn insert(&mut self, index: usize, ch: char) -> Result<(), BufferError> {
        let len = self.len();
        if index > len {
            return Err(BufferError::IndexOutOfRange { index, len });
        }

        self.move_gap_to(index);
        self.ensure_gap(1);
        self.data[self.gap_start] = ch;
        self.gap_start += 1;
        Ok(())
    }

    /// Inserts a run of characters starting at logical `index`.
    ///
    /// The gap is grown once for the whole run.
    pub fn insert_chars(&mut self, index: usize, chars: &[char]) -> Result<(), BufferError> {
        let len = self.len();
        if index > len {
            return Err(BufferError::IndexOutOfRange { index, len });
        }

        self.move_gap_to(index);
        self.ensure_gap(chars.len());
        self.data[self.gap_start..self.gap_start + chars.len()].copy_from_slice(chars);
        self.gap_start += chars.len();
        Ok(())
    }

    /// Removes and returns the character at logical `index`.
    ///
    /// The gap is relocated to `index` and then widened over the cell that
    /// follows it.
    pub fn remove(&mut self, index: usize) -> Result<char, BufferError> {
        let len = self.len();
        if index >= len {
            return Err(BufferError::IndexOutOfRange { index, len });
        }

        self.move_gap_to(index);
        let ch = self.data[self.gap_end];
        self.gap_end += 1;
        Ok(ch)
    }

    /// Returns the character at `index`, or `IndexOutOfRange`.
    pub fn get(&self, index: usize) -> Result<char, BufferError> {
        self.char_at(index).ok_or(BufferError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Returns the character at the given logical position.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.len() {
            return None;
        }
        let physical = if pos < self.gap_start {
            pos
        } else {
            pos + self.gap_len()
        };
        Some(self.data[physical])
    }

    /// Offset of the character boundary after `index`.
    ///
    /// Every cell is one code point, so this is `index + 1` clamped to the
    /// length.
    pub fn find_next_char(&self, index: usize) -> usize {
        (index + 1).min(self.len())
    }

    /// Offset of the character boundary before `index`.
    pub fn find_prev_char(&self, index: usize) -> usize {
        index.min(self.len()).saturating_sub(1)
    }

    /// Returns an iterator over all characters in the buffer.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.data[..self.gap_start]
            .iter()
            .chain(self.data[self.gap_end..].iter())
            .copied()
    }

    /// Moves the gap to the end and returns the content as one slice.
    pub fn make_contiguous(&mut self) -> &[char] {
        self.move_gap_to(self.len());
        &self.data[..self.gap_start]
    }

    /// Returns the content of `[start, end)` as a String.
    ///
    /// The range is in logical coordinates and is clamped to the length.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        if start >= end {
            return String::new();
        }
        self.chars().skip(start).take(end - start).collect()
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars().try_for_each(|ch| write!(f, "{}", ch))
    }
}
