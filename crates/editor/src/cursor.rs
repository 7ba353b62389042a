// Chunk: docs/chunks/cursor_model - Offset-based cursor motions and edits

//! Cursor arithmetic over a [`TextBuffer`] and a [`View`].
//!
//! Motions take the text read-only and move the cursor of one view. Edits take
//! the [`Buffer`] so the span list is invalidated with the change, and report
//! what changed as an [`Edit`] so the caller can shift every other view of the
//! same buffer.
//!
//! Offsets are never left between the `\r` and `\n` of a CRLF: a motion that
//! would land there steps over the pair, and an edit that creates such a
//! position moves the cursor forward past the `\n`.
//!
//! Columns count a tab as the view's tab width and every other character as
//! one. Motions only move the cursor; whether the selection follows is decided
//! by the caller.

use gapline_buffer::{BufferError, DirtyLines, TextBuffer};

use crate::buffer::Buffer;
use crate::view::{Direction, View};

/// A cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// One character, treating CRLF as one.
    Horizontal(Direction),
    /// Lines down (positive) or up (negative), aiming for the desired column.
    Vertical(isize),
    /// To the next word boundary.
    Word(Direction),
    LineStart,
    LineEnd,
    BufferStart,
    BufferEnd,
}

/// A content change: `removed` characters at `start` replaced by `inserted`
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub removed: usize,
    pub inserted: usize,
    pub dirty: DirtyLines,
}

impl Edit {
    /// Maps an offset taken before the edit to the equivalent offset after it.
    ///
    /// Offsets at a pure insertion point move past the inserted text. Offsets
    /// inside a removed range collapse onto its start.
    pub fn shift(&self, offset: usize) -> usize {
        if offset < self.start || (offset == self.start && self.removed > 0) {
            offset
        } else if offset < self.start + self.removed {
            self.start
        } else {
            offset - self.removed + self.inserted
        }
    }
}

fn char_width(ch: char, tab_width: usize) -> usize {
    if ch == '\t' {
        tab_width
    } else {
        1
    }
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn inside_crlf(text: &TextBuffer, offset: usize) -> bool {
    offset > 0 && text.char_at(offset - 1) == Some('\r') && text.char_at(offset) == Some('\n')
}

/// Moves `offset` forward off the middle of a CRLF.
pub(crate) fn snap(text: &TextBuffer, offset: usize) -> usize {
    if inside_crlf(text, offset) {
        offset + 1
    } else {
        offset
    }
}

/// One character in `direction`, stepping over CRLF pairs.
fn step(text: &TextBuffer, offset: usize, direction: Direction) -> usize {
    match direction {
        Direction::Backward if offset > 0 => {
            let prev = offset - 1;
            if inside_crlf(text, prev) {
                prev - 1
            } else {
                prev
            }
        }
        Direction::Forward if offset < text.len() => snap(text, offset + 1),
        _ => offset,
    }
}

/// Column of `offset` counted from `line_start`.
fn column_between(
    text: &TextBuffer,
    line_start: usize,
    offset: usize,
    tab_width: usize,
) -> Result<usize, BufferError> {
    let mut column = 0;
    for i in line_start..offset {
        column += char_width(text.get_char(i)?, tab_width);
    }
    Ok(column)
}

/// Refreshes the cached line and column of the cursor.
pub fn recompute_position(view: &mut View, text: &TextBuffer) -> Result<(), BufferError> {
    let line = text.line_at_offset(view.cursor)?;
    let start = text.line_start(line)?;
    view.current_line = line;
    view.current_column = column_between(text, start, view.cursor, view.tab_width())?;
    Ok(())
}

/// Recomputes the position and makes the current column the desired one.
fn settle(view: &mut View, text: &TextBuffer) -> Result<(), BufferError> {
    recompute_position(view, text)?;
    view.desired_column = view.current_column;
    Ok(())
}

fn check_offset(text: &TextBuffer, offset: usize) -> Result<(), BufferError> {
    let len = text.len();
    if offset > len {
        return Err(BufferError::IndexOutOfRange { index: offset, len });
    }
    Ok(())
}

// ==================== Motions ====================

pub fn horizontal_move(
    view: &mut View,
    text: &TextBuffer,
    direction: Direction,
) -> Result<(), BufferError> {
    view.cursor = step(text, view.cursor, direction);
    settle(view, text)
}

/// Moves `delta` lines, clamped to the buffer, landing as close to the
/// desired column as the target line allows.
pub fn vertical_move(view: &mut View, text: &TextBuffer, delta: isize) -> Result<(), BufferError> {
    let last_line = text.line_count().saturating_sub(1);
    let current = text.line_at_offset(view.cursor)?;
    let target = current.saturating_add_signed(delta).min(last_line);

    let start = text.line_start(target)?;
    let end = start + text.line_content_len(target)?;

    let mut column = 0;
    let mut offset = start;
    while offset < end {
        let width = char_width(text.get_char(offset)?, view.tab_width());
        if column + width > view.desired_column {
            break;
        }
        column += width;
        offset += 1;
    }

    view.cursor = offset;
    recompute_position(view, text)
}

/// Takes one step, then keeps going while the next character in that
/// direction is part of a word (alphanumeric or `_`).
pub fn seek_word_boundary(
    view: &mut View,
    text: &TextBuffer,
    direction: Direction,
) -> Result<(), BufferError> {
    let mut offset = step(text, view.cursor, direction);
    match direction {
        Direction::Forward => {
            while text.char_at(offset).is_some_and(is_word_char) {
                offset += 1;
            }
        }
        Direction::Backward => {
            while offset > 0 && text.char_at(offset - 1).is_some_and(is_word_char) {
                offset -= 1;
            }
        }
    }
    view.cursor = offset;
    settle(view, text)
}

pub fn seek_line_start(view: &mut View, text: &TextBuffer) -> Result<(), BufferError> {
    let line = text.line_at_offset(view.cursor)?;
    view.cursor = text.line_start(line)?;
    settle(view, text)
}

/// Moves to the end of the line's content, before its terminator.
pub fn seek_line_end(view: &mut View, text: &TextBuffer) -> Result<(), BufferError> {
    let line = text.line_at_offset(view.cursor)?;
    view.cursor = text.line_start(line)? + text.line_content_len(line)?;
    settle(view, text)
}

pub fn seek_buffer_start(view: &mut View, text: &TextBuffer) -> Result<(), BufferError> {
    view.cursor = 0;
    settle(view, text)
}

pub fn seek_buffer_end(view: &mut View, text: &TextBuffer) -> Result<(), BufferError> {
    view.cursor = text.len();
    settle(view, text)
}

pub fn apply_motion(view: &mut View, text: &TextBuffer, motion: Motion) -> Result<(), BufferError> {
    match motion {
        Motion::Horizontal(direction) => horizontal_move(view, text, direction),
        Motion::Vertical(delta) => vertical_move(view, text, delta),
        Motion::Word(direction) => seek_word_boundary(view, text, direction),
        Motion::LineStart => seek_line_start(view, text),
        Motion::LineEnd => seek_line_end(view, text),
        Motion::BufferStart => seek_buffer_start(view, text),
        Motion::BufferEnd => seek_buffer_end(view, text),
    }
}

// ==================== Cursor and selection ====================

/// Places the cursor at `offset` and drops the selection.
pub fn set_cursor(view: &mut View, text: &TextBuffer, offset: usize) -> Result<(), BufferError> {
    check_offset(text, offset)?;
    view.cursor = snap(text, offset);
    view.collapse_selection();
    settle(view, text)
}

/// Places the selection anchor at `offset`, leaving the cursor alone.
pub fn set_selection(view: &mut View, text: &TextBuffer, offset: usize) -> Result<(), BufferError> {
    check_offset(text, offset)?;
    view.selection = snap(text, offset);
    Ok(())
}

pub fn select_all(view: &mut View, text: &TextBuffer) -> Result<(), BufferError> {
    view.selection = 0;
    view.cursor = text.len();
    settle(view, text)
}

/// The selected characters, or `None` without a selection.
pub fn selected_text(view: &View, text: &TextBuffer) -> Option<String> {
    if !view.has_selection() {
        return None;
    }
    let (start, end) = view.selection_range();
    Some(text.slice(start, end))
}

/// Moves a view that did not make `edit` so it keeps pointing at the same
/// text.
pub fn shift_view(view: &mut View, text: &TextBuffer, edit: &Edit) -> Result<(), BufferError> {
    view.cursor = snap(text, edit.shift(view.cursor));
    view.selection = snap(text, edit.shift(view.selection));
    recompute_position(view, text)
}

// ==================== Edits ====================

/// Removes `[min, max)` of cursor and selection and collapses both onto
/// `min`. Returns `None` without a selection.
pub fn remove_selection(view: &mut View, buffer: &mut Buffer) -> Result<Option<Edit>, BufferError> {
    let (start, end) = view.selection_range();
    if start == end {
        return Ok(None);
    }
    let dirty = buffer.remove_range(start, end)?;
    finish_edit(view, buffer, start, end - start, 0, dirty)
}

/// Types `ch` at the cursor, replacing the selection if there is one.
pub fn insert_char(view: &mut View, buffer: &mut Buffer, ch: char) -> Result<Option<Edit>, BufferError> {
    let (start, end) = view.selection_range();
    let mut dirty = DirtyLines::None;
    if start < end {
        dirty.merge(buffer.remove_range(start, end)?);
    }
    dirty.merge(buffer.insert_char(start, ch)?);
    finish_edit(view, buffer, start, end - start, 1, dirty)
}

/// Removes the selection, or the character (CRLF as a unit) before the
/// cursor.
pub fn delete_backward(view: &mut View, buffer: &mut Buffer) -> Result<Option<Edit>, BufferError> {
    if view.has_selection() {
        return remove_selection(view, buffer);
    }
    let end = view.cursor;
    let start = step(buffer.text(), end, Direction::Backward);
    if start == end {
        return Ok(None);
    }
    let dirty = buffer.remove_range(start, end)?;
    finish_edit(view, buffer, start, end - start, 0, dirty)
}

/// Removes the selection, or the character (CRLF as a unit) after the cursor.
pub fn delete_forward(view: &mut View, buffer: &mut Buffer) -> Result<Option<Edit>, BufferError> {
    if view.has_selection() {
        return remove_selection(view, buffer);
    }
    let start = view.cursor;
    let end = step(buffer.text(), start, Direction::Forward);
    if start == end {
        return Ok(None);
    }
    let dirty = buffer.remove_range(start, end)?;
    finish_edit(view, buffer, start, end - start, 0, dirty)
}

/// Puts the acting view's cursor after the new text and reports the edit.
fn finish_edit(
    view: &mut View,
    buffer: &Buffer,
    start: usize,
    removed: usize,
    inserted: usize,
    dirty: DirtyLines,
) -> Result<Option<Edit>, BufferError> {
    let text = buffer.text();
    view.cursor = snap(text, start + inserted);
    view.collapse_selection();
    settle(view, text)?;
    Ok(Some(Edit {
        start,
        removed,
        inserted,
        dirty,
    }))
}
