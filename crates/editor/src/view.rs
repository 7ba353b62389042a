// Chunk: docs/chunks/cursor_model - Offset-based cursor motions and edits

//! Per-view cursor state.

use std::fmt;

use crate::buffer::BufferId;

/// Stable identifier of a view within an [`EditorContext`](crate::EditorContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Direction of a horizontal or word motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Backward,
    Forward,
}

/// A cursor and selection anchor into one buffer.
///
/// Positions are character offsets. `cursor == selection` means there is no
/// selection. The cursor never rests between the `\r` and `\n` of a CRLF.
///
/// `current_line` and `current_column` are a cache recomputed after every
/// motion or edit. `desired_column` is the column vertical motion aims for;
/// horizontal motion and edits set it, vertical motion leaves it alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    id: ViewId,
    buffer_id: BufferId,
    pub(crate) cursor: usize,
    pub(crate) selection: usize,
    pub(crate) desired_column: usize,
    pub(crate) current_line: usize,
    pub(crate) current_column: usize,
    tab_width: usize,
}

impl View {
    pub(crate) fn new(id: ViewId, buffer_id: BufferId, tab_width: usize) -> Self {
        Self {
            id,
            buffer_id,
            cursor: 0,
            selection: 0,
            desired_column: 0,
            current_line: 0,
            current_column: 0,
            tab_width,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn buffer_id(&self) -> BufferId {
        self.buffer_id
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The selection anchor.
    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn desired_column(&self) -> usize {
        self.desired_column
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn current_column(&self) -> usize {
        self.current_column
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn has_selection(&self) -> bool {
        self.cursor != self.selection
    }

    /// Selection bounds in document order as a half-open range.
    pub fn selection_range(&self) -> (usize, usize) {
        (
            self.cursor.min(self.selection),
            self.cursor.max(self.selection),
        )
    }

    /// Drops the selection by moving the anchor onto the cursor.
    pub(crate) fn collapse_selection(&mut self) {
        self.selection = self.cursor;
    }
}
