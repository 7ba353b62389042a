// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing
// Chunk: docs/chunks/buffer_errors - Typed errors for out-of-range offsets and lines

use thiserror::Error;

/// Position in the buffer as (line, column) where both are 0-indexed.
///
/// `col` counts characters from the start of the line, not display columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Errors reported by buffer queries and mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A character offset was at or past the end of the buffer.
    #[error("offset {index} is out of range for buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A line number was at or past the line count.
    #[error("line {line} is out of range for buffer with {line_count} lines")]
    LineOutOfRange { line: usize, line_count: usize },
}

/// Which lines a mutation touched.
///
/// Returned by every [`TextBuffer`](crate::TextBuffer) mutation so that a
/// renderer can restrict redraws to the affected lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirtyLines {
    /// Nothing changed.
    #[default]
    None,
    /// One line changed in place.
    Single(usize),
    /// Lines `[from, to)` changed.
    Range { from: usize, to: usize },
    /// Line structure changed: everything from this line down must be redrawn.
    FromLineToEnd(usize),
}

impl DirtyLines {
    /// Returns true if no lines were dirtied.
    pub fn is_none(&self) -> bool {
        matches!(self, DirtyLines::None)
    }

    /// Returns the first dirty line, if any.
    pub fn start_line(&self) -> Option<usize> {
        self.bounds().map(|(from, _)| from)
    }

    /// Returns true if `line` falls inside the dirty region.
    pub fn contains(&self, line: usize) -> bool {
        match self.bounds() {
            Some((from, Some(to))) => line >= from && line < to,
            Some((from, None)) => line >= from,
            None => false,
        }
    }

    /// `(from, Some(to))` for bounded regions, `(from, None)` for open-ended ones.
    fn bounds(&self) -> Option<(usize, Option<usize>)> {
        match *self {
            DirtyLines::None => None,
            DirtyLines::Single(line) => Some((line, Some(line + 1))),
            DirtyLines::Range { from, to } => Some((from, Some(to))),
            DirtyLines::FromLineToEnd(from) => Some((from, None)),
        }
    }

    /// Widens this region to also cover `other`.
    ///
    /// An edit intent can produce several mutations (e.g. removing a selection
    /// one character at a time); their regions are merged into one.
    pub fn merge(&mut self, other: DirtyLines) {
        let Some((b_from, b_to)) = other.bounds() else {
            return;
        };
        let Some((a_from, a_to)) = self.bounds() else {
            *self = other;
            return;
        };

        let from = a_from.min(b_from);
        *self = match (a_to, b_to) {
            (Some(a_to), Some(b_to)) => {
                let to = a_to.max(b_to);
                if to == from + 1 {
                    DirtyLines::Single(from)
                } else {
                    DirtyLines::Range { from, to }
                }
            }
            _ => DirtyLines::FromLineToEnd(from),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_into_none_takes_other() {
        let mut d = DirtyLines::None;
        d.merge(DirtyLines::Single(4));
        assert_eq!(d, DirtyLines::Single(4));
    }

    #[test]
    fn merge_none_is_identity() {
        let mut d = DirtyLines::Range { from: 1, to: 3 };
        d.merge(DirtyLines::None);
        assert_eq!(d, DirtyLines::Range { from: 1, to: 3 });
    }

    #[test]
    fn merge_same_single_stays_single() {
        let mut d = DirtyLines::Single(2);
        d.merge(DirtyLines::Single(2));
        assert_eq!(d, DirtyLines::Single(2));
    }

    #[test]
    fn merge_singles_spans_both() {
        let mut d = DirtyLines::Single(7);
        d.merge(DirtyLines::Single(2));
        assert_eq!(d, DirtyLines::Range { from: 2, to: 8 });
    }

    #[test]
    fn open_ended_region_absorbs_bounded_one() {
        let mut d = DirtyLines::Range { from: 1, to: 4 };
        d.merge(DirtyLines::FromLineToEnd(3));
        assert_eq!(d, DirtyLines::FromLineToEnd(1));
    }

    #[test]
    fn contains_respects_bounds() {
        assert!(DirtyLines::Single(3).contains(3));
        assert!(!DirtyLines::Single(3).contains(4));
        assert!(DirtyLines::FromLineToEnd(3).contains(100));
        assert!(!DirtyLines::None.contains(0));
    }

    #[test]
    fn error_messages_name_the_offending_value() {
        let err = BufferError::IndexOutOfRange { index: 9, len: 4 };
        assert_eq!(
            err.to_string(),
            "offset 9 is out of range for buffer of length 4"
        );
    }

    #[test]
    fn start_line_of_each_region() {
        assert_eq!(DirtyLines::None.start_line(), None);
        assert_eq!(DirtyLines::Single(3).start_line(), Some(3));
        assert_eq!(DirtyLines::Range { from: 2, to: 5 }.start_line(), Some(2));
        assert_eq!(DirtyLines::FromLineToEnd(6).start_line(), Some(6));
    }
}
