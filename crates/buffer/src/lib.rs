// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing
// Chunk: docs/chunks/crlf_line_table - Per-line length table with CR, LF and CRLF terminators

//! gapline-buffer: text storage for the gapline editing core.
//!
//! This crate provides a gap buffer of `char` cells together with a line
//! table that is patched on every edit, so line/column questions never need
//! a rescan of the text.
//!
//! # Overview
//!
//! The main type is [`TextBuffer`], which provides:
//! - Character insertion and removal at any offset
//! - Line queries (count, start offset, length, content) where CR, LF and
//!   CRLF each count as one line terminator
//! - Dirty line reporting for every mutation
//!
//! # Example
//!
//! ```
//! use gapline_buffer::{DirtyLines, TextBuffer};
//!
//! let mut buffer = TextBuffer::new();
//! buffer.insert_str(0, "Hello, world!").unwrap();
//! assert_eq!(buffer.line_count(), 1);
//!
//! // A CR followed by an LF is a single line break.
//! buffer.insert_char(6, '\r').unwrap();
//! let dirty = buffer.insert_char(7, '\n').unwrap();
//! assert_eq!(dirty, DirtyLines::FromLineToEnd(0));
//! assert_eq!(buffer.line_count(), 2);
//! assert_eq!(buffer.line_content(1).unwrap(), " world!");
//! ```

mod gap_buffer;
mod line_index;
mod text_buffer;
mod types;

pub use gap_buffer::{GapBuffer, DEFAULT_GAP_RESERVE};
pub use line_index::LineIndex;
pub use text_buffer::TextBuffer;
pub use types::{BufferError, DirtyLines, Position};
