// Chunk: docs/chunks/editor_context - Buffers and views owned by an explicit context
// Chunk: docs/chunks/cursor_model - Offset-based cursor motions and edits

//! gapline-editor: buffers, views and cursor arithmetic for the gapline core.
//!
//! This crate ties the text storage of `gapline-buffer` to the lexer of
//! `gapline-syntax` and adds the editing model a host drives:
//!
//! - [`EditorContext`]: Owns every [`Buffer`] and [`View`] by id and applies
//!   [`EditIntent`]s.
//! - [`Buffer`]: Text plus language plus a span list rebuilt on demand.
//! - [`cursor`]: Motions and edits over a view's cursor and selection.
//! - [`EditorConfig`]: Tab width and gap growth, loadable from JSON.
//!
//! The crate logs through `tracing` and never installs a subscriber.
//!
//! # Example
//!
//! ```
//! use gapline_editor::{EditIntent, EditorContext, Motion, TokenKind};
//!
//! let mut ctx = EditorContext::default();
//! let buffer = ctx.open_buffer("main.c", b"int x;\n");
//! let view = ctx.open_view(buffer).unwrap();
//!
//! ctx.apply(view, EditIntent::Move { motion: Motion::LineEnd, extend: false })
//!     .unwrap();
//! ctx.apply(view, EditIntent::DeleteBackward).unwrap();
//!
//! let spans = ctx.spans(buffer).unwrap();
//! assert_eq!(spans[0].kind, TokenKind::Type);
//! assert_eq!(ctx.view(view).unwrap().cursor(), 5);
//! ```

mod buffer;
mod config;
mod context;
pub mod cursor;
mod error;
mod view;

pub use buffer::{Buffer, BufferId};
pub use config::{ConfigError, EditorConfig, DEFAULT_TAB_WIDTH};
pub use context::{EditIntent, EditorContext};
pub use cursor::{Edit, Motion};
pub use error::EditorError;
pub use view::{Direction, View, ViewId};

pub use gapline_buffer::{BufferError, DirtyLines, Position};
pub use gapline_syntax::{Language, Span, TokenKind};
