// Chunk: docs/chunks/editor_errors - Typed errors for unknown ids and config validation

use gapline_buffer::BufferError;
use thiserror::Error;

use crate::buffer::BufferId;
use crate::view::ViewId;

/// Errors returned by [`EditorContext`](crate::EditorContext) operations.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no open buffer with id {0}")]
    UnknownBuffer(BufferId),
    #[error("no open view with id {0}")]
    UnknownView(ViewId),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
