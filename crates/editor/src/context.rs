// Chunk: docs/chunks/editor_context - Buffers and views owned by an explicit context

//! The owner of every open buffer and view.
//!
//! Hosts talk to the core through [`EditorContext`]: they open buffers from
//! raw bytes, open views onto them and send [`EditIntent`]s. Views refer to
//! buffers by [`BufferId`] only, so closing and reopening never leaves a
//! dangling reference.
//!
//! When an intent changes a buffer's content, every other view of that buffer
//! is shifted so it keeps pointing at the same text, and its cached line and
//! column are recomputed.

use std::collections::HashMap;
use std::path::Path;

use gapline_buffer::{DirtyLines, TextBuffer};
use gapline_syntax::{LanguageRegistry, Span};
use tracing::{debug, warn};

use crate::buffer::{Buffer, BufferId};
use crate::config::{ConfigError, EditorConfig};
use crate::cursor::{self, Edit, Motion};
use crate::error::EditorError;
use crate::view::{View, ViewId};

/// An edit or cursor request from the host, applied to one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditIntent {
    /// Types a character at the cursor, replacing the selection.
    InsertChar(char),
    /// Removes the character at an offset, independent of the cursor.
    DeleteAt(usize),
    DeleteBackward,
    DeleteForward,
    /// Places the cursor and drops the selection.
    SetCursor(usize),
    /// Places the selection anchor.
    SetSelection(usize),
    /// Moves the cursor. With `extend` the selection anchor stays put;
    /// otherwise the selection collapses onto the new cursor.
    Move { motion: Motion, extend: bool },
    SelectAll,
    RemoveSelection,
}

/// Owns all buffers and views, keyed by stable ids.
#[derive(Debug)]
pub struct EditorContext {
    config: EditorConfig,
    registry: LanguageRegistry,
    buffers: HashMap<BufferId, Buffer>,
    views: HashMap<ViewId, View>,
    next_buffer_id: u64,
    next_view_id: u64,
}

impl EditorContext {
    /// Creates a context after checking `config` with
    /// [`EditorConfig::validate`].
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: EditorConfig) -> Self {
        Self {
            config,
            registry: LanguageRegistry::new(),
            buffers: HashMap::new(),
            views: HashMap::new(),
            next_buffer_id: 1,
            next_view_id: 1,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    // ==================== Buffers ====================

    /// Opens a buffer from file bytes. Invalid UTF-8 is replaced with U+FFFD;
    /// the language comes from the path's extension.
    pub fn open_buffer(&mut self, path: impl AsRef<Path>, bytes: &[u8]) -> BufferId {
        let path = path.as_ref();
        let id = self.allocate_buffer_id();
        let text = TextBuffer::from_bytes(bytes, self.config.gap_reserve);
        let language = self.registry.language_for_path(path);

        debug!(
            buffer = %id,
            path = %path.display(),
            language = language.name(),
            chars = text.len(),
            lines = text.line_count(),
            "opened buffer"
        );
        self.buffers
            .insert(id, Buffer::new(id, text, language, Some(path.to_path_buf())));
        id
    }

    /// Opens an empty, pathless buffer.
    pub fn new_buffer(&mut self) -> BufferId {
        let id = self.allocate_buffer_id();
        let text = TextBuffer::with_reserve(self.config.gap_reserve);
        debug!(buffer = %id, "opened empty buffer");
        self.buffers
            .insert(id, Buffer::new(id, text, Default::default(), None));
        id
    }

    pub fn buffer(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(&id)
    }

    /// Mutable access for queries that rebuild caches, such as spans.
    ///
    /// Content edits made directly through the returned buffer do not shift
    /// views; send [`EditIntent`]s for that.
    pub fn buffer_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
        self.buffers.get_mut(&id)
    }

    /// The span list of a buffer, re-lexed if stale.
    pub fn spans(&mut self, id: BufferId) -> Result<&[Span], EditorError> {
        let buffer = self
            .buffers
            .get_mut(&id)
            .ok_or(EditorError::UnknownBuffer(id))?;
        Ok(buffer.spans())
    }

    /// Closes a buffer and every view onto it.
    pub fn close_buffer(&mut self, id: BufferId) -> Result<Buffer, EditorError> {
        let buffer = self
            .buffers
            .remove(&id)
            .ok_or(EditorError::UnknownBuffer(id))?;

        let before = self.views.len();
        self.views.retain(|_, view| view.buffer_id() != id);
        debug!(
            buffer = %id,
            closed_views = before - self.views.len(),
            "closed buffer"
        );
        Ok(buffer)
    }

    pub fn buffer_ids(&self) -> impl Iterator<Item = BufferId> + '_ {
        self.buffers.keys().copied()
    }

    // ==================== Views ====================

    /// Opens a view onto a buffer with the cursor at the start.
    pub fn open_view(&mut self, buffer_id: BufferId) -> Result<ViewId, EditorError> {
        let buffer = self
            .buffers
            .get(&buffer_id)
            .ok_or(EditorError::UnknownBuffer(buffer_id))?;

        let id = ViewId(self.next_view_id);
        self.next_view_id += 1;

        let mut view = View::new(id, buffer_id, self.config.tab_width);
        cursor::recompute_position(&mut view, buffer.text())?;
        debug!(view = %id, buffer = %buffer_id, "opened view");
        self.views.insert(id, view);
        Ok(id)
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(&id)
    }

    pub fn close_view(&mut self, id: ViewId) -> Result<View, EditorError> {
        let view = self.views.remove(&id).ok_or(EditorError::UnknownView(id))?;
        debug!(view = %id, buffer = %view.buffer_id(), "closed view");
        Ok(view)
    }

    /// Views onto `buffer_id`, in no particular order.
    pub fn views_of(&self, buffer_id: BufferId) -> impl Iterator<Item = &View> + '_ {
        self.views
            .values()
            .filter(move |view| view.buffer_id() == buffer_id)
    }

    /// The selected text of a view, if it has a selection.
    pub fn selected_text(&self, id: ViewId) -> Result<Option<String>, EditorError> {
        let view = self.views.get(&id).ok_or(EditorError::UnknownView(id))?;
        let buffer = self
            .buffers
            .get(&view.buffer_id())
            .ok_or(EditorError::UnknownBuffer(view.buffer_id()))?;
        Ok(cursor::selected_text(view, buffer.text()))
    }

    // ==================== Intents ====================

    /// Applies an intent to a view and its buffer.
    ///
    /// Returns the lines whose content changed; cursor-only intents return
    /// [`DirtyLines::None`].
    pub fn apply(&mut self, view_id: ViewId, intent: EditIntent) -> Result<DirtyLines, EditorError> {
        let Some(view) = self.views.get_mut(&view_id) else {
            warn!(view = %view_id, ?intent, "edit intent for unknown view");
            return Err(EditorError::UnknownView(view_id));
        };
        let buffer_id = view.buffer_id();
        let Some(buffer) = self.buffers.get_mut(&buffer_id) else {
            warn!(view = %view_id, buffer = %buffer_id, ?intent, "edit intent for unknown buffer");
            return Err(EditorError::UnknownBuffer(buffer_id));
        };

        let edit = match intent {
            EditIntent::InsertChar(ch) => cursor::insert_char(view, buffer, ch)?,
            EditIntent::DeleteBackward => cursor::delete_backward(view, buffer)?,
            EditIntent::DeleteForward => cursor::delete_forward(view, buffer)?,
            EditIntent::RemoveSelection => cursor::remove_selection(view, buffer)?,
            EditIntent::DeleteAt(offset) => {
                let (_, dirty) = buffer.remove_char(offset)?;
                let edit = Edit {
                    start: offset,
                    removed: 1,
                    inserted: 0,
                    dirty,
                };
                // Not a cursor edit, so the acting view shifts like the rest.
                cursor::shift_view(view, buffer.text(), &edit)?;
                Some(edit)
            }
            EditIntent::SetCursor(offset) => {
                cursor::set_cursor(view, buffer.text(), offset)?;
                None
            }
            EditIntent::SetSelection(offset) => {
                cursor::set_selection(view, buffer.text(), offset)?;
                None
            }
            EditIntent::Move { motion, extend } => {
                cursor::apply_motion(view, buffer.text(), motion)?;
                if !extend {
                    view.collapse_selection();
                }
                None
            }
            EditIntent::SelectAll => {
                cursor::select_all(view, buffer.text())?;
                None
            }
        };

        let Some(edit) = edit else {
            return Ok(DirtyLines::None);
        };
        self.shift_other_views(view_id, buffer_id, &edit)?;
        Ok(edit.dirty)
    }

    fn shift_other_views(
        &mut self,
        view_id: ViewId,
        buffer_id: BufferId,
        edit: &Edit,
    ) -> Result<(), EditorError> {
        let buffer = self
            .buffers
            .get(&buffer_id)
            .ok_or(EditorError::UnknownBuffer(buffer_id))?;

        for view in self
            .views
            .values_mut()
            .filter(|view| view.id() != view_id && view.buffer_id() == buffer_id)
        {
            cursor::shift_view(view, buffer.text(), edit)?;
        }
        Ok(())
    }

    fn allocate_buffer_id(&mut self) -> BufferId {
        let id = BufferId(self.next_buffer_id);
        self.next_buffer_id += 1;
        id
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::with_valid_config(EditorConfig::default())
    }
}
