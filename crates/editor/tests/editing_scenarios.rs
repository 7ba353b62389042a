// Chunk: docs/chunks/editor_context - Buffers and views owned by an explicit context
// Chunk: docs/chunks/cursor_model - Offset-based cursor motions and edits

//! End-to-end scenarios driving the core the way a host would: bytes in,
//! intents applied, cursor state and spans read back.

use gapline_editor::{
    BufferId, Direction, DirtyLines, EditIntent, EditorConfig, EditorContext, Motion, TokenKind,
    ViewId,
};

fn open(content: &str, path: &str) -> (EditorContext, BufferId, ViewId) {
    let mut ctx = EditorContext::default();
    let buffer = ctx.open_buffer(path, content.as_bytes());
    let view = ctx.open_view(buffer).unwrap();
    (ctx, buffer, view)
}

fn go(motion: Motion) -> EditIntent {
    EditIntent::Move {
        motion,
        extend: false,
    }
}

#[test]
fn test_vertical_motion_through_short_and_empty_lines() {
    let (mut ctx, _, view) = open("abcdef\n\nxy", "notes.txt");
    ctx.apply(view, EditIntent::SetCursor(5)).unwrap();

    ctx.apply(view, go(Motion::Vertical(1))).unwrap();
    let v = ctx.view(view).unwrap();
    assert_eq!((v.cursor(), v.current_line(), v.current_column()), (7, 1, 0));
    assert_eq!(v.desired_column(), 5);

    ctx.apply(view, go(Motion::Vertical(1))).unwrap();
    let v = ctx.view(view).unwrap();
    assert_eq!((v.cursor(), v.current_line(), v.current_column()), (10, 2, 2));
    assert_eq!(v.desired_column(), 5);

    ctx.apply(view, go(Motion::Vertical(-2))).unwrap();
    assert_eq!(ctx.view(view).unwrap().cursor(), 5);
}

#[test]
fn test_selection_removal() {
    let (mut ctx, buffer, view) = open("hello world", "notes.txt");
    ctx.apply(view, EditIntent::SetCursor(0)).unwrap();
    ctx.apply(view, EditIntent::SetSelection(5)).unwrap();

    let dirty = ctx.apply(view, EditIntent::RemoveSelection).unwrap();
    assert_eq!(dirty, DirtyLines::Single(0));
    assert_eq!(ctx.buffer(buffer).unwrap().text().content(), " world");

    let v = ctx.view(view).unwrap();
    assert_eq!((v.cursor(), v.selection()), (0, 0));
    assert!(ctx.buffer(buffer).unwrap().is_dirty());
}

#[test]
fn test_define_line_spans() {
    let (mut ctx, buffer, _) = open("#define FOO(x) x\n", "macros.h");
    let kinds: Vec<TokenKind> = ctx.spans(buffer).unwrap().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Directive,
            TokenKind::Whitespace,
            TokenKind::Macro,
            TokenKind::Operator,
            TokenKind::Identifier,
            TokenKind::Operator,
            TokenKind::Whitespace,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn test_typed_include_path_is_a_string() {
    let (mut ctx, buffer, view) = open("", "main.c");
    for ch in "#include <a.h>".chars() {
        ctx.apply(view, EditIntent::InsertChar(ch)).unwrap();
    }

    let spans = ctx.spans(buffer).unwrap().to_vec();
    let text = ctx.buffer(buffer).unwrap().text().content();
    let path = spans
        .iter()
        .find(|s| s.kind == TokenKind::StringLiteral)
        .map(|s| &text[s.start..s.end()]);
    assert_eq!(path, Some("<a.h>"));
}

#[test]
fn test_crlf_file_editing() {
    let (mut ctx, buffer, view) = open("one\r\ntwo\r\nthree", "crlf.c");
    assert_eq!(ctx.buffer(buffer).unwrap().text().line_count(), 3);

    // Walk right across the first terminator: it is one step.
    ctx.apply(view, go(Motion::LineEnd)).unwrap();
    ctx.apply(view, go(Motion::Horizontal(Direction::Forward)))
        .unwrap();
    let v = ctx.view(view).unwrap();
    assert_eq!((v.cursor(), v.current_line()), (5, 1));

    // Joining lines removes the whole CRLF.
    ctx.apply(view, EditIntent::DeleteBackward).unwrap();
    let text = ctx.buffer(buffer).unwrap().text();
    assert_eq!(text.content(), "onetwo\r\nthree");
    assert_eq!(text.line_count(), 2);
    assert_eq!(ctx.view(view).unwrap().cursor(), 3);
}

#[test]
fn test_two_views_follow_each_others_edits() {
    let (mut ctx, buffer, writer) = open("int a;\nint b;\n", "two.c");
    let reader = ctx.open_view(buffer).unwrap();

    ctx.apply(reader, EditIntent::SetCursor(11)).unwrap();
    let before = ctx.view(reader).unwrap().clone();
    assert_eq!((before.current_line(), before.current_column()), (1, 4));

    ctx.apply(writer, go(Motion::BufferStart)).unwrap();
    for ch in "// header\n".chars() {
        ctx.apply(writer, EditIntent::InsertChar(ch)).unwrap();
    }

    let after = ctx.view(reader).unwrap();
    assert_eq!(after.cursor(), 21);
    assert_eq!((after.current_line(), after.current_column()), (2, 4));
    assert_eq!(ctx.buffer(buffer).unwrap().text().char_at(after.cursor()), Some('b'));
}

#[test]
fn test_select_all_then_type_replaces_everything() {
    let (mut ctx, buffer, view) = open("old\ncontent", "notes.txt");
    ctx.apply(view, EditIntent::SelectAll).unwrap();
    assert_eq!(
        ctx.selected_text(view).unwrap().as_deref(),
        Some("old\ncontent")
    );

    let dirty = ctx.apply(view, EditIntent::InsertChar('x')).unwrap();
    assert_eq!(dirty, DirtyLines::FromLineToEnd(0));
    assert_eq!(ctx.buffer(buffer).unwrap().text().content(), "x");
    assert_eq!(ctx.view(view).unwrap().cursor(), 1);
}

#[test]
fn test_config_from_json_drives_context() {
    let config = EditorConfig::from_json(r#"{ "tab_width": 2, "gap_reserve": 4 }"#).unwrap();
    let mut ctx = EditorContext::new(config).unwrap();
    let buffer = ctx.open_buffer("t.c", b"");
    let view = ctx.open_view(buffer).unwrap();

    // A small reserve forces repeated growth.
    for ch in "\t\tint deep = 1;".chars() {
        ctx.apply(view, EditIntent::InsertChar(ch)).unwrap();
    }
    assert_eq!(ctx.buffer(buffer).unwrap().text().content(), "\t\tint deep = 1;");
    assert_eq!(ctx.view(view).unwrap().current_column(), 17);
}

#[test]
fn test_word_motion_over_code() {
    let (mut ctx, _, view) = open("if (ready_flag) go();", "w.c");
    let mut stops = Vec::new();
    for _ in 0..6 {
        ctx.apply(view, go(Motion::Word(Direction::Forward))).unwrap();
        stops.push(ctx.view(view).unwrap().cursor());
    }
    assert_eq!(stops, vec![2, 3, 14, 15, 18, 19]);
}
