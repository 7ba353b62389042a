// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing
// Chunk: docs/chunks/crlf_line_table - Per-line length table with CR, LF and CRLF terminators

//! Integration tests for realistic editing sequences.
//!
//! These tests verify that the gap buffer and line index stay in sync
//! through long, mixed editing patterns, including CR/LF churn.

use gapline_buffer::{LineIndex, Position, TextBuffer};

/// Small deterministic generator so failures reproduce exactly.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn line_lengths(buf: &TextBuffer) -> Vec<usize> {
    (0..buf.line_count())
        .map(|line| buf.line_len(line).unwrap())
        .collect()
}

fn rebuilt_lengths(buf: &TextBuffer) -> Vec<usize> {
    let mut index = LineIndex::new();
    index.rebuild(buf.chars());
    (0..index.line_count())
        .map(|line| index.line_len(line).unwrap())
        .collect()
}

#[test]
fn test_random_edits_keep_line_table_consistent() {
    let alphabet = ['a', 'b', ' ', '\r', '\n', '\t'];
    let mut rng = Lcg(0x5eed);
    let mut buf = TextBuffer::new();

    for step in 0..4000 {
        let remove = !buf.is_empty() && rng.below(3) == 0;
        if remove {
            let offset = rng.below(buf.len());
            buf.remove_char(offset).unwrap();
        } else {
            let offset = rng.below(buf.len() + 1);
            let ch = alphabet[rng.below(alphabet.len())];
            buf.insert_char(offset, ch).unwrap();
        }

        let lengths = line_lengths(&buf);
        assert_eq!(
            lengths.iter().sum::<usize>(),
            buf.len(),
            "length sum diverged at step {step}"
        );
        assert_eq!(
            lengths,
            rebuilt_lengths(&buf),
            "incremental table diverged at step {step}: {:?}",
            buf.content()
        );
    }
}

#[test]
fn test_every_offset_maps_into_its_line_range() {
    let buf = TextBuffer::from_str("int a;\r\n\r\n  b = 1;\rc\n\nend");
    for offset in 0..buf.len() {
        let line = buf.line_at_offset(offset).unwrap();
        let start = buf.line_start(line).unwrap();
        let end = start + buf.line_len(line).unwrap();
        assert!(start <= offset && offset < end, "offset {offset} line {line}");
    }
}

#[test]
fn test_cr_then_lf_typed_adds_one_line() {
    let mut buf = TextBuffer::from_str("first");
    let at = buf.len();
    buf.insert_char(at, '\r').unwrap();
    buf.insert_char(at + 1, '\n').unwrap();
    buf.insert_str(at + 2, "second").unwrap();

    assert_eq!(buf.line_count(), 2);
    assert_eq!(buf.line_content(0).unwrap(), "first");
    assert_eq!(buf.line_content(1).unwrap(), "second");
    assert_eq!(buf.terminator_len(0).unwrap(), 2);
}

#[test]
fn test_type_word_then_delete_entirely() {
    let mut buf = TextBuffer::new();
    buf.insert_str(0, "hello").unwrap();
    assert_eq!(buf.content(), "hello");

    for offset in (0..5).rev() {
        buf.remove_char(offset).unwrap();
    }
    assert!(buf.is_empty());
    assert_eq!(buf.line_count(), 1);
}

#[test]
fn test_split_and_rejoin_lines() {
    let mut buf = TextBuffer::from_str("helloworld");

    buf.insert_char(5, '\n').unwrap();
    assert_eq!(buf.line_count(), 2);
    assert_eq!(buf.line_content(0).unwrap(), "hello");
    assert_eq!(buf.line_content(1).unwrap(), "world");

    buf.remove_char(5).unwrap();
    assert_eq!(buf.line_count(), 1);
    assert_eq!(buf.content(), "helloworld");
}

#[test]
fn test_growth_does_not_corrupt_content() {
    let mut buf = TextBuffer::with_reserve(8);
    let mut expected = String::new();

    for i in 0..500 {
        let ch = char::from(b'a' + (i % 26) as u8);
        // Alternate between appending and inserting in the middle so the
        // gap is away from the end when storage grows.
        let at = if i % 2 == 0 { buf.len() } else { buf.len() / 2 };
        buf.insert_char(at, ch).unwrap();
        expected.insert(at, ch);
        assert_eq!(buf.content(), expected);
    }
}

#[test]
fn test_offsets_and_positions_agree() {
    let buf = TextBuffer::from_str("ab\r\ncd\nef");
    for offset in 0..=buf.len() {
        let pos = buf.offset_to_position(offset).unwrap();
        // Offsets inside a terminator clamp to the content end.
        let round_trip = buf.position_to_offset(pos).unwrap();
        assert!(round_trip <= offset);
    }
    assert_eq!(buf.offset_to_position(9).unwrap(), Position::new(2, 2));
}

#[test]
fn test_empty_line_operations() {
    let mut buf = TextBuffer::new();
    buf.insert_str(0, "first\n\n\nlast").unwrap();

    assert_eq!(buf.line_count(), 4);
    assert_eq!(buf.line_content(1).unwrap(), "");
    assert_eq!(buf.line_content(2).unwrap(), "");
    assert_eq!(buf.line_content(3).unwrap(), "last");

    let start = buf.line_start(2).unwrap();
    buf.insert_str(start, "middle").unwrap();
    assert_eq!(buf.line_content(2).unwrap(), "middle");
    assert_eq!(buf.content(), "first\n\nmiddle\nlast");
}
