// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing
// Chunk: docs/chunks/crlf_line_table - Per-line length table with CR, LF and CRLF terminators

//! Line index for tracking line boundaries in the text buffer.
//!
//! The index is an ordered table of line lengths. Each length includes the
//! line's terminator; the last line never has one. A terminator is `\r\n`, a
//! lone `\r`, or a lone `\n`, so a CRLF pair counts as a single line break.
//!
//! The table is patched on every single-character insert or remove. The
//! patch only needs the characters on either side of the edit point to decide
//! whether line breaks were created, destroyed, or merged into a CRLF pair.

/// Tracks line boundaries in a text buffer as a table of line lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Length of each line, terminator included. Never empty.
    lengths: Vec<usize>,
}

impl LineIndex {
    /// Creates a new line index with a single empty line.
    pub fn new() -> Self {
        Self { lengths: vec![0] }
    }

    /// Rebuilds the index from the given content in one pass.
    ///
    /// Used for bulk loads and as the reference the incremental updates are
    /// checked against.
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.lengths.clear();

        let mut current = 0;
        let mut pending_cr = false;
        for ch in content {
            if pending_cr {
                pending_cr = false;
                if ch == '\n' {
                    // Second half of a CRLF.
                    self.lengths.push(current + 1);
                    current = 0;
                    continue;
                }
                self.lengths.push(current);
                current = 0;
            }

            current += 1;
            match ch {
                '\r' => pending_cr = true,
                '\n' => {
                    self.lengths.push(current);
                    current = 0;
                }
                _ => {}
            }
        }

        // A trailing lone CR still terminates its line.
        if pending_cr {
            self.lengths.push(current);
            current = 0;
        }
        self.lengths.push(current);
    }

    /// Returns the number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.lengths.len()
    }

    /// Returns the length of `line` including its terminator.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.lengths.get(line).copied()
    }

    /// Returns the sum of all line lengths.
    pub fn total_len(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// Returns the offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line >= self.lengths.len() {
            return None;
        }
        Some(self.lengths[..line].iter().sum())
    }

    /// Returns the line containing `offset`.
    ///
    /// Offsets at or past the end of the text belong to the last line, which
    /// is also where an insertion at the end lands.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        self.locate(offset).0
    }

    /// Returns `(line, line_start)` for the line containing `offset`.
    fn locate(&self, offset: usize) -> (usize, usize) {
        let last = self.lengths.len() - 1;
        let mut start = 0;
        for (line, &len) in self.lengths[..last].iter().enumerate() {
            if offset < start + len {
                return (line, start);
            }
            start += len;
        }
        (last, start)
    }

    /// Splits `line` so that it keeps `keep` characters and the rest, plus
    /// one inserted character, moves to a new following line.
    fn split(&mut self, line: usize, keep: usize) {
        let old = self.lengths[line];
        self.lengths[line] = keep;
        self.lengths.insert(line + 1, old + 1 - keep);
    }

    /// Merges `line + 1` into `line`.
    fn merge_with_next(&mut self, line: usize) {
        let next = self.lengths.remove(line + 1);
        self.lengths[line] += next;
    }

    /// Updates the table after `ch` was inserted at `offset`.
    ///
    /// `prev` and `next` are the characters that now surround the inserted
    /// one (`None` at the buffer edges).
    pub fn on_insert(&mut self, offset: usize, ch: char, prev: Option<char>, next: Option<char>) {
        let (line, start) = self.locate(offset);
        let rel = offset - start;
        let after_cr = prev == Some('\r');
        let before_lf = next == Some('\n');

        match ch {
            // A lone CR ended the previous line; this LF completes the pair.
            '\n' if after_cr && !before_lf => self.lengths[line - 1] += 1,
            // A lone LF follows; this CR completes the pair.
            '\r' if before_lf && !after_cr => self.lengths[line] += 1,
            // Wedged into an existing CRLF: the CR now ends this line and the
            // new character starts the next one.
            _ if after_cr && before_lf && ch != '\n' => self.split(line, rel),
            '\r' | '\n' => self.split(line, rel + 1),
            _ => self.lengths[line] += 1,
        }
    }

    /// Updates the table after `removed` was deleted from `offset`.
    ///
    /// `prev` and `next` are the characters that surrounded the removed one
    /// and are now adjacent.
    pub fn on_remove(
        &mut self,
        offset: usize,
        removed: char,
        prev: Option<char>,
        next: Option<char>,
    ) {
        let (line, _) = self.locate(offset);
        let after_cr = prev == Some('\r');
        let before_lf = next == Some('\n');

        // A CR and an LF that were kept apart become a CRLF: the line that
        // started with the removed character folds into the CR's line.
        if after_cr && before_lf && removed != '\n' {
            self.lengths[line] -= 1;
            self.merge_with_next(line - 1);
            return;
        }

        self.lengths[line] -= 1;
        match removed {
            // Half of a CRLF went away; the other half still ends the line.
            '\n' if after_cr => {
                if before_lf {
                    self.merge_with_next(line);
                }
            }
            '\r' if before_lf => {}
            '\r' | '\n' => self.merge_with_next(line),
            _ => {}
        }
    }

    /// Returns the raw length table (for debug validation and tests).
    #[cfg(any(debug_assertions, test))]
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(text: &str) -> LineIndex {
        let mut index = LineIndex::new();
        index.rebuild(text.chars());
        index
    }

    #[test]
    fn test_new() {
        let index = LineIndex::new();
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_start(0), Some(0));
        assert_eq!(index.line_len(0), Some(0));
    }

    #[test]
    fn test_rebuild_mixed_terminators() {
        let index = index("a\nbb\r\nccc\rd");
        assert_eq!(index.lengths(), &[2, 4, 4, 1]);
    }

    #[test]
    fn test_rebuild_trailing_terminators() {
        assert_eq!(index("x\n").lengths(), &[2, 0]);
        assert_eq!(index("x\r").lengths(), &[2, 0]);
        assert_eq!(index("x\r\n").lengths(), &[3, 0]);
        assert_eq!(index("\n\r").lengths(), &[1, 1, 0]);
    }

    #[test]
    fn test_line_start_and_at_offset() {
        let index = index("hello\nworld\r\nfoo");
        assert_eq!(index.line_start(1), Some(6));
        assert_eq!(index.line_start(2), Some(13));
        assert_eq!(index.line_start(3), None);

        assert_eq!(index.line_at_offset(5), 0);
        assert_eq!(index.line_at_offset(6), 1);
        assert_eq!(index.line_at_offset(12), 1);
        assert_eq!(index.line_at_offset(13), 2);
        assert_eq!(index.line_at_offset(16), 2);
        assert_eq!(index.line_at_offset(99), 2);
    }

    #[test]
    fn test_insert_plain_char_grows_line() {
        let mut index = index("ab\ncd");
        index.on_insert(4, 'x', Some('c'), Some('d'));
        assert_eq!(index.lengths(), &[3, 3]);
    }

    #[test]
    fn test_insert_newline_splits_line() {
        // "helloworld" -> "hello\nworld"
        let mut index = index("helloworld");
        index.on_insert(5, '\n', Some('o'), Some('w'));
        assert_eq!(index.lengths(), &[6, 5]);
    }

    #[test]
    fn test_cr_then_lf_makes_one_line_break() {
        // "ab" -> "a\rb" -> "a\r\nb"
        let mut index = index("ab");
        index.on_insert(1, '\r', Some('a'), Some('b'));
        assert_eq!(index.lengths(), &[2, 1]);
        index.on_insert(2, '\n', Some('\r'), Some('b'));
        assert_eq!(index.lengths(), &[3, 1]);
    }

    #[test]
    fn test_cr_before_lone_lf_joins_it() {
        // "a\nb" -> "a\r\nb"
        let mut index = index("a\nb");
        index.on_insert(1, '\r', Some('a'), Some('\n'));
        assert_eq!(index.lengths(), &[3, 1]);
    }

    #[test]
    fn test_char_inside_crlf_splits_pair() {
        // "a\r\nb" -> "a\rx\nb"
        let mut index = index("a\r\nb");
        index.on_insert(2, 'x', Some('\r'), Some('\n'));
        assert_eq!(index.lengths(), &[2, 2, 1]);
    }

    #[test]
    fn test_remove_lf_of_crlf_keeps_line_count() {
        // "a\r\nb" -> "a\rb"
        let mut index = index("a\r\nb");
        index.on_remove(2, '\n', Some('\r'), Some('b'));
        assert_eq!(index.lengths(), &[2, 1]);
    }

    #[test]
    fn test_remove_lone_newline_merges_lines() {
        // "ab\ncd" -> "abcd"
        let mut index = index("ab\ncd");
        index.on_remove(2, '\n', Some('b'), Some('c'));
        assert_eq!(index.lengths(), &[4]);
    }

    #[test]
    fn test_remove_between_cr_and_lf_forms_pair() {
        // "a\rx\nb" -> "a\r\nb"
        let mut index = index("a\rx\nb");
        index.on_remove(2, 'x', Some('\r'), Some('\n'));
        assert_eq!(index.lengths(), &[3, 1]);
    }
}
