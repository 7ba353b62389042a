// Chunk: docs/chunks/c_family_lexer - Span kinds produced by the lexer

/// Classification of a span of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Type,
    StringLiteral,
    CharLiteral,
    NumberLiteral,
    LineComment,
    BlockComment,
    /// `#` plus the directive name, or a whole directive line for directives
    /// without a sub-grammar.
    Directive,
    /// The name introduced by `#define`.
    Macro,
    Operator,
    /// Blanks within a line (spaces, tabs, form feeds).
    Whitespace,
    /// One line terminator: `\n`, `\r`, or `\r\n`.
    Newline,
    Unknown,
}

impl TokenKind {
    /// Returns true for both comment kinds.
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Returns true for kinds that carry no visible text.
    pub fn is_blank(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }
}

/// A classified run of characters: `[start, start + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub kind: TokenKind,
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn new(kind: TokenKind, start: usize, len: usize) -> Self {
        Self { kind, start, len }
    }

    /// Offset one past the last character of the span.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Returns true if `offset` falls inside the span.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups() {
        assert!(TokenKind::LineComment.is_comment());
        assert!(TokenKind::BlockComment.is_comment());
        assert!(!TokenKind::Directive.is_comment());

        assert!(TokenKind::Whitespace.is_blank());
        assert!(TokenKind::Newline.is_blank());
        assert!(!TokenKind::Operator.is_blank());
    }

    #[test]
    fn test_span_contains_is_half_open() {
        let span = Span::new(TokenKind::Identifier, 3, 2);
        assert_eq!(span.end(), 5);
        assert!(!span.contains(2));
        assert!(span.contains(3));
        assert!(span.contains(4));
        assert!(!span.contains(5));
    }
}
