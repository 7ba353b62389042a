// Chunk: docs/chunks/c_family_lexer - Finite-state scanner for C-family span classification

//! Finite-state lexer producing classified spans for a whole buffer.
//!
//! The scanner walks the character slice once. Every state is a value of
//! [`State`] and every step goes through [`Scan::transition`], which looks at
//! the current state and character and returns a [`Transition`]. Nothing is
//! driven by nested calls, so the scanner can be suspended or inspected at any
//! character.
//!
//! The output covers the input exactly: spans are contiguous, start at 0 and
//! end at the input length. Unterminated strings stop at the end of their
//! physical line; unterminated block comments run to the end of the input.
//!
//! Preprocessor directives are recognised only at statement start (nothing but
//! blanks and block comments since the last line break that was not escaped
//! with `\`). Two directives have a sub-grammar:
//!
//! - `#define NAME`: `NAME` is a [`TokenKind::Macro`] span.
//! - `#include "path"` / `#include <path>`: the delimited path is a
//!   [`TokenKind::StringLiteral`] span.
//!
//! Every other directive is a single [`TokenKind::Directive`] span up to the
//! end of its logical line or the start of a comment.

use crate::registry::Language;
use crate::token::{Span, TokenKind};

/// Scanner states. Each span is produced by exactly one excursion from
/// `Normal` back to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between spans.
    Normal,
    Whitespace,
    /// Saw `\r`; a following `\n` belongs to the same terminator.
    CarriageReturn,
    /// Saw `/`; may open a comment.
    Slash,
    /// Saw `.`; may open a number such as `.5`.
    Dot,
    Identifier,
    Number,
    LineComment { escaped: bool },
    BlockComment { prev_star: bool },
    StringLiteral,
    StringEscaped,
    CharLiteral,
    CharEscaped,
    /// Saw `#` at statement start; skipping blanks before the name.
    DirectiveHash,
    DirectiveName,
    /// Rest of a directive without a sub-grammar.
    DirectiveBody { escaped: bool },
    /// `#include` path delimited by `"` or `<`.
    IncludePath { close: char },
}

/// Result of feeding one character to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// The character belongs to the current span; continue in the given state.
    Consume(State),
    /// Change state without consuming; the character is fed again.
    Switch(State),
    /// The current span ends before this character.
    Finish(TokenKind),
    /// The current span ends with this character.
    FinishAfter(TokenKind),
}

/// What the directive grammar expects next on the current logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Nothing,
    MacroName,
    IncludePath,
}

/// Classifies a character sequence into spans for one language.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexer {
    language: Language,
}

impl Lexer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Lexes the whole input and returns its spans in order.
    pub fn lex(&self, chars: &[char]) -> Vec<Span> {
        Scan::new(chars, self.language).run()
    }

    /// Convenience wrapper around [`Lexer::lex`] for string input.
    pub fn lex_str(&self, text: &str) -> Vec<Span> {
        let chars: Vec<char> = text.chars().collect();
        self.lex(&chars)
    }
}

/// State of one pass over the input.
struct Scan<'a> {
    chars: &'a [char],
    language: Language,
    at_statement_start: bool,
    expect: Expect,
    spans: Vec<Span>,
}

impl<'a> Scan<'a> {
    fn new(chars: &'a [char], language: Language) -> Self {
        Self {
            chars,
            language,
            at_statement_start: true,
            expect: Expect::Nothing,
            spans: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Span> {
        let len = self.chars.len();
        let mut state = State::Normal;
        let mut start = 0;
        let mut i = 0;

        while i < len {
            match self.transition(state, start, i) {
                Transition::Consume(next) => {
                    state = next;
                    i += 1;
                }
                Transition::Switch(next) => state = next,
                Transition::Finish(kind) => {
                    debug_assert!(i > start, "empty span in state {:?}", state);
                    self.emit(kind, start, i);
                    start = i;
                    state = State::Normal;
                }
                Transition::FinishAfter(kind) => {
                    i += 1;
                    self.emit(kind, start, i);
                    start = i;
                    state = State::Normal;
                }
            }
        }

        if start < len {
            let kind = self.end_of_input_kind(state, start);
            self.emit(kind, start, len);
        }
        self.spans
    }

    fn peek(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }

    fn transition(&mut self, state: State, start: usize, i: usize) -> Transition {
        use Transition::*;

        let ch = self.chars[i];
        let next = self.peek(i + 1);

        match state {
            State::Normal => self.start_span(ch),

            State::Whitespace if is_blank(ch) => Consume(State::Whitespace),
            State::Whitespace => Finish(TokenKind::Whitespace),

            State::CarriageReturn if ch == '\n' => FinishAfter(TokenKind::Newline),
            State::CarriageReturn => Finish(TokenKind::Newline),

            State::Slash => match ch {
                '/' => Consume(State::LineComment { escaped: false }),
                // The opening star cannot also close the comment.
                '*' => Consume(State::BlockComment { prev_star: false }),
                _ => Finish(TokenKind::Operator),
            },

            State::Dot if ch.is_ascii_digit() => Consume(State::Number),
            State::Dot => Finish(TokenKind::Operator),

            State::Identifier if is_ident_continue(ch) => Consume(State::Identifier),
            State::Identifier => Finish(self.word_kind(start, i)),

            State::Number => {
                let continues = ch.is_ascii_alphanumeric()
                    || ch == '_'
                    || ch == '.'
                    // Digit separator, as in 1'000'000.
                    || (ch == '\'' && next.is_some_and(|n| n.is_ascii_alphanumeric()))
                    || (matches!(ch, '+' | '-') && self.after_exponent(start, i));
                if continues {
                    Consume(State::Number)
                } else {
                    Finish(TokenKind::NumberLiteral)
                }
            }

            State::LineComment { escaped } => match ch {
                '\r' if escaped => Consume(State::LineComment {
                    escaped: next == Some('\n'),
                }),
                '\n' if escaped => Consume(State::LineComment { escaped: false }),
                '\r' | '\n' => Finish(TokenKind::LineComment),
                '\\' => Consume(State::LineComment { escaped: true }),
                _ => Consume(State::LineComment { escaped: false }),
            },

            State::BlockComment { prev_star } => match ch {
                '/' if prev_star => FinishAfter(TokenKind::BlockComment),
                '*' => Consume(State::BlockComment { prev_star: true }),
                _ => Consume(State::BlockComment { prev_star: false }),
            },

            State::StringLiteral => match ch {
                '\\' => Consume(State::StringEscaped),
                '"' => FinishAfter(TokenKind::StringLiteral),
                '\r' | '\n' => Finish(TokenKind::StringLiteral),
                _ => Consume(State::StringLiteral),
            },
            // A CRLF after the backslash is one escaped character.
            State::StringEscaped if ch == '\r' && next == Some('\n') => {
                Consume(State::StringEscaped)
            }
            State::StringEscaped => Consume(State::StringLiteral),

            State::CharLiteral => match ch {
                '\\' => Consume(State::CharEscaped),
                '\'' => FinishAfter(TokenKind::CharLiteral),
                '\r' | '\n' => Finish(TokenKind::CharLiteral),
                _ => Consume(State::CharLiteral),
            },
            State::CharEscaped if ch == '\r' && next == Some('\n') => Consume(State::CharEscaped),
            State::CharEscaped => Consume(State::CharLiteral),

            State::DirectiveHash if is_blank(ch) => Consume(State::DirectiveHash),
            State::DirectiveHash if is_ident_start(ch) => Consume(State::DirectiveName),
            // Null directive (`#` alone) or a line marker such as `# 12 "file.c"`.
            State::DirectiveHash => Finish(TokenKind::Directive),

            State::DirectiveName if is_ident_continue(ch) => Consume(State::DirectiveName),
            State::DirectiveName => self.finish_directive_name(start, i),

            State::DirectiveBody { escaped } => match ch {
                '\r' if escaped => Consume(State::DirectiveBody {
                    escaped: next == Some('\n'),
                }),
                '\n' if escaped => Consume(State::DirectiveBody { escaped: false }),
                '\r' | '\n' => Finish(TokenKind::Directive),
                '/' if matches!(next, Some('/') | Some('*')) => Finish(TokenKind::Directive),
                '\\' => Consume(State::DirectiveBody { escaped: true }),
                _ => Consume(State::DirectiveBody { escaped: false }),
            },

            State::IncludePath { close } if ch == close => FinishAfter(TokenKind::StringLiteral),
            State::IncludePath { .. } if matches!(ch, '\r' | '\n') => {
                Finish(TokenKind::StringLiteral)
            }
            State::IncludePath { close } => Consume(State::IncludePath { close }),
        }
    }

    /// First character of a new span.
    fn start_span(&self, ch: char) -> Transition {
        use Transition::*;

        match ch {
            '\n' => FinishAfter(TokenKind::Newline),
            '\r' => Consume(State::CarriageReturn),
            c if is_blank(c) => Consume(State::Whitespace),
            '/' => Consume(State::Slash),
            '"' | '<' if self.expect == Expect::IncludePath => Consume(State::IncludePath {
                close: if ch == '<' { '>' } else { '"' },
            }),
            '"' => Consume(State::StringLiteral),
            '\'' => Consume(State::CharLiteral),
            '#' if self.at_statement_start => Consume(State::DirectiveHash),
            '.' => Consume(State::Dot),
            c if c.is_ascii_digit() => Consume(State::Number),
            c if is_ident_start(c) => Consume(State::Identifier),
            c if c.is_ascii_punctuation() => FinishAfter(TokenKind::Operator),
            _ => FinishAfter(TokenKind::Unknown),
        }
    }

    /// Ends the `#name` span and arms the sub-grammar for the directive.
    fn finish_directive_name(&mut self, start: usize, end: usize) -> Transition {
        let name: String = self.chars[start..end]
            .iter()
            .skip(1)
            .skip_while(|c| is_blank(**c))
            .collect();

        match name.as_str() {
            "define" => {
                self.expect = Expect::MacroName;
                Transition::Finish(TokenKind::Directive)
            }
            "include" | "include_next" | "import" => {
                self.expect = Expect::IncludePath;
                Transition::Finish(TokenKind::Directive)
            }
            _ => Transition::Switch(State::DirectiveBody { escaped: false }),
        }
    }

    fn word_kind(&self, start: usize, end: usize) -> TokenKind {
        if self.expect == Expect::MacroName {
            return TokenKind::Macro;
        }
        let word: String = self.chars[start..end].iter().collect();
        self.language.classify_word(&word)
    }

    /// True if the character before `i` is an exponent marker of the number
    /// starting at `start` (`e`/`E` for decimal, `p`/`P` for hex).
    fn after_exponent(&self, start: usize, i: usize) -> bool {
        let hex = matches!(
            (self.peek(start), self.peek(start + 1)),
            (Some('0'), Some('x' | 'X'))
        );
        match self.chars[i - 1] {
            'e' | 'E' => !hex,
            'p' | 'P' => hex,
            _ => false,
        }
    }

    /// True for a lone `\` directly followed by a line terminator.
    fn is_line_splice(&self, start: usize, end: usize) -> bool {
        end == start + 1
            && self.chars[start] == '\\'
            && matches!(self.peek(end), Some('\r' | '\n'))
    }

    fn end_of_input_kind(&self, state: State, start: usize) -> TokenKind {
        match state {
            State::Normal => TokenKind::Unknown,
            State::Whitespace => TokenKind::Whitespace,
            State::CarriageReturn => TokenKind::Newline,
            State::Slash | State::Dot => TokenKind::Operator,
            State::Identifier => self.word_kind(start, self.chars.len()),
            State::Number => TokenKind::NumberLiteral,
            State::LineComment { .. } => TokenKind::LineComment,
            State::BlockComment { .. } => TokenKind::BlockComment,
            State::StringLiteral | State::StringEscaped => TokenKind::StringLiteral,
            State::CharLiteral | State::CharEscaped => TokenKind::CharLiteral,
            State::DirectiveHash | State::DirectiveName | State::DirectiveBody { .. } => {
                TokenKind::Directive
            }
            State::IncludePath { .. } => TokenKind::StringLiteral,
        }
    }

    /// Records a span and updates the line context it affects.
    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.spans.push(Span::new(kind, start, end - start));

        match kind {
            TokenKind::Newline => {
                // `\` right before the terminator splices the next line onto
                // this one, so the directive (if any) keeps going.
                let spliced = start > 0 && self.chars[start - 1] == '\\';
                if !spliced {
                    self.at_statement_start = true;
                    self.expect = Expect::Nothing;
                }
            }
            TokenKind::Whitespace | TokenKind::BlockComment => {}
            // The sub-grammar expectation was set when the name ended.
            TokenKind::Directive => self.at_statement_start = false,
            // A splicing `\` leaves the logical line as it was.
            TokenKind::Operator if self.is_line_splice(start, end) => {}
            _ => {
                self.at_statement_start = false;
                self.expect = Expect::Nothing;
            }
        }
    }
}

fn is_blank(ch: char) -> bool {
    ch != '\n' && ch != '\r' && ch.is_whitespace()
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}
