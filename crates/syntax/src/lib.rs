// Chunk: docs/chunks/c_family_lexer - Finite-state span classification for C-family sources

//! gapline-syntax: span classification for the gapline editing core.
//!
//! The crate lexes a whole character slice into contiguous, classified spans.
//! There is no parse tree and no incremental state: callers re-lex after an
//! edit, which keeps the lexer a pure function of its input.
//!
//! # Overview
//!
//! The main types are:
//!
//! - [`Lexer`]: An explicit state machine over `char`s producing [`Span`]s.
//!
//! - [`LanguageRegistry`]: Maps file extensions to a [`Language`], which picks
//!   the keyword and type tables.
//!
//! # Example
//!
//! ```
//! use gapline_syntax::{LanguageRegistry, Lexer, TokenKind};
//! use std::path::Path;
//!
//! let registry = LanguageRegistry::new();
//! let language = registry.language_for_path(Path::new("main.c"));
//!
//! let spans = Lexer::new(language).lex_str("#define N 4\n");
//! assert_eq!(spans[0].kind, TokenKind::Directive);
//! assert_eq!(spans[2].kind, TokenKind::Macro);
//! ```

mod keywords;
mod lexer;
mod registry;
mod token;

pub use lexer::Lexer;
pub use registry::{Language, LanguageRegistry};
pub use token::{Span, TokenKind};

/// Lexes `chars` with the tables for `language`.
pub fn lex(chars: &[char], language: Language) -> Vec<Span> {
    let spans = Lexer::new(language).lex(chars);
    tracing::trace!(
        language = language.name(),
        chars = chars.len(),
        spans = spans.len(),
        "lexed"
    );
    spans
}
