// Chunk: docs/chunks/c_family_lexer - Language registry keyed by file extension

//! Language registry mapping file extensions to keyword/type tables.
//!
//! The loader hands the core a path alongside the bytes; the path's extension
//! is the only thing used to pick a [`Language`]. Unknown or missing
//! extensions fall back to [`Language::Plain`], which lexes with the same
//! state machine but has no keywords or types.

use std::collections::HashMap;
use std::path::Path;

use crate::keywords::{self, C_KEYWORDS, CPP_KEYWORDS, C_TYPES};
use crate::token::TokenKind;

/// Languages the lexer knows keyword tables for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    C,
    Cpp,
    #[default]
    Plain,
}

impl Language {
    /// Human-readable name, e.g. for a status bar.
    pub fn name(self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Plain => "Plain Text",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Language::C => C_KEYWORDS,
            Language::Cpp => CPP_KEYWORDS,
            Language::Plain => &[],
        }
    }

    fn types(self) -> &'static [&'static str] {
        match self {
            Language::C | Language::Cpp => C_TYPES,
            Language::Plain => &[],
        }
    }

    /// Classifies a complete identifier as `Keyword`, `Type` or `Identifier`.
    pub fn classify_word(self, word: &str) -> TokenKind {
        if keywords::contains(self.keywords(), word) {
            TokenKind::Keyword
        } else if keywords::contains(self.types(), word) {
            TokenKind::Type
        } else {
            TokenKind::Identifier
        }
    }
}

/// Registry mapping file extensions to languages.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    /// Map from extension (without leading dot) to language
    languages: HashMap<&'static str, Language>,
}

impl LanguageRegistry {
    /// Creates a new language registry with all supported extensions.
    pub fn new() -> Self {
        let mut languages = HashMap::new();

        languages.insert("c", Language::C);

        // .h is ambiguous; C++ is a superset of the C keyword set, so default to it.
        for ext in ["h", "cc", "cpp", "cxx", "c++", "hh", "hpp", "hxx", "inl", "ipp"] {
            languages.insert(ext, Language::Cpp);
        }

        Self { languages }
    }

    /// Returns the language for an extension (without leading dot).
    ///
    /// Extensions are matched case-insensitively (`FOO.CPP` is C++).
    pub fn language_for_extension(&self, ext: &str) -> Option<Language> {
        self.languages
            .get(ext)
            .or_else(|| self.languages.get(ext.to_ascii_lowercase().as_str()))
            .copied()
    }

    /// Returns the language for a file path, falling back to plain text.
    pub fn language_for_path(&self, path: &Path) -> Language {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.language_for_extension(ext))
            .unwrap_or_default()
    }

    /// Returns all registered extensions.
    pub fn extensions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.languages.keys().copied()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
