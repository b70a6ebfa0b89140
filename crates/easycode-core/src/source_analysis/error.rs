// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for EasyCode lexical analysis.
//!
//! The lexer recovers from every error: each [`LexError`] is paired with a
//! best-effort or placeholder token in the output stream, so lexing never
//! stops early. Errors carry source locations ([`Span`]) and integrate
//! with [`miette`] for rendering.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// A lexical error encountered during tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character with no meaning in EasyCode.
    #[error("unrecognized character '{0}'")]
    UnexpectedCharacter(char),

    /// A `&` or `|` that is not part of `&&` / `||`.
    #[error("unexpected character '{0}' (did you mean '{0}{0}'?)")]
    UnexpectedOperatorChar(char),

    /// A string literal with no closing quote before end of input.
    #[error("missing closing quote for string literal")]
    UnterminatedString,

    /// A character literal cut off by a newline or end of input.
    #[error("unterminated character literal")]
    UnterminatedCharacter,

    /// A character literal with zero or more than one character.
    #[error("invalid character literal (expected exactly one character)")]
    InvalidCharacterLiteral,

    /// A number with more than one decimal point.
    #[error("invalid number format: multiple decimal points")]
    MalformedNumber,
}
