// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for EasyCode source code.
//!
//! This module contains the keyword automaton, lexer, parser, and their
//! shared location types.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s. Each
//! token carries its source location via [`Span`]; a [`SourceMap`]
//! converts spans into line/column [`Position`]s for display. Reserved
//! words are recognized by a static finite-state machine
//! ([`keyword_kind`]).
//!
//! ```
//! use easycode_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("x + 1").collect();
//! assert_eq!(tokens.len(), 3); // x, +, 1
//! ```
//!
//! # Parsing
//!
//! The [`parse`] function converts tokens into a
//! [`Program`](crate::ast::Program) AST by recursive descent with
//! precedence climbing for expressions (see the [`parser`] module docs).
//!
//! # Error Handling
//!
//! Both passes recover from every error. The lexer pairs each recovered
//! [`LexError`] with a best-effort or [`TokenKind::Error`] token; the
//! parser records [`Diagnostic`]s and resynchronizes at statement
//! boundaries, always producing a structurally complete tree. Callers
//! inspect the returned error lists to decide whether the output is
//! trustworthy.

mod error;
mod keywords;
mod lexer;
mod parser;
mod span;
mod token;


pub use error::{LexError, LexErrorKind};
pub use keywords::keyword_kind;
pub use lexer::{Lexer, lex, lex_with_eof};
pub use parser::{Diagnostic, Severity, parse};
pub use span::{Position, SourceMap, Span};
pub use token::{Token, TokenKind};
