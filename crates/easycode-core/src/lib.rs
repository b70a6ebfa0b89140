// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! EasyCode front end.
//!
//! This crate contains the front end for EasyCode, a small imperative
//! teaching language:
//! - Lexical analysis (tokenization, keyword automaton)
//! - Parsing (AST construction with panic-mode error recovery)
//!
//! Both passes tolerate malformed input: the lexer pairs every error
//! with a best-effort token, and the parser resynchronizes at statement
//! boundaries, so callers always receive a structurally complete token
//! sequence and tree together with the list of problems found.
//!
//! ```
//! use easycode_core::source_analysis::{lex_with_eof, parse};
//!
//! let (tokens, lex_errors) = lex_with_eof("start show(2 + 3); end");
//! let (program, diagnostics) = parse(tokens);
//!
//! assert!(lex_errors.is_empty());
//! assert!(diagnostics.is_empty());
//! assert_eq!(program.body.len(), 1);
//! ```

pub mod ast;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Expression, Identifier, Literal, Program, Statement};
    pub use crate::source_analysis::{Span, Token, TokenKind};
}
