// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for EasyCode source code.
//!
//! This module converts source text into a stream of [`Token`]s. The lexer
//! is hand-written for maximum control over error recovery.
//!
//! # Design Principles
//!
//! - **Error recovery**: Never panic on malformed input; record a
//!   [`LexError`] and emit a best-effort or [`TokenKind::Error`] token
//! - **Single pass**: The cursor only moves forward
//! - **Precise spans**: Every token carries its exact source location
//!
//! # Example
//!
//! ```
//! use easycode_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("x + 1").collect();
//! assert_eq!(tokens.len(), 3); // x, +, 1 (EOF excluded from iterator)
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::keywords::keyword_kind;
use super::{LexError, LexErrorKind, Span, Token, TokenKind};

/// A lexer that tokenizes EasyCode source code.
///
/// The lexer produces tokens with their source spans and implements
/// [`Iterator`] for easy consumption. Whitespace and `#` line comments
/// are skipped without emitting tokens.
///
/// # Error Recovery
///
/// The lexer never fails completely. Malformed literals and unknown
/// characters record a [`LexError`] (retrievable via [`Lexer::into_errors`])
/// and produce a best-effort token, allowing the pass to continue.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Lexical errors recovered from so far.
    errors: Vec<LexError>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            errors: Vec::new(),
        }
    }

    /// Consumes the lexer and returns the errors it recovered from.
    #[must_use]
    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is the same as
    /// `peek_char`, n=1 returns the second character, and so on).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        let mut iter = self.chars.clone();
        for _ in 0..n {
            iter.next();
        }
        iter.next().map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Records a lexical error.
    fn error(&mut self, kind: LexErrorKind, span: Span) {
        self.errors.push(LexError::new(kind, span));
    }

    /// Skips whitespace, newlines, and `#` line comments.
    fn skip_blanks(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.advance();
                }
                Some('#') => {
                    self.advance_while(|c| c != '\n');
                }
                _ => break,
            }
        }
    }

    /// Lexes the next token. Always returns a token; [`TokenKind::Eof`]
    /// marks the end of input.
    fn lex_token(&mut self) -> Token {
        self.skip_blanks();
        let start = self.current_position();

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(c) => self.lex_token_kind(c, start),
        };

        Token::new(kind, self.span_from(start))
    }

    /// Lexes a token kind based on the first character.
    fn lex_token_kind(&mut self, c: char, start: u32) -> TokenKind {
        match c {
            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => self.lex_identifier_or_keyword(),

            // Numbers, including `.5` style decimals
            '0'..='9' => self.lex_number(start),
            '.' if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.lex_number(start)
            }

            // Literals with delimiters
            '"' => self.lex_string(start),
            '\'' => self.lex_character(start),

            // Single-character punctuation
            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            '{' => {
                self.advance();
                TokenKind::LeftBrace
            }
            '}' => {
                self.advance();
                TokenKind::RightBrace
            }
            '[' => {
                self.advance();
                TokenKind::LeftBracket
            }
            ']' => {
                self.advance();
                TokenKind::RightBracket
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            ';' => {
                self.advance();
                TokenKind::Semicolon
            }
            ':' => {
                self.advance();
                TokenKind::Colon
            }
            '.' => {
                self.advance();
                TokenKind::Dot
            }
            '^' => {
                self.advance();
                TokenKind::Caret
            }

            // Arithmetic operators and their compound-assignment forms
            '+' => self.lex_op_or_op_assign(TokenKind::Plus, TokenKind::PlusEq),
            '-' => self.lex_op_or_op_assign(TokenKind::Minus, TokenKind::MinusEq),
            '*' => self.lex_op_or_op_assign(TokenKind::Star, TokenKind::StarEq),
            '/' => self.lex_op_or_op_assign(TokenKind::Slash, TokenKind::SlashEq),
            '%' => self.lex_op_or_op_assign(TokenKind::Percent, TokenKind::PercentEq),
            '~' => self.lex_op_or_op_assign(TokenKind::Tilde, TokenKind::TildeEq),

            // Relational / assignment / logical-not, one character of lookahead
            '>' => self.lex_op_or_op_assign(TokenKind::Gt, TokenKind::GtEq),
            '<' => self.lex_op_or_op_assign(TokenKind::Lt, TokenKind::LtEq),
            '=' => self.lex_op_or_op_assign(TokenKind::Eq, TokenKind::EqEq),
            '!' => self.lex_op_or_op_assign(TokenKind::Bang, TokenKind::BangEq),

            // `&&` and `||`; a bare `&` or `|` is a soft error
            '&' => self.lex_doubled_op('&', TokenKind::AmpAmp, start),
            '|' => self.lex_doubled_op('|', TokenKind::PipePipe, start),

            // Unknown character - error recovery
            _ => {
                self.advance();
                let span = self.span_from(start);
                self.error(LexErrorKind::UnexpectedCharacter(c), span);
                TokenKind::Error(EcoString::from(self.text_for(span)))
            }
        }
    }

    /// Lexes a single-character operator, or its `=` compound form when
    /// the next character is `=`.
    fn lex_op_or_op_assign(&mut self, single: TokenKind, compound: TokenKind) -> TokenKind {
        self.advance();
        if self.peek_char() == Some('=') {
            self.advance();
            compound
        } else {
            single
        }
    }

    /// Lexes `&&` / `||`. A bare `&` or `|` records a soft error and
    /// emits a placeholder token so the pass continues.
    fn lex_doubled_op(&mut self, c: char, doubled: TokenKind, start: u32) -> TokenKind {
        self.advance();
        if self.peek_char() == Some(c) {
            self.advance();
            doubled
        } else {
            let span = self.span_from(start);
            self.error(LexErrorKind::UnexpectedOperatorChar(c), span);
            TokenKind::Error(EcoString::from(self.text_for(span)))
        }
    }

    /// Lexes an identifier or reserved word.
    ///
    /// Consumes letters, digits, and underscores, except that a trailing
    /// underscore is not considered part of the word: it is left in the
    /// input to be re-lexed as the next token. The scanned text is
    /// case-folded to lowercase and run through the keyword automaton.
    fn lex_identifier_or_keyword(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance(); // leading letter or underscore

        loop {
            match self.peek_char() {
                Some(c) if c.is_ascii_alphanumeric() => {
                    self.advance();
                }
                Some('_') => {
                    // Only part of the word when another word character follows.
                    if self
                        .peek_char_n(1)
                        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        self.advance();
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }

        let text = self.text_for(self.span_from(start));
        let folded: EcoString = text.to_ascii_lowercase().into();
        keyword_kind(&folded).unwrap_or(TokenKind::Identifier(folded))
    }

    /// Lexes an integer or decimal literal.
    ///
    /// A run of digits with at most one `.` is a number; no `.` means an
    /// integer, exactly one means a decimal. A second `.` marks the run
    /// malformed: the scan consumes trailing alphanumerics and dots to
    /// resynchronize and emits an error token carrying the whole lexeme.
    fn lex_number(&mut self, start: u32) -> TokenKind {
        let mut decimal_points = 0u32;
        let mut malformed = false;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' {
                // `5.` is a decimal; only an interior second dot is an error.
                decimal_points += 1;
                if decimal_points > 1 {
                    malformed = true;
                    break;
                }
                self.advance();
            } else {
                break;
            }
        }

        if malformed {
            // Consume the remaining garbage as part of the error lexeme.
            self.advance_while(|c| c.is_ascii_alphanumeric() || c == '.');
            let span = self.span_from(start);
            self.error(LexErrorKind::MalformedNumber, span);
            return TokenKind::Error(EcoString::from(self.text_for(span)));
        }

        let text = EcoString::from(self.text_for(self.span_from(start)));
        if decimal_points > 0 {
            TokenKind::Float(text)
        } else {
            TokenKind::Integer(text)
        }
    }

    /// Lexes a double-quoted string literal.
    ///
    /// The payload excludes the delimiters; there are no escape
    /// sequences, and a string may span newlines. An unterminated string
    /// records an error and emits the scanned text as an error token.
    fn lex_string(&mut self, start: u32) -> TokenKind {
        self.advance(); // opening quote
        let content_start = self.current_position();
        self.advance_while(|c| c != '"');
        let content = EcoString::from(self.text_for(self.span_from(content_start)));

        if self.peek_char() == Some('"') {
            self.advance(); // closing quote
            TokenKind::Str(content)
        } else {
            let span = self.span_from(start);
            self.error(LexErrorKind::UnterminatedString, span);
            TokenKind::Error(content)
        }
    }

    /// Lexes a single-quoted character literal: exactly one character
    /// between the quotes.
    ///
    /// Zero characters, multiple characters, and a newline or end of
    /// input before the closing quote are all errors; the scan advances
    /// past the malformed literal so lexing cannot loop.
    fn lex_character(&mut self, start: u32) -> TokenKind {
        self.advance(); // opening quote

        match self.peek_char() {
            None | Some('\n') => {
                let span = self.span_from(start);
                self.error(LexErrorKind::UnterminatedCharacter, span);
                TokenKind::Error(EcoString::from(self.text_for(span)))
            }
            Some('\'') => {
                self.advance(); // closing quote of an empty literal
                let span = self.span_from(start);
                self.error(LexErrorKind::InvalidCharacterLiteral, span);
                TokenKind::Error(EcoString::from(self.text_for(span)))
            }
            Some(value) => {
                self.advance();
                if self.peek_char() == Some('\'') {
                    self.advance(); // closing quote
                    TokenKind::Character(value)
                } else {
                    // More than one character: skip to the closing quote
                    // (or line/input end) and report.
                    self.advance_while(|c| c != '\'' && c != '\n');
                    if self.peek_char() == Some('\'') {
                        self.advance();
                    }
                    let span = self.span_from(start);
                    self.error(LexErrorKind::InvalidCharacterLiteral, span);
                    TokenKind::Error(EcoString::from(self.text_for(span)))
                }
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lex_token();
        if token.kind().is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

/// Convenience function to lex source into a vector of tokens
/// (excluding EOF), discarding any recovered errors.
///
/// For most use cases, prefer [`lex_with_eof`], which reports errors.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lexes a whole source buffer.
///
/// Returns every token including the terminal [`TokenKind::Eof`], plus
/// the lexical errors recovered from along the way. The token sequence
/// is structurally complete even when errors occurred; callers decide
/// whether a non-empty error list stops them from parsing.
#[must_use]
pub fn lex_with_eof(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex_token();
        let is_eof = token.kind().is_eof();
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    (tokens, lexer.errors)
}
