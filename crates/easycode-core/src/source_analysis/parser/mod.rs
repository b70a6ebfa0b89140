// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for EasyCode source code.
//!
//! This parser builds an AST from a stream of tokens produced by the
//! lexer. It is designed around comprehensive error recovery.
//!
//! # Design Philosophy
//!
//! - **Error recovery is mandatory** - the parser MUST always produce a
//!   [`Program`], even for badly malformed input
//! - **Multiple errors** - report all errors, don't stop at the first
//! - **Precise spans** - every diagnostic points to an exact source location
//! - **Synchronization points** - recover at statement boundaries
//!
//! # Expression Precedence
//!
//! Expressions are parsed by precedence climbing: a chain of functions,
//! one per precedence level, from lowest to highest binding:
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 1 | `\|\|` `or` | Left |
//! | 2 | `&&` `and` | Left |
//! | 3 | `==` `!=` | Left |
//! | 4 | `<` `>` `<=` `>=` `less` `greater` | Left |
//! | 5 | `+` `-` | Left |
//! | 6 | `*` `/` `%` `~` | Left |
//! | 7 | `^` | Right |
//! | 8 | unary `-` `+` `!` `not` | Right |
//!
//! # Error Recovery
//!
//! Statement parsers return `Result<Statement, SyntaxError>`: the `Err`
//! case means a diagnostic was recorded and the caller must
//! resynchronize. [`Parser::synchronize`] discards tokens until a
//! semicolon (consumed), a closing brace or `end` (left for the caller),
//! or any token that can start a new statement. At least one token is
//! always consumed per failed statement, so parsing cannot loop.
//!
//! # Usage
//!
//! ```
//! use easycode_core::source_analysis::{lex_with_eof, parse};
//!
//! let (tokens, lex_errors) = lex_with_eof("start number x = 4; end");
//! let (program, diagnostics) = parse(tokens);
//!
//! assert!(lex_errors.is_empty());
//! assert!(diagnostics.is_empty());
//! assert_eq!(program.body.len(), 1);
//! ```

use ecow::EcoString;

use crate::ast::{Declaration, Program, Statement};
use crate::source_analysis::{Span, Token, TokenKind};

// Submodules with additional impl blocks for Parser
mod expressions;
mod statements;


/// A diagnostic message (error or warning).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: Severity,
    /// The error message.
    pub message: EcoString,
    /// The source location.
    pub span: Span,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    /// Creates a new warning diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An error that makes the tree unreliable.
    Error,
    /// A warning that should be addressed.
    Warning,
}

/// Marker for a failed statement-level parse.
///
/// The diagnostic has already been recorded at the failure site; the
/// marker only tells the enclosing statement list that it must
/// resynchronize before continuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SyntaxError;

/// Result type for statement-level parsing functions.
pub(super) type ParseResult<T> = Result<T, SyntaxError>;

/// Maximum nesting depth before the parser bails out.
///
/// Prevents stack overflow on deeply nested input (e.g. `(((((...)))))`
/// or long `else if` chains). As a second line of defence,
/// `stacker::maybe_grow` extends the stack on the heap at the recursive
/// entry points.
const MAX_NESTING_DEPTH: usize = 64;

/// Parses a token sequence into a program.
///
/// This is the main entry point for parsing. It always returns a
/// [`Program`], even when there are syntax errors; callers decide how to
/// treat a tree whose diagnostics contain [`Severity::Error`] entries.
///
/// # Examples
///
/// ```
/// use easycode_core::source_analysis::{lex_with_eof, parse, Severity};
///
/// let (tokens, _) = lex_with_eof("start number x = 1 + ; end");
/// let (program, diagnostics) = parse(tokens);
///
/// // The malformed initializer was recovered from: the tree is complete
/// // and the problem is reported as a diagnostic.
/// assert_eq!(program.body.len(), 1);
/// assert!(diagnostics.iter().any(|d| d.severity == Severity::Error));
/// ```
#[must_use]
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    (program, parser.diagnostics)
}

/// The parser state.
pub(super) struct Parser {
    /// The tokens being parsed (read-only; ends with EOF).
    pub(super) tokens: Vec<Token>,
    /// Current token index. Monotonically non-decreasing.
    pub(super) current: usize,
    /// Accumulated diagnostics.
    pub(super) diagnostics: Vec<Diagnostic>,
    /// Current nesting depth (guards against stack overflow).
    nesting_depth: usize,
}

impl Parser {
    /// Creates a new parser for the given tokens.
    ///
    /// The token sequence is expected to end with [`TokenKind::Eof`]; an
    /// EOF token is appended when the lexer did not provide one.
    fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.kind().is_eof()) {
            let end = tokens.last().map_or(0, |t| t.span().end());
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
        }
        Self {
            tokens,
            current: 0,
            diagnostics: Vec::new(),
            nesting_depth: 0,
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token.
    pub(super) fn current_token(&self) -> &Token {
        self.tokens
            .get(self.current)
            .or_else(|| self.tokens.last())
            .expect("parser token sequence always contains at least EOF")
    }

    /// Returns the current token kind.
    pub(super) fn current_kind(&self) -> &TokenKind {
        self.current_token().kind()
    }

    /// Peeks `n` tokens ahead without consuming (`peek_at(0)` is the
    /// current token).
    pub(super) fn peek_at(&self, n: usize) -> Option<&TokenKind> {
        self.tokens.get(self.current + n).map(Token::kind)
    }

    /// Checks if we're at the end of input.
    pub(super) fn is_at_end(&self) -> bool {
        self.current_kind().is_eof()
    }

    /// Advances to the next token and returns the consumed one.
    pub(super) fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.tokens[self.current.saturating_sub(1)].clone()
    }

    /// Returns the span of the most recently consumed token.
    pub(super) fn previous_span(&self) -> Span {
        if self.current == 0 {
            self.current_token().span()
        } else {
            self.tokens[self.current - 1].span()
        }
    }

    /// Checks if the current token matches the given kind
    /// (payloads are ignored; only the variant matters).
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to match the given kind, advancing if it
    /// does. If it doesn't, records an error and returns `None`.
    pub(super) fn expect(&mut self, kind: &TokenKind, message: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error(message);
            None
        }
    }

    /// Like [`Parser::expect`], but converts the failure into a
    /// [`SyntaxError`] so statement parsers can bail out with `?`.
    pub(super) fn require(&mut self, kind: &TokenKind, message: &str) -> ParseResult<Token> {
        self.expect(kind, message).ok_or(SyntaxError)
    }

    // ========================================================================
    // Error Handling & Recovery
    // ========================================================================

    /// Reports an error at the current token, naming the offender.
    pub(super) fn error(&mut self, message: &str) {
        let token = self.current_token();
        let span = token.span();
        let message = format!("{message} (got '{}')", token.kind());
        self.diagnostics.push(Diagnostic::error(message, span));
    }

    /// Reports an error at an explicit span.
    pub(super) fn error_at(&mut self, span: Span, message: impl Into<EcoString>) {
        self.diagnostics.push(Diagnostic::error(message, span));
    }

    /// Increments the nesting depth, failing once [`MAX_NESTING_DEPTH`]
    /// is exceeded. Pair every `Ok(())` with [`Parser::leave_nesting`].
    pub(super) fn enter_nesting(&mut self, span: Span) -> ParseResult<()> {
        self.nesting_depth += 1;
        if self.nesting_depth > MAX_NESTING_DEPTH {
            self.error_at(
                span,
                format!("Nesting is too deep (maximum {MAX_NESTING_DEPTH} levels)"),
            );
            self.nesting_depth -= 1;
            return Err(SyntaxError);
        }
        Ok(())
    }

    /// Decrements the nesting depth (pair with [`Parser::enter_nesting`]).
    pub(super) fn leave_nesting(&mut self) {
        debug_assert!(
            self.nesting_depth > 0,
            "leave_nesting called without matching enter_nesting"
        );
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// Synchronizes the parser to a safe recovery point after a failed
    /// statement.
    ///
    /// Discards tokens until one of:
    /// - a semicolon, which is consumed (end of the bad statement)
    /// - a closing brace or `end`, left for the enclosing construct
    /// - any token that can start a new statement
    pub(super) fn synchronize(&mut self) {
        while !self.is_at_end() {
            match self.current_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::RightBrace | TokenKind::End => return,
                kind if kind.starts_statement() => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Synchronizes at global scope: skip to a semicolon (consumed) or
    /// the start of a new global declaration or the `start` keyword.
    pub(super) fn synchronize_global(&mut self) {
        while !self.is_at_end() {
            match self.current_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::Const | TokenKind::Start => return,
                kind if kind.is_data_type() => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ========================================================================
    // Program Parsing
    // ========================================================================

    /// Parses a complete program: global declarations, then the
    /// `start` ... `end` main block.
    fn parse_program(&mut self) -> Program {
        let start_span = self.current_token().span();
        let mut globals: Vec<Declaration> = Vec::new();

        while !self.check(&TokenKind::Start) && !self.is_at_end() {
            let before = self.current;
            match self.parse_global_declaration() {
                Ok(decl) => globals.push(decl),
                Err(SyntaxError) => {
                    self.synchronize_global();
                    if self.current == before && !self.is_at_end() {
                        // The offending token is itself a sync target;
                        // step over it to guarantee forward progress.
                        self.advance();
                    }
                }
            }
        }

        self.expect(
            &TokenKind::Start,
            "Expected 'start' at the beginning of the main program",
        );

        let body = self.parse_statement_list();

        self.expect(&TokenKind::End, "Expected 'end' after the main program");

        let span = start_span.merge(self.previous_span());
        Program::new(globals, body, span)
    }

    /// Parses statements until a closing brace, `end`, or end of input.
    ///
    /// Failed statements trigger panic-mode recovery; the list always
    /// makes forward progress.
    pub(super) fn parse_statement_list(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();

        while !self.is_at_end()
            && !self.check(&TokenKind::RightBrace)
            && !self.check(&TokenKind::End)
        {
            // Stray semicolons separate nothing.
            if self.match_token(&TokenKind::Semicolon) {
                continue;
            }

            let before = self.current;
            let error_start = self.current_token().span();
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(SyntaxError) => {
                    self.synchronize();
                    if self.current == before && !self.is_at_end() {
                        self.advance();
                    }
                    // Keep the tree structurally complete: the skipped
                    // region is represented by a placeholder node.
                    statements.push(Statement::Error {
                        message: "statement could not be parsed".into(),
                        span: error_start.merge(self.previous_span()),
                    });
                }
            }
        }

        statements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        AssignOp, BinaryOp, DataType, Expression, Literal, Statement, UnaryOp,
    };
    use crate::source_analysis::lex_with_eof;

    /// Lexes and parses, asserting that lexing was clean.
    fn parse_source(source: &str) -> (Program, Vec<Diagnostic>) {
        let (tokens, lex_errors) = lex_with_eof(source);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        parse(tokens)
    }

    /// Parses a source expected to be error-free.
    fn parse_ok(source: &str) -> Program {
        let (program, diagnostics) = parse_source(source);
        assert!(diagnostics.is_empty(), "diagnostics: {diagnostics:?}");
        program
    }

    fn has_error(diagnostics: &[Diagnostic]) -> bool {
        diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    #[test]
    fn empty_program() {
        let program = parse_ok("start end");
        assert!(program.globals.is_empty());
        assert!(program.body.is_empty());
    }

    #[test]
    fn declaration_with_initializer() {
        let program = parse_ok("start number x = 10; end");
        assert_eq!(program.body.len(), 1);
        let Statement::Decl(decl) = &program.body[0] else {
            panic!("expected declaration, got {:?}", program.body[0]);
        };
        assert_eq!(decl.data_type, DataType::Number);
        assert_eq!(decl.name.name, "x");
        assert!(!decl.is_const);
        assert!(matches!(
            decl.init,
            Some(Expression::Literal(Literal::Number(10), _))
        ));
    }

    #[test]
    fn spec_scenario_program_shape() {
        // start number x = 10; show(x + 5); end
        let program = parse_ok("start number x = 10; show(x + 5); end");
        assert_eq!(program.body.len(), 2);

        let Statement::Decl(decl) = &program.body[0] else {
            panic!("expected declaration");
        };
        assert_eq!(decl.name.name, "x");
        assert_eq!(decl.data_type, DataType::Number);
        assert!(matches!(
            decl.init,
            Some(Expression::Literal(Literal::Number(10), _))
        ));

        let Statement::Output { value, .. } = &program.body[1] else {
            panic!("expected output statement");
        };
        let Expression::Binary { op, left, right, .. } = value else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(matches!(&**left, Expression::Identifier(id) if id.name == "x"));
        assert!(matches!(
            &**right,
            Expression::Literal(Literal::Number(5), _)
        ));
    }

    #[test]
    fn missing_operand_recovers_with_error_node() {
        let (program, diagnostics) = parse_source("start number x = 1 + ; end");
        assert!(has_error(&diagnostics));
        // The tree is still complete: one declaration whose initializer
        // contains an error placeholder where the right operand belongs.
        assert_eq!(program.body.len(), 1);
        let Statement::Decl(decl) = &program.body[0] else {
            panic!("expected declaration");
        };
        let Some(Expression::Binary { op, right, .. }) = &decl.init else {
            panic!("expected binary initializer, got {:?}", decl.init);
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(right.is_error());
    }

    #[test]
    fn if_else_blocks() {
        let program = parse_ok("start if (x > 0) { show(x); } else { show(0); } end");
        assert_eq!(program.body.len(), 1);
        let Statement::Cond {
            condition,
            then_body,
            else_body,
            ..
        } = &program.body[0]
        else {
            panic!("expected conditional");
        };
        assert!(matches!(
            condition,
            Expression::Binary { op: BinaryOp::Gt, .. }
        ));
        assert!(matches!(&**then_body, Statement::Block(b) if b.statements.len() == 1));
        let else_body = else_body.as_ref().expect("else body");
        assert!(matches!(&**else_body, Statement::Block(b) if b.statements.len() == 1));
    }

    #[test]
    fn else_if_chains_nest() {
        let program = parse_ok(
            "start if (x == 1) { show(1); } else if (x == 2) { show(2); } else { show(3); } end",
        );
        let Statement::Cond { else_body, .. } = &program.body[0] else {
            panic!("expected conditional");
        };
        let Some(else_body) = else_body else {
            panic!("expected else body");
        };
        // The `else if` arm is itself a conditional with its own else.
        let Statement::Cond { else_body: inner_else, .. } = &**else_body else {
            panic!("expected nested conditional, got {else_body:?}");
        };
        assert!(inner_else.is_some());
    }

    #[test]
    fn if_then_noise_word() {
        let program = parse_ok("start if (x < 1) then { show(x); } end");
        assert!(matches!(program.body[0], Statement::Cond { .. }));
    }

    #[test]
    fn if_with_single_statement_bodies() {
        let program = parse_ok("start if (x) show(x); else stop; end");
        let Statement::Cond {
            then_body,
            else_body,
            ..
        } = &program.body[0]
        else {
            panic!("expected conditional");
        };
        assert!(matches!(&**then_body, Statement::Output { .. }));
        assert!(matches!(
            else_body.as_deref(),
            Some(Statement::Stop { .. })
        ));
    }

    #[test]
    fn repeat_three_clause_loop() {
        let program = parse_ok("start repeat (number i = 0; i < 10; i += 1) { show(i); } end");
        let Statement::Repeat {
            init,
            condition,
            increment,
            body,
            ..
        } = &program.body[0]
        else {
            panic!("expected repeat");
        };
        assert!(matches!(&**init, Statement::Decl(d) if d.name.name == "i"));
        assert!(matches!(
            condition,
            Expression::Binary { op: BinaryOp::Lt, .. }
        ));
        assert!(
            matches!(&**increment, Statement::Assign { op, .. } if *op == AssignOp::Add)
        );
        assert_eq!(body.statements.len(), 1);
    }

    #[test]
    fn repeat_with_assignment_init() {
        let program = parse_ok("start repeat (i = 0; i < 3; i += 1) { stop; } end");
        let Statement::Repeat { init, .. } = &program.body[0] else {
            panic!("expected repeat");
        };
        assert!(matches!(&**init, Statement::Assign { .. }));
    }

    #[test]
    fn assignment_operator_variants() {
        let source = "start x = 1; x += 1; x -= 1; x *= 2; x /= 2; x %= 2; x ~= 2; end";
        let program = parse_ok(source);
        let ops: Vec<AssignOp> = program
            .body
            .iter()
            .map(|stmt| match stmt {
                Statement::Assign { op, .. } => *op,
                other => panic!("expected assignment, got {other:?}"),
            })
            .collect();
        assert_eq!(
            ops,
            vec![
                AssignOp::Assign,
                AssignOp::Add,
                AssignOp::Sub,
                AssignOp::Mul,
                AssignOp::Div,
                AssignOp::Mod,
                AssignOp::Quot,
            ]
        );
    }

    #[test]
    fn input_statement() {
        let program = parse_ok("start x = ask(number); end");
        let Statement::Input {
            target, data_type, ..
        } = &program.body[0]
        else {
            panic!("expected input statement, got {:?}", program.body[0]);
        };
        assert_eq!(target.name, "x");
        assert_eq!(*data_type, DataType::Number);
    }

    #[test]
    fn ask_as_initializer_expression() {
        let program = parse_ok("start word name = ask(word); end");
        let Statement::Decl(decl) = &program.body[0] else {
            panic!("expected declaration");
        };
        assert!(matches!(
            decl.init,
            Some(Expression::Ask {
                data_type: DataType::Word,
                ..
            })
        ));
    }

    #[test]
    fn sizeof_expression() {
        let program = parse_ok("start show(sizeof(x)); end");
        let Statement::Output { value, .. } = &program.body[0] else {
            panic!("expected output");
        };
        assert!(matches!(value, Expression::Sizeof { .. }));
    }

    #[test]
    fn comma_declarations_collapse_rule() {
        // A single declarator stays a plain declaration...
        let program = parse_ok("start number a = 1; end");
        assert!(matches!(program.body[0], Statement::Decl(_)));

        // ...while two or more become a group sharing the type.
        let program = parse_ok("start number a = 1, b, c = 3; end");
        let Statement::DeclGroup { decls, .. } = &program.body[0] else {
            panic!("expected declaration group, got {:?}", program.body[0]);
        };
        assert_eq!(decls.len(), 3);
        assert!(decls.iter().all(|d| d.data_type == DataType::Number));
        assert_eq!(decls[0].name.name, "a");
        assert!(decls[1].init.is_none());
        assert!(matches!(
            decls[2].init,
            Some(Expression::Literal(Literal::Number(3), _))
        ));
    }

    #[test]
    fn const_declaration() {
        let program = parse_ok("start const decimal pi = 3.14; end");
        let Statement::Decl(decl) = &program.body[0] else {
            panic!("expected declaration");
        };
        assert!(decl.is_const);
        assert_eq!(decl.data_type, DataType::Decimal);
    }

    #[test]
    fn return_continue_stop() {
        let program = parse_ok("start return 1; return; continue; stop; end");
        assert!(matches!(
            program.body[0],
            Statement::Return { value: Some(_), .. }
        ));
        assert!(matches!(
            program.body[1],
            Statement::Return { value: None, .. }
        ));
        assert!(matches!(program.body[2], Statement::Continue { .. }));
        assert!(matches!(program.body[3], Statement::Stop { .. }));
    }

    #[test]
    fn call_statement_and_arguments() {
        let program = parse_ok("start greet(name, 2 + 3); end");
        let Statement::Call(call) = &program.body[0] else {
            panic!("expected call statement, got {:?}", program.body[0]);
        };
        assert_eq!(call.name.name, "greet");
        assert_eq!(call.arguments.len(), 2);
        assert!(matches!(
            call.arguments[1],
            Expression::Binary { op: BinaryOp::Add, .. }
        ));
    }

    #[test]
    fn nested_blocks() {
        let program = parse_ok("start { number x = 1; { show(x); } } end");
        let Statement::Block(outer) = &program.body[0] else {
            panic!("expected block");
        };
        assert_eq!(outer.statements.len(), 2);
        assert!(matches!(outer.statements[1], Statement::Block(_)));
    }

    #[test]
    fn global_function_declaration() {
        let program = parse_ok("number double(number n) { return n * 2; } start end");
        assert_eq!(program.globals.len(), 1);
        let Declaration::Function(func) = &program.globals[0] else {
            panic!("expected function");
        };
        assert_eq!(func.return_type, DataType::Number);
        assert_eq!(func.name.name, "double");
        assert_eq!(func.params.len(), 1);
        assert_eq!(func.params[0].name.name, "n");
        assert_eq!(func.body.statements.len(), 1);
    }

    #[test]
    fn global_variables_and_function_mix() {
        let program = parse_ok(
            "const number limit = 10;\n\
             decimal rate = 0.5, offset;\n\
             bool check(number v) { return v < limit; }\n\
             start show(check(3)); end",
        );
        assert_eq!(program.globals.len(), 3);
        assert!(matches!(
            program.globals[0],
            Declaration::Variables { .. }
        ));
        assert!(matches!(
            program.globals[1],
            Declaration::Variables { ref decls, .. } if decls.len() == 2
        ));
        assert!(matches!(program.globals[2], Declaration::Function(_)));
    }

    #[test]
    fn function_with_no_parameters() {
        let program = parse_ok("number zero() { return 0; } start end");
        let Declaration::Function(func) = &program.globals[0] else {
            panic!("expected function");
        };
        assert!(func.params.is_empty());
    }

    #[test]
    fn word_form_operators() {
        let program = parse_ok("start if (a less b and c greater d or not e) { stop; } end");
        let Statement::Cond { condition, .. } = &program.body[0] else {
            panic!("expected conditional");
        };
        // ((a < b) && (c > d)) || (!e)
        let Expression::Binary { op, left, right, .. } = condition else {
            panic!("expected binary");
        };
        assert_eq!(*op, BinaryOp::Or);
        assert!(matches!(
            &**left,
            Expression::Binary { op: BinaryOp::And, .. }
        ));
        assert!(matches!(
            &**right,
            Expression::Unary { op: UnaryOp::Not, .. }
        ));
    }

    #[test]
    fn precedence_arithmetic_over_comparison() {
        let program = parse_ok("start x = 1 + 2 * 3; end");
        let Statement::Assign { value, .. } = &program.body[0] else {
            panic!("expected assignment");
        };
        // 1 + (2 * 3)
        let Expression::Binary { op, right, .. } = value else {
            panic!("expected binary");
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(matches!(
            &**right,
            Expression::Binary { op: BinaryOp::Mul, .. }
        ));
    }

    #[test]
    fn exponent_is_right_associative() {
        let program = parse_ok("start x = 2 ^ 3 ^ 2; end");
        let Statement::Assign { value, .. } = &program.body[0] else {
            panic!("expected assignment");
        };
        // 2 ^ (3 ^ 2)
        let Expression::Binary { op, left, right, .. } = value else {
            panic!("expected binary");
        };
        assert_eq!(*op, BinaryOp::Pow);
        assert!(matches!(&**left, Expression::Literal(Literal::Number(2), _)));
        assert!(matches!(
            &**right,
            Expression::Binary { op: BinaryOp::Pow, .. }
        ));
    }

    #[test]
    fn binary_operators_are_left_associative() {
        let program = parse_ok("start x = 10 - 4 - 3; end");
        let Statement::Assign { value, .. } = &program.body[0] else {
            panic!("expected assignment");
        };
        // (10 - 4) - 3
        let Expression::Binary { op, left, .. } = value else {
            panic!("expected binary");
        };
        assert_eq!(*op, BinaryOp::Sub);
        assert!(matches!(
            &**left,
            Expression::Binary { op: BinaryOp::Sub, .. }
        ));
    }

    #[test]
    fn unary_chains_are_right_associative() {
        let program = parse_ok("start x = - - 1; end");
        let Statement::Assign { value, .. } = &program.body[0] else {
            panic!("expected assignment");
        };
        let Expression::Unary { op, operand, .. } = value else {
            panic!("expected unary");
        };
        assert_eq!(*op, UnaryOp::Neg);
        assert!(matches!(
            &**operand,
            Expression::Unary { op: UnaryOp::Neg, .. }
        ));
    }

    #[test]
    fn parenthesized_expression_overrides_precedence() {
        let program = parse_ok("start x = (1 + 2) * 3; end");
        let Statement::Assign { value, .. } = &program.body[0] else {
            panic!("expected assignment");
        };
        let Expression::Binary { op, left, .. } = value else {
            panic!("expected binary");
        };
        assert_eq!(*op, BinaryOp::Mul);
        assert!(matches!(
            &**left,
            Expression::Binary { op: BinaryOp::Add, .. }
        ));
    }

    #[test]
    fn integer_division_and_modulo() {
        let program = parse_ok("start x = 7 ~ 2 % 3; end");
        let Statement::Assign { value, .. } = &program.body[0] else {
            panic!("expected assignment");
        };
        // Left-associative within one level: (7 ~ 2) % 3
        let Expression::Binary { op, left, .. } = value else {
            panic!("expected binary");
        };
        assert_eq!(*op, BinaryOp::Mod);
        assert!(matches!(
            &**left,
            Expression::Binary { op: BinaryOp::Quot, .. }
        ));
    }

    #[test]
    fn literal_kinds() {
        let program = parse_ok(
            "start show(3.5); show(\"hi\"); show('c'); show(true); show(false); show(null); end",
        );
        let values: Vec<&Expression> = program
            .body
            .iter()
            .map(|s| match s {
                Statement::Output { value, .. } => value,
                other => panic!("expected output, got {other:?}"),
            })
            .collect();
        assert!(matches!(
            values[0],
            Expression::Literal(Literal::Decimal(_), _)
        ));
        assert!(
            matches!(values[1], Expression::Literal(Literal::Str(s), _) if s == "hi")
        );
        assert!(matches!(
            values[2],
            Expression::Literal(Literal::Character('c'), _)
        ));
        assert!(matches!(
            values[3],
            Expression::Literal(Literal::Bool(true), _)
        ));
        assert!(matches!(
            values[4],
            Expression::Literal(Literal::Bool(false), _)
        ));
        assert!(matches!(values[5], Expression::Literal(Literal::Null, _)));
    }

    #[test]
    fn missing_start_is_reported() {
        let (program, diagnostics) = parse_source("number x = 1; end");
        assert!(has_error(&diagnostics));
        // The declaration still parsed as a global.
        assert_eq!(program.globals.len(), 1);
    }

    #[test]
    fn missing_end_is_reported() {
        let (_, diagnostics) = parse_source("start show(1);");
        assert!(has_error(&diagnostics));
    }

    #[test]
    fn bad_statement_recovers_at_semicolon() {
        let (program, diagnostics) = parse_source("start < ; show(1); end");
        assert!(has_error(&diagnostics));
        // The statement after the bad one still parses.
        assert!(
            program
                .body
                .iter()
                .any(|s| matches!(s, Statement::Output { .. })),
            "body: {:?}",
            program.body
        );
    }

    #[test]
    fn bad_statement_recovers_at_statement_start() {
        let (program, diagnostics) = parse_source("start x + ; show(2); end");
        assert!(has_error(&diagnostics));
        assert!(
            program
                .body
                .iter()
                .any(|s| matches!(s, Statement::Output { .. }))
        );
    }

    #[test]
    fn multiple_errors_all_reported() {
        let (_, diagnostics) = parse_source("start < ; > ; show(1); end");
        let errors = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        assert!(errors >= 2, "diagnostics: {diagnostics:?}");
    }

    #[test]
    fn global_scope_recovery() {
        let (program, diagnostics) =
            parse_source("oops; number ok = 1; start show(ok); end");
        assert!(has_error(&diagnostics));
        // The bad token was skipped and the valid global still parsed.
        assert_eq!(program.globals.len(), 1);
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn missing_semicolon_keeps_statement() {
        let (program, diagnostics) = parse_source("start show(1) show(2); end");
        assert!(has_error(&diagnostics));
        // Both statements survive; only the separator was missing.
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn deeply_nested_parentheses_bail_out() {
        let depth = 100;
        let source = format!(
            "start x = {}1{}; end",
            "(".repeat(depth),
            ")".repeat(depth)
        );
        let (_, diagnostics) = parse_source(&source);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.message.contains("Nesting is too deep")),
            "diagnostics: {diagnostics:?}"
        );
    }

    #[test]
    fn parse_always_produces_program() {
        for source in [
            "",
            "start",
            "end",
            "start end end",
            "start ; ; ; end",
            "start if end",
            "start repeat end",
            "start { end",
            "number",
            "start 1 2 3 end",
        ] {
            let (tokens, _) = lex_with_eof(source);
            let (_program, _diagnostics) = parse(tokens);
            // Reaching here without panicking is the property under test.
        }
    }

    #[test]
    fn program_span_covers_input() {
        let source = "start show(1); end";
        let program = parse_ok(source);
        assert_eq!(program.span.start(), 0);
        assert_eq!(program.span.end(), source.len() as u32);
    }
}
