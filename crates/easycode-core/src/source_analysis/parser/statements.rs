// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Statement and declaration parsing for EasyCode.
//!
//! This module contains the statement-level parsing methods extracted
//! from the main `Parser` implementation:
//!
//! - Variable declarations (with comma lists) and `const`
//! - Function declarations at global scope
//! - Assignment (`=`, `+=`, `-=`, `*=`, `/=`, `%=`, `~=`)
//! - Input (`x = ask(type)`) and output (`show(expr)`)
//! - Conditionals (`if` / `then` / `else`, with `else if` chaining)
//! - Three-clause loops (`repeat (init; cond; increment) body`)
//! - `return`, `continue`, `stop`, and braced blocks
//!
//! Every function either returns a statement or records a diagnostic
//! and returns [`SyntaxError`] for the statement list to recover from.

use crate::ast::{
    AssignOp, Block, DataType, Declaration, Expression, FunctionCall, FunctionDecl, Identifier,
    Parameter, Statement, VarDecl,
};
use crate::source_analysis::TokenKind;

use super::{ParseResult, Parser, SyntaxError};

/// Maps an assignment-operator token to its AST operator.
fn assign_op(kind: &TokenKind) -> Option<AssignOp> {
    match kind {
        TokenKind::Eq => Some(AssignOp::Assign),
        TokenKind::PlusEq => Some(AssignOp::Add),
        TokenKind::MinusEq => Some(AssignOp::Sub),
        TokenKind::StarEq => Some(AssignOp::Mul),
        TokenKind::SlashEq => Some(AssignOp::Div),
        TokenKind::PercentEq => Some(AssignOp::Mod),
        TokenKind::TildeEq => Some(AssignOp::Quot),
        _ => None,
    }
}

impl Parser {
    // ========================================================================
    // Statement Dispatch
    // ========================================================================

    /// Parses a single statement.
    ///
    /// Compound statements (`if`, `repeat`, blocks) delimit themselves;
    /// simple statements are terminated by a semicolon. A missing
    /// semicolon is reported but does not discard the parsed statement.
    ///
    /// Uses `stacker::maybe_grow` to extend the stack on the heap when
    /// remaining space runs low, since conditionals and blocks recurse
    /// through this function.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            self.enter_nesting(self.current_token().span())?;
            let result = self.parse_statement_inner();
            self.leave_nesting();
            result
        })
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Statement> {
        match self.current_kind() {
            TokenKind::If => self.parse_cond_statement(),
            TokenKind::Repeat => self.parse_repeat_statement(),
            TokenKind::LeftBrace => self.parse_block().map(Statement::Block),
            _ => {
                let stmt = self.parse_simple_statement()?;
                // The statement itself parsed; a missing terminator is
                // reported without discarding it.
                self.expect(&TokenKind::Semicolon, "Expected ';' after statement");
                Ok(stmt)
            }
        }
    }

    /// Parses a simple (semicolon-terminated) statement.
    fn parse_simple_statement(&mut self) -> ParseResult<Statement> {
        let kind = self.current_kind().clone();

        if kind == TokenKind::Const || kind.is_data_type() {
            return self.parse_decl_statement();
        }

        match kind {
            TokenKind::Show => self.parse_output_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Continue => {
                let token = self.advance();
                Ok(Statement::Continue { span: token.span() })
            }
            TokenKind::Stop => {
                let token = self.advance();
                Ok(Statement::Stop { span: token.span() })
            }
            TokenKind::Identifier(_) => match (self.peek_at(1), self.peek_at(2)) {
                (Some(TokenKind::LeftParen), _) => {
                    let call = self.parse_call_statement()?;
                    Ok(Statement::Call(call))
                }
                (Some(TokenKind::Eq), Some(TokenKind::Ask)) => self.parse_input_statement(),
                _ => self.parse_assign_statement(),
            },
            _ => {
                // Consume the offending token so recovery cannot loop.
                self.error("Expected a statement");
                self.advance();
                Err(SyntaxError)
            }
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Parses a declaration statement: `[const] type name [= expr] {, ...}`.
    ///
    /// A comma list with exactly one declarator collapses into a single
    /// node; longer lists become a declaration group.
    fn parse_decl_statement(&mut self) -> ParseResult<Statement> {
        let start_span = self.current_token().span();
        let is_const = self.match_token(&TokenKind::Const);
        let data_type = self.parse_data_type("Expected data type in declaration")?;

        let mut decls = self.parse_var_decl_list(data_type, is_const)?;
        let span = start_span.merge(self.previous_span());

        if decls.len() == 1 {
            Ok(Statement::Decl(decls.remove(0)))
        } else {
            Ok(Statement::DeclGroup { decls, span })
        }
    }

    /// Parses the comma-separated declarators sharing one type.
    fn parse_var_decl_list(
        &mut self,
        data_type: DataType,
        is_const: bool,
    ) -> ParseResult<Vec<VarDecl>> {
        let mut decls = Vec::new();
        loop {
            let name = self.require_identifier("Expected variable name in declaration")?;
            let init = if self.match_token(&TokenKind::Eq) {
                Some(self.parse_expression())
            } else {
                None
            };
            let span = name
                .span
                .merge(init.as_ref().map_or(name.span, Expression::span));
            decls.push(VarDecl {
                data_type,
                name,
                init,
                is_const,
                span,
            });

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        Ok(decls)
    }

    /// Parses a data type keyword.
    pub(super) fn parse_data_type(&mut self, message: &str) -> ParseResult<DataType> {
        let data_type = match self.current_kind() {
            TokenKind::Number => DataType::Number,
            TokenKind::Decimal => DataType::Decimal,
            TokenKind::Letter => DataType::Letter,
            TokenKind::Word => DataType::Word,
            TokenKind::Bool => DataType::Bool,
            _ => {
                self.error(message);
                return Err(SyntaxError);
            }
        };
        self.advance();
        Ok(data_type)
    }

    /// Consumes an identifier token or fails with a diagnostic.
    pub(super) fn require_identifier(&mut self, message: &str) -> ParseResult<Identifier> {
        if let TokenKind::Identifier(name) = self.current_kind() {
            let name = name.clone();
            let span = self.current_token().span();
            self.advance();
            Ok(Identifier::new(name, span))
        } else {
            self.error(message);
            Err(SyntaxError)
        }
    }

    // ========================================================================
    // Simple Statements
    // ========================================================================

    /// Parses an assignment: `name op= expr`.
    fn parse_assign_statement(&mut self) -> ParseResult<Statement> {
        let target = self.require_identifier("Expected identifier in assignment")?;

        let Some(op) = assign_op(self.current_kind()) else {
            self.error("Expected assignment operator");
            return Err(SyntaxError);
        };
        self.advance();

        let value = self.parse_expression();
        let span = target.span.merge(value.span());
        Ok(Statement::Assign {
            target,
            op,
            value,
            span,
        })
    }

    /// Parses an input statement: `name = ask(type)`.
    fn parse_input_statement(&mut self) -> ParseResult<Statement> {
        let target = self.require_identifier("Expected identifier in input statement")?;
        self.require(&TokenKind::Eq, "Expected '=' in input statement")?;
        let (data_type, ask_span) = self.parse_ask_clause()?;
        let span = target.span.merge(ask_span);
        Ok(Statement::Input {
            target,
            data_type,
            span,
        })
    }

    /// Parses an output statement: `show(expr)`.
    fn parse_output_statement(&mut self) -> ParseResult<Statement> {
        let show_span = self.current_token().span();
        self.advance(); // show
        self.require(&TokenKind::LeftParen, "Expected '(' after 'show'")?;
        let value = self.parse_expression();
        let close = self.require(&TokenKind::RightParen, "Expected ')' after expression")?;
        Ok(Statement::Output {
            value,
            span: show_span.merge(close.span()),
        })
    }

    /// Parses a return statement with an optional value.
    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let return_span = self.current_token().span();
        self.advance(); // return
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression())
        };
        let span = value
            .as_ref()
            .map_or(return_span, |v| return_span.merge(v.span()));
        Ok(Statement::Return { value, span })
    }

    /// Parses a function call in statement position.
    fn parse_call_statement(&mut self) -> ParseResult<FunctionCall> {
        let name = self.require_identifier("Expected function name")?;
        Ok(self.finish_call(name))
    }

    // ========================================================================
    // Compound Statements
    // ========================================================================

    /// Parses a conditional: `if (cond) [then] body [else body]`.
    fn parse_cond_statement(&mut self) -> ParseResult<Statement> {
        let if_span = self.current_token().span();
        self.advance(); // if

        self.require(&TokenKind::LeftParen, "Expected '(' after 'if'")?;
        let condition = self.parse_expression();
        self.require(&TokenKind::RightParen, "Expected ')' after condition")?;

        // Optional noise word.
        self.match_token(&TokenKind::Then);

        let then_body = Box::new(self.parse_body_statement()?);

        let else_body = if self.match_token(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                Some(Box::new(self.parse_cond_statement()?))
            } else {
                Some(Box::new(self.parse_body_statement()?))
            }
        } else {
            None
        };

        let span = if_span.merge(self.previous_span());
        Ok(Statement::Cond {
            condition,
            then_body,
            else_body,
            span,
        })
    }

    /// Parses a conditional arm: a braced block or a single statement.
    fn parse_body_statement(&mut self) -> ParseResult<Statement> {
        if self.check(&TokenKind::LeftBrace) {
            self.parse_block().map(Statement::Block)
        } else {
            self.parse_statement()
        }
    }

    /// Parses a three-clause loop:
    /// `repeat (init; condition; increment) body`.
    fn parse_repeat_statement(&mut self) -> ParseResult<Statement> {
        let repeat_span = self.current_token().span();
        self.advance(); // repeat

        self.require(&TokenKind::LeftParen, "Expected '(' after 'repeat'")?;

        let init = if self.check(&TokenKind::Const) || self.current_kind().is_data_type() {
            self.parse_decl_statement()?
        } else {
            self.parse_assign_statement()?
        };
        self.require(
            &TokenKind::Semicolon,
            "Expected ';' after loop initialization",
        )?;

        let condition = self.parse_expression();
        self.require(&TokenKind::Semicolon, "Expected ';' after loop condition")?;

        let increment = self.parse_assign_statement()?;
        self.require(&TokenKind::RightParen, "Expected ')' after loop increment")?;

        let body = self.parse_block()?;
        let span = repeat_span.merge(body.span);
        Ok(Statement::Repeat {
            init: Box::new(init),
            condition,
            increment: Box::new(increment),
            body,
            span,
        })
    }

    /// Parses a braced block: `{ statement* }`.
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let open = self.require(&TokenKind::LeftBrace, "Expected '{' to start a block")?;
        let statements = self.parse_statement_list();
        let close = self.require(&TokenKind::RightBrace, "Expected '}' to end a block")?;
        Ok(Block {
            statements,
            span: open.span().merge(close.span()),
        })
    }

    // ========================================================================
    // Global Declarations
    // ========================================================================

    /// Parses one declaration at global scope.
    ///
    /// `type name (` is a function declaration, distinguished by
    /// two tokens of lookahead; everything else is a variable
    /// declaration list terminated by a semicolon.
    pub(super) fn parse_global_declaration(&mut self) -> ParseResult<Declaration> {
        let start_span = self.current_token().span();

        if self.match_token(&TokenKind::Const) {
            let data_type = self.parse_data_type("Expected data type in declaration")?;
            let decls = self.parse_var_decl_list(data_type, true)?;
            self.require(&TokenKind::Semicolon, "Expected ';' after declaration")?;
            return Ok(Declaration::Variables {
                decls,
                span: start_span.merge(self.previous_span()),
            });
        }

        if !self.current_kind().is_data_type() {
            self.error("Expected a global declaration");
            return Err(SyntaxError);
        }

        if matches!(self.peek_at(1), Some(TokenKind::Identifier(_)))
            && matches!(self.peek_at(2), Some(TokenKind::LeftParen))
        {
            return self.parse_function_declaration().map(Declaration::Function);
        }

        let data_type = self.parse_data_type("Expected data type in declaration")?;
        let decls = self.parse_var_decl_list(data_type, false)?;
        self.require(&TokenKind::Semicolon, "Expected ';' after declaration")?;
        Ok(Declaration::Variables {
            decls,
            span: start_span.merge(self.previous_span()),
        })
    }

    /// Parses a function declaration: `type name(params) block`.
    fn parse_function_declaration(&mut self) -> ParseResult<FunctionDecl> {
        let start_span = self.current_token().span();
        let return_type = self.parse_data_type("Expected return type")?;
        let name = self.require_identifier("Expected function name")?;

        self.require(&TokenKind::LeftParen, "Expected '(' after function name")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                let param_start = self.current_token().span();
                let data_type = self.parse_data_type("Expected parameter type")?;
                let param_name = self.require_identifier("Expected parameter name")?;
                let span = param_start.merge(param_name.span);
                params.push(Parameter {
                    data_type,
                    name: param_name,
                    span,
                });
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.require(&TokenKind::RightParen, "Expected ')' after parameters")?;

        let body = self.parse_block()?;
        let span = start_span.merge(body.span);
        Ok(FunctionDecl {
            return_type,
            name,
            params,
            body,
            span,
        })
    }
}
