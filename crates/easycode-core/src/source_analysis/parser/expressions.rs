// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for EasyCode.
//!
//! Expressions are parsed by precedence climbing: one function per
//! precedence level, each descending to the next-tighter level for its
//! left operand and looping while its own operator set matches. The
//! binary levels are left-associative; exponentiation and the unary
//! operators recurse for right associativity.
//!
//! Word-form operators (`and`, `or`, `not`, `greater`, `less`) are
//! interchangeable with their symbol forms at the same precedence.
//!
//! A failed primary records a diagnostic and yields an
//! [`Expression::Error`] placeholder *without* consuming the offending
//! token, so the enclosing statement still sees its terminator.

use crate::ast::{BinaryOp, DataType, Expression, FunctionCall, Identifier, Literal, UnaryOp};
use crate::source_analysis::{Span, TokenKind};

use super::{ParseResult, Parser};

/// Maps an equality-level token to its operator.
fn equality_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::BangEq => Some(BinaryOp::NotEq),
        _ => None,
    }
}

/// Maps a relational-level token to its operator.
fn relational_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Lt | TokenKind::Less => Some(BinaryOp::Lt),
        TokenKind::Gt | TokenKind::Greater => Some(BinaryOp::Gt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

/// Maps a multiplicative-level token to its operator.
fn multiplicative_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Tilde => Some(BinaryOp::Quot),
        _ => None,
    }
}

impl Parser {
    /// Parses any expression.
    ///
    /// Entry point for expression parsing; handles all precedence
    /// levels. Uses `stacker::maybe_grow` to extend the stack on the
    /// heap if remaining space falls below 32 KiB, and the nesting-depth
    /// guard to cap recursion through parenthesized subexpressions.
    pub(super) fn parse_expression(&mut self) -> Expression {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            let span = self.current_token().span();
            if self.enter_nesting(span).is_err() {
                return Expression::Error {
                    message: "expression nesting too deep".into(),
                    span,
                };
            }
            let result = self.parse_or();
            self.leave_nesting();
            result
        })
    }

    /// Logical or: `a || b`, `a or b`. Lowest precedence.
    fn parse_or(&mut self) -> Expression {
        let mut left = self.parse_and();
        while matches!(self.current_kind(), TokenKind::PipePipe | TokenKind::Or) {
            self.advance();
            let right = self.parse_and();
            left = binary(BinaryOp::Or, left, right);
        }
        left
    }

    /// Logical and: `a && b`, `a and b`.
    fn parse_and(&mut self) -> Expression {
        let mut left = self.parse_equality();
        while matches!(self.current_kind(), TokenKind::AmpAmp | TokenKind::And) {
            self.advance();
            let right = self.parse_equality();
            left = binary(BinaryOp::And, left, right);
        }
        left
    }

    /// Equality: `a == b`, `a != b`.
    fn parse_equality(&mut self) -> Expression {
        let mut left = self.parse_relational();
        while let Some(op) = equality_op(self.current_kind()) {
            self.advance();
            let right = self.parse_relational();
            left = binary(op, left, right);
        }
        left
    }

    /// Relational: `< > <= >=` and the word forms `less` / `greater`.
    fn parse_relational(&mut self) -> Expression {
        let mut left = self.parse_additive();
        while let Some(op) = relational_op(self.current_kind()) {
            self.advance();
            let right = self.parse_additive();
            left = binary(op, left, right);
        }
        left
    }

    /// Additive: `+` `-`.
    fn parse_additive(&mut self) -> Expression {
        let mut left = self.parse_multiplicative();
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative();
            left = binary(op, left, right);
        }
        left
    }

    /// Multiplicative: `*` `/` `%` and `~` (integer division).
    fn parse_multiplicative(&mut self) -> Expression {
        let mut left = self.parse_exponent();
        while let Some(op) = multiplicative_op(self.current_kind()) {
            self.advance();
            let right = self.parse_exponent();
            left = binary(op, left, right);
        }
        left
    }

    /// Exponentiation: `a ^ b`, right-associative via recursion.
    fn parse_exponent(&mut self) -> Expression {
        let left = self.parse_unary();
        if self.check(&TokenKind::Caret) {
            let caret_span = self.current_token().span();
            self.advance();
            if self.enter_nesting(caret_span).is_err() {
                return Expression::Error {
                    message: "expression nesting too deep".into(),
                    span: caret_span,
                };
            }
            let right = self.parse_exponent();
            self.leave_nesting();
            return binary(BinaryOp::Pow, left, right);
        }
        left
    }

    /// Unary: `-x`, `+x`, `!x`, `not x`, right-associative via recursion.
    fn parse_unary(&mut self) -> Expression {
        let op = match self.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Pos),
            TokenKind::Bang | TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_primary();
        };

        let op_span = self.current_token().span();
        self.advance();
        if self.enter_nesting(op_span).is_err() {
            return Expression::Error {
                message: "expression nesting too deep".into(),
                span: op_span,
            };
        }
        let operand = self.parse_unary();
        self.leave_nesting();
        let span = op_span.merge(operand.span());
        Expression::Unary {
            op,
            operand: Box::new(operand),
            span,
        }
    }

    /// Primary expressions: literals, identifiers, function calls,
    /// parenthesized subexpressions, `ask(type)`, and `sizeof(value)`.
    fn parse_primary(&mut self) -> Expression {
        let span = self.current_token().span();
        match self.current_kind().clone() {
            TokenKind::Integer(text) => {
                self.advance();
                match text.parse::<i64>() {
                    Ok(value) => Expression::Literal(Literal::Number(value), span),
                    Err(_) => {
                        self.error_at(span, format!("Integer literal '{text}' is out of range"));
                        Expression::Error {
                            message: "integer literal out of range".into(),
                            span,
                        }
                    }
                }
            }
            TokenKind::Float(text) => {
                self.advance();
                match text.parse::<f64>() {
                    Ok(value) => Expression::Literal(Literal::Decimal(value), span),
                    Err(_) => {
                        self.error_at(span, format!("Decimal literal '{text}' is malformed"));
                        Expression::Error {
                            message: "malformed decimal literal".into(),
                            span,
                        }
                    }
                }
            }
            TokenKind::Str(text) => {
                self.advance();
                Expression::Literal(Literal::Str(text), span)
            }
            TokenKind::Character(c) => {
                self.advance();
                Expression::Literal(Literal::Character(c), span)
            }
            TokenKind::True => {
                self.advance();
                Expression::Literal(Literal::Bool(true), span)
            }
            TokenKind::False => {
                self.advance();
                Expression::Literal(Literal::Bool(false), span)
            }
            TokenKind::Null => {
                self.advance();
                Expression::Literal(Literal::Null, span)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                let identifier = Identifier::new(name, span);
                if self.check(&TokenKind::LeftParen) {
                    Expression::Call(self.finish_call(identifier))
                } else {
                    Expression::Identifier(identifier)
                }
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression();
                self.expect(&TokenKind::RightParen, "Expected ')' after expression");
                expr
            }
            TokenKind::Ask => match self.parse_ask_clause() {
                Ok((data_type, span)) => Expression::Ask { data_type, span },
                Err(_) => Expression::Error {
                    message: "malformed ask expression".into(),
                    span,
                },
            },
            TokenKind::Sizeof => self.parse_sizeof_expression(),
            _ => {
                // Do not consume: the offending token is often a
                // statement terminator the caller still needs.
                self.error("Expected expression");
                Expression::Error {
                    message: "expected expression".into(),
                    span,
                }
            }
        }
    }

    /// Parses the arguments of a call whose name has been consumed and
    /// whose current token is `(`.
    pub(super) fn finish_call(&mut self, name: Identifier) -> FunctionCall {
        self.advance(); // (

        let mut arguments = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                arguments.push(self.parse_expression());
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        let close = self.expect(
            &TokenKind::RightParen,
            "Expected ')' after function call arguments",
        );
        let end = close.map_or_else(|| self.previous_span(), |t| t.span());
        let span = name.span.merge(end);
        FunctionCall {
            name,
            arguments,
            span,
        }
    }

    /// Parses `ask ( type )`, returning the type and the full span.
    ///
    /// Shared between the input statement (`x = ask(number)`) and the
    /// expression form (`number x = ask(number)`).
    pub(super) fn parse_ask_clause(&mut self) -> ParseResult<(DataType, Span)> {
        let ask_span = self.current_token().span();
        self.advance(); // ask
        self.require(&TokenKind::LeftParen, "Expected '(' after 'ask'")?;
        let data_type = self.parse_data_type("Expected data type in ask expression")?;
        let close = self.require(&TokenKind::RightParen, "Expected ')' after data type")?;
        Ok((data_type, ask_span.merge(close.span())))
    }

    /// Parses `sizeof ( value )` where value is a literal or identifier.
    fn parse_sizeof_expression(&mut self) -> Expression {
        let sizeof_span = self.current_token().span();
        self.advance(); // sizeof

        if self
            .expect(&TokenKind::LeftParen, "Expected '(' after 'sizeof'")
            .is_none()
        {
            return Expression::Error {
                message: "malformed sizeof expression".into(),
                span: sizeof_span,
            };
        }

        let Some(value) = self.parse_value_operand() else {
            return Expression::Error {
                message: "expected a value in sizeof".into(),
                span: sizeof_span.merge(self.current_token().span()),
            };
        };

        let close = self.expect(&TokenKind::RightParen, "Expected ')' after value");
        let end = close.map_or_else(|| self.previous_span(), |t| t.span());
        Expression::Sizeof {
            value: Box::new(value),
            span: sizeof_span.merge(end),
        }
    }

    /// Parses a bare value: a literal or an identifier.
    ///
    /// `sizeof` deliberately accepts only values, not arbitrary
    /// expressions.
    fn parse_value_operand(&mut self) -> Option<Expression> {
        let span = self.current_token().span();
        let expr = match self.current_kind().clone() {
            TokenKind::Integer(text) => match text.parse::<i64>() {
                Ok(v) => Expression::Literal(Literal::Number(v), span),
                Err(_) => {
                    self.error_at(span, format!("Integer literal '{text}' is out of range"));
                    return None;
                }
            },
            TokenKind::Float(text) => match text.parse::<f64>() {
                Ok(v) => Expression::Literal(Literal::Decimal(v), span),
                Err(_) => {
                    self.error_at(span, format!("Decimal literal '{text}' is malformed"));
                    return None;
                }
            },
            TokenKind::Str(text) => Expression::Literal(Literal::Str(text), span),
            TokenKind::Character(c) => Expression::Literal(Literal::Character(c), span),
            TokenKind::True => Expression::Literal(Literal::Bool(true), span),
            TokenKind::False => Expression::Literal(Literal::Bool(false), span),
            TokenKind::Null => Expression::Literal(Literal::Null, span),
            TokenKind::Identifier(name) => Expression::Identifier(Identifier::new(name, span)),
            _ => {
                self.error("Expected a value");
                return None;
            }
        };
        self.advance();
        Some(expr)
    }
}

/// Builds a binary node spanning both operands.
fn binary(op: BinaryOp, left: Expression, right: Expression) -> Expression {
    let span = left.span().merge(right.span());
    Expression::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        span,
    }
}
