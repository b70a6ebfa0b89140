// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for EasyCode.
//!
//! The AST represents the structure of an EasyCode program after parsing.
//! Every node carries a [`Span`] for error reporting.
//!
//! # Design Philosophy
//!
//! - **Ownership-typed tree** - every node exclusively owns its children,
//!   so teardown is automatic, exhaustive, and checked at compile time
//! - **Error recovery** - the parser can produce incomplete trees with
//!   [`Expression::Error`] / [`Statement::Error`] placeholder nodes
//! - **All nodes have spans** - required for diagnostics
//!
//! # Example
//!
//! ```ignore
//! // Source: start number x = 10; end
//! Program {
//!     globals: vec![],
//!     body: vec![Statement::Decl(VarDecl {
//!         data_type: DataType::Number,
//!         name: Identifier { name: "x".into(), span: ... },
//!         init: Some(Expression::Literal(Literal::Number(10), ...)),
//!         is_const: false,
//!         span: ...
//!     })],
//!     span: ...
//! }
//! ```

use ecow::EcoString;

use crate::source_analysis::{SourceMap, Span};

/// Top-level container for an EasyCode program.
///
/// A program is a list of global declarations followed by the main
/// statement block delimited by `start` ... `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Global variable and function declarations, in source order.
    pub globals: Vec<Declaration>,
    /// The statements of the main `start` ... `end` block.
    pub body: Vec<Statement>,
    /// Source location spanning the entire program.
    pub span: Span,
}

impl Program {
    /// Creates a new program node.
    #[must_use]
    pub fn new(globals: Vec<Declaration>, body: Vec<Statement>, span: Span) -> Self {
        Self {
            globals,
            body,
            span,
        }
    }

    /// Counts every node in the tree, root included.
    ///
    /// Used by tests to verify that a walk from the root reaches each
    /// node exactly once.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .globals
            .iter()
            .map(Declaration::node_count)
            .sum::<usize>()
            + self.body.iter().map(Statement::node_count).sum::<usize>()
    }
}

/// A declaration at global scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// A function declaration: `type name(params) { ... }`
    Function(FunctionDecl),
    /// One or more comma-separated variable declarations of a shared type.
    Variables {
        /// The individual declarations.
        decls: Vec<VarDecl>,
        /// Source location of the whole declaration statement.
        span: Span,
    },
}

impl Declaration {
    /// Returns the span of this declaration.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Function(func) => func.span,
            Self::Variables { span, .. } => *span,
        }
    }

    fn node_count(&self) -> usize {
        match self {
            Self::Function(func) => func.node_count(),
            Self::Variables { decls, .. } => {
                1 + decls.iter().map(VarDecl::node_count).sum::<usize>()
            }
        }
    }
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The declared return type.
    pub return_type: DataType,
    /// The function name.
    pub name: Identifier,
    /// The parameter list, possibly empty.
    pub params: Vec<Parameter>,
    /// The function body.
    pub body: Block,
    /// Source location of the whole declaration.
    pub span: Span,
}

impl FunctionDecl {
    fn node_count(&self) -> usize {
        1 + self.params.len() + self.body.node_count()
    }
}

/// A single function parameter: `type name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter type.
    pub data_type: DataType,
    /// The parameter name.
    pub name: Identifier,
    /// Source location.
    pub span: Span,
}

/// A single variable declaration: `[const] type name [= init]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// The declared type.
    pub data_type: DataType,
    /// The variable name.
    pub name: Identifier,
    /// The initializer expression, if any.
    pub init: Option<Expression>,
    /// Whether the declaration is `const`-qualified.
    pub is_const: bool,
    /// Source location.
    pub span: Span,
}

impl VarDecl {
    fn node_count(&self) -> usize {
        1 + self.init.as_ref().map_or(0, Expression::node_count)
    }
}

/// An EasyCode statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A single variable declaration.
    Decl(VarDecl),

    /// Two or more comma-separated declarations of the same type.
    ///
    /// A comma list with exactly one declaration collapses to
    /// [`Statement::Decl`] instead.
    DeclGroup {
        /// The individual declarations, in source order.
        decls: Vec<VarDecl>,
        /// Source location of the whole statement.
        span: Span,
    },

    /// An assignment: `name op= expr`.
    Assign {
        /// The variable being assigned to.
        target: Identifier,
        /// Which assignment operator was used.
        op: AssignOp,
        /// The value being assigned.
        value: Expression,
        /// Source location.
        span: Span,
    },

    /// An input statement: `name = ask(type)`.
    Input {
        /// The variable receiving the input.
        target: Identifier,
        /// The type to read.
        data_type: DataType,
        /// Source location.
        span: Span,
    },

    /// An output statement: `show(expr)`.
    Output {
        /// The expression to print.
        value: Expression,
        /// Source location.
        span: Span,
    },

    /// A conditional: `if (cond) [then] body [else body]`.
    ///
    /// `else if` chains nest another `Cond` in `else_body`.
    Cond {
        /// The condition expression.
        condition: Expression,
        /// The statement or block taken when the condition holds.
        then_body: Box<Statement>,
        /// The statement or block taken otherwise, if any.
        else_body: Option<Box<Statement>>,
        /// Source location.
        span: Span,
    },

    /// A three-clause loop: `repeat (init; cond; increment) body`.
    Repeat {
        /// The initialization statement.
        init: Box<Statement>,
        /// The loop condition.
        condition: Expression,
        /// The increment statement.
        increment: Box<Statement>,
        /// The loop body.
        body: Block,
        /// Source location.
        span: Span,
    },

    /// A return statement with an optional value.
    Return {
        /// The returned expression, or `None` for a bare `return`.
        value: Option<Expression>,
        /// Source location.
        span: Span,
    },

    /// A `continue` statement.
    Continue {
        /// Source location.
        span: Span,
    },

    /// A `stop` statement (loop break).
    Stop {
        /// Source location.
        span: Span,
    },

    /// A braced block used as a statement.
    Block(Block),

    /// A function call used as a statement: `name(args);`
    Call(FunctionCall),

    /// An error node standing in for an unparseable statement.
    Error {
        /// A description of what went wrong.
        message: EcoString,
        /// Source location of the erroneous code.
        span: Span,
    },
}

impl Statement {
    /// Returns the span of this statement.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Decl(decl) => decl.span,
            Self::DeclGroup { span, .. }
            | Self::Assign { span, .. }
            | Self::Input { span, .. }
            | Self::Output { span, .. }
            | Self::Cond { span, .. }
            | Self::Repeat { span, .. }
            | Self::Return { span, .. }
            | Self::Continue { span }
            | Self::Stop { span }
            | Self::Error { span, .. } => *span,
            Self::Block(block) => block.span,
            Self::Call(call) => call.span,
        }
    }

    /// Returns true if this statement is an error node.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    fn node_count(&self) -> usize {
        match self {
            Self::Decl(decl) => decl.node_count(),
            Self::DeclGroup { decls, .. } => {
                1 + decls.iter().map(VarDecl::node_count).sum::<usize>()
            }
            Self::Assign { value, .. } => 1 + value.node_count(),
            Self::Output { value, .. } => 1 + value.node_count(),
            Self::Cond {
                condition,
                then_body,
                else_body,
                ..
            } => {
                1 + condition.node_count()
                    + then_body.node_count()
                    + else_body.as_ref().map_or(0, |e| e.node_count())
            }
            Self::Repeat {
                init,
                condition,
                increment,
                body,
                ..
            } => {
                1 + init.node_count()
                    + condition.node_count()
                    + increment.node_count()
                    + body.node_count()
            }
            Self::Return { value, .. } => 1 + value.as_ref().map_or(0, Expression::node_count),
            Self::Input { .. } | Self::Continue { .. } | Self::Stop { .. } | Self::Error { .. } => {
                1
            }
            Self::Block(block) => block.node_count(),
            Self::Call(call) => call.node_count(),
        }
    }
}

/// A braced sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The statements in the block, in source order.
    pub statements: Vec<Statement>,
    /// Source location including the braces.
    pub span: Span,
}

impl Block {
    fn node_count(&self) -> usize {
        1 + self
            .statements
            .iter()
            .map(Statement::node_count)
            .sum::<usize>()
    }
}

/// An EasyCode expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal value.
    Literal(Literal, Span),

    /// A variable reference.
    Identifier(Identifier),

    /// A unary operation: `-x`, `+x`, `!x`.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expression>,
        /// Source location.
        span: Span,
    },

    /// A binary operation. Both operands are exclusively owned.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left operand.
        left: Box<Expression>,
        /// The right operand.
        right: Box<Expression>,
        /// Source location.
        span: Span,
    },

    /// A function call: `name(args)`.
    Call(FunctionCall),

    /// An input expression: `ask(type)`.
    Ask {
        /// The type to read.
        data_type: DataType,
        /// Source location.
        span: Span,
    },

    /// A `sizeof(value)` expression.
    Sizeof {
        /// The literal or identifier being measured.
        value: Box<Expression>,
        /// Source location.
        span: Span,
    },

    /// An error node for unparseable code.
    ///
    /// This lets the parser recover from errors and continue while
    /// keeping the tree structurally complete.
    Error {
        /// A description of what went wrong.
        message: EcoString,
        /// Source location of the erroneous code.
        span: Span,
    },
}

impl Expression {
    /// Returns the span of this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(_, span)
            | Self::Unary { span, .. }
            | Self::Binary { span, .. }
            | Self::Ask { span, .. }
            | Self::Sizeof { span, .. }
            | Self::Error { span, .. } => *span,
            Self::Identifier(id) => id.span,
            Self::Call(call) => call.span,
        }
    }

    /// Returns true if this expression is an error node.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    fn node_count(&self) -> usize {
        match self {
            Self::Literal(..) | Self::Identifier(_) | Self::Ask { .. } | Self::Error { .. } => 1,
            Self::Unary { operand, .. } => 1 + operand.node_count(),
            Self::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Self::Call(call) => call.node_count(),
            Self::Sizeof { value, .. } => 1 + value.node_count(),
        }
    }
}

/// A function call, usable as an expression or a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The callee name.
    pub name: Identifier,
    /// The argument expressions, in source order.
    pub arguments: Vec<Expression>,
    /// Source location.
    pub span: Span,
}

impl FunctionCall {
    fn node_count(&self) -> usize {
        1 + self
            .arguments
            .iter()
            .map(Expression::node_count)
            .sum::<usize>()
    }
}

/// A name in the source, stored case-folded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The lowercased name.
    pub name: EcoString,
    /// Source location.
    pub span: Span,
}

impl Identifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// An integer: `42`
    Number(i64),
    /// A floating-point number: `3.14`
    Decimal(f64),
    /// A string: `"hello"`
    Str(EcoString),
    /// A single character: `'a'`
    Character(char),
    /// A boolean: `true` / `false`
    Bool(bool),
    /// The `null` literal.
    Null,
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v} (number)"),
            Self::Decimal(v) => write!(f, "{v} (decimal)"),
            Self::Str(v) => write!(f, "\"{v}\" (word)"),
            Self::Character(v) => write!(f, "'{v}' (letter)"),
            Self::Bool(v) => write!(f, "{v} (bool)"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// The EasyCode data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// `number` — integers
    Number,
    /// `decimal` — floating point
    Decimal,
    /// `letter` — single characters
    Letter,
    /// `word` — strings
    Word,
    /// `bool`
    Bool,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::Decimal => "decimal",
            Self::Letter => "letter",
            Self::Word => "word",
            Self::Bool => "bool",
        };
        write!(f, "{name}")
    }
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `~` — integer division
    Quot,
    /// `^` — exponentiation
    Pow,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `&&` / `and`
    And,
    /// `||` / `or`
    Or,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Quot => "~",
            Self::Pow => "^",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
        };
        write!(f, "{symbol}")
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-` — negation
    Neg,
    /// `+` — identity
    Pos,
    /// `!` / `not` — logical not
    Not,
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Neg => "-",
            Self::Pos => "+",
            Self::Not => "!",
        };
        write!(f, "{symbol}")
    }
}

/// An assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
    /// `%=`
    Mod,
    /// `~=`
    Quot,
}

impl std::fmt::Display for AssignOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Mod => "%=",
            Self::Quot => "~=",
        };
        write!(f, "{symbol}")
    }
}

/// Renders an AST as an indented diagnostic tree.
///
/// One node per line: a type tag, the salient payload (name, value,
/// operator), and the node's `line:column`. Children are indented two
/// spaces per depth level.
pub struct TreePrinter<'a> {
    map: &'a SourceMap,
}

impl<'a> TreePrinter<'a> {
    /// Creates a printer that resolves spans through `map`.
    #[must_use]
    pub fn new(map: &'a SourceMap) -> Self {
        Self { map }
    }

    /// Renders the whole program.
    #[must_use]
    pub fn print(&self, program: &Program) -> String {
        let mut out = String::new();
        self.write_program(&mut out, program);
        out
    }

    fn location(&self, span: Span) -> String {
        self.map.position_of(span).to_string()
    }

    fn line(out: &mut String, depth: usize, text: &str) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(text);
        out.push('\n');
    }

    fn write_program(&self, out: &mut String, program: &Program) {
        Self::line(out, 0, "Program");
        for decl in &program.globals {
            self.write_declaration(out, decl, 1);
        }
        Self::line(
            out,
            1,
            &format!("Body ({} statements)", program.body.len()),
        );
        for stmt in &program.body {
            self.write_statement(out, stmt, 2);
        }
    }

    fn write_declaration(&self, out: &mut String, decl: &Declaration, depth: usize) {
        match decl {
            Declaration::Function(func) => {
                Self::line(
                    out,
                    depth,
                    &format!(
                        "FunctionDecl: {} {} ({})",
                        func.return_type,
                        func.name.name,
                        self.location(func.span)
                    ),
                );
                for param in &func.params {
                    Self::line(
                        out,
                        depth + 1,
                        &format!(
                            "Param: {} {} ({})",
                            param.data_type,
                            param.name.name,
                            self.location(param.span)
                        ),
                    );
                }
                self.write_block(out, &func.body, depth + 1);
            }
            Declaration::Variables { decls, .. } => {
                for var in decls {
                    self.write_var_decl(out, var, depth);
                }
            }
        }
    }

    fn write_var_decl(&self, out: &mut String, decl: &VarDecl, depth: usize) {
        let qualifier = if decl.is_const { "const " } else { "" };
        Self::line(
            out,
            depth,
            &format!(
                "VarDecl: {}{} {} ({})",
                qualifier,
                decl.data_type,
                decl.name.name,
                self.location(decl.span)
            ),
        );
        if let Some(init) = &decl.init {
            Self::line(out, depth + 1, "Init:");
            self.write_expression(out, init, depth + 2);
        }
    }

    fn write_block(&self, out: &mut String, block: &Block, depth: usize) {
        Self::line(
            out,
            depth,
            &format!(
                "Block ({} statements) ({})",
                block.statements.len(),
                self.location(block.span)
            ),
        );
        for stmt in &block.statements {
            self.write_statement(out, stmt, depth + 1);
        }
    }

    fn write_statement(&self, out: &mut String, stmt: &Statement, depth: usize) {
        match stmt {
            Statement::Decl(decl) => self.write_var_decl(out, decl, depth),
            Statement::DeclGroup { decls, .. } => {
                Self::line(
                    out,
                    depth,
                    &format!("DeclGroup ({} declarations)", decls.len()),
                );
                for decl in decls {
                    self.write_var_decl(out, decl, depth + 1);
                }
            }
            Statement::Assign {
                target, op, value, span,
            } => {
                Self::line(
                    out,
                    depth,
                    &format!("Assign: {} {} ({})", target.name, op, self.location(*span)),
                );
                self.write_expression(out, value, depth + 1);
            }
            Statement::Input {
                target,
                data_type,
                span,
            } => {
                Self::line(
                    out,
                    depth,
                    &format!(
                        "Input: {} = ask({}) ({})",
                        target.name,
                        data_type,
                        self.location(*span)
                    ),
                );
            }
            Statement::Output { value, span } => {
                Self::line(out, depth, &format!("Output ({})", self.location(*span)));
                self.write_expression(out, value, depth + 1);
            }
            Statement::Cond {
                condition,
                then_body,
                else_body,
                span,
            } => {
                Self::line(out, depth, &format!("If ({})", self.location(*span)));
                Self::line(out, depth + 1, "Condition:");
                self.write_expression(out, condition, depth + 2);
                Self::line(out, depth + 1, "Then:");
                self.write_statement(out, then_body, depth + 2);
                if let Some(else_body) = else_body {
                    Self::line(out, depth + 1, "Else:");
                    self.write_statement(out, else_body, depth + 2);
                }
            }
            Statement::Repeat {
                init,
                condition,
                increment,
                body,
                span,
            } => {
                Self::line(out, depth, &format!("Repeat ({})", self.location(*span)));
                Self::line(out, depth + 1, "Init:");
                self.write_statement(out, init, depth + 2);
                Self::line(out, depth + 1, "Condition:");
                self.write_expression(out, condition, depth + 2);
                Self::line(out, depth + 1, "Increment:");
                self.write_statement(out, increment, depth + 2);
                Self::line(out, depth + 1, "Body:");
                self.write_block(out, body, depth + 2);
            }
            Statement::Return { value, span } => {
                Self::line(out, depth, &format!("Return ({})", self.location(*span)));
                if let Some(value) = value {
                    self.write_expression(out, value, depth + 1);
                }
            }
            Statement::Continue { span } => {
                Self::line(out, depth, &format!("Continue ({})", self.location(*span)));
            }
            Statement::Stop { span } => {
                Self::line(out, depth, &format!("Stop ({})", self.location(*span)));
            }
            Statement::Block(block) => self.write_block(out, block, depth),
            Statement::Call(call) => self.write_call(out, call, depth),
            Statement::Error { message, span } => {
                Self::line(
                    out,
                    depth,
                    &format!("Error: {message} ({})", self.location(*span)),
                );
            }
        }
    }

    fn write_call(&self, out: &mut String, call: &FunctionCall, depth: usize) {
        Self::line(
            out,
            depth,
            &format!(
                "Call: {} ({} args) ({})",
                call.name.name,
                call.arguments.len(),
                self.location(call.span)
            ),
        );
        for arg in &call.arguments {
            self.write_expression(out, arg, depth + 1);
        }
    }

    fn write_expression(&self, out: &mut String, expr: &Expression, depth: usize) {
        match expr {
            Expression::Literal(literal, span) => {
                Self::line(
                    out,
                    depth,
                    &format!("Literal: {literal} ({})", self.location(*span)),
                );
            }
            Expression::Identifier(id) => {
                Self::line(
                    out,
                    depth,
                    &format!("Identifier: {} ({})", id.name, self.location(id.span)),
                );
            }
            Expression::Unary { op, operand, span } => {
                Self::line(
                    out,
                    depth,
                    &format!("Unary: {op} ({})", self.location(*span)),
                );
                self.write_expression(out, operand, depth + 1);
            }
            Expression::Binary {
                op, left, right, span,
            } => {
                Self::line(
                    out,
                    depth,
                    &format!("Binary: {op} ({})", self.location(*span)),
                );
                self.write_expression(out, left, depth + 1);
                self.write_expression(out, right, depth + 1);
            }
            Expression::Call(call) => self.write_call(out, call, depth),
            Expression::Ask { data_type, span } => {
                Self::line(
                    out,
                    depth,
                    &format!("Ask: {data_type} ({})", self.location(*span)),
                );
            }
            Expression::Sizeof { value, span } => {
                Self::line(out, depth, &format!("Sizeof ({})", self.location(*span)));
                self.write_expression(out, value, depth + 1);
            }
            Expression::Error { message, span } => {
                Self::line(
                    out,
                    depth,
                    &format!("Error: {message} ({})", self.location(*span)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier::new(name, Span::new(0, name.len() as u32))
    }

    #[test]
    fn operator_display() {
        assert_eq!(BinaryOp::Add.to_string(), "+");
        assert_eq!(BinaryOp::Quot.to_string(), "~");
        assert_eq!(BinaryOp::Pow.to_string(), "^");
        assert_eq!(BinaryOp::NotEq.to_string(), "!=");
        assert_eq!(UnaryOp::Not.to_string(), "!");
        assert_eq!(AssignOp::Quot.to_string(), "~=");
        assert_eq!(AssignOp::Assign.to_string(), "=");
        assert_eq!(DataType::Letter.to_string(), "letter");
    }

    #[test]
    fn literal_display() {
        assert_eq!(Literal::Number(10).to_string(), "10 (number)");
        assert_eq!(Literal::Str("hi".into()).to_string(), "\"hi\" (word)");
        assert_eq!(Literal::Character('c').to_string(), "'c' (letter)");
        assert_eq!(Literal::Bool(true).to_string(), "true (bool)");
        assert_eq!(Literal::Null.to_string(), "null");
    }

    #[test]
    fn expression_span_and_error() {
        let expr = Expression::Binary {
            op: BinaryOp::Add,
            left: Box::new(Expression::Identifier(ident("x"))),
            right: Box::new(Expression::Literal(Literal::Number(5), Span::new(4, 5))),
            span: Span::new(0, 5),
        };
        assert_eq!(expr.span(), Span::new(0, 5));
        assert!(!expr.is_error());

        let err = Expression::Error {
            message: "expected expression".into(),
            span: Span::new(3, 3),
        };
        assert!(err.is_error());
    }

    #[test]
    fn node_count_visits_each_node_once() {
        // show(x + 5) inside the main body:
        //   Program(1) + Output(1) + Binary(1) + Identifier(1) + Literal(1) = 5
        let program = Program::new(
            Vec::new(),
            vec![Statement::Output {
                value: Expression::Binary {
                    op: BinaryOp::Add,
                    left: Box::new(Expression::Identifier(ident("x"))),
                    right: Box::new(Expression::Literal(Literal::Number(5), Span::new(0, 1))),
                    span: Span::new(0, 5),
                },
                span: Span::new(0, 10),
            }],
            Span::new(0, 10),
        );
        assert_eq!(program.node_count(), 5);
    }

    #[test]
    fn node_count_covers_declarations_and_blocks() {
        // Program(1) + FunctionDecl(1) + param(1) + Block(1) + Return(1) +
        // Identifier(1) + Variables(1) + VarDecl(1) + Literal(1) = 9
        let func = Declaration::Function(FunctionDecl {
            return_type: DataType::Number,
            name: ident("double"),
            params: vec![Parameter {
                data_type: DataType::Number,
                name: ident("n"),
                span: Span::new(0, 8),
            }],
            body: Block {
                statements: vec![Statement::Return {
                    value: Some(Expression::Identifier(ident("n"))),
                    span: Span::new(0, 9),
                }],
                span: Span::new(0, 12),
            },
            span: Span::new(0, 20),
        });
        let globals = Declaration::Variables {
            decls: vec![VarDecl {
                data_type: DataType::Number,
                name: ident("g"),
                init: Some(Expression::Literal(Literal::Number(1), Span::new(0, 1))),
                is_const: true,
                span: Span::new(0, 10),
            }],
            span: Span::new(0, 10),
        };
        let program = Program::new(vec![func, globals], Vec::new(), Span::new(0, 30));
        assert_eq!(program.node_count(), 9);
    }

    #[test]
    fn tree_printer_renders_nested_structure() {
        let source = "start number x = 10; end";
        let map = SourceMap::new(source);
        let program = Program::new(
            Vec::new(),
            vec![Statement::Decl(VarDecl {
                data_type: DataType::Number,
                name: Identifier::new("x", Span::new(13, 14)),
                init: Some(Expression::Literal(Literal::Number(10), Span::new(17, 19))),
                is_const: false,
                span: Span::new(6, 19),
            })],
            Span::new(0, source.len() as u32),
        );

        let tree = TreePrinter::new(&map).print(&program);
        let lines: Vec<_> = tree.lines().collect();
        assert_eq!(lines[0], "Program");
        assert_eq!(lines[1], "  Body (1 statements)");
        assert_eq!(lines[2], "    VarDecl: number x (1:7)");
        assert_eq!(lines[3], "      Init:");
        assert_eq!(lines[4], "        Literal: 10 (number) (1:18)");
    }
}
