//! Abstract Syntax Tree definitions for WTFScript
//!
//! Represents the structure of programs after parsing. `Display` renders
//! the canonical fully parenthesized form, which the parser tests compare
//! against.

use crate::token::Span;
use crate::types::VarType;
use std::fmt;

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Variable reference: foo
    Ident(Identifier),

    /// Integer literal: 42, -7
    Int { value: i64, literal: String, span: Span },

    /// Float literal: 3.14
    Float { value: f64, literal: String, span: Span },

    /// String literal: "hello". `literal` keeps the quotes and escapes
    Str { value: String, literal: String, span: Span },

    /// Boolean literal: true, false
    Bool { value: bool, span: Span },

    /// Binary operation: a + b, x && y. The span is the operator's.
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },

    /// Unary operation: -x, !y
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },

    /// Function call: foo(a, b). The span is the `(` token's.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident(ident) => ident.span,
            Expr::Int { span, .. } => *span,
            Expr::Float { span, .. } => *span,
            Expr::Str { span, .. } => *span,
            Expr::Bool { span, .. } => *span,
            Expr::Binary { span, .. } => *span,
            Expr::Unary { span, .. } => *span,
            Expr::Call { span, .. } => *span,
        }
    }

    /// Literals and bare identifiers are checked strictly when stored into
    /// a typed variable; anything computed is clamped or wrapped instead.
    pub fn is_strict_source(&self) -> bool {
        matches!(
            self,
            Expr::Ident(_) | Expr::Int { .. } | Expr::Float { .. } | Expr::Str { .. } | Expr::Bool { .. }
        )
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(ident) => write!(f, "{}", ident),
            Expr::Int { literal, .. } | Expr::Float { literal, .. } | Expr::Str { literal, .. } => {
                write!(f, "{}", literal)
            }
            Expr::Bool { value, .. } => write!(f, "{}", value),
            Expr::Binary { left, op, right, .. } => write!(f, "({} {} {})", left, op, right),
            Expr::Unary { op, operand, .. } => write!(f, "({}{})", op, operand),
            Expr::Call { callee, args, .. } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", callee, args.join(", "))
            }
        }
    }
}

/// A named reference with the position of its token
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self { name: name.into(), span }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,   // +
    Sub,   // -
    Mul,   // *
    Div,   // /
    Eq,    // ==
    NotEq, // !=
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=
    And,   // &&
    Or,    // ||
}

impl BinaryOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Eq => write!(f, "=="),
            BinaryOp::NotEq => write!(f, "!="),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::LtEq => write!(f, "<="),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::GtEq => write!(f, ">="),
            BinaryOp::And => write!(f, "&&"),
            BinaryOp::Or => write!(f, "||"),
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, // -
    Not, // !
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

/// Inclusive generation range of a declaration: `int(0, 100) x;`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBounds {
    pub min: Expr,
    pub max: Expr,
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Typed declaration: int(0, 10) x = 5;
    VarDecl {
        var_type: VarType,
        range: Option<RangeBounds>,
        name: Identifier,
        value: Option<Expr>,
        span: Span,
    },

    /// Assignment to an existing variable: x = 5;
    Assign {
        name: Identifier,
        value: Expr,
        span: Span,
    },

    /// Expression statement
    Expr { expr: Expr },

    /// if / ifrand statement
    If(IfStmt),
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::VarDecl { var_type, range, name, value, .. } => {
                write!(f, "{}", var_type)?;
                if let Some(range) = range {
                    write!(f, "({}, {})", range.min, range.max)?;
                }
                write!(f, " {}", name)?;
                if let Some(value) = value {
                    write!(f, " = {}", value)?;
                }
                write!(f, ";")
            }
            Stmt::Assign { name, value, .. } => write!(f, "{} = {};", name, value),
            Stmt::Expr { expr } => write!(f, "{}", expr),
            Stmt::If(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Block: { stmt* }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for stmt in &self.stmts {
            write!(f, "{} ", stmt)?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfKind {
    If,
    IfRand,
}

/// `if (cond) { } else ...` or `ifrand [(p)] { } else ...`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub kind: IfKind,
    /// The boolean condition for `if`, the optional probability for `ifrand`
    pub condition: Option<Expr>,
    pub consequence: Block,
    pub alternative: Option<Box<ElseBranch>>,
    pub span: Span,
}

impl fmt::Display for IfStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IfKind::If => write!(f, "if")?,
            IfKind::IfRand => write!(f, "ifrand")?,
        }
        if let Some(condition) = &self.condition {
            write!(f, " ({})", condition)?;
        }
        write!(f, " {}", self.consequence)?;
        if let Some(alternative) = &self.alternative {
            match alternative.as_ref() {
                ElseBranch::If(stmt) => write!(f, " else {}", stmt)?,
                ElseBranch::Block(block) => write!(f, " else {}", block)?,
            }
        }
        Ok(())
    }
}

/// What follows `else`
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    If(IfStmt),
    Block(Block),
}

/// A complete program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
