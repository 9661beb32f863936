//! Error types for WTFScript
//!
//! Every error carries the source position of the token or node that
//! triggered it and renders as `[Line L, Col C] <phase> error: <message>`.

use crate::token::{Span, TokenKind};
use std::fmt;
use thiserror::Error;

/// Pipeline stage an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexical,
    Parser,
    Runtime,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Lexical => write!(f, "lexical"),
            Phase::Parser => write!(f, "parser"),
            Phase::Runtime => write!(f, "runtime"),
        }
    }
}

/// Error kinds in WTFScript
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    // Lexer errors
    #[error("{0}")]
    Lexical(String),

    // Parser errors
    #[error("Illegal token: {0}")]
    IllegalToken(String),
    #[error("expected next token to be {expected}, got {got} instead")]
    ExpectedToken { expected: TokenKind, got: TokenKind },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),
    #[error("could not parse {0:?} as integer")]
    IntegerParseFailure(String),
    #[error("could not parse {0:?} as float")]
    FloatParseFailure(String),
    #[error("nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),

    // Runtime errors
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("variable not defined: {0}")]
    VariableNotDefined(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("type mismatch: {left} and {right}")]
    TypeMismatch { left: String, right: String },
    #[error("unknown operator or type: {left} {op} {right}")]
    UnknownOperator { op: String, left: String, right: String },
    #[error("unknown unary operator: {op} {operand}")]
    UnknownUnaryOperator { op: String, operand: String },
    #[error("function not found: {0}")]
    FunctionNotFound(String),
    #[error("invalid function call: {0}")]
    InvalidFunctionCall(String),
    #[error("{0}")]
    InvalidRange(String),
    #[error("cannot assign {0} to uint: value must be non-negative")]
    NegativeUintAssignment(i64),
    #[error("cannot assign {0:.6} to unofloat: value out of range [0.0, 1.0]")]
    InvalidUnofloatAssignment(f64),

    // Generic runtime error
    #[error("{0}")]
    Runtime(String),
}

impl ErrorKind {
    pub fn phase(&self) -> Phase {
        match self {
            ErrorKind::Lexical(_) => Phase::Lexical,
            ErrorKind::IllegalToken(_)
            | ErrorKind::ExpectedToken { .. }
            | ErrorKind::NoPrefixParseFn(_)
            | ErrorKind::IntegerParseFailure(_)
            | ErrorKind::FloatParseFailure(_)
            | ErrorKind::NestingTooDeep(_) => Phase::Parser,
            _ => Phase::Runtime,
        }
    }
}

/// A WTFScript error with location information
#[derive(Debug, Clone, PartialEq)]
pub struct WtfError {
    pub kind: ErrorKind,
    pub span: Span,
    pub source_line: Option<String>,
}

impl WtfError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            source_line: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.kind.phase()
    }

    /// Attach the offending source line so the error renders with a caret
    pub fn with_source(mut self, source: &str) -> Self {
        if self.span.line > 0 {
            self.source_line = source.lines().nth(self.span.line - 1).map(str::to_string);
        }
        self
    }
}

impl fmt::Display for WtfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Line {}, Col {}] {} error: {}",
            self.span.line,
            self.span.column,
            self.phase(),
            self.kind
        )?;

        if let Some(ref line) = self.source_line {
            write!(f, "\n  | {}", line)?;
            write!(f, "\n  | {}^", " ".repeat(self.span.column.saturating_sub(1)))?;
        }
        Ok(())
    }
}

impl std::error::Error for WtfError {}

/// Result type for WTFScript operations
pub type Result<T> = std::result::Result<T, WtfError>;
