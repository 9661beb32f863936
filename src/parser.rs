//! Parser for WTFScript
//!
//! Pulls tokens from a live [`Lexer`] and builds the AST with
//! precedence climbing. Errors do not stop the parse: each one is
//! recorded, the parser skips to the next statement boundary and carries
//! on, so one pass reports every independent syntax error.

use crate::ast::{
    BinaryOp, Block, ElseBranch, Expr, Identifier, IfKind, IfStmt, Program, RangeBounds, Stmt,
    UnaryOp,
};
use crate::error::{ErrorKind, Result, WtfError};
use crate::lexer::Lexer;
use crate::token::{Precedence, Token, TokenKind};
use crate::types::VarType;

/// Deepest nesting of expressions, blocks and `if` chains the parser accepts
pub const MAX_NESTING_DEPTH: usize = 128;

/// The parser state
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Next unconsumed token
    cur: Token,
    /// One token of lookahead past `cur`
    peek: Token,
    errors: Vec<WtfError>,
    /// Current nesting of expressions, blocks and ifs
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser reading from `lexer`
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let mut errors = Vec::new();
        let cur = Self::pull(&mut lexer, &mut errors);
        let peek = Self::pull(&mut lexer, &mut errors);
        Self { lexer, cur, peek, errors, depth: 0 }
    }

    /// Parse the whole token stream into a program. Check
    /// [`Parser::into_errors`] before evaluating the result.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            self.statement_or_recover(&mut statements);
        }

        Program::new(statements)
    }

    /// Errors collected so far, in source order
    pub fn into_errors(self) -> Vec<WtfError> {
        self.errors
    }

    // ==================== Statements ====================

    fn statement_or_recover(&mut self, out: &mut Vec<Stmt>) {
        let start = self.cur.span.start;
        match self.statement() {
            Ok(Some(stmt)) => out.push(stmt),
            Ok(None) => {}
            Err(err) => {
                self.errors.push(err);
                self.synchronize(start);
            }
        }
    }

    fn statement(&mut self) -> Result<Option<Stmt>> {
        let stmt = match &self.cur.kind {
            kind if kind.is_type_keyword() => self.var_declaration()?,
            TokenKind::If | TokenKind::IfRand => Stmt::If(self.if_statement()?),
            TokenKind::Ident if self.peek.kind == TokenKind::Assign => self.assign_statement()?,
            TokenKind::Semicolon => {
                // stray ';'
                self.advance();
                return Ok(None);
            }
            _ => {
                let expr = self.expression(Precedence::Lowest)?;
                Stmt::Expr { expr }
            }
        };

        // trailing ';' is optional
        self.match_token(&TokenKind::Semicolon);
        Ok(Some(stmt))
    }

    fn var_declaration(&mut self) -> Result<Stmt> {
        let type_token = self.advance(); // consume type keyword
        let var_type = VarType::from_token(&type_token.kind);

        let range = if self.match_token(&TokenKind::LParen) {
            let min = self.expression(Precedence::Lowest)?;
            self.expect(TokenKind::Comma)?;
            let max = self.expression(Precedence::Lowest)?;
            self.expect(TokenKind::RParen)?;
            Some(RangeBounds { min, max })
        } else {
            None
        };

        let name = self.expect_ident()?;

        let value = if self.match_token(&TokenKind::Assign) {
            Some(self.expression(Precedence::Lowest)?)
        } else {
            None
        };

        Ok(Stmt::VarDecl { var_type, range, name, value, span: type_token.span })
    }

    fn assign_statement(&mut self) -> Result<Stmt> {
        let name = self.expect_ident()?;
        let span = self.advance().span; // consume '='
        let value = self.expression(Precedence::Lowest)?;

        Ok(Stmt::Assign { name, value, span })
    }

    fn if_statement(&mut self) -> Result<IfStmt> {
        self.nested(Self::if_statement_inner)
    }

    fn if_statement_inner(&mut self) -> Result<IfStmt> {
        let keyword = self.advance(); // consume 'if' / 'ifrand'

        let (kind, condition) = if keyword.kind == TokenKind::IfRand {
            let probability = if self.match_token(&TokenKind::LParen) {
                let expr = self.expression(Precedence::Lowest)?;
                self.expect(TokenKind::RParen)?;
                Some(expr)
            } else {
                None
            };
            (IfKind::IfRand, probability)
        } else {
            self.expect(TokenKind::LParen)?;
            let condition = self.expression(Precedence::Lowest)?;
            self.expect(TokenKind::RParen)?;
            (IfKind::If, Some(condition))
        };

        let consequence = self.block()?;

        let alternative = if self.match_token(&TokenKind::Else) {
            let branch = if self.check(&TokenKind::If) || self.check(&TokenKind::IfRand) {
                ElseBranch::If(self.if_statement()?)
            } else {
                ElseBranch::Block(self.block()?)
            };
            Some(Box::new(branch))
        } else {
            None
        };

        Ok(IfStmt { kind, condition, consequence, alternative, span: keyword.span })
    }

    fn block(&mut self) -> Result<Block> {
        self.nested(Self::block_inner)
    }

    fn block_inner(&mut self) -> Result<Block> {
        let span = self.expect(TokenKind::LBrace)?.span;

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            self.statement_or_recover(&mut stmts);
        }

        self.expect(TokenKind::RBrace)?;
        Ok(Block { stmts, span })
    }

    // ==================== Expressions ====================

    fn expression(&mut self, precedence: Precedence) -> Result<Expr> {
        self.nested(|parser| parser.expression_inner(precedence))
    }

    fn expression_inner(&mut self, precedence: Precedence) -> Result<Expr> {
        let mut left = self.prefix()?;

        while !self.check(&TokenKind::Semicolon) && precedence < self.cur.kind.precedence() {
            left = self.infix(left)?;
        }

        Ok(left)
    }

    fn prefix(&mut self) -> Result<Expr> {
        let token = self.advance();

        match token.kind {
            TokenKind::Ident => Ok(Expr::Ident(Identifier::new(token.lexeme, token.span))),

            TokenKind::Int => match token.lexeme.parse::<i64>() {
                Ok(value) => Ok(Expr::Int { value, literal: token.lexeme, span: token.span }),
                Err(_) => Err(WtfError::new(ErrorKind::IntegerParseFailure(token.lexeme), token.span)),
            },

            TokenKind::Float => match token.lexeme.parse::<f64>() {
                Ok(value) => Ok(Expr::Float { value, literal: token.lexeme, span: token.span }),
                Err(_) => Err(WtfError::new(ErrorKind::FloatParseFailure(token.lexeme), token.span)),
            },

            TokenKind::String => Ok(Expr::Str {
                value: unescape(&token.lexeme),
                literal: token.lexeme,
                span: token.span,
            }),

            TokenKind::True => Ok(Expr::Bool { value: true, span: token.span }),
            TokenKind::False => Ok(Expr::Bool { value: false, span: token.span }),

            TokenKind::Bang | TokenKind::Minus => {
                let op = if token.kind == TokenKind::Bang { UnaryOp::Not } else { UnaryOp::Neg };
                let operand = self.expression(Precedence::Prefix)?;
                Ok(Expr::Unary { op, operand: Box::new(operand), span: token.span })
            }

            TokenKind::LParen => {
                let expr = self.expression(Precedence::Lowest)?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }

            TokenKind::Illegal(_) => {
                Err(WtfError::new(ErrorKind::IllegalToken(token.lexeme), token.span))
            }

            kind => Err(WtfError::new(ErrorKind::NoPrefixParseFn(kind), token.span)),
        }
    }

    fn infix(&mut self, left: Expr) -> Result<Expr> {
        if self.check(&TokenKind::LParen) {
            return self.finish_call(left);
        }

        let token = self.advance();
        let precedence = token.kind.precedence();
        let op = match token.kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Asterisk => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Eq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::And => BinaryOp::And,
            TokenKind::Or => BinaryOp::Or,
            kind => return Err(WtfError::new(ErrorKind::NoPrefixParseFn(kind), token.span)),
        };

        let right = self.expression(precedence)?;

        Ok(Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
            span: token.span,
        })
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr> {
        let span = self.advance().span; // consume '('

        let mut args = Vec::new();
        if !self.match_token(&TokenKind::RParen) {
            loop {
                args.push(self.expression(Precedence::Lowest)?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
        }

        Ok(Expr::Call { callee: Box::new(callee), args, span })
    }

    // ==================== Helpers ====================

    /// Run `parse` one nesting level deeper, failing at the depth limit
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(WtfError::new(ErrorKind::NestingTooDeep(MAX_NESTING_DEPTH), self.cur.span));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Pull the next token, recording ILLEGAL tokens as lexical errors
    fn pull(lexer: &mut Lexer<'a>, errors: &mut Vec<WtfError>) -> Token {
        let token = lexer.next_token();
        if let TokenKind::Illegal(message) = &token.kind {
            errors.push(WtfError::new(ErrorKind::Lexical(message.clone()), token.span));
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.cur.kind == TokenKind::Eof
    }

    /// Consume `cur` and return it
    fn advance(&mut self) -> Token {
        let next = Self::pull(&mut self.lexer, &mut self.errors);
        let peek = std::mem::replace(&mut self.peek, next);
        std::mem::replace(&mut self.cur, peek)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.cur.kind == kind
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(WtfError::new(
                ErrorKind::ExpectedToken { expected: kind, got: self.cur.kind.clone() },
                self.cur.span,
            ))
        }
    }

    fn expect_ident(&mut self) -> Result<Identifier> {
        let token = self.expect(TokenKind::Ident)?;
        Ok(Identifier::new(token.lexeme, token.span))
    }

    /// Skip to the next statement boundary after an error. Always makes
    /// progress past `start`, the position the failed statement began at.
    fn synchronize(&mut self, start: usize) {
        loop {
            match &self.cur.kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                kind if self.cur.span.start != start
                    && (kind.is_type_keyword()
                        || matches!(kind, TokenKind::If | TokenKind::IfRand | TokenKind::RBrace)) =>
                {
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}

/// Contents of a string literal token: quotes dropped, escapes resolved.
/// Tolerates a missing closing quote.
fn unescape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars().skip(1);

    while let Some(c) = chars.next() {
        match c {
            '"' => break,
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => {}
            },
            _ => out.push(c),
        }
    }

    out
}

/// Parse source text in one go. Returns the program together with any errors.
pub fn parse(source: &str) -> (Program, Vec<WtfError>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.into_errors())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Program {
        let (program, errors) = parse(source);
        assert!(errors.is_empty(), "parser errors for {:?}: {:?}", source, errors);
        program
    }

    fn single_expr(source: &str) -> Expr {
        let program = parse_ok(source);
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Stmt::Expr { expr } => expr.clone(),
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_var_statements() {
        for (input, name, value) in [
            ("int x = 5;", "x", "5"),
            ("float y = 3.14;", "y", "3.14"),
            ("string foobar = \"hi\";", "foobar", "\"hi\""),
            ("bool b = true;", "b", "true"),
        ] {
            let program = parse_ok(input);
            match &program.statements[0] {
                Stmt::VarDecl { name: n, value: Some(v), range: None, .. } => {
                    assert_eq!(n.name, name);
                    assert_eq!(v.to_string(), value);
                }
                other => panic!("expected declaration, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_var_statement_with_range() {
        let program = parse_ok("int(0, 100) x = 5;");
        assert_eq!(program.to_string(), "int(0, 100) x = 5;");
        match &program.statements[0] {
            Stmt::VarDecl { var_type, range: Some(range), .. } => {
                assert_eq!(*var_type, VarType::Int);
                assert_eq!(range.min.to_string(), "0");
                assert_eq!(range.max.to_string(), "100");
            }
            other => panic!("expected ranged declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_all_type_declarations() {
        for (input, expected) in [
            ("int x;", VarType::Int),
            ("uint x;", VarType::Uint),
            ("float x;", VarType::Float),
            ("unofloat x;", VarType::Unofloat),
            ("bool x;", VarType::Bool),
            ("string x;", VarType::String),
        ] {
            let program = parse_ok(input);
            match &program.statements[0] {
                Stmt::VarDecl { var_type, value: None, range: None, .. } => {
                    assert_eq!(*var_type, expected)
                }
                other => panic!("expected bare declaration, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_range_declarations_accept_any_type() {
        for input in ["float(0.0, 1.5) f;", "uint(1, 2) u;", "string(1, 2) s;"] {
            let program = parse_ok(input);
            assert!(matches!(&program.statements[0], Stmt::VarDecl { range: Some(_), .. }));
        }
    }

    #[test]
    fn test_assignment_statement() {
        let program = parse_ok("x = 5;");
        assert_eq!(program.to_string(), "x = 5;");
        assert!(matches!(&program.statements[0], Stmt::Assign { .. }));
    }

    #[test]
    fn test_operator_precedence() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)(-5 * 5)"),
            ("3 + 4; (-5) * 5", "(3 + 4)(-5 * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
            ("false || true && false", "(false || (true && false))"),
            ("a == b && c != d", "((a == b) && (c != d))"),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_ok(input).to_string(), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_operator_mixing() {
        let program = parse_ok("bool result = x > 5 && y < 10 || z == 15;");
        assert_eq!(
            program.to_string(),
            "bool result = (((x > 5) && (y < 10)) || (z == 15));"
        );
    }

    #[test]
    fn test_comparison_and_logical_operators() {
        for (input, op) in [
            ("a == b", BinaryOp::Eq),
            ("a != b", BinaryOp::NotEq),
            ("a < b", BinaryOp::Lt),
            ("a <= b", BinaryOp::LtEq),
            ("a > b", BinaryOp::Gt),
            ("a >= b", BinaryOp::GtEq),
            ("a && b", BinaryOp::And),
            ("a || b", BinaryOp::Or),
        ] {
            match single_expr(input) {
                Expr::Binary { op: actual, .. } => assert_eq!(actual, op, "input: {}", input),
                other => panic!("expected binary, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unary_operator() {
        match single_expr("-x") {
            Expr::Unary { op, operand, .. } => {
                assert_eq!(op, UnaryOp::Neg);
                assert_eq!(operand.to_string(), "x");
            }
            other => panic!("expected unary, got {:?}", other),
        }
    }

    #[test]
    fn test_if_statement() {
        let program = parse_ok("if (x > 5) { y = 10; }");
        match &program.statements[0] {
            Stmt::If(stmt) => {
                assert_eq!(stmt.kind, IfKind::If);
                assert_eq!(stmt.condition.as_ref().map(|c| c.to_string()).as_deref(), Some("(x > 5)"));
                assert_eq!(stmt.consequence.stmts.len(), 1);
                assert!(stmt.alternative.is_none());
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_if_else_chain() {
        let program = parse_ok("if (a) { x = 1; } else if (b) { x = 2; } else ifrand { x = 3; } else { x = 4; }");
        let Stmt::If(stmt) = &program.statements[0] else {
            panic!("expected if statement");
        };
        let Some(ElseBranch::If(second)) = stmt.alternative.as_deref() else {
            panic!("expected else-if");
        };
        let Some(ElseBranch::If(third)) = second.alternative.as_deref() else {
            panic!("expected else-ifrand");
        };
        assert_eq!(third.kind, IfKind::IfRand);
        assert!(third.condition.is_none());
        assert!(matches!(third.alternative.as_deref(), Some(ElseBranch::Block(_))));
    }

    #[test]
    fn test_ifrand_statement() {
        let program = parse_ok("ifrand { x = 1; }");
        match &program.statements[0] {
            Stmt::If(stmt) => {
                assert_eq!(stmt.kind, IfKind::IfRand);
                assert!(stmt.condition.is_none());
            }
            other => panic!("expected ifrand, got {:?}", other),
        }
    }

    #[test]
    fn test_ifrand_with_probability() {
        let program = parse_ok("ifrand(0.75) { x = 1; } else { x = 2; }");
        assert_eq!(program.to_string(), "ifrand (0.75) { x = 1; } else { x = 2; }");
    }

    #[test]
    fn test_if_requires_parens() {
        let (_, errors) = parse("if x { y = 1; }");
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_function_calls() {
        match single_expr("foo();") {
            Expr::Call { callee, args, .. } => {
                assert_eq!(callee.to_string(), "foo");
                assert!(args.is_empty());
            }
            other => panic!("expected call, got {:?}", other),
        }

        match single_expr("print(x, y, 42);") {
            Expr::Call { args, .. } => assert_eq!(args.len(), 3),
            other => panic!("expected call, got {:?}", other),
        }

        match single_expr("print(typeof(x));") {
            Expr::Call { args, .. } => assert!(matches!(args[0], Expr::Call { .. })),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_string_literal_unescaped() {
        match single_expr(r#""a\tb\n\"q\"\\""#) {
            Expr::Str { value, literal, .. } => {
                assert_eq!(value, "a\tb\n\"q\"\\");
                assert_eq!(literal, r#""a\tb\n\"q\"\\""#);
            }
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_semicolons_are_optional() {
        let program = parse_ok("int x = 1 int y = 2\nx = y");
        assert_eq!(program.statements.len(), 3);
        let program = parse_ok(";;int x;;");
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_complex_program() {
        let program = parse_ok(
            r#"
            int x = 5;
            float(0.0, 10.0) y;
            unofloat p = 0.5;
            string s = "hello";
            if (x > 3) {
                print(s);
            } else {
                x = x + 1;
            }
            ifrand(p) { print(y); }
            "#,
        );
        assert!(program.statements.len() >= 5);
    }

    #[test]
    fn test_missing_rparen_is_reported() {
        let (_, errors) = parse("int x = (5 + 3;");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].kind,
            ErrorKind::ExpectedToken { expected: TokenKind::RParen, got: TokenKind::Semicolon }
        );
        assert_eq!(errors[0].span.column, 15);
    }

    #[test]
    fn test_multiple_errors_in_one_pass() {
        let (_, errors) = parse("int x = ;\nint = 5;\nfloat y = 2.0;\nint z = );");
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].span.line, 1);
        assert_eq!(errors[1].span.line, 2);
        assert_eq!(errors[2].span.line, 4);
        assert!(matches!(errors[0].kind, ErrorKind::NoPrefixParseFn(TokenKind::Semicolon)));
    }

    #[test]
    fn test_numeric_literal_failures() {
        let (_, errors) = parse("int x = 99999999999999999999;");
        assert!(matches!(errors[0].kind, ErrorKind::IntegerParseFailure(_)));

        let (_, errors) = parse("float y = 1.2.3;");
        assert_eq!(errors[0].kind, ErrorKind::FloatParseFailure("1.2.3".into()));
        assert_eq!(errors[0].to_string(), "[Line 1, Col 11] parser error: could not parse \"1.2.3\" as float");
    }

    #[test]
    fn test_illegal_tokens_become_errors() {
        let (_, errors) = parse("int x = @;");
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0].kind, ErrorKind::Lexical(_)));
        assert_eq!(errors[1].kind, ErrorKind::IllegalToken("@".into()));
        assert_eq!(errors[1].span.column, 9);
    }

    #[test]
    fn test_unterminated_string_is_lexical_error() {
        let (_, errors) = parse("string s = \"hello");
        assert!(errors
            .iter()
            .any(|e| matches!(&e.kind, ErrorKind::Lexical(m) if m.contains("unterminated"))));
    }

    #[test]
    fn test_unclosed_block() {
        let (_, errors) = parse("if (true) { x = 1;");
        assert_eq!(
            errors.last().map(|e| e.kind.clone()),
            Some(ErrorKind::ExpectedToken { expected: TokenKind::RBrace, got: TokenKind::Eof })
        );
    }

    #[test]
    fn test_stray_rbrace_does_not_hang() {
        let (program, errors) = parse("} int x = 1;");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_deep_parentheses_are_rejected() {
        let depth = 5000;
        let source = format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth));
        let (_, errors) = parse(&source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::NestingTooDeep(MAX_NESTING_DEPTH));
        // the first '(' past the limit
        assert_eq!(errors[0].span.column, 8 + MAX_NESTING_DEPTH + 1);
    }

    #[test]
    fn test_deep_unary_chain_is_rejected() {
        let source = format!("bool b = {}true;", "! ".repeat(1000));
        let (_, errors) = parse(&source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::NestingTooDeep(MAX_NESTING_DEPTH));
    }

    #[test]
    fn test_nesting_below_limit_parses() {
        let depth = MAX_NESTING_DEPTH / 2;
        let source = format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth));
        parse_ok(&source);
    }

    #[test]
    fn test_deep_if_nesting_is_rejected() {
        let depth = 1000;
        let source = format!("{}int x = 1;{}", "if (true) { ".repeat(depth), "}".repeat(depth));
        let (_, errors) = parse(&source);
        assert!(errors
            .iter()
            .any(|e| e.kind == ErrorKind::NestingTooDeep(MAX_NESTING_DEPTH)));
        assert!(errors.iter().all(|e| e.phase() == crate::error::Phase::Parser));
    }

    #[test]
    fn test_empty_and_comment_only_programs() {
        assert!(parse_ok("").statements.is_empty());
        assert!(parse_ok("// nothing\n// here\n").statements.is_empty());
    }
}
