//! Lexer for WTFScript
//!
//! Converts source code into tokens, one at a time. The parser pulls
//! tokens on demand with [`Lexer::next_token`]; nothing is buffered
//! except the single ILLEGAL token queued behind an unterminated string.
//!
//! A `-` directly followed by a digit is always folded into the number
//! literal, so `5-3` scans as `5` and `-3`. Programs rely on this, keep it.

use crate::token::{lookup_keyword, Span, Token, TokenKind};

/// The lexer state
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    column: usize,
    pending: Option<Token>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from source code
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
            pending: None,
            finished: false,
        }
    }

    /// Tokenize the entire source, EOF included
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Produce the next token. Once the input is exhausted every call
    /// returns EOF.
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pending.take() {
            return token;
        }

        self.skip_whitespace_and_comments();

        let Some(&(start_pos, ch)) = self.chars.peek() else {
            self.finished = true;
            return Token::new(
                TokenKind::Eof,
                Span::new(self.current_pos, self.current_pos, self.line, self.column),
                String::new(),
            );
        };

        let start_line = self.line;
        let start_column = self.column;

        let kind = match ch {
            // Single character tokens
            '(' => { self.advance(); TokenKind::LParen }
            ')' => { self.advance(); TokenKind::RParen }
            '{' => { self.advance(); TokenKind::LBrace }
            '}' => { self.advance(); TokenKind::RBrace }
            ',' => { self.advance(); TokenKind::Comma }
            ';' => { self.advance(); TokenKind::Semicolon }
            '+' => { self.advance(); TokenKind::Plus }
            '*' => { self.advance(); TokenKind::Asterisk }
            '/' => { self.advance(); TokenKind::Slash }

            '-' => {
                self.advance();
                if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number()
                } else {
                    TokenKind::Minus
                }
            }

            // Potentially two-character tokens
            '=' => {
                self.advance();
                if self.match_char('=') { TokenKind::Eq } else { TokenKind::Assign }
            }
            '!' => {
                self.advance();
                if self.match_char('=') { TokenKind::NotEq } else { TokenKind::Bang }
            }
            '<' => {
                self.advance();
                if self.match_char('=') { TokenKind::LtEq } else { TokenKind::Lt }
            }
            '>' => {
                self.advance();
                if self.match_char('=') { TokenKind::GtEq } else { TokenKind::Gt }
            }
            '&' => {
                self.advance();
                if self.match_char('&') {
                    TokenKind::And
                } else {
                    TokenKind::Illegal("unexpected character '&', did you mean '&&'?".to_string())
                }
            }
            '|' => {
                self.advance();
                if self.match_char('|') {
                    TokenKind::Or
                } else {
                    TokenKind::Illegal("unexpected character '|', did you mean '||'?".to_string())
                }
            }

            '"' => {
                let terminated = self.scan_string();
                if !terminated {
                    self.pending = Some(Token::new(
                        TokenKind::Illegal("unterminated string literal".to_string()),
                        Span::new(start_pos, self.current_pos, start_line, start_column),
                        self.source[start_pos..self.current_pos].to_string(),
                    ));
                }
                TokenKind::String
            }

            c if c.is_ascii_digit() => self.scan_number(),

            c if c.is_alphabetic() || c == '_' => self.scan_identifier(),

            _ => {
                self.advance();
                TokenKind::Illegal(format!("unexpected character '{}'", ch))
            }
        };

        let lexeme = self.source[start_pos..self.current_pos].to_string();

        Token::new(
            kind,
            Span::new(start_pos, self.current_pos, start_line, start_column),
            lexeme,
        )
    }

    /// Advance and return the current character
    fn advance(&mut self) -> Option<char> {
        let (pos, ch) = self.chars.next()?;
        self.current_pos = pos + ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Peek at the next character without advancing
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and `//` comments
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }

                '/' if self.source[self.current_pos..].starts_with("//") => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }

                _ => break,
            }
        }
    }

    /// Scan a string literal. The token text keeps the quotes and escapes;
    /// unescaping is the parser's job. Returns false when input ran out
    /// before the closing quote.
    fn scan_string(&mut self) -> bool {
        // Consume opening quote
        self.advance();

        loop {
            match self.peek_char() {
                Some('"') => {
                    self.advance();
                    return true;
                }
                Some('\\') => {
                    self.advance();
                    if self.advance().is_none() {
                        return false;
                    }
                }
                Some(_) => {
                    self.advance();
                }
                None => return false,
            }
        }
    }

    /// Scan a number literal. A leading `-` has already been consumed.
    fn scan_number(&mut self) -> TokenKind {
        self.consume_while(|c| c.is_ascii_digit());

        if self.peek_char() == Some('.') {
            // The whole run is taken so `1.2.3` reaches the parser as one bad float
            self.consume_while(|c| c.is_ascii_digit() || c == '.');
            TokenKind::Float
        } else {
            TokenKind::Int
        }
    }

    /// Scan an identifier or keyword
    fn scan_identifier(&mut self) -> TokenKind {
        let start = self.current_pos;

        self.consume_while(|c| c.is_alphanumeric() || c == '_');

        lookup_keyword(&self.source[start..self.current_pos]).unwrap_or(TokenKind::Ident)
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek_char() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
    }
}

/// One-shot token stream: yields every token up to and including EOF,
/// then stops.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished && self.pending.is_none() {
            return None;
        }
        Some(self.next_token())
    }
}
