//! SQL lexer producing spanned tokens for DDL segmentation.

use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

/// SQL token kinds.
///
/// Keywords are not distinguished from identifiers here; the segmenter and
/// line parser match words case-insensitively where a keyword is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare word: keyword, identifier or number.
    Word(String),
    /// Backtick or double-quoted identifier, quotes stripped.
    Quoted(String),
    /// Single-quoted string literal, escapes resolved.
    Str(String),

    LParen,
    RParen,
    Comma,
    Semicolon,
    Dot,
    Symbol(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range in the lexed input.
    pub span: Range<usize>,
}

impl Token {
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    /// Identifier text for bare or quoted words.
    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(w) | TokenKind::Quoted(w) => Some(w),
            _ => None,
        }
    }
}

/// SQL lexer. Line comments (`--`, `#`) and block comments, including
/// `/*! ... */` version directives, never produce tokens.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(i, _)| i)
    }

    fn current(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn lookahead(&self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next().map(|(_, c)| c)
    }

    fn advance(&mut self) {
        self.chars.next();
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.current() {
            self.advance();
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) {
        self.advance(); // /
        self.advance(); // *
        while let Some(c) = self.current() {
            self.advance();
            if c == '*' && self.current() == Some('/') {
                self.advance();
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.current() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }
        word
    }

    fn read_quoted_identifier(&mut self, quote: char) -> String {
        self.advance(); // skip opening quote
        let mut ident = String::new();
        while let Some(c) = self.current() {
            self.advance();
            if c == quote {
                // Doubled quote is an escaped quote
                if self.current() == Some(quote) {
                    ident.push(c);
                    self.advance();
                } else {
                    break;
                }
            } else {
                ident.push(c);
            }
        }
        ident
    }

    fn read_string(&mut self) -> String {
        self.advance(); // skip opening quote
        let mut s = String::new();
        while let Some(c) = self.current() {
            self.advance();
            match c {
                '\'' => {
                    if self.current() == Some('\'') {
                        s.push('\'');
                        self.advance();
                    } else {
                        break;
                    }
                }
                '\\' => {
                    if let Some(escaped) = self.current() {
                        match escaped {
                            'n' => s.push('\n'),
                            't' => s.push('\t'),
                            'r' => s.push('\r'),
                            _ => s.push(escaped),
                        }
                        self.advance();
                    }
                }
                _ => s.push(c),
            }
        }
        s
    }

    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            let start = self.pos();
            let c = self.current()?;

            let kind = match c {
                c if c.is_whitespace() => {
                    self.advance();
                    continue;
                }
                '-' if self.lookahead() == Some('-') => {
                    self.skip_line_comment();
                    continue;
                }
                '#' => {
                    self.skip_line_comment();
                    continue;
                }
                '/' if self.lookahead() == Some('*') => {
                    self.skip_block_comment();
                    continue;
                }
                '(' => {
                    self.advance();
                    TokenKind::LParen
                }
                ')' => {
                    self.advance();
                    TokenKind::RParen
                }
                ',' => {
                    self.advance();
                    TokenKind::Comma
                }
                ';' => {
                    self.advance();
                    TokenKind::Semicolon
                }
                '.' => {
                    self.advance();
                    TokenKind::Dot
                }
                '`' | '"' => TokenKind::Quoted(self.read_quoted_identifier(c)),
                '\'' => TokenKind::Str(self.read_string()),
                c if c.is_alphanumeric() || c == '_' || c == '$' => {
                    TokenKind::Word(self.read_word())
                }
                other => {
                    self.advance();
                    TokenKind::Symbol(other)
                }
            };

            let end = self.pos();
            return Some(Token {
                kind,
                span: start..end,
            });
        }
    }

    /// Collect all tokens.
    pub fn tokenize(&mut self) -> Vec<Token> {
        std::iter::from_fn(|| self.next_token()).collect()
    }
}
