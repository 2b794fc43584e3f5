//! Core lexer: source cursor plus the main dispatch over punctuation.

use lox_util::Handler;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Scans Lox source text into a token stream. Never aborts on error —
/// it reports through the shared [`Handler`] and keeps scanning, so a
/// single call always returns a complete stream terminated by `EOF`.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) token_start: usize,
    pub(crate) token_start_line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self { cursor: Cursor::new(source), handler, token_start: 0, token_start_line: 1 }
    }

    /// Scans the whole source, returning every token up to and
    /// including a trailing `EOF`.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();

        if self.cursor.is_at_end() {
            return Token::eof(self.cursor.line());
        }

        let c = self.cursor.advance();
        match c {
            '(' => self.make(TokenKind::LeftParen),
            ')' => self.make(TokenKind::RightParen),
            '{' => self.make(TokenKind::LeftBrace),
            '}' => self.make(TokenKind::RightBrace),
            ',' => self.make(TokenKind::Comma),
            '.' => self.make(TokenKind::Dot),
            '-' => self.make(TokenKind::Minus),
            '+' => self.make(TokenKind::Plus),
            ';' => self.make(TokenKind::Semicolon),
            '*' => self.make(TokenKind::Star),
            '!' | '=' | '<' | '>' => self.lex_operator(c),
            '/' => self.make(TokenKind::Slash),
            '"' => self.lex_string(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if is_identifier_start(c) => self.lex_identifier(),
            other => {
                self.handler.error(self.token_start_line, format!("Unexpected character: {other}"));
                self.next_token()
            }
        }
    }

    /// Builds a token for the lexeme between `token_start` and the
    /// cursor's current position, with no literal payload.
    pub(crate) fn make(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            lexeme: self.lexeme(),
            literal: None,
            line: self.token_start_line,
        }
    }

    pub(crate) fn lexeme(&self) -> String {
        self.cursor.slice(self.token_start, self.cursor.position()).to_string()
    }
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
