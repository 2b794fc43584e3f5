//! Token-cursor primitives shared by the expression and statement
//! parsing passes, plus panic-mode recovery.

use crate::node_id::NodeIdGenerator;
use lox_lex::{Token, TokenKind};
use lox_util::{Handler, Where};

/// Raised when a production fails to match. The diagnostic has
/// already been reported through the [`Handler`] by the time this
/// value exists; it only carries control flow back to the nearest
/// synchronization point.
#[derive(Debug)]
pub struct ParseError;

pub(crate) type PResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) handler: &'a Handler,
    pub(crate) node_ids: NodeIdGenerator,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        Self { tokens, pos: 0, handler, node_ids: NodeIdGenerator::new() }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.pos - 1]
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    pub(crate) fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous().clone()
    }

    /// If the current token's kind is any of `kinds`, consumes it and
    /// returns `true`.
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek().clone();
            Err(self.error(&token, message))
        }
    }

    pub(crate) fn error(&self, token: &Token, message: &str) -> ParseError {
        let location = if token.kind == TokenKind::Eof {
            Where::End
        } else {
            Where::Token(token.lexeme.clone())
        };
        self.handler.report(token.line, location, message);
        ParseError
    }

    /// Discards tokens until the next one is plausibly the start of a
    /// new statement, so parsing can resume after a syntax error
    /// instead of cascading further diagnostics.
    pub(crate) fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
