//! Identifier and keyword lexing: `[A-Za-z_][A-Za-z_0-9]*`, with
//! reserved words mapped to their keyword kind.

use crate::lexer::core::{is_identifier_continue, Lexer};
use crate::token::TokenKind;
use crate::Token;

impl<'a> Lexer<'a> {
    /// The leading letter/underscore has already been consumed.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        while is_identifier_continue(self.cursor.peek()) {
            self.cursor.advance();
        }

        let lexeme = self.lexeme();
        let kind = TokenKind::keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        Token { kind, lexeme, literal: None, line: self.token_start_line }
    }
}
