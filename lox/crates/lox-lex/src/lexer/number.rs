//! Number literal lexing: `[0-9]+ ( '.' [0-9]+ )?`.

use crate::lexer::core::Lexer;
use crate::token::{Literal, Token, TokenKind};

impl<'a> Lexer<'a> {
    /// The leading digit has already been consumed by the caller.
    pub(crate) fn lex_number(&mut self) -> Token {
        while self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
        }

        // A trailing dot with no following digit is not part of the
        // number; it is left for the next call to tokenize as `DOT`.
        if self.cursor.peek() == '.' && self.cursor.peek_next().is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.peek().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let lexeme = self.lexeme();
        let value: f64 = lexeme.parse().expect("number lexeme must be valid f64 syntax");
        Token { kind: TokenKind::Number, lexeme, literal: Some(Literal::Number(value)), line: self.token_start_line }
    }
}
