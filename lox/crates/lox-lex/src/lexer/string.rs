//! String literal lexing.

use crate::lexer::core::Lexer;
use crate::token::{Literal, Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes a string literal. The opening `"` has already been
    /// consumed by the caller.
    pub(crate) fn lex_string(&mut self) -> Token {
        while self.cursor.peek() != '"' && !self.cursor.is_at_end() {
            self.cursor.advance();
        }

        if self.cursor.is_at_end() {
            self.handler.error(self.cursor.line(), "Unterminated string.");
            return Token {
                kind: TokenKind::String,
                lexeme: self.lexeme(),
                literal: Some(Literal::Str(String::new())),
                line: self.token_start_line,
            };
        }

        // The closing quote.
        self.cursor.advance();

        let lexeme = self.lexeme();
        let inner = lexeme[1..lexeme.len() - 1].to_string();
        Token {
            kind: TokenKind::String,
            lexeme,
            literal: Some(Literal::Str(inner)),
            line: self.token_start_line,
        }
    }
}
