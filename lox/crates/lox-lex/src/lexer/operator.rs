//! One- or two-character operators. Maximal munch: `!=`, `==`, `<=`,
//! `>=` are preferred over their single-character prefixes.

use crate::lexer::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_operator(&mut self, first: char) -> Token {
        let kind = match first {
            '!' => {
                if self.cursor.advance_if('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                }
            }
            '=' => {
                if self.cursor.advance_if('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                }
            }
            '<' => {
                if self.cursor.advance_if('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.cursor.advance_if('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            _ => unreachable!("lex_operator called with non-operator lead character"),
        };
        self.make(kind)
    }
}
