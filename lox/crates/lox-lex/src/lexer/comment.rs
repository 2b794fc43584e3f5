//! Whitespace and line-comment skipping.

use crate::lexer::core::Lexer;

impl<'a> Lexer<'a> {
    /// Consumes runs of whitespace and `//` line comments. Called before
    /// every token so `token_start` always lands on real content.
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.peek() {
                ' ' | '\r' | '\t' | '\n' => {
                    self.cursor.advance();
                }
                '/' if self.cursor.peek_next() == '/' => {
                    while self.cursor.peek() != '\n' && !self.cursor.is_at_end() {
                        self.cursor.advance();
                    }
                }
                _ => return,
            }
        }
    }
}
