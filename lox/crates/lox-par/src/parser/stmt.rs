//! Statement and declaration grammar, including `for`-loop desugaring
//! into a `while` wrapped in a block.

use super::core::{PResult, Parser};
use crate::ast::{Expr, FunctionDecl, LiteralValue, Stmt};
use lox_lex::TokenKind;
use std::rc::Rc;

const MAX_PARAMS: usize = 255;

impl<'a> Parser<'a> {
    /// Parses an entire program: declarations until end-of-stream.
    /// Each top-level declaration resynchronizes on its own parse
    /// error, so one malformed statement does not prevent later ones
    /// from being parsed.
    pub fn program(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                stmts.push(stmt);
            }
        }
        stmts
    }

    /// Parses a single expression, for the `parse`/`evaluate` commands.
    pub fn parse_single_expression(&mut self) -> PResult<Expr> {
        self.expression()
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.match_any(&[TokenKind::Var]) {
            self.var_declaration()
        } else if self.match_any(&[TokenKind::Fun]) {
            self.function_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(_) => {
                self.synchronize();
                None
            }
        }
    }

    fn var_declaration(&mut self) -> PResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;
        let initializer =
            if self.match_any(&[TokenKind::Equal]) { Some(self.expression()?) } else { None };
        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var { name, initializer })
    }

    fn function_declaration(&mut self) -> PResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect function name.")?;
        self.consume(TokenKind::LeftParen, "Expect '(' after function name.")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() >= MAX_PARAMS {
                    let peek = self.peek().clone();
                    self.error(&peek, "Can't have more than 255 parameters.");
                }
                params.push(self.consume(TokenKind::Identifier, "Expect parameter name.")?);
                if !self.match_any(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after parameters.")?;

        self.consume(TokenKind::LeftBrace, "Expect '{' before function body.")?;
        let body = self.block()?;

        Ok(Stmt::Function(Rc::new(FunctionDecl { name, params, body })))
    }

    fn statement(&mut self) -> PResult<Stmt> {
        if self.match_any(&[TokenKind::For]) {
            return self.for_statement();
        }
        if self.match_any(&[TokenKind::If]) {
            return self.if_statement();
        }
        if self.match_any(&[TokenKind::Print]) {
            return self.print_statement();
        }
        if self.match_any(&[TokenKind::Return]) {
            return self.return_statement();
        }
        if self.match_any(&[TokenKind::While]) {
            return self.while_statement();
        }
        if self.match_any(&[TokenKind::LeftBrace]) {
            return Ok(Stmt::Block(self.block()?));
        }
        self.expression_statement()
    }

    fn print_statement(&mut self) -> PResult<Stmt> {
        let value = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(value))
    }

    fn return_statement(&mut self) -> PResult<Stmt> {
        let keyword = self.previous().clone();
        let value = if !self.check(TokenKind::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn if_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch =
            if self.match_any(&[TokenKind::Else]) { Some(Box::new(self.statement()?)) } else { None };

        Ok(Stmt::If { cond, then_branch, else_branch })
    }

    fn while_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While { cond, body })
    }

    /// `for (init; cond; incr) body` is rewritten here into
    /// `{ init; while (cond) { body; incr; } }`.
    fn for_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.match_any(&[TokenKind::Semicolon]) {
            None
        } else if self.match_any(&[TokenKind::Var]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenKind::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(TokenKind::RightParen) { Some(self.expression()?) } else { None };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        let condition = condition
            .unwrap_or_else(|| Expr::Literal { id: self.node_ids.next(), value: LiteralValue::Boolean(true) });
        body = Stmt::While { cond: condition, body: Box::new(body) };

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn block(&mut self) -> PResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                stmts.push(stmt);
            }
        }
        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(stmts)
    }

    fn expression_statement(&mut self) -> PResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }
}
