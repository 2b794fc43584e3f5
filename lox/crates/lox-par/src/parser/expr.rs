//! Expression grammar, lowest to highest precedence:
//! assignment → or → and → equality → comparison → term → factor →
//! unary → call → primary.

use super::core::{PResult, Parser};
use crate::ast::{Expr, LiteralValue};
use lox_lex::{Literal, TokenKind};

const MAX_ARGS: usize = 255;

impl<'a> Parser<'a> {
    pub(crate) fn expression(&mut self) -> PResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> PResult<Expr> {
        let lhs = self.or()?;

        if self.match_any(&[TokenKind::Equal]) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match lhs {
                Expr::Variable { name, .. } => {
                    Ok(Expr::Assign { id: self.node_ids.next(), name, value: Box::new(value) })
                }
                _ => {
                    // Reported but not fatal: the statement this
                    // expression belongs to is still well-formed
                    // syntactically.
                    self.error(&equals, "Invalid assignment target.");
                    Ok(lhs)
                }
            };
        }

        Ok(lhs)
    }

    fn or(&mut self) -> PResult<Expr> {
        let mut lhs = self.and()?;
        while self.match_any(&[TokenKind::Or]) {
            let op = self.previous().clone();
            let rhs = self.and()?;
            lhs = Expr::Logical { id: self.node_ids.next(), lhs: Box::new(lhs), op, rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn and(&mut self) -> PResult<Expr> {
        let mut lhs = self.equality()?;
        while self.match_any(&[TokenKind::And]) {
            let op = self.previous().clone();
            let rhs = self.equality()?;
            lhs = Expr::Logical { id: self.node_ids.next(), lhs: Box::new(lhs), op, rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn equality(&mut self) -> PResult<Expr> {
        let mut lhs = self.comparison()?;
        while self.match_any(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let op = self.previous().clone();
            let rhs = self.comparison()?;
            lhs = Expr::Binary { id: self.node_ids.next(), lhs: Box::new(lhs), op, rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn comparison(&mut self) -> PResult<Expr> {
        let mut lhs = self.term()?;
        while self.match_any(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let op = self.previous().clone();
            let rhs = self.term()?;
            lhs = Expr::Binary { id: self.node_ids.next(), lhs: Box::new(lhs), op, rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> PResult<Expr> {
        let mut lhs = self.factor()?;
        while self.match_any(&[TokenKind::Minus, TokenKind::Plus]) {
            let op = self.previous().clone();
            let rhs = self.factor()?;
            lhs = Expr::Binary { id: self.node_ids.next(), lhs: Box::new(lhs), op, rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> PResult<Expr> {
        let mut lhs = self.unary()?;
        while self.match_any(&[TokenKind::Slash, TokenKind::Star]) {
            let op = self.previous().clone();
            let rhs = self.unary()?;
            lhs = Expr::Binary { id: self.node_ids.next(), lhs: Box::new(lhs), op, rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> PResult<Expr> {
        if self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let op = self.previous().clone();
            let rhs = self.unary()?;
            return Ok(Expr::Unary { id: self.node_ids.next(), op, rhs: Box::new(rhs) });
        }
        self.call()
    }

    fn call(&mut self) -> PResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            if self.match_any(&[TokenKind::LeftParen]) {
                expr = self.finish_call(expr)?;
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> PResult<Expr> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if args.len() >= MAX_ARGS {
                    let peek = self.peek().clone();
                    self.error(&peek, "Can't have more than 255 arguments.");
                }
                args.push(self.expression()?);
                if !self.match_any(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.")?;
        Ok(Expr::Call { id: self.node_ids.next(), callee: Box::new(callee), paren, args })
    }

    fn primary(&mut self) -> PResult<Expr> {
        if self.match_any(&[TokenKind::False]) {
            return Ok(Expr::Literal { id: self.node_ids.next(), value: LiteralValue::Boolean(false) });
        }
        if self.match_any(&[TokenKind::True]) {
            return Ok(Expr::Literal { id: self.node_ids.next(), value: LiteralValue::Boolean(true) });
        }
        if self.match_any(&[TokenKind::Nil]) {
            return Ok(Expr::Literal { id: self.node_ids.next(), value: LiteralValue::Nil });
        }
        if self.match_any(&[TokenKind::Number]) {
            let value = match self.previous().literal.clone() {
                Some(Literal::Number(n)) => n,
                _ => unreachable!("NUMBER token without a numeric literal payload"),
            };
            return Ok(Expr::Literal { id: self.node_ids.next(), value: LiteralValue::Number(value) });
        }
        if self.match_any(&[TokenKind::String]) {
            let value = match self.previous().literal.clone() {
                Some(Literal::Str(s)) => s,
                _ => unreachable!("STRING token without a string literal payload"),
            };
            return Ok(Expr::Literal { id: self.node_ids.next(), value: LiteralValue::String(value) });
        }
        if self.match_any(&[TokenKind::Identifier]) {
            let name = self.previous().clone();
            return Ok(Expr::Variable { id: self.node_ids.next(), name });
        }
        if self.match_any(&[TokenKind::LeftParen]) {
            let inner = self.expression()?;
            self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping { id: self.node_ids.next(), inner: Box::new(inner) });
        }

        let peek = self.peek().clone();
        Err(self.error(&peek, "Expect expression."))
    }
}
