//! The `parse` command's AST printer: a parenthesized prefix
//! representation of an expression tree.
//!
//! Numbers always carry at least one fractional digit here, even when
//! integral — this is the "verbose" number convention, distinct from
//! the terser convention `print`/the REPL use for values.

use crate::ast::{Expr, LiteralValue};
use lox_util::format_number_verbose;
use std::fmt::Write as _;

pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        let mut out = String::new();
        Self::write_expr(&mut out, expr);
        out
    }

    fn write_expr(out: &mut String, expr: &Expr) {
        match expr {
            Expr::Literal { value, .. } => out.push_str(&Self::literal(value)),
            Expr::Grouping { inner, .. } => Self::parenthesize(out, "group", &[inner]),
            Expr::Unary { op, rhs, .. } => Self::parenthesize(out, &op.lexeme, &[rhs]),
            Expr::Binary { lhs, op, rhs, .. } | Expr::Logical { lhs, op, rhs, .. } => {
                Self::parenthesize(out, &op.lexeme, &[lhs, rhs])
            }
            Expr::Variable { name, .. } => out.push_str(&name.lexeme),
            Expr::Assign { name, value, .. } => {
                Self::parenthesize(out, &format!("= {}", name.lexeme), &[value])
            }
            Expr::Call { callee, args, .. } => {
                let mut refs: Vec<&Expr> = vec![callee];
                refs.extend(args.iter());
                Self::parenthesize(out, "call", &refs);
            }
        }
    }

    fn literal(value: &LiteralValue) -> String {
        match value {
            LiteralValue::Nil => "nil".to_string(),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Number(n) => format_number_verbose(*n),
            LiteralValue::String(s) => s.clone(),
        }
    }

    fn parenthesize(out: &mut String, name: &str, exprs: &[&Expr]) {
        let _ = write!(out, "({name}");
        for expr in exprs {
            out.push(' ');
            Self::write_expr(out, expr);
        }
        out.push(')');
    }
}
