//! lox-par — the AST model and the recursive-descent parser.
//!
//! Turns a scanned token stream into a list of [`ast::Stmt`]. Parse
//! errors are reported through the shared [`lox_util::Handler`] and
//! recovered from via panic-mode synchronization, so one malformed
//! statement never prevents the rest of a program from being parsed.

pub mod ast;
mod node_id;
mod parser;
mod printer;

pub use ast::{Expr, FunctionDecl, LiteralValue, Stmt};
pub use node_id::{NodeId, NodeIdGenerator};
pub use parser::Parser;
pub use printer::AstPrinter;

#[cfg(test)]
mod tests {
    use super::*;
    use lox_lex::Lexer;
    use lox_util::Handler;

    fn parse_program(src: &str) -> (Vec<Stmt>, bool) {
        let handler = Handler::new();
        let tokens = Lexer::new(src, &handler).scan_tokens();
        let stmts = Parser::new(tokens, &handler).program();
        (stmts, handler.had_error())
    }

    fn parse_expr(src: &str) -> Expr {
        let handler = Handler::new();
        let tokens = Lexer::new(src, &handler).scan_tokens();
        Parser::new(tokens, &handler).parse_single_expression().expect("expression should parse")
    }

    #[test]
    fn parses_expression_statement_and_print_statement() {
        let (stmts, had_error) = parse_program("1 + 2; print 3;");
        assert!(!had_error);
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0], Stmt::Expression(_)));
        assert!(matches!(stmts[1], Stmt::Print(_)));
    }

    #[test]
    fn binary_operators_are_left_associative() {
        let expr = parse_expr("1 - 2 - 3");
        assert_eq!(AstPrinter::print(&expr), "(- (- 1.0 2.0) 3.0)");
    }

    #[test]
    fn assignment_is_right_associative() {
        let (stmts, had_error) = parse_program("a = b = 1;");
        assert!(!had_error);
        match &stmts[0] {
            Stmt::Expression(Expr::Assign { name, value, .. }) => {
                assert_eq!(name.lexeme, "a");
                assert!(matches!(**value, Expr::Assign { .. }));
            }
            other => panic!("expected assign expression statement, got {other:?}"),
        }
    }

    #[test]
    fn invalid_assignment_target_is_reported_but_does_not_abort_statement() {
        let (stmts, had_error) = parse_program("1 = 2;");
        assert!(had_error);
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn call_suffix_chains_left_associatively() {
        let expr = parse_expr("f(1)(2)");
        assert!(matches!(expr, Expr::Call { .. }));
        if let Expr::Call { callee, args, .. } = &expr {
            assert_eq!(args.len(), 1);
            assert!(matches!(**callee, Expr::Call { .. }));
        }
    }

    #[test]
    fn for_loop_desugars_to_block_with_while() {
        let (stmts, had_error) = parse_program("for (var i = 0; i < 3; i = i + 1) print i;");
        assert!(!had_error);
        match &stmts[0] {
            Stmt::Block(outer) => {
                assert_eq!(outer.len(), 2);
                assert!(matches!(outer[0], Stmt::Var { .. }));
                match &outer[1] {
                    Stmt::While { body, .. } => {
                        assert!(matches!(**body, Stmt::Block(_)));
                    }
                    other => panic!("expected desugared while, got {other:?}"),
                }
            }
            other => panic!("expected desugared block, got {other:?}"),
        }
    }

    #[test]
    fn for_loop_with_all_clauses_omitted_uses_literal_true_condition() {
        let (stmts, had_error) = parse_program("for (;;) print 1;");
        assert!(!had_error);
        match &stmts[0] {
            Stmt::While { cond, .. } => {
                assert!(matches!(cond, Expr::Literal { value: LiteralValue::Boolean(true), .. }));
            }
            other => panic!("expected bare while, got {other:?}"),
        }
    }

    #[test]
    fn function_declaration_collects_params_and_body() {
        let (stmts, had_error) = parse_program("fun add(a, b) { return a + b; }");
        assert!(!had_error);
        match &stmts[0] {
            Stmt::Function(decl) => {
                assert_eq!(decl.name.lexeme, "add");
                assert_eq!(decl.params.len(), 2);
                assert_eq!(decl.body.len(), 1);
            }
            other => panic!("expected function declaration, got {other:?}"),
        }
    }

    #[test]
    fn missing_semicolon_is_reported_and_recovers_at_next_statement() {
        let (stmts, had_error) = parse_program("print 1 print 2;");
        assert!(had_error);
        // Recovery should still surface the well-formed statement.
        assert!(stmts.iter().any(|s| matches!(s, Stmt::Print(_))));
    }

    #[test]
    fn every_expression_node_has_a_distinct_id() {
        let expr = parse_expr("1 + 2 * 3");
        // lhs id, rhs subtree ids (2 literal + 1 binary), top binary id: 5 nodes total.
        fn collect_ids(expr: &Expr, out: &mut Vec<NodeId>) {
            out.push(expr.id());
            match expr {
                Expr::Binary { lhs, rhs, .. } | Expr::Logical { lhs, rhs, .. } => {
                    collect_ids(lhs, out);
                    collect_ids(rhs, out);
                }
                Expr::Unary { rhs, .. } | Expr::Grouping { inner: rhs, .. } => collect_ids(rhs, out),
                _ => {}
            }
        }
        let mut ids = Vec::new();
        collect_ids(&expr, &mut ids);
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(ids.len(), sorted.len(), "expression node ids must be unique");
    }

    /// The AST printer's parenthesized prefix notation isn't valid Lox
    /// surface syntax (`(+ 1 2)` doesn't parse back as a call), so the
    /// round-trip invariant is checked the way it actually holds here:
    /// printing is a pure function of tree shape, so two independent
    /// parses of the same source print identically, and distinguishable
    /// sources print as distinguishable strings.
    #[test]
    fn printer_output_is_a_pure_function_of_parsed_structure() {
        let a = parse_expr("1 + 2 * 3 - (4 / 5)");
        let b = parse_expr("1 + 2 * 3 - (4 / 5)");
        assert_eq!(AstPrinter::print(&a), AstPrinter::print(&b));

        let c = parse_expr("1 + (2 * 3) - 4 / 5");
        assert_ne!(AstPrinter::print(&a), AstPrinter::print(&c));
    }
}
