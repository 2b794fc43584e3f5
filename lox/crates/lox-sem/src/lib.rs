//! lox-sem — the static resolver.
//!
//! A single pass over the parsed statement list that computes, for
//! every `Variable`/`Assign` reference, the number of enclosing scopes
//! between the reference and the scope that declares it. The result is
//! a side-table keyed by [`NodeId`] rather than threaded through the
//! AST, so the tree built by `lox-par` stays free of resolver state.

mod scope;

use lox_par::{Expr, FunctionDecl, NodeId, Stmt};
use lox_util::{FxHashMap, Handler, Symbol};
use scope::ScopeStack;

/// Tracks whether the resolver is currently inside a function body, so
/// a top-level `return` can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
}

pub struct Resolver<'a> {
    handler: &'a Handler,
    scopes: ScopeStack,
    current_function: FunctionType,
    locals: FxHashMap<NodeId, usize>,
}

impl<'a> Resolver<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            handler,
            scopes: ScopeStack::new(),
            current_function: FunctionType::None,
            locals: FxHashMap::default(),
        }
    }

    /// Resolves an entire program and returns the distance side-table.
    /// Consult [`lox_util::Handler::had_error`] afterwards to decide
    /// whether evaluation should proceed.
    pub fn resolve(mut self, program: &[Stmt]) -> FxHashMap<NodeId, usize> {
        self.resolve_stmts(program);
        self.locals
    }

    fn resolve_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) | Stmt::Print(expr) => self.resolve_expr(expr),
            Stmt::Var { name, initializer } => {
                let sym = Symbol::intern(&name.lexeme);
                if self.scopes.declare(sym) {
                    self.handler.report(
                        name.line,
                        lox_util::Where::Token(name.lexeme.clone()),
                        "Already a variable with this name in this scope.",
                    );
                }
                if let Some(init) = initializer {
                    self.resolve_expr(init);
                }
                self.scopes.define(sym);
            }
            Stmt::Block(stmts) => {
                self.scopes.push();
                self.resolve_stmts(stmts);
                self.scopes.pop();
            }
            Stmt::If { cond, then_branch, else_branch } => {
                self.resolve_expr(cond);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::While { cond, body } => {
                self.resolve_expr(cond);
                self.resolve_stmt(body);
            }
            Stmt::Function(decl) => {
                // Declared and defined eagerly so the function can
                // call itself recursively by name.
                let sym = Symbol::intern(&decl.name.lexeme);
                self.scopes.declare(sym);
                self.scopes.define(sym);
                self.resolve_function(decl, FunctionType::Function);
            }
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.handler.report(
                        keyword.line,
                        lox_util::Where::Token(keyword.lexeme.clone()),
                        "Can't return from top-level code.",
                    );
                }
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
        }
    }

    fn resolve_function(&mut self, decl: &FunctionDecl, kind: FunctionType) {
        let enclosing = self.current_function;
        self.current_function = kind;

        self.scopes.push();
        for param in &decl.params {
            let sym = Symbol::intern(&param.lexeme);
            self.scopes.declare(sym);
            self.scopes.define(sym);
        }
        self.resolve_stmts(&decl.body);
        self.scopes.pop();

        self.current_function = enclosing;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { .. } => {}
            Expr::Grouping { inner, .. } => self.resolve_expr(inner),
            Expr::Unary { rhs, .. } => self.resolve_expr(rhs),
            Expr::Binary { lhs, rhs, .. } | Expr::Logical { lhs, rhs, .. } => {
                self.resolve_expr(lhs);
                self.resolve_expr(rhs);
            }
            Expr::Variable { id, name } => {
                let sym = Symbol::intern(&name.lexeme);
                if self.scopes.innermost_state(sym) == Some(false) {
                    self.handler.report(
                        name.line,
                        lox_util::Where::Token(name.lexeme.clone()),
                        "Can't read local variable in its own initializer.",
                    );
                }
                self.resolve_local(*id, sym);
            }
            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                let sym = Symbol::intern(&name.lexeme);
                self.resolve_local(*id, sym);
            }
            Expr::Call { callee, args, .. } => {
                self.resolve_expr(callee);
                for arg in args {
                    self.resolve_expr(arg);
                }
            }
        }
    }

    fn resolve_local(&mut self, id: NodeId, name: Symbol) {
        if let Some(distance) = self.scopes.resolve_distance(name) {
            self.locals.insert(id, distance);
        }
        // No entry means the reference is resolved dynamically against
        // the globals environment at evaluation time.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_lex::Lexer;
    use lox_par::Parser;

    fn resolve(src: &str) -> (FxHashMap<NodeId, usize>, bool) {
        let handler = Handler::new();
        let tokens = Lexer::new(src, &handler).scan_tokens();
        let program = lox_par::Parser::new(tokens, &handler).program();
        let locals = Resolver::new(&handler).resolve(&program);
        (locals, handler.had_error())
    }

    fn find_variable_id(program: &[Stmt], name: &str) -> NodeId {
        fn walk_expr(expr: &Expr, name: &str) -> Option<NodeId> {
            match expr {
                Expr::Variable { id, name: n } if n.lexeme == name => Some(*id),
                Expr::Grouping { inner, .. } | Expr::Unary { rhs: inner, .. } => walk_expr(inner, name),
                Expr::Binary { lhs, rhs, .. } | Expr::Logical { lhs, rhs, .. } => {
                    walk_expr(lhs, name).or_else(|| walk_expr(rhs, name))
                }
                Expr::Assign { value, .. } => walk_expr(value, name),
                Expr::Call { callee, args, .. } => {
                    walk_expr(callee, name).or_else(|| args.iter().find_map(|a| walk_expr(a, name)))
                }
                _ => None,
            }
        }
        fn walk_stmt(stmt: &Stmt, name: &str) -> Option<NodeId> {
            match stmt {
                Stmt::Expression(e) | Stmt::Print(e) => walk_expr(e, name),
                Stmt::Var { initializer, .. } => initializer.as_ref().and_then(|e| walk_expr(e, name)),
                Stmt::Block(stmts) => stmts.iter().find_map(|s| walk_stmt(s, name)),
                Stmt::If { cond, then_branch, else_branch } => walk_expr(cond, name)
                    .or_else(|| walk_stmt(then_branch, name))
                    .or_else(|| else_branch.as_ref().and_then(|e| walk_stmt(e, name))),
                Stmt::While { cond, body } => walk_expr(cond, name).or_else(|| walk_stmt(body, name)),
                Stmt::Function(decl) => decl.body.iter().find_map(|s| walk_stmt(s, name)),
                Stmt::Return { value, .. } => value.as_ref().and_then(|e| walk_expr(e, name)),
            }
        }
        program.iter().find_map(|s| walk_stmt(s, name)).expect("variable reference not found")
    }

    #[test]
    fn global_reference_has_no_recorded_distance() {
        let (locals, had_error) = resolve("var a = 1; print a;");
        assert!(!had_error);
        assert!(locals.is_empty());
    }

    #[test]
    fn block_local_reference_records_zero_distance() {
        let handler = Handler::new();
        let tokens = Lexer::new("{ var a = 1; print a; }", &handler).scan_tokens();
        let program = Parser::new(tokens, &handler).program();
        let locals = Resolver::new(&handler).resolve(&program);
        assert!(!handler.had_error());
        let id = find_variable_id(&program, "a");
        assert_eq!(locals.get(&id), Some(&0));
    }

    #[test]
    fn nested_block_reference_records_distance_matching_block_depth() {
        let handler = Handler::new();
        let src = "{ var a = 1; { print a; } }";
        let tokens = Lexer::new(src, &handler).scan_tokens();
        let program = Parser::new(tokens, &handler).program();
        let locals = Resolver::new(&handler).resolve(&program);
        assert!(!handler.had_error());
        let id = find_variable_id(&program, "a");
        assert_eq!(locals.get(&id), Some(&1));
    }

    #[test]
    fn self_reference_in_initializer_is_rejected() {
        let (_, had_error) = resolve("{ var a = a; }");
        assert!(had_error);
    }

    #[test]
    fn redeclaring_a_name_in_the_same_scope_is_rejected() {
        let (_, had_error) = resolve("{ var a = 1; var a = 2; }");
        assert!(had_error);
    }

    #[test]
    fn shadowing_in_a_nested_scope_is_allowed() {
        let (_, had_error) = resolve("var a = 1; { var a = 2; }");
        assert!(!had_error);
    }

    #[test]
    fn top_level_return_is_rejected() {
        let (_, had_error) = resolve("return 1;");
        assert!(had_error);
    }

    #[test]
    fn return_inside_function_is_accepted() {
        let (_, had_error) = resolve("fun f() { return 1; }");
        assert!(!had_error);
    }

    #[test]
    fn function_can_call_itself_recursively() {
        let (_, had_error) = resolve("fun f(n) { if (n == 0) return 0; return f(n - 1); }");
        assert!(!had_error);
    }
}
