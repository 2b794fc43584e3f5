//! The tree-walking evaluator: executes statements against a chain of
//! lexical environments, implementing Lox's value semantics, closures,
//! and non-local control flow for `return`.

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::function::{clock, FunctionValue, NativeFunction};
use crate::value::Value;
use lox_lex::{Token, TokenKind};
use lox_par::{Expr, LiteralValue, Stmt};
use lox_util::{FxHashMap, Symbol};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// What a statement produced, distinguishing ordinary completion from
/// an in-flight `return`. This is the tri-state `Normal | Return`
/// recommended for a host without native non-local unwind: a runtime
/// error is instead threaded through the `Result` that wraps this
/// type, so the two forms of non-local exit are never confused at the
/// catch site.
pub enum Flow {
    Normal,
    Return(Value),
}

type EvalResult = Result<Value, RuntimeError>;
type ExecResult = Result<Flow, RuntimeError>;

pub struct Interpreter {
    globals: Environment,
    locals: FxHashMap<lox_par::NodeId, usize>,
    out: RefCell<Box<dyn Write>>,
}

impl Interpreter {
    pub fn new(locals: FxHashMap<lox_par::NodeId, usize>) -> Self {
        Self::with_writer(locals, Box::new(std::io::stdout()))
    }

    /// Builds an interpreter that writes `print` output to `writer`
    /// instead of standard output — used by tests and by the REPL
    /// driver, which both want to observe output directly.
    pub fn with_writer(locals: FxHashMap<lox_par::NodeId, usize>, writer: Box<dyn Write>) -> Self {
        let globals = Environment::new_global();
        globals.define(Symbol::intern("clock"), Value::NativeFunction(Rc::new(clock())));
        Self { globals, locals, out: RefCell::new(writer) }
    }

    /// Runs a whole program against the globals environment. A
    /// top-level `return` cannot occur in a resolver-accepted program,
    /// so a stray `Flow::Return` here is simply discarded.
    pub fn interpret(&self, program: &[Stmt]) -> Result<(), RuntimeError> {
        let env = self.globals.clone();
        for stmt in program {
            self.execute(stmt, &env)?;
        }
        Ok(())
    }

    /// Evaluates a single expression against the globals environment,
    /// for the `evaluate` command — it never runs the resolver, so
    /// every reference falls back to the globals lookup regardless of
    /// lexical nesting.
    pub fn evaluate_expr(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        let env = self.globals.clone();
        self.evaluate(expr, &env)
    }

    fn execute(&self, stmt: &Stmt, env: &Environment) -> ExecResult {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr, env)?;
                Ok(Flow::Normal)
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr, env)?;
                let mut out = self.out.borrow_mut();
                writeln!(out, "{value}").expect("write to output sink failed");
                Ok(Flow::Normal)
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr, env)?,
                    None => Value::Nil,
                };
                env.define(Symbol::intern(&name.lexeme), value);
                Ok(Flow::Normal)
            }
            Stmt::Block(stmts) => {
                let block_env = Environment::new_enclosed(env);
                self.execute_block(stmts, &block_env)
            }
            Stmt::If { cond, then_branch, else_branch } => {
                if self.evaluate(cond, env)?.is_truthy() {
                    self.execute(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch, env)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While { cond, body } => {
                while self.evaluate(cond, env)?.is_truthy() {
                    match self.execute(body, env)? {
                        Flow::Normal => {}
                        returned @ Flow::Return(_) => return Ok(returned),
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Function(decl) => {
                let value = Value::Function(Rc::new(FunctionValue {
                    declaration: decl.clone(),
                    closure: env.clone(),
                }));
                env.define(Symbol::intern(&decl.name.lexeme), value);
                Ok(Flow::Normal)
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr, env)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            }
        }
    }

    /// Executes statements in `env`, the environment restoration
    /// invariant holding automatically: the caller's own environment
    /// reference is never mutated, only the freshly created `env`
    /// passed in is used, so control always returns to the caller's
    /// environment on every exit path, including an error or a return
    /// unwinding through this call.
    fn execute_block(&self, stmts: &[Stmt], env: &Environment) -> ExecResult {
        for stmt in stmts {
            match self.execute(stmt, env)? {
                Flow::Normal => {}
                returned @ Flow::Return(_) => return Ok(returned),
            }
        }
        Ok(Flow::Normal)
    }

    fn evaluate(&self, expr: &Expr, env: &Environment) -> EvalResult {
        match expr {
            Expr::Literal { value, .. } => Ok(literal_value(value)),
            Expr::Grouping { inner, .. } => self.evaluate(inner, env),
            Expr::Unary { op, rhs, .. } => self.eval_unary(op, rhs, env),
            Expr::Binary { lhs, op, rhs, .. } => self.eval_binary(lhs, op, rhs, env),
            Expr::Logical { lhs, op, rhs, .. } => self.eval_logical(lhs, op, rhs, env),
            Expr::Variable { id, name } => self.lookup_variable(*id, name, env),
            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value, env)?;
                match self.locals.get(id) {
                    Some(&distance) => env.assign_at(distance, Symbol::intern(&name.lexeme), value.clone()),
                    None => self.globals.assign(name, value.clone())?,
                }
                Ok(value)
            }
            Expr::Call { callee, paren, args, .. } => self.eval_call(callee, paren, args, env),
        }
    }

    fn lookup_variable(&self, id: lox_par::NodeId, name: &Token, env: &Environment) -> EvalResult {
        match self.locals.get(&id) {
            Some(&distance) => Ok(env.get_at(distance, Symbol::intern(&name.lexeme))),
            None => self.globals.get(name),
        }
    }

    fn eval_unary(&self, op: &Token, rhs: &Expr, env: &Environment) -> EvalResult {
        let rhs = self.evaluate(rhs, env)?;
        match op.kind {
            TokenKind::Minus => match rhs {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::new(op.line, "Operand must be a number.")),
            },
            TokenKind::Bang => Ok(Value::Boolean(!rhs.is_truthy())),
            _ => unreachable!("unary operator token must be `-` or `!`"),
        }
    }

    fn eval_logical(&self, lhs: &Expr, op: &Token, rhs: &Expr, env: &Environment) -> EvalResult {
        let lhs = self.evaluate(lhs, env)?;
        match op.kind {
            TokenKind::Or => {
                if lhs.is_truthy() {
                    Ok(lhs)
                } else {
                    self.evaluate(rhs, env)
                }
            }
            TokenKind::And => {
                if !lhs.is_truthy() {
                    Ok(lhs)
                } else {
                    self.evaluate(rhs, env)
                }
            }
            _ => unreachable!("logical operator token must be `or` or `and`"),
        }
    }

    fn eval_binary(&self, lhs: &Expr, op: &Token, rhs: &Expr, env: &Environment) -> EvalResult {
        let lhs = self.evaluate(lhs, env)?;
        let rhs = self.evaluate(rhs, env)?;

        match op.kind {
            TokenKind::Minus => Ok(Value::Number(number(&lhs, op)? - number(&rhs, op)?)),
            TokenKind::Slash => Ok(Value::Number(number(&lhs, op)? / number(&rhs, op)?)),
            TokenKind::Star => {
                let (l, r) = (number(&lhs, op)?, number(&rhs, op)?);
                // The source checks for division by zero on
                // multiplication, not division; this is preserved
                // deliberately, not a transcription slip.
                if r == 0.0 {
                    return Err(RuntimeError::new(op.line, "Division by zero."));
                }
                Ok(Value::Number(l * r))
            }
            TokenKind::Greater => Ok(Value::Boolean(number(&lhs, op)? > number(&rhs, op)?)),
            TokenKind::GreaterEqual => Ok(Value::Boolean(number(&lhs, op)? >= number(&rhs, op)?)),
            TokenKind::Less => Ok(Value::Boolean(number(&lhs, op)? < number(&rhs, op)?)),
            TokenKind::LessEqual => Ok(Value::Boolean(number(&lhs, op)? <= number(&rhs, op)?)),
            TokenKind::Plus => match (&lhs, &rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => {
                    Ok(Value::String(format!("{a}{b}").into()))
                }
                _ => Err(RuntimeError::new(op.line, "Operands must be two numbers or two strings.")),
            },
            TokenKind::BangEqual => Ok(Value::Boolean(lhs != rhs)),
            TokenKind::EqualEqual => Ok(Value::Boolean(lhs == rhs)),
            _ => unreachable!("binary operator token must be one of the binary operator kinds"),
        }
    }

    fn eval_call(&self, callee: &Expr, paren: &Token, args: &[Expr], env: &Environment) -> EvalResult {
        let callee = self.evaluate(callee, env)?;
        let mut evaluated = Vec::with_capacity(args.len());
        for arg in args {
            evaluated.push(self.evaluate(arg, env)?);
        }

        match callee {
            Value::Function(func) => self.call_function(&func, &evaluated, paren),
            Value::NativeFunction(native) => self.call_native(&native, &evaluated, paren),
            _ => Err(RuntimeError::new(paren.line, "Can only call functions and classes.")),
        }
    }

    fn call_function(&self, func: &Rc<FunctionValue>, args: &[Value], paren: &Token) -> EvalResult {
        check_arity(func.arity(), args.len(), paren)?;

        let call_env = Environment::new_enclosed(&func.closure);
        for (param, arg) in func.declaration.params.iter().zip(args) {
            call_env.define(Symbol::intern(&param.lexeme), arg.clone());
        }

        match self.execute_block(&func.declaration.body, &call_env)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }

    fn call_native(&self, native: &Rc<NativeFunction>, args: &[Value], paren: &Token) -> EvalResult {
        check_arity(native.arity, args.len(), paren)?;
        (native.func)(args)
    }
}

fn check_arity(expected: usize, got: usize, paren: &Token) -> Result<(), RuntimeError> {
    if expected != got {
        return Err(RuntimeError::new(
            paren.line,
            format!("Expected {expected} arguments but got {got}."),
        ));
    }
    Ok(())
}

fn number(value: &Value, op: &Token) -> Result<f64, RuntimeError> {
    match value {
        Value::Number(n) => Ok(*n),
        _ => Err(RuntimeError::new(op.line, "Operands must be numbers.")),
    }
}

fn literal_value(value: &LiteralValue) -> Value {
    match value {
        LiteralValue::Nil => Value::Nil,
        LiteralValue::Boolean(b) => Value::Boolean(*b),
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::String(s) => Value::string(s.as_str()),
    }
}
