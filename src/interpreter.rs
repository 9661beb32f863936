//! Tree-walking evaluator for WTFScript
//!
//! Walks the AST against a flat [`Environment`], a seedable random
//! generator and the builtin table. The first runtime error aborts the
//! run; bindings made before it stay visible through
//! [`Interpreter::variable`].

use crate::ast::{BinaryOp, Block, ElseBranch, Expr, IfKind, IfStmt, Program, RangeBounds, Stmt};
use crate::builtins::{self, Host, NativeFn};
use crate::config::Config;
use crate::environment::Environment;
use crate::error::{ErrorKind, Result, WtfError};
use crate::logger;
use crate::ops;
use crate::parser;
use crate::token::Span;
use crate::types::{self, VarType, Variable};
use crate::value::{Unofloat, Value};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::io::{self, Write};

/// Chance of taking the branch of an `ifrand` without a probability
pub const DEFAULT_IFRAND_PROBABILITY: f64 = 0.5;

/// The interpreter state
pub struct Interpreter {
    /// Tag used when logging builtin failures
    name: String,
    env: Environment,
    builtins: HashMap<String, NativeFn>,
    rng: StdRng,
    config: Config,
    output: Box<dyn Write>,
}

impl Interpreter {
    /// Create an interpreter printing to stdout. `None` uses the default config.
    pub fn new(config: Option<Config>) -> Self {
        Self::with_output(config, Box::new(io::stdout()))
    }

    /// Create an interpreter whose `print` output goes to `output`
    pub fn with_output(config: Option<Config>, output: Box<dyn Write>) -> Self {
        let mut interp = Self {
            name: "main".to_string(),
            env: Environment::new(),
            builtins: HashMap::new(),
            rng: StdRng::from_entropy(),
            config: config.unwrap_or_default(),
            output,
        };
        for native in builtins::builtins() {
            interp.register(native);
        }
        interp
    }

    /// Create an interpreter with a fixed seed, for reproducible runs
    pub fn with_seed(config: Option<Config>, seed: u64) -> Self {
        let mut interp = Self::new(config);
        interp.reseed(seed);
        interp
    }

    /// Add or replace a builtin
    pub fn register(&mut self, native: NativeFn) {
        self.builtins.insert(native.name.clone(), native);
    }

    /// Parse and evaluate `source`. Parse errors are all returned and
    /// nothing runs; otherwise the first runtime error is returned.
    pub fn run(&mut self, source: &str) -> std::result::Result<Value, Vec<WtfError>> {
        let (program, errors) = parser::parse(source);
        if !errors.is_empty() {
            return Err(errors);
        }

        self.eval_program(&program).map_err(|err| vec![err])
    }

    /// Run `source`, logging any errors with their source line instead of
    /// returning them. `None` means something was logged.
    pub fn execute(&mut self, source: &str) -> Option<Value> {
        match self.run(source) {
            Ok(value) => Some(value),
            Err(errors) => {
                for err in errors {
                    logger::error(err.with_source(source));
                }
                None
            }
        }
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.env.lookup(name)
    }

    /// All bindings, sorted by name
    pub fn variables(&self) -> Vec<(&str, &Variable)> {
        let mut vars: Vec<_> = self.env.iter().map(|(name, var)| (name.as_str(), var)).collect();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        vars
    }

    // ==================== Statements ====================

    /// Evaluate every statement in order; the result is the last one's value
    pub fn eval_program(&mut self, program: &Program) -> Result<Value> {
        let mut result = Value::Nil;
        for stmt in &program.statements {
            result = self.eval_stmt(stmt)?;
        }
        Ok(result)
    }

    fn eval_stmt(&mut self, stmt: &Stmt) -> Result<Value> {
        match stmt {
            Stmt::VarDecl { var_type, range, name, value, span } => {
                let value = self.declared_value(*var_type, range.as_ref(), value.as_ref(), *span)?;
                self.env.define(name.name.clone(), Variable::new(*var_type, value));
                Ok(Value::Nil)
            }

            Stmt::Assign { name, value, .. } => {
                let evaluated = self.eval_expr(value)?;
                let declared = self.env.declared_type(name)?;
                let coerced = types::coerce(declared, evaluated, value.is_strict_source(), value.span())?;
                self.env.assign(name, coerced)?;
                Ok(Value::Nil)
            }

            Stmt::Expr { expr } => self.eval_expr(expr),

            Stmt::If(stmt) => self.eval_if(stmt),
        }
    }

    fn eval_block(&mut self, block: &Block) -> Result<Value> {
        let mut result = Value::Nil;
        for stmt in &block.stmts {
            result = self.eval_stmt(stmt)?;
        }
        Ok(result)
    }

    /// Value for a new declaration. A range wins over an initializer; with
    /// neither, a default is drawn from the config.
    fn declared_value(
        &mut self,
        var_type: VarType,
        range: Option<&RangeBounds>,
        value: Option<&Expr>,
        span: Span,
    ) -> Result<Value> {
        if let Some(range) = range {
            return self.random_in_range(var_type, range, span);
        }

        if let Some(expr) = value {
            let evaluated = self.eval_expr(expr)?;
            return types::coerce(var_type, evaluated, expr.is_strict_source(), expr.span());
        }

        Ok(self.random_default(var_type))
    }

    fn eval_if(&mut self, stmt: &IfStmt) -> Result<Value> {
        let taken = match stmt.kind {
            IfKind::If => {
                let Some(condition) = &stmt.condition else {
                    return Err(runtime("if statement has no condition", stmt.span));
                };
                match self.eval_expr(condition)? {
                    Value::Bool(b) => b,
                    other => {
                        return Err(runtime(
                            format!("if condition must evaluate to bool, got {}", other.type_name()),
                            condition.span(),
                        ));
                    }
                }
            }

            IfKind::IfRand => {
                let probability = match &stmt.condition {
                    Some(expr) => self.probability(expr)?,
                    None => DEFAULT_IFRAND_PROBABILITY,
                };
                self.rng.gen::<f64>() < probability
            }
        };

        if taken {
            return self.eval_block(&stmt.consequence);
        }

        match stmt.alternative.as_deref() {
            Some(ElseBranch::If(next)) => self.eval_if(next),
            Some(ElseBranch::Block(block)) => self.eval_block(block),
            None => Ok(Value::Nil),
        }
    }

    fn probability(&mut self, expr: &Expr) -> Result<f64> {
        let value = self.eval_expr(expr)?;
        let Some(p) = value.as_f64() else {
            return Err(runtime(
                format!("ifrand probability must be a number, got {}", value.type_name()),
                expr.span(),
            ));
        };

        if !(0.0..=1.0).contains(&p) {
            return Err(runtime(
                format!("ifrand probability must be between 0 and 1, got {:.6}", p),
                expr.span(),
            ));
        }

        Ok(p)
    }

    // ==================== Expressions ====================

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Ident(ident) => self.env.get(ident),
            Expr::Int { value, .. } => Ok(Value::Int(*value)),
            Expr::Float { value, .. } => Ok(Value::Float(*value)),
            Expr::Str { value, .. } => Ok(Value::String(value.clone())),
            Expr::Bool { value, .. } => Ok(Value::Bool(*value)),

            Expr::Binary { left, op, right, span } => {
                let lhs = self.eval_expr(left)?;

                // Short-circuit: the right side is not evaluated at all
                match op {
                    BinaryOp::And if !lhs.is_truthy() => return Ok(Value::Bool(false)),
                    BinaryOp::Or if lhs.is_truthy() => return Ok(Value::Bool(true)),
                    BinaryOp::And | BinaryOp::Or => {
                        let rhs = self.eval_expr(right)?;
                        return Ok(Value::Bool(rhs.is_truthy()));
                    }
                    _ => {}
                }

                let rhs = self.eval_expr(right)?;
                ops::binary(*op, &lhs, &rhs, *span)
            }

            Expr::Unary { op, operand, span } => {
                let value = self.eval_expr(operand)?;
                ops::unary(*op, &value, *span)
            }

            Expr::Call { callee, args, span } => self.eval_call(callee, args, *span),
        }
    }

    fn eval_call(&mut self, callee: &Expr, args: &[Expr], span: Span) -> Result<Value> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }

        let Expr::Ident(ident) = callee else {
            return Err(WtfError::new(
                ErrorKind::InvalidFunctionCall(format!(
                    "function expression must be an identifier, got {}",
                    callee
                )),
                span,
            ));
        };

        let native = self.builtins.get(&ident.name).cloned().ok_or_else(|| {
            WtfError::new(ErrorKind::FunctionNotFound(ident.name.clone()), ident.span)
        })?;

        Ok(native.call(self, &values))
    }

    // ==================== Random generation ====================

    fn random_in_range(&mut self, var_type: VarType, range: &RangeBounds, span: Span) -> Result<Value> {
        let min = self.eval_expr(&range.min)?;
        let max = self.eval_expr(&range.max)?;

        match var_type {
            VarType::Int => {
                let lo = int_bound(&min, span)?;
                let hi = int_bound(&max, span)?;
                check_range(lo, hi, span)?;
                Ok(Value::Int(self.rng.gen_range(lo..=hi)))
            }

            VarType::Float => {
                let (Some(lo), Some(hi)) = (min.as_f64(), max.as_f64()) else {
                    return Err(runtime("invalid types for float range", span));
                };
                check_range(lo, hi, span)?;
                let width = hi - lo;
                if !width.is_finite() {
                    return Err(WtfError::new(
                        ErrorKind::InvalidRange(format!("float range [{}, {}] is too wide", lo, hi)),
                        span,
                    ));
                }
                Ok(Value::Float(lo + self.rng.gen::<f64>() * width))
            }

            other => Err(WtfError::new(
                ErrorKind::InvalidRange(format!("ranges are only supported for int and float, not {}", other)),
                span,
            )),
        }
    }

    fn random_default(&mut self, var_type: VarType) -> Value {
        let config = &self.config;
        let rng = &mut self.rng;

        match var_type {
            VarType::Int => {
                let (lo, hi) = ordered(config.int.min, config.int.max);
                Value::Int(rng.gen_range(lo..=hi))
            }
            VarType::Uint => {
                let (lo, hi) = ordered(config.uint.min, config.uint.max);
                Value::Uint(rng.gen_range(lo..=hi))
            }
            VarType::Float => {
                Value::Float(config.float.min + rng.gen::<f64>() * (config.float.max - config.float.min))
            }
            VarType::Unofloat => {
                let width = config.unofloat.max - config.unofloat.min;
                Value::Unofloat(Unofloat::new(config.unofloat.min + rng.gen::<f64>() * width))
            }
            VarType::Bool => Value::Bool(rng.gen::<bool>()),
            VarType::String => {
                Value::String(random_string(rng, config.length.min as usize, &config.charset))
            }
            VarType::Unknown => Value::Nil,
        }
    }
}

impl Host for Interpreter {
    fn config(&self) -> &Config {
        &self.config
    }

    fn random_string(&mut self, len: usize, charset: &str) -> String {
        random_string(&mut self.rng, len, charset)
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn log_error(&mut self, message: &str) {
        logger::error(format!("[{}] {}", self.name, message));
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.output, "{}", line) {
            logger::error(format!("[{}] failed to write output: {}", self.name, e));
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(None)
    }
}

fn runtime(message: impl Into<String>, span: Span) -> WtfError {
    WtfError::new(ErrorKind::Runtime(message.into()), span)
}

fn int_bound(value: &Value, span: Span) -> Result<i64> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::Uint(n) => i64::try_from(*n).map_err(|_| {
            WtfError::new(
                ErrorKind::InvalidRange(format!("int range bound {} does not fit in int", n)),
                span,
            )
        }),
        Value::Float(n) => Ok(*n as i64),
        _ => Err(runtime("invalid types for int range", span)),
    }
}

/// Explicit ranges need `min < max`
fn check_range<T: PartialOrd>(min: T, max: T, span: Span) -> Result<()> {
    if min > max {
        return Err(WtfError::new(ErrorKind::InvalidRange("min is greater than max".into()), span));
    }
    if min == max {
        return Err(WtfError::new(ErrorKind::InvalidRange("min is equal to max".into()), span));
    }
    Ok(())
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

fn random_string(rng: &mut StdRng, len: usize, charset: &str) -> String {
    let chars: Vec<char> = charset.chars().collect();
    (0..len).filter_map(|_| chars.choose(&mut *rng).copied()).collect()
}
