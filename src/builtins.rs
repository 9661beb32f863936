//! Built-in functions
//!
//! Builtins never abort a program. A wrong argument count or a failing
//! body is reported through [`Host::log_error`] and the call evaluates
//! to `nil`.

use crate::config::Config;
use crate::value::Value;
use std::fmt;

/// What a builtin may ask of the interpreter running it
pub trait Host {
    fn config(&self) -> &Config;

    /// `len` characters drawn uniformly from `charset`
    fn random_string(&mut self, len: usize, charset: &str) -> String;

    /// Restart the random generator from `seed`
    fn reseed(&mut self, seed: u64);

    fn log_error(&mut self, message: &str);

    /// Emit one line of program output
    fn write_line(&mut self, line: &str);
}

/// Native function type
pub type NativeFnPtr = fn(&mut dyn Host, &[Value]) -> Result<Value, String>;

/// Native/built-in function
#[derive(Clone)]
pub struct NativeFn {
    pub name: String,
    pub arity: Option<usize>, // None means variadic
    pub func: NativeFnPtr,
}

impl NativeFn {
    pub fn new(name: &str, arity: Option<usize>, func: NativeFnPtr) -> Self {
        Self {
            name: name.to_string(),
            arity,
            func,
        }
    }

    /// Run the builtin, turning any failure into a logged message and `nil`
    pub fn call(&self, host: &mut dyn Host, args: &[Value]) -> Value {
        if let Some(arity) = self.arity {
            if args.len() != arity {
                let plural = if arity == 1 { "" } else { "s" };
                host.log_error(&format!(
                    "{} expects exactly {} argument{}, got {}",
                    self.name,
                    arity,
                    plural,
                    args.len()
                ));
                return Value::Nil;
            }
        }

        match (self.func)(host, args) {
            Ok(value) => value,
            Err(message) => {
                host.log_error(&message);
                Value::Nil
            }
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

/// The builtins every interpreter starts with
pub fn builtins() -> Vec<NativeFn> {
    vec![
        // print(a, b, ...)
        NativeFn::new("print", None, |host, args| {
            if args.is_empty() {
                return Err("print expects at least 1 argument".to_string());
            }
            let line: Vec<String> = args.iter().map(|v| v.to_string()).collect();
            host.write_line(&line.join(" "));
            Ok(Value::Nil)
        }),

        // seed(n)
        NativeFn::new("seed", Some(1), |host, args| match &args[0] {
            Value::Int(n) => {
                host.reseed(*n as u64);
                Ok(Value::Nil)
            }
            Value::Uint(n) => {
                host.reseed(*n);
                Ok(Value::Nil)
            }
            other => Err(format!(
                "seed expects an integer, got {} `{}`",
                other.type_name(),
                other
            )),
        }),

        // typeof(v)
        NativeFn::new("typeof", Some(1), |_host, args| {
            Ok(Value::String(args[0].type_name().to_string()))
        }),
    ]
}
