//! WTFScript - a tiny typed scripting language that fills in the blanks
//!
//! Every variable has a declared type. Declare one without a value and
//! WTFScript makes one up: `int(1, 6) die;` rolls a die, `string s;`
//! produces a random string, and `ifrand { ... }` flips a coin.

pub mod token;
pub mod lexer;
pub mod parser;
pub mod ast;
pub mod value;
pub mod types;
pub mod environment;
pub mod ops;
pub mod interpreter;
pub mod builtins;
pub mod config;
pub mod logger;
pub mod error;

pub use config::{Config, ConfigError};
pub use error::{ErrorKind, Phase, Result, WtfError};
pub use interpreter::Interpreter;
pub use lexer::Lexer;
pub use parser::Parser;
pub use types::{VarType, Variable};
pub use value::{Unofloat, Value};

/// Convenience function to run WTFScript code on a fresh interpreter
pub fn run(source: &str) -> std::result::Result<Value, Vec<WtfError>> {
    Interpreter::new(None).run(source)
}

/// Version of the WTFScript language
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
