//! Colored user-facing messages
//!
//! Errors and warnings go to stderr, everything else to stdout.

use colored::Colorize;
use std::fmt::Display;

pub fn error(message: impl Display) {
    eprintln!("{}", message.to_string().red());
}

pub fn warn(message: impl Display) {
    eprintln!("{}", message.to_string().yellow());
}

pub fn info(message: impl Display) {
    println!("{}", message);
}

pub fn success(message: impl Display) {
    println!("{}", message.to_string().green());
}
