//! Default generation settings
//!
//! Controls the ranges used when a variable is declared without a value
//! or a range, and the alphabet and length of generated strings. A JSON
//! file only needs the keys it overrides:
//!
//! ```json
//! { "int": { "min": 0, "max": 10 }, "charset": "abc" }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Inclusive `[min, max]` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

pub const DEFAULT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub int: Bounds<i64>,
    pub uint: Bounds<u64>,
    pub float: Bounds<f64>,
    pub unofloat: Bounds<f64>,
    pub charset: String,
    /// Generated strings use `length.min` characters
    pub length: Bounds<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            int: Bounds::new(-1000, 1000),
            uint: Bounds::new(0, 2000),
            float: Bounds::new(-1000.0, 1000.0),
            unofloat: Bounds::new(0.0, 1.0),
            charset: DEFAULT_CHARSET.to_string(),
            length: Bounds::new(10, 10),
        }
    }
}

impl Config {
    /// Parse a JSON document over the defaults and validate the result
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.int.min >= self.int.max {
            return Err(invalid(format!(
                "int.min ({}) must be less than int.max ({})",
                self.int.min, self.int.max
            )));
        }

        if self.uint.min >= self.uint.max {
            return Err(invalid(format!(
                "uint.min ({}) must be less than uint.max ({})",
                self.uint.min, self.uint.max
            )));
        }

        if !(self.float.min < self.float.max) {
            return Err(invalid(format!(
                "float.min ({}) must be less than float.max ({})",
                self.float.min, self.float.max
            )));
        }
        if !(self.float.max - self.float.min).is_finite() {
            return Err(invalid(format!("float range {} is too wide", self.float)));
        }

        for (name, value) in [("min", self.unofloat.min), ("max", self.unofloat.max)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!(
                    "unofloat.{} ({}) must be between 0.0 and 1.0",
                    name, value
                )));
            }
        }
        if self.unofloat.min >= self.unofloat.max {
            return Err(invalid(format!(
                "unofloat.min ({}) must be less than unofloat.max ({})",
                self.unofloat.min, self.unofloat.max
            )));
        }

        if self.charset.is_empty() {
            return Err(invalid("charset cannot be empty".to_string()));
        }

        if self.length.min > self.length.max {
            return Err(invalid(format!(
                "length.min ({}) must not exceed length.max ({})",
                self.length.min, self.length.max
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}
