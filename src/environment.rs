//! Variable environment for WTFScript
//!
//! A single flat scope. Blocks inside `if` and `ifrand` read and write the
//! same bindings as the top level.

use crate::ast::Identifier;
use crate::error::{ErrorKind, Result, WtfError};
use crate::types::{VarType, Variable};
use crate::value::Value;
use std::collections::HashMap;

/// Name to variable mapping for one program execution
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Variable>,
}

impl Environment {
    pub fn new() -> Self {
        Self { values: HashMap::new() }
    }

    /// Define a variable. Redeclaring a name replaces the old binding,
    /// declared type included.
    pub fn define(&mut self, name: impl Into<String>, variable: Variable) {
        self.values.insert(name.into(), variable);
    }

    /// Read a variable's value
    pub fn get(&self, ident: &Identifier) -> Result<Value> {
        self.values
            .get(&ident.name)
            .map(|var| var.value.clone())
            .ok_or_else(|| {
                WtfError::new(ErrorKind::IdentifierNotFound(ident.name.clone()), ident.span)
            })
    }

    /// Declared type of an existing assignment target
    pub fn declared_type(&self, ident: &Identifier) -> Result<VarType> {
        self.values
            .get(&ident.name)
            .map(|var| var.var_type)
            .ok_or_else(|| {
                WtfError::new(ErrorKind::VariableNotDefined(ident.name.clone()), ident.span)
            })
    }

    /// Replace the value of an existing variable; its type is kept
    pub fn assign(&mut self, ident: &Identifier, value: Value) -> Result<()> {
        match self.values.get_mut(&ident.name) {
            Some(var) => {
                var.value = value;
                Ok(())
            }
            None => Err(WtfError::new(
                ErrorKind::VariableNotDefined(ident.name.clone()),
                ident.span,
            )),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Variable)> {
        self.values.iter()
    }
}
