use std::fmt::Display;

use super::{statements::Block, types::Type};

/// An identifier. Equality and hashing are by exact name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(pub String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub variable: Variable,
    pub ty: Type,
}

impl Declaration {
    pub fn new(variable: Variable, ty: Type) -> Self {
        Declaration { variable, ty }
    }
}

/// Declarations in source order. Order decides positional parameter binding.
pub type Declarations = Vec<Declaration>;

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub ty: Type,
    pub id: Variable,
    pub params: Declarations,
    pub locals: Declarations,
    pub body: Block,
}

pub type Functions = Vec<Function>;

pub const MAIN: &str = "main";

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub globals: Declarations,
    /// Global initializers, run against the global frame before `main`.
    pub init: Block,
    pub functions: Functions,
}

impl Program {
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|function| function.id.name() == name)
    }

    /// Whether any operator anywhere in the program is still generic.
    pub fn contains_generic_operator(&self) -> bool {
        self.init.iter().any(|stmt| stmt.contains_generic_operator())
            || self
                .functions
                .iter()
                .any(|function| function.body.iter().any(|stmt| stmt.contains_generic_operator()))
    }
}
