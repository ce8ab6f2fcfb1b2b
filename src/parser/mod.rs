//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that turns a token
//! source into a `Program`. It handles:
//!
//! - Global and local declarations, with optional initializers
//! - Function definitions, including the mandatory `main`
//! - Statements (assignment, call, if/else, while, return, blocks)
//! - Expressions, one function per precedence level
//!
//! Parsing stops at the first syntax error; there is no recovery.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
