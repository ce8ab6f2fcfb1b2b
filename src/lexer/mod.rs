//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that turns Clite source text
//! into tokens for the parser. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//!
//! Tokens are pulled one at a time through the `TokenSource` trait.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
