//! Parser state and entry point.
//!
//! This module contains the Parser struct and the `parse` function.
//! The parser is a recursive-descent parser with one function per grammar
//! production (see `stmt.rs` and `expr.rs`). It holds exactly one token of
//! lookahead, pulled from a `TokenSource`, and never backtracks.
//!
//! Besides the lookahead it threads one piece of ambient state: the name of
//! the function whose body is being parsed, which every `return` records as
//! its target.

use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::ast::{Program, Variable},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenSource},
    Position,
};

use super::stmt::parse_program;

/// The main parser structure that maintains parsing state.
pub struct Parser<S: TokenSource> {
    /// Where tokens are pulled from
    source: S,
    /// The single token of lookahead
    token: Token,
    /// Function whose body is currently being parsed
    current_function: Option<Variable>,
}

impl<S: TokenSource> Parser<S> {
    /// Creates a new Parser and pulls its first token.
    ///
    /// # Arguments
    ///
    /// * `source` - Token source to pull from
    pub fn new(mut source: S) -> Result<Self, Error> {
        let token = source.next_token()?;

        Ok(Parser {
            source,
            token,
            current_function: None,
        })
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Consumes the current token, pulls the next one and returns the consumed token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = self.source.next_token()?;
        Ok(std::mem::replace(&mut self.token, next))
    }

    /// Consumes the current token if it has the expected kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise a syntax
    /// error naming the expected kind and the token actually seen.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.unexpected(&expected_kind.to_string()));
        }

        self.advance()
    }

    /// Builds a syntax error at the current token.
    ///
    /// # Arguments
    ///
    /// * `expected` - Human readable description of what was expected
    pub fn unexpected(&self, expected: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found: self.token.value.clone(),
            },
            self.get_position(),
        )
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.token.span.start.clone()
    }

    pub fn enter_function(&mut self, name: Variable) {
        self.current_function = Some(name);
    }

    pub fn leave_function(&mut self) {
        self.current_function = None;
    }

    pub fn current_function(&self) -> Option<&Variable> {
        self.current_function.as_ref()
    }
}

/// Parses a token source into a `Program`.
///
/// This is the main entry point for parsing. Parsing stops at the first
/// syntax error; no partial program is returned.
///
/// # Arguments
///
/// * `source` - Token source to pull from
/// * `file` - Reference-counted string containing the source file name
pub fn parse<S: TokenSource>(source: S, file: Rc<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(source)?;
    let program = parse_program(&mut parser)?;

    debug!(
        file = %file,
        globals = program.globals.len(),
        functions = program.functions.len(),
        "parsed program"
    );

    Ok(program)
}
