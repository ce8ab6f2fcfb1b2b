//! Error types and error handling for the interpreter.
//!
//! This module defines the error types shared by every pass:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing, checking and evaluation
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions
//!
//! All errors are fatal: each pass stops at the first one and hands it back
//! to the caller.

pub mod errors;
