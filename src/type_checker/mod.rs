//! Static validation of a parsed program.
//!
//! The checker walks the AST once and verifies:
//!
//! - Names are declared once per scope and never shadow a global
//! - Exactly one `main` exists and takes no parameters
//! - Expressions are well typed under the numeric promotion rule
//! - Assignments, arguments and returns only widen implicitly
//! - `if` and `while` tests are `bool`
//!
//! Its result is the global [`type_map::TypeMap`], which the transformer
//! reuses. Checking never modifies the program.

pub mod type_checker;
pub mod type_map;

#[cfg(test)]
mod tests;
