//! Type-directed rewriting of a checked program.
//!
//! Every generic operator becomes a typed opcode (`+` over floats becomes
//! `FLOAT+`) and every implicit widening becomes an explicit `I2F` or `C2I`
//! node. The interpreter only understands the rewritten form.

pub mod transformer;

#[cfg(test)]
mod tests;
