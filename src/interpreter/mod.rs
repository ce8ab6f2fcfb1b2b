//! Tree-walking evaluator for transformed programs.
//!
//! The [`environment::Environment`] is a global frame plus a stack of call
//! frames. Each call pushes one frame holding its parameters and locals, and
//! the frame is popped on every exit path, errors included. Running a program
//! yields the final global frame as a [`environment::Store`].

pub mod environment;
pub mod expr;
pub mod interpreter;
pub mod stmt;
