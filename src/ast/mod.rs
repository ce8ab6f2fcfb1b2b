/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, functions, declarations and variables
/// - expressions: Expression variants and the operator/opcode tables
/// - statements: Statement variants and blocks
/// - types: Types, function prototypes and scalar values
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
