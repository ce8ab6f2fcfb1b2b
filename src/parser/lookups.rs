use crate::{ast::{expressions::GenericOp, types::Type}, lexer::tokens::TokenKind};

/// Tokens accepted at one precedence level, with the operator each builds.
pub type OperatorTable = &'static [(TokenKind, GenericOp)];

pub const DISJUNCTION_OPS: OperatorTable = &[(TokenKind::Or, GenericOp::Or)];

pub const CONJUNCTION_OPS: OperatorTable = &[(TokenKind::And, GenericOp::And)];

pub const EQUALITY_OPS: OperatorTable = &[
    (TokenKind::Equals, GenericOp::Eq),
    (TokenKind::NotEquals, GenericOp::Ne),
];

pub const RELATIONAL_OPS: OperatorTable = &[
    (TokenKind::Less, GenericOp::Lt),
    (TokenKind::LessEquals, GenericOp::Le),
    (TokenKind::Greater, GenericOp::Gt),
    (TokenKind::GreaterEquals, GenericOp::Ge),
];

pub const ADDITIVE_OPS: OperatorTable = &[
    (TokenKind::Plus, GenericOp::Plus),
    (TokenKind::Dash, GenericOp::Minus),
];

pub const MULTIPLICATIVE_OPS: OperatorTable = &[
    (TokenKind::Star, GenericOp::Times),
    (TokenKind::Slash, GenericOp::Div),
];

pub const UNARY_OPS: OperatorTable = &[
    (TokenKind::Not, GenericOp::Not),
    (TokenKind::Dash, GenericOp::Neg),
];

/// Type keywords usable in cast-call syntax, e.g. `float(n)`.
pub const CAST_OPS: OperatorTable = &[
    (TokenKind::Int, GenericOp::IntCast),
    (TokenKind::Float, GenericOp::FloatCast),
    (TokenKind::Char, GenericOp::CharCast),
];

pub fn lookup(table: OperatorTable, kind: TokenKind) -> Option<GenericOp> {
    table.iter().find(|(token, _)| *token == kind).map(|(_, op)| *op)
}

/// The declared type a type keyword stands for.
pub fn type_of_token(kind: TokenKind) -> Option<Type> {
    match kind {
        TokenKind::Int => Some(Type::Int),
        TokenKind::Bool => Some(Type::Bool),
        TokenKind::Char => Some(Type::Char),
        TokenKind::Float => Some(Type::Float),
        _ => None,
    }
}
