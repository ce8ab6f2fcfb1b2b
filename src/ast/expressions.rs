use std::fmt::Display;

use super::{ast::Variable, types::{Type, Value}};

/// Operator tokens as they are written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericOp {
    // Arithmetic
    Plus,
    Minus,
    Times,
    Div,
    // Relational
    Lt,
    Le,
    Eq,
    Ne,
    Gt,
    Ge,
    // Boolean
    And,
    Or,
    // Unary
    Not,
    Neg,
    // Casts, written `int(e)`, `float(e)`, `char(e)`
    IntCast,
    FloatCast,
    CharCast,
}

impl GenericOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            GenericOp::Plus => "+",
            GenericOp::Minus => "-",
            GenericOp::Times => "*",
            GenericOp::Div => "/",
            GenericOp::Lt => "<",
            GenericOp::Le => "<=",
            GenericOp::Eq => "==",
            GenericOp::Ne => "!=",
            GenericOp::Gt => ">",
            GenericOp::Ge => ">=",
            GenericOp::And => "&&",
            GenericOp::Or => "||",
            GenericOp::Not => "!",
            GenericOp::Neg => "-",
            GenericOp::IntCast => "int",
            GenericOp::FloatCast => "float",
            GenericOp::CharCast => "char",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(self, GenericOp::Plus | GenericOp::Minus | GenericOp::Times | GenericOp::Div)
    }

    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            GenericOp::Lt | GenericOp::Le | GenericOp::Eq | GenericOp::Ne | GenericOp::Gt | GenericOp::Ge
        )
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, GenericOp::And | GenericOp::Or)
    }

    pub fn is_cast(&self) -> bool {
        matches!(self, GenericOp::IntCast | GenericOp::FloatCast | GenericOp::CharCast)
    }
}

/// The operand type an opcode is specialised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Int,
    Float,
    Char,
    Bool,
}

impl Family {
    pub fn of(ty: &Type) -> Option<Family> {
        match ty {
            Type::Int => Some(Family::Int),
            Type::Float => Some(Family::Float),
            Type::Char => Some(Family::Char),
            Type::Bool => Some(Family::Bool),
            _ => None,
        }
    }

    pub fn ty(&self) -> Type {
        match self {
            Family::Int => Type::Int,
            Family::Float => Type::Float,
            Family::Char => Type::Char,
            Family::Bool => Type::Bool,
        }
    }

    /// Resolves a generic operator applied to operands of this family.
    ///
    /// Casts resolve to the conversion *out of* this family, so `float(e)`
    /// with an int operand maps through the int table to `I2F`. Returns
    /// `None` when the table has no entry, which a checked program never hits.
    pub fn map(&self, op: GenericOp) -> Option<Operator> {
        use GenericOp::*;

        match (self, op) {
            (Family::Int | Family::Float, Plus | Minus | Times | Div | Neg) => {
                Some(Operator::Typed(*self, op))
            }
            (_, Lt | Le | Eq | Ne | Gt | Ge) => Some(Operator::Typed(*self, op)),
            (Family::Bool, And | Or | Not) => Some(Operator::Typed(*self, op)),
            (Family::Int, FloatCast) => Some(Operator::Convert(Conversion::I2F)),
            (Family::Int, CharCast) => Some(Operator::Convert(Conversion::I2C)),
            (Family::Float, IntCast) => Some(Operator::Convert(Conversion::F2I)),
            (Family::Char, IntCast) => Some(Operator::Convert(Conversion::C2I)),
            _ => None,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Family::Int => "INT",
            Family::Float => "FLOAT",
            Family::Char => "CHAR",
            Family::Bool => "BOOL",
        }
    }
}

/// Explicit scalar conversions inserted by the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    I2F,
    F2I,
    C2I,
    I2C,
}

impl Conversion {
    /// The implicit widening that turns `from` into `to`, if there is one.
    pub fn widening(from: &Type, to: &Type) -> Option<Conversion> {
        match (from, to) {
            (Type::Int, Type::Float) => Some(Conversion::I2F),
            (Type::Char, Type::Int) => Some(Conversion::C2I),
            _ => None,
        }
    }

    pub fn source(&self) -> Type {
        match self {
            Conversion::I2F | Conversion::I2C => Type::Int,
            Conversion::F2I => Type::Float,
            Conversion::C2I => Type::Char,
        }
    }

    pub fn target(&self) -> Type {
        match self {
            Conversion::I2F => Type::Float,
            Conversion::F2I | Conversion::C2I => Type::Int,
            Conversion::I2C => Type::Char,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// As produced by the parser.
    Generic(GenericOp),
    /// Specialised by the transformer, e.g. `INT+` or `FLOAT<`.
    Typed(Family, GenericOp),
    Convert(Conversion),
}

impl Operator {
    pub fn is_generic(&self) -> bool {
        matches!(self, Operator::Generic(_))
    }

    /// The source-level operator behind this one, if it has one.
    pub fn generic(&self) -> Option<GenericOp> {
        match self {
            Operator::Generic(op) | Operator::Typed(_, op) => Some(*op),
            Operator::Convert(_) => None,
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        self.generic().is_some_and(|op| op.is_arithmetic())
    }

    pub fn is_relational(&self) -> bool {
        self.generic().is_some_and(|op| op.is_relational())
    }

    pub fn is_boolean(&self) -> bool {
        self.generic().is_some_and(|op| op.is_boolean())
    }

    pub fn is_not(&self) -> bool {
        self.generic() == Some(GenericOp::Not)
    }

    pub fn is_negate(&self) -> bool {
        self.generic() == Some(GenericOp::Neg)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Generic(op) => write!(f, "{}", op.symbol()),
            Operator::Typed(family, GenericOp::Neg) => write!(f, "{}_NEG", family.prefix()),
            Operator::Typed(family, op) => write!(f, "{}{}", family.prefix(), op.symbol()),
            Operator::Convert(conversion) => write!(f, "{:?}", conversion),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Variable,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Variable(Variable),
    Value(Value),
    Binary {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: Operator,
        operand: Box<Expr>,
    },
    Call(Call),
}

impl Expr {
    pub fn binary(op: Operator, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: Operator, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn convert(conversion: Conversion, operand: Expr) -> Expr {
        Expr::unary(Operator::Convert(conversion), operand)
    }

    /// Whether any operator in this expression is still generic.
    pub fn contains_generic_operator(&self) -> bool {
        match self {
            Expr::Variable(_) | Expr::Value(_) => false,
            Expr::Binary { op, left, right } => {
                op.is_generic() || left.contains_generic_operator() || right.contains_generic_operator()
            }
            Expr::Unary { op, operand } => op.is_generic() || operand.contains_generic_operator(),
            Expr::Call(call) => call.args.iter().any(Expr::contains_generic_operator),
        }
    }
}
