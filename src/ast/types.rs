//! Type system and runtime values.
//!
//! This module defines:
//!
//! - The closed set of Clite types, plus the `Prototype` variant used as the
//!   type of a function name
//! - Tagged scalar values that remember whether they have been assigned
//!
//! Values double as literal expressions in the AST and as the contents of
//! interpreter frames.

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorImpl};

use super::ast::Declarations;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Bool,
    Char,
    Float,
    Void,
    Undefined,
    Unused,
    Prototype(Rc<Prototype>),
}

/// The signature recorded for a function name in a type map.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub result: Type,
    pub params: Declarations,
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// Whether a value of type `source` may be stored in a slot of this type.
    ///
    /// Equal types always are; otherwise only `float := int` and
    /// `int := char` widen implicitly.
    pub fn accepts(&self, source: &Type) -> bool {
        self == source
            || matches!((self, source), (Type::Float, Type::Int) | (Type::Int, Type::Char))
    }

    /// Common type of two binary operands, if the operands can meet.
    pub fn promote(left: &Type, right: &Type) -> Option<Type> {
        match (left, right) {
            (Type::Prototype(_), _) | (_, Type::Prototype(_)) => None,
            (l, r) if l == r => Some(l.clone()),
            (Type::Int, Type::Float) | (Type::Float, Type::Int) => Some(Type::Float),
            (Type::Int, Type::Char) | (Type::Char, Type::Int) => Some(Type::Int),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Char => write!(f, "char"),
            Type::Float => write!(f, "float"),
            Type::Void => write!(f, "void"),
            Type::Undefined => write!(f, "undef"),
            Type::Unused => write!(f, "unused"),
            Type::Prototype(prototype) => {
                let params: Vec<String> = prototype
                    .params
                    .iter()
                    .map(|declaration| declaration.ty.to_string())
                    .collect();
                write!(f, "{}({})", prototype.result, params.join(", "))
            }
        }
    }
}

/// A scalar value. `None` payloads are undefined values of that type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(Option<i32>),
    Bool(Option<bool>),
    Char(Option<char>),
    Float(Option<f32>),
    Void,
    Undefined,
    Unused,
}

impl Value {
    /// The declaration-time default for a slot of type `ty`.
    pub fn undefined(ty: &Type) -> Result<Value, Error> {
        match ty {
            Type::Int => Ok(Value::Int(None)),
            Type::Bool => Ok(Value::Bool(None)),
            Type::Char => Ok(Value::Char(None)),
            Type::Float => Ok(Value::Float(None)),
            Type::Void => Ok(Value::Void),
            Type::Undefined => Ok(Value::Undefined),
            Type::Unused => Ok(Value::Unused),
            Type::Prototype(_) => Err(Error::unpositioned(ErrorImpl::Internal {
                message: format!("no value of function type {}", ty),
            })),
        }
    }

    pub fn ty(&self) -> Type {
        match self {
            Value::Int(_) => Type::Int,
            Value::Bool(_) => Type::Bool,
            Value::Char(_) => Type::Char,
            Value::Float(_) => Type::Float,
            Value::Void => Type::Void,
            Value::Undefined => Type::Undefined,
            Value::Unused => Type::Unused,
        }
    }

    pub fn is_undef(&self) -> bool {
        match self {
            Value::Int(v) => v.is_none(),
            Value::Bool(v) => v.is_none(),
            Value::Char(v) => v.is_none(),
            Value::Float(v) => v.is_none(),
            Value::Void | Value::Unused => false,
            Value::Undefined => true,
        }
    }

    pub fn int_value(&self) -> Result<i32, Error> {
        match self {
            Value::Int(Some(v)) => Ok(*v),
            _ => Err(self.misread(Type::Int)),
        }
    }

    pub fn bool_value(&self) -> Result<bool, Error> {
        match self {
            Value::Bool(Some(v)) => Ok(*v),
            _ => Err(self.misread(Type::Bool)),
        }
    }

    pub fn char_value(&self) -> Result<char, Error> {
        match self {
            Value::Char(Some(v)) => Ok(*v),
            _ => Err(self.misread(Type::Char)),
        }
    }

    pub fn float_value(&self) -> Result<f32, Error> {
        match self {
            Value::Float(Some(v)) => Ok(*v),
            _ => Err(self.misread(Type::Float)),
        }
    }

    fn misread(&self, wanted: Type) -> Error {
        if self.is_undef() && self.ty() == wanted {
            Error::unpositioned(ErrorImpl::UndefinedValue {
                what: format!("{} value", wanted),
            })
        } else {
            Error::unpositioned(ErrorImpl::Internal {
                message: format!("read {} payload from {} value", wanted, self.ty()),
            })
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_undef() {
            return write!(f, "undef");
        }

        match self {
            Value::Int(Some(v)) => write!(f, "{}", v),
            Value::Bool(Some(v)) => write!(f, "{}", v),
            Value::Char(Some(v)) => write!(f, "'{}'", v.escape_default()),
            Value::Float(Some(v)) => write!(f, "{:?}", v),
            Value::Void => write!(f, "void"),
            Value::Unused => write!(f, "unused"),
            _ => write!(f, "undef"),
        }
    }
}
