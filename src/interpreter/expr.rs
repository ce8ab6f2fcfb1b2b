use std::cmp::Ordering;

use crate::{
    ast::{
        expressions::{Conversion, Expr, Family, GenericOp, Operator},
        types::Value,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{environment::Environment, interpreter::Interpreter};

fn untransformed(op: &Operator) -> Error {
    Error::unpositioned(ErrorImpl::Internal {
        message: format!("no runtime meaning for operator {}", op),
    })
}

fn undefined(what: String) -> Error {
    Error::unpositioned(ErrorImpl::UndefinedValue { what })
}

pub fn eval_expr(interpreter: &Interpreter, expr: &Expr, env: &mut Environment) -> Result<Value, Error> {
    match expr {
        Expr::Value(value) => Ok(*value),
        Expr::Variable(variable) => {
            let value = env.get(variable)?;
            if value.is_undef() {
                return Err(undefined(format!("variable {}", variable)));
            }
            Ok(value)
        }
        Expr::Binary { op, left, right } => {
            let left = eval_expr(interpreter, left, env)?;
            let right = eval_expr(interpreter, right, env)?;
            apply_binary(op, left, right)
        }
        Expr::Unary { op, operand } => {
            let operand = eval_expr(interpreter, operand, env)?;
            apply_unary(op, operand)
        }
        Expr::Call(call) => interpreter
            .call(call, env)?
            .ok_or_else(|| undefined(format!("result of {}, which did not return", call.name))),
    }
}

fn relation<T: PartialOrd>(op: GenericOp, left: T, right: T) -> Option<bool> {
    let ordering = left.partial_cmp(&right);

    Some(match op {
        GenericOp::Eq => left == right,
        GenericOp::Ne => left != right,
        GenericOp::Lt => ordering == Some(Ordering::Less),
        GenericOp::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        GenericOp::Gt => ordering == Some(Ordering::Greater),
        GenericOp::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        _ => return None,
    })
}

/// Applies a typed binary opcode to two defined operands.
pub fn apply_binary(op: &Operator, left: Value, right: Value) -> Result<Value, Error> {
    if left.is_undef() || right.is_undef() {
        return Err(undefined(format!("operand of {}", op)));
    }

    let Operator::Typed(family, generic) = op else {
        return Err(untransformed(op));
    };

    let result = match family {
        Family::Int => {
            let (l, r) = (left.int_value()?, right.int_value()?);
            match generic {
                GenericOp::Plus => Some(Value::Int(Some(l.wrapping_add(r)))),
                GenericOp::Minus => Some(Value::Int(Some(l.wrapping_sub(r)))),
                GenericOp::Times => Some(Value::Int(Some(l.wrapping_mul(r)))),
                GenericOp::Div => {
                    if r == 0 {
                        return Err(Error::unpositioned(ErrorImpl::DivisionByZero));
                    }
                    Some(Value::Int(Some(l.wrapping_div(r))))
                }
                _ => relation(*generic, l, r).map(|b| Value::Bool(Some(b))),
            }
        }
        Family::Float => {
            let (l, r) = (left.float_value()?, right.float_value()?);
            match generic {
                GenericOp::Plus => Some(Value::Float(Some(l + r))),
                GenericOp::Minus => Some(Value::Float(Some(l - r))),
                GenericOp::Times => Some(Value::Float(Some(l * r))),
                GenericOp::Div => Some(Value::Float(Some(l / r))),
                _ => relation(*generic, l, r).map(|b| Value::Bool(Some(b))),
            }
        }
        Family::Char => {
            let (l, r) = (left.char_value()?, right.char_value()?);
            relation(*generic, l, r).map(|b| Value::Bool(Some(b)))
        }
        Family::Bool => {
            let (l, r) = (left.bool_value()?, right.bool_value()?);
            match generic {
                GenericOp::And => Some(Value::Bool(Some(l && r))),
                GenericOp::Or => Some(Value::Bool(Some(l || r))),
                _ => relation(*generic, l, r).map(|b| Value::Bool(Some(b))),
            }
        }
    };

    result.ok_or_else(|| untransformed(op))
}

/// Applies a typed unary opcode or conversion to a defined operand.
pub fn apply_unary(op: &Operator, operand: Value) -> Result<Value, Error> {
    if operand.is_undef() {
        return Err(undefined(format!("operand of {}", op)));
    }

    match op {
        Operator::Typed(Family::Bool, GenericOp::Not) => Ok(Value::Bool(Some(!operand.bool_value()?))),
        Operator::Typed(Family::Int, GenericOp::Neg) => {
            Ok(Value::Int(Some(operand.int_value()?.wrapping_neg())))
        }
        Operator::Typed(Family::Float, GenericOp::Neg) => Ok(Value::Float(Some(-operand.float_value()?))),
        Operator::Convert(conversion) => convert(*conversion, operand),
        _ => Err(untransformed(op)),
    }
}

fn convert(conversion: Conversion, operand: Value) -> Result<Value, Error> {
    match conversion {
        Conversion::I2F => Ok(Value::Float(Some(operand.int_value()? as f32))),
        Conversion::F2I => Ok(Value::Int(Some(operand.float_value()? as i32))),
        Conversion::C2I => Ok(Value::Int(Some(operand.char_value()? as u32 as i32))),
        Conversion::I2C => {
            let value = operand.int_value()?;
            u32::try_from(value)
                .ok()
                .and_then(char::from_u32)
                .map(|c| Value::Char(Some(c)))
                .ok_or_else(|| Error::unpositioned(ErrorImpl::InvalidConversion { value }))
        }
    }
}
