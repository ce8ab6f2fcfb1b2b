use tracing::{debug, info, trace};

use crate::{
    ast::{
        ast::{Function, Program},
        expressions::{Call, Conversion, Expr, Family, GenericOp, Operator},
        statements::{Block, Stmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    type_checker::{
        type_checker::{prototype, type_of},
        type_map::TypeMap,
    },
};

fn internal(message: String) -> Error {
    Error::unpositioned(ErrorImpl::Internal { message })
}

/// Rewrites a checked program so every operator is a typed opcode and every
/// implicit widening is an explicit conversion.
///
/// `globals` is the map returned by the type checker. The input is left
/// untouched; the rewritten program is returned.
pub fn transform(program: &Program, globals: &TypeMap) -> Result<Program, Error> {
    let init = transform_block(&program.init, globals)?;

    let functions = program
        .functions
        .iter()
        .map(|function| transform_function(function, globals))
        .collect::<Result<Vec<Function>, Error>>()?;

    info!(functions = functions.len(), "transformed program");

    Ok(Program {
        globals: program.globals.clone(),
        init,
        functions,
    })
}

fn transform_function(function: &Function, globals: &TypeMap) -> Result<Function, Error> {
    let map = globals.for_function(function);
    let body = transform_block(&function.body, &map)?;

    debug!(function = %function.id, "transformed function");

    Ok(Function {
        ty: function.ty.clone(),
        id: function.id.clone(),
        params: function.params.clone(),
        locals: function.locals.clone(),
        body,
    })
}

fn transform_block(block: &Block, map: &TypeMap) -> Result<Block, Error> {
    let members = block
        .iter()
        .map(|stmt| transform_stmt(stmt, map))
        .collect::<Result<Vec<Stmt>, Error>>()?;

    Ok(Block::new(members))
}

/// Wraps `expr` (of type `from`) so it has type `to`.
///
/// Equal types need nothing; otherwise the only legal move is one implicit
/// widening. Anything else means the checker let something through.
fn coerce(expr: Expr, from: &Type, to: &Type) -> Result<Expr, Error> {
    if from == to {
        return Ok(expr);
    }

    match Conversion::widening(from, to) {
        Some(conversion) => {
            trace!(?conversion, "inserted conversion");
            Ok(Expr::convert(conversion, expr))
        }
        None => Err(internal(format!("no implicit conversion from {} to {}", from, to))),
    }
}

pub fn transform_stmt(stmt: &Stmt, map: &TypeMap) -> Result<Stmt, Error> {
    match stmt {
        Stmt::Skip => Ok(Stmt::Skip),
        Stmt::Block(block) => Ok(Stmt::Block(transform_block(block, map)?)),
        Stmt::Assignment { target, source } => {
            let target_type = map
                .get(target)
                .ok_or_else(|| internal(format!("assignment to untyped {}", target)))?;
            let (source, source_type) = transform_typed(source, map)?;

            Ok(Stmt::Assignment {
                target: target.clone(),
                source: coerce(source, &source_type, target_type)?,
            })
        }
        Stmt::Conditional { test, then_branch, else_branch } => Ok(Stmt::Conditional {
            test: transform_expr(test, map)?,
            then_branch: Box::new(transform_stmt(then_branch, map)?),
            else_branch: Box::new(transform_stmt(else_branch, map)?),
        }),
        Stmt::Loop { test, body } => Ok(Stmt::Loop {
            test: transform_expr(test, map)?,
            body: Box::new(transform_stmt(body, map)?),
        }),
        Stmt::Call(call) => Ok(Stmt::Call(transform_call(call, map)?)),
        Stmt::Return { target, result } => {
            let result_type = prototype(target, map)?.result.clone();
            let (result, ty) = transform_typed(result, map)?;

            Ok(Stmt::Return {
                target: target.clone(),
                result: coerce(result, &ty, &result_type)?,
            })
        }
    }
}

pub fn transform_expr(expr: &Expr, map: &TypeMap) -> Result<Expr, Error> {
    transform_typed(expr, map).map(|(expr, _)| expr)
}

fn transform_call(call: &Call, map: &TypeMap) -> Result<Call, Error> {
    let params = &prototype(&call.name, map)?.params;

    let args = call
        .args
        .iter()
        .zip(params)
        .map(|(arg, param)| {
            let (arg, ty) = transform_typed(arg, map)?;
            coerce(arg, &ty, &param.ty)
        })
        .collect::<Result<Vec<Expr>, Error>>()?;

    Ok(Call {
        name: call.name.clone(),
        args,
    })
}

/// Rewrites `expr`, returning it together with its static type.
fn transform_typed(expr: &Expr, map: &TypeMap) -> Result<(Expr, Type), Error> {
    match expr {
        Expr::Value(_) | Expr::Variable(_) => Ok((expr.clone(), type_of(expr, map)?)),
        Expr::Binary { op, left, right } => {
            let (new_left, left_type) = transform_typed(left, map)?;
            let (new_right, right_type) = transform_typed(right, map)?;

            let Operator::Generic(generic) = op else {
                let rewritten = Expr::binary(*op, new_left, new_right);
                let ty = type_of(&rewritten, map)?;
                return Ok((rewritten, ty));
            };

            let promoted = Type::promote(&left_type, &right_type).ok_or_else(|| {
                internal(format!("{} applied to {} and {}", op, left_type, right_type))
            })?;
            let opcode = typed_opcode(*generic, &promoted)?;

            let result = if generic.is_arithmetic() {
                promoted.clone()
            } else {
                Type::Bool
            };

            let rewritten = Expr::binary(
                opcode,
                coerce(new_left, &left_type, &promoted)?,
                coerce(new_right, &right_type, &promoted)?,
            );
            Ok((rewritten, result))
        }
        Expr::Unary { op, operand } => {
            let (new_operand, operand_type) = transform_typed(operand, map)?;
            let opcode = match op {
                Operator::Generic(generic) => typed_opcode(*generic, &operand_type)?,
                _ => *op,
            };

            let rewritten = Expr::unary(opcode, new_operand);
            let ty = match opcode {
                Operator::Convert(conversion) => conversion.target(),
                _ => operand_type,
            };
            Ok((rewritten, ty))
        }
        Expr::Call(call) => {
            let ty = prototype(&call.name, map)?.result.clone();
            Ok((Expr::Call(transform_call(call, map)?), ty))
        }
    }
}

/// The opcode for `generic` over operands of type `operand`.
fn typed_opcode(generic: GenericOp, operand: &Type) -> Result<Operator, Error> {
    Family::of(operand)
        .and_then(|family| family.map(generic))
        .ok_or_else(|| internal(format!("no {} opcode for {} operands", generic.symbol(), operand)))
}
