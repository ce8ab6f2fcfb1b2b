use tracing::debug;

use crate::{
    ast::{
        expressions::Expr,
        statements::{Block, Stmt},
        types::Value,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{environment::Environment, expr::eval_expr, interpreter::Interpreter};

/// How control leaves a statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Returned(Value),
}

fn eval_test(interpreter: &Interpreter, test: &Expr, env: &mut Environment) -> Result<bool, Error> {
    let value = eval_expr(interpreter, test, env)?;
    if value.is_undef() {
        return Err(Error::unpositioned(ErrorImpl::UndefinedValue {
            what: String::from("test condition"),
        }));
    }
    value.bool_value()
}

pub fn exec_block(interpreter: &Interpreter, block: &Block, env: &mut Environment) -> Result<Flow, Error> {
    for stmt in block.iter() {
        if let Flow::Returned(value) = exec_stmt(interpreter, stmt, env)? {
            return Ok(Flow::Returned(value));
        }
    }

    Ok(Flow::Continue)
}

pub fn exec_stmt(interpreter: &Interpreter, stmt: &Stmt, env: &mut Environment) -> Result<Flow, Error> {
    match stmt {
        Stmt::Skip => Ok(Flow::Continue),
        Stmt::Block(block) => exec_block(interpreter, block, env),
        Stmt::Assignment { target, source } => {
            let value = eval_expr(interpreter, source, env)?;
            env.set(target, value)?;
            Ok(Flow::Continue)
        }
        Stmt::Conditional { test, then_branch, else_branch } => {
            if eval_test(interpreter, test, env)? {
                exec_stmt(interpreter, then_branch, env)
            } else {
                exec_stmt(interpreter, else_branch, env)
            }
        }
        Stmt::Loop { test, body } => {
            while eval_test(interpreter, test, env)? {
                if let Flow::Returned(value) = exec_stmt(interpreter, body, env)? {
                    return Ok(Flow::Returned(value));
                }
            }
            Ok(Flow::Continue)
        }
        Stmt::Call(call) => {
            interpreter.call(call, env)?;
            Ok(Flow::Continue)
        }
        Stmt::Return { target, result } => {
            let value = eval_expr(interpreter, result, env)?;
            debug!(function = %target, %value, "return");
            Ok(Flow::Returned(value))
        }
    }
}
