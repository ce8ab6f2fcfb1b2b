use tracing::{debug, info};

use crate::{
    ast::{
        ast::{Program, Variable, MAIN},
        expressions::Call,
        types::{Type, Value},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    environment::{undefined_frame, Environment, Store},
    expr::eval_expr,
    stmt::{exec_block, Flow},
};

/// Executes a transformed program.
pub struct Interpreter<'a> {
    program: &'a Program,
}

impl<'a> Interpreter<'a> {
    pub fn new(program: &'a Program) -> Self {
        Interpreter { program }
    }

    /// An environment holding only the globals, each undefined.
    pub fn global_environment(&self) -> Result<Environment, Error> {
        Ok(Environment::new(undefined_frame(&self.program.globals)?))
    }

    /// Runs the global initializers and then `main` against `env`.
    pub fn execute(&self, env: &mut Environment) -> Result<(), Error> {
        if let Flow::Returned(_) = exec_block(self, &self.program.init, env)? {
            return Err(Error::unpositioned(ErrorImpl::Internal {
                message: String::from("return among global initializers"),
            }));
        }

        let main = Call {
            name: Variable::new(MAIN),
            args: vec![],
        };
        self.call(&main, env)?;

        Ok(())
    }

    /// Calls a function and returns what it returned.
    ///
    /// Arguments are evaluated in the caller's environment before the callee's
    /// frame is pushed. `None` means a non-void function finished without
    /// reaching `return`; void functions yield `Value::Void`.
    pub fn call(&self, call: &Call, env: &mut Environment) -> Result<Option<Value>, Error> {
        let function = self.program.function(call.name.name()).ok_or_else(|| {
            Error::unpositioned(ErrorImpl::UndeclaredFunction {
                function: call.name.to_string(),
            })
        })?;

        if call.args.len() != function.params.len() {
            return Err(Error::unpositioned(ErrorImpl::ArgumentCountMismatch {
                function: call.name.to_string(),
                expected: function.params.len(),
                received: call.args.len(),
            }));
        }

        let args = call
            .args
            .iter()
            .map(|arg| eval_expr(self, arg, env))
            .collect::<Result<Vec<Value>, Error>>()?;

        let mut frame = undefined_frame(&function.locals)?;
        for (param, arg) in function.params.iter().zip(args) {
            frame.insert(param.variable.clone(), arg);
        }

        debug!(function = %function.id, depth = env.depth(), "call");

        let flow = {
            let mut scope = env.push(frame);
            exec_block(self, &function.body, &mut scope)?
        };

        debug!(function = %function.id, depth = env.depth(), "leave");

        Ok(match (flow, &function.ty) {
            (_, Type::Void) => Some(Value::Void),
            (Flow::Returned(value), _) => Some(value),
            (Flow::Continue, _) => None,
        })
    }
}

/// Runs a transformed program and returns its final global store.
pub fn run(program: &Program) -> Result<Store, Error> {
    let interpreter = Interpreter::new(program);
    let mut env = interpreter.global_environment()?;

    interpreter.execute(&mut env)?;

    info!(globals = program.globals.len(), "program finished");
    Ok(env.store())
}
