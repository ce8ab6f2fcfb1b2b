use std::collections::HashSet;

use tracing::{debug, info};

use crate::{
    ast::{
        ast::{Declarations, Function, Program, Variable, MAIN},
        expressions::{Call, Expr, GenericOp, Operator},
        statements::Stmt,
        types::{Prototype, Type},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::type_map::TypeMap;

fn mismatch(context: impl Into<String>, expected: impl Into<String>, received: impl Into<String>) -> Error {
    Error::unpositioned(ErrorImpl::TypeMismatch {
        context: context.into(),
        expected: expected.into(),
        received: received.into(),
    })
}

fn duplicate(name: &Variable) -> Error {
    Error::unpositioned(ErrorImpl::DuplicateDeclaration {
        name: name.to_string(),
    })
}

/// Validates a whole program.
///
/// Returns the outermost type map (globals plus one prototype per function)
/// which the transformer needs to rewrite the program.
pub fn type_check(program: &Program) -> Result<TypeMap, Error> {
    check_declarations(&program.globals)?;
    check_functions(program)?;

    let globals = TypeMap::globals(&program.globals, &program.functions);
    debug!(entries = globals.len(), "built global type map");

    for stmt in program.init.iter() {
        check_stmt(stmt, &globals, None)?;
    }

    for function in &program.functions {
        check_function(function, program, &globals)?;
    }

    info!(functions = program.functions.len(), "type check passed");
    Ok(globals)
}

/// No two declarations in one list may share a name.
pub fn check_declarations(declarations: &Declarations) -> Result<(), Error> {
    let mut seen = HashSet::new();

    for declaration in declarations {
        if !seen.insert(&declaration.variable) {
            return Err(duplicate(&declaration.variable));
        }
    }

    Ok(())
}

/// Function names are unique, distinct from globals, and exactly one is `main`.
fn check_functions(program: &Program) -> Result<(), Error> {
    let mut seen = HashSet::new();

    for function in &program.functions {
        if !seen.insert(&function.id) {
            if function.id.name() == MAIN {
                return Err(Error::unpositioned(ErrorImpl::DuplicateMain));
            }
            return Err(duplicate(&function.id));
        }

        if let Some(global) = program.globals.iter().find(|d| d.variable == function.id) {
            return Err(duplicate(&global.variable));
        }
    }

    match program.function(MAIN) {
        None => Err(Error::unpositioned(ErrorImpl::MissingMain)),
        Some(main) if !main.params.is_empty() => {
            Err(Error::unpositioned(ErrorImpl::ArgumentCountMismatch {
                function: String::from(MAIN),
                expected: main.params.len(),
                received: 0,
            }))
        }
        Some(_) => Ok(()),
    }
}

fn check_function(function: &Function, program: &Program, globals: &TypeMap) -> Result<(), Error> {
    let mut scope = function.params.clone();
    scope.extend(function.locals.iter().cloned());
    check_declarations(&scope)?;

    for declaration in &scope {
        let name = &declaration.variable;
        if globals.contains(name) || program.function(name.name()).is_some() {
            return Err(duplicate(name));
        }
    }

    let map = globals.for_function(function);
    for stmt in function.body.iter() {
        check_stmt(stmt, &map, Some(function))?;
    }

    debug!(function = %function.id, entries = map.len(), "checked function");
    Ok(())
}

fn variable_type(variable: &Variable, map: &TypeMap) -> Result<Type, Error> {
    match map.get(variable) {
        Some(Type::Prototype(_)) => Err(mismatch(
            format!("use of {}", variable),
            "variable",
            "function",
        )),
        Some(ty) => Ok(ty.clone()),
        None => Err(Error::unpositioned(ErrorImpl::UndeclaredVariable {
            variable: variable.to_string(),
        })),
    }
}

/// Looks up the prototype of a called function.
pub fn prototype<'a>(name: &Variable, map: &'a TypeMap) -> Result<&'a Prototype, Error> {
    match map.get(name) {
        Some(Type::Prototype(prototype)) => Ok(prototype),
        _ => Err(Error::unpositioned(ErrorImpl::UndeclaredFunction {
            function: name.to_string(),
        })),
    }
}

/// Checks a call's arity and argument types, returning the callee's result type.
fn check_call(call: &Call, map: &TypeMap) -> Result<Type, Error> {
    let prototype = prototype(&call.name, map)?;

    if call.args.len() != prototype.params.len() {
        return Err(Error::unpositioned(ErrorImpl::ArgumentCountMismatch {
            function: call.name.to_string(),
            expected: prototype.params.len(),
            received: call.args.len(),
        }));
    }

    for (arg, param) in call.args.iter().zip(&prototype.params) {
        let ty = type_of(arg, map)?;
        if !param.ty.accepts(&ty) {
            return Err(mismatch(
                format!("argument {} of {}", param.variable, call.name),
                param.ty.to_string(),
                ty.to_string(),
            ));
        }
    }

    Ok(prototype.result.clone())
}

/// Validates an expression and returns its type.
///
/// Typed opcodes left by the transformer are accepted as already resolved,
/// so a transformed program can be checked again.
pub fn type_of(expr: &Expr, map: &TypeMap) -> Result<Type, Error> {
    match expr {
        Expr::Value(value) => Ok(value.ty()),
        Expr::Variable(variable) => variable_type(variable, map),
        Expr::Binary { op, left, right } => {
            let left = type_of(left, map)?;
            let right = type_of(right, map)?;
            binary_type(op, &left, &right)
        }
        Expr::Unary { op, operand } => {
            let operand = type_of(operand, map)?;
            unary_type(op, &operand)
        }
        Expr::Call(call) => {
            let result = check_call(call, map)?;
            if result == Type::Void {
                return Err(mismatch(format!("call to {}", call.name), "a value", "void"));
            }
            Ok(result)
        }
    }
}

fn binary_type(op: &Operator, left: &Type, right: &Type) -> Result<Type, Error> {
    let context = format!("operator {}", op);
    let received = format!("{} and {}", left, right);

    match op {
        Operator::Generic(generic) => {
            if generic.is_boolean() {
                return match (left, right) {
                    (Type::Bool, Type::Bool) => Ok(Type::Bool),
                    _ => Err(mismatch(context, "bool operands", received)),
                };
            }

            let promoted = Type::promote(left, right);
            if generic.is_arithmetic() {
                match promoted {
                    Some(ty) if ty.is_numeric() => Ok(ty),
                    _ => Err(mismatch(context, "int or float operands", received)),
                }
            } else if generic.is_relational() {
                match promoted {
                    Some(_) => Ok(Type::Bool),
                    None => Err(mismatch(context, "operands of one type", received)),
                }
            } else {
                Err(Error::unpositioned(ErrorImpl::Internal {
                    message: format!("unary operator {} in binary position", op),
                }))
            }
        }
        Operator::Typed(family, generic) => {
            let operand = family.ty();
            if *left != operand || *right != operand {
                return Err(mismatch(context, format!("{} operands", operand), received));
            }
            if generic.is_arithmetic() {
                Ok(operand)
            } else if generic.is_relational() || generic.is_boolean() {
                Ok(Type::Bool)
            } else {
                Err(Error::unpositioned(ErrorImpl::Internal {
                    message: format!("unary operator {} in binary position", op),
                }))
            }
        }
        Operator::Convert(_) => Err(Error::unpositioned(ErrorImpl::Internal {
            message: format!("conversion {} in binary position", op),
        })),
    }
}

fn unary_type(op: &Operator, operand: &Type) -> Result<Type, Error> {
    let context = format!("operator {}", op);

    match op {
        Operator::Generic(generic) => {
            let (accepted, result) = match generic {
                GenericOp::Not => (*operand == Type::Bool, Type::Bool),
                GenericOp::Neg => (operand.is_numeric(), operand.clone()),
                GenericOp::IntCast => (matches!(operand, Type::Float | Type::Char), Type::Int),
                GenericOp::FloatCast => (*operand == Type::Int, Type::Float),
                GenericOp::CharCast => (*operand == Type::Int, Type::Char),
                _ => {
                    return Err(Error::unpositioned(ErrorImpl::Internal {
                        message: format!("binary operator {} in unary position", op),
                    }))
                }
            };

            if !accepted {
                let expected = match generic {
                    GenericOp::Not => "bool",
                    GenericOp::Neg => "int or float",
                    GenericOp::IntCast => "float or char",
                    _ => "int",
                };
                return Err(mismatch(context, expected, operand.to_string()));
            }
            Ok(result)
        }
        Operator::Typed(family, _) => {
            if *operand != family.ty() {
                return Err(mismatch(context, family.ty().to_string(), operand.to_string()));
            }
            Ok(family.ty())
        }
        Operator::Convert(conversion) => {
            if *operand != conversion.source() {
                return Err(mismatch(context, conversion.source().to_string(), operand.to_string()));
            }
            Ok(conversion.target())
        }
    }
}

/// Validates one statement.
///
/// `function` is the enclosing function, or `None` for global initializers.
pub fn check_stmt(stmt: &Stmt, map: &TypeMap, function: Option<&Function>) -> Result<(), Error> {
    match stmt {
        Stmt::Skip => Ok(()),
        Stmt::Block(block) => {
            for member in block.iter() {
                check_stmt(member, map, function)?;
            }
            Ok(())
        }
        Stmt::Assignment { target, source } => {
            let target_type = variable_type(target, map)?;
            let source_type = type_of(source, map)?;

            if !target_type.accepts(&source_type) {
                return Err(mismatch(
                    format!("assignment to {}", target),
                    target_type.to_string(),
                    source_type.to_string(),
                ));
            }
            Ok(())
        }
        Stmt::Conditional { test, then_branch, else_branch } => {
            check_test(test, map, "if")?;
            check_stmt(then_branch, map, function)?;
            check_stmt(else_branch, map, function)
        }
        Stmt::Loop { test, body } => {
            check_test(test, map, "while")?;
            check_stmt(body, map, function)
        }
        Stmt::Call(call) => check_call(call, map).map(|_| ()),
        Stmt::Return { target, result } => {
            let Some(function) = function.filter(|f| f.id == *target) else {
                return Err(Error::unpositioned(ErrorImpl::Internal {
                    message: format!("return targets {} outside of its function", target),
                }));
            };

            let context = format!("return from {}", function.id);
            let result_type = type_of(result, map)?;
            if function.ty == Type::Void {
                return Err(mismatch(context, "no value", result_type.to_string()));
            }
            if !function.ty.accepts(&result_type) {
                return Err(mismatch(context, function.ty.to_string(), result_type.to_string()));
            }
            Ok(())
        }
    }
}

fn check_test(test: &Expr, map: &TypeMap, statement: &str) -> Result<(), Error> {
    let ty = type_of(test, map)?;
    if ty != Type::Bool {
        return Err(mismatch(format!("test of {}", statement), "bool", ty.to_string()));
    }
    Ok(())
}
