//! Unit tests for the type checker module.
//!
//! This module contains tests for:
//! - Scope construction and duplicate detection
//! - The `main` requirements
//! - Expression typing under promotion
//! - Statement rules for assignment, tests, calls and returns

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Program, Variable},
        expressions::{Conversion, Expr, Family, GenericOp, Operator},
        types::{Type, Value},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::Lexer,
    parser::parser::parse,
};

use super::{
    type_checker::{type_check, type_of},
    type_map::TypeMap,
};

fn parse_source(source: &str) -> Program {
    let lexer = Lexer::new(source.to_string(), Some("test.cl".to_string()));
    parse(lexer, Rc::new("test.cl".to_string())).unwrap()
}

fn check_source(source: &str) -> Result<TypeMap, Error> {
    type_check(&parse_source(source))
}

fn error_name(source: &str) -> String {
    check_source(source).unwrap_err().get_error_name().to_string()
}

#[test]
fn test_global_map_holds_globals_and_prototypes() {
    let map = check_source("int r; float f; int add(int a, int b) { return a + b; } int main() { }")
        .unwrap();

    assert_eq!(map.get(&Variable::new("r")), Some(&Type::Int));
    assert_eq!(map.get(&Variable::new("f")), Some(&Type::Float));
    assert_eq!(map.get(&Variable::new("add")).unwrap().to_string(), "int(int, int)");
    assert!(!map.contains(&Variable::new("a")));
    assert_eq!(map.len(), 4);
}

#[test]
fn test_onion_prefers_inner_entries() {
    let program = parse_source("int x; int main() { }");
    let outer = TypeMap::typing(&program.globals);
    let inner_program = parse_source("float x; int main() { }");
    let inner = TypeMap::typing(&inner_program.globals);

    let both = outer.onion(&inner);
    assert_eq!(both.get(&Variable::new("x")), Some(&Type::Float));
    assert_eq!(outer.get(&Variable::new("x")), Some(&Type::Int));
}

#[test]
fn test_type_map_display_is_sorted() {
    let map = check_source("int z; bool a; int main() { }").unwrap();
    assert_eq!(map.to_string(), "\ta: bool\n\tmain: int()\n\tz: int\n");
}

#[test]
fn test_accepts_functions_in_any_order() {
    check_source("int main() { int r; r = add(2, 3); } int add(int a, int b) { return a + b; }")
        .unwrap();
}

#[test]
fn test_rejects_duplicate_global() {
    assert_eq!(error_name("int x; float x; int main() { }"), "DuplicateDeclaration");
}

#[test]
fn test_rejects_function_named_like_global() {
    assert_eq!(error_name("int f; int f() { } int main() { }"), "DuplicateDeclaration");
}

#[test]
fn test_rejects_duplicate_param_and_local() {
    assert_eq!(error_name("int f(int a) { int a; } int main() { }"), "DuplicateDeclaration");
}

#[test]
fn test_rejects_local_shadowing_global() {
    let error = check_source("int h; void g() { int h; } int main() { }").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::DuplicateDeclaration { name: "h".to_string() }
    );
}

#[test]
fn test_main_requirements() {
    assert_eq!(error_name("int f() { }"), "MissingMain");
    assert_eq!(error_name("int main() { } void main() { }"), "DuplicateMain");
    assert_eq!(error_name("int main(int a) { }"), "ArgumentCountMismatch");
}

#[test]
fn test_rejects_undeclared_names() {
    assert_eq!(error_name("int main() { x = 1; }"), "UndeclaredVariable");
    assert_eq!(error_name("int main() { int x; x = f(); }"), "UndeclaredFunction");
    assert_eq!(error_name("int main() { nope(); }"), "UndeclaredFunction");
}

#[test]
fn test_mixed_mode_arithmetic_promotes() {
    let program = parse_source("float f; int n; int main() { }");
    let map = TypeMap::typing(&program.globals);

    let sum = Expr::binary(
        Operator::Generic(GenericOp::Plus),
        Expr::Variable(Variable::new("f")),
        Expr::Variable(Variable::new("n")),
    );
    assert_eq!(type_of(&sum, &map).unwrap(), Type::Float);

    let chars = Expr::binary(
        Operator::Generic(GenericOp::Plus),
        Expr::Value(Value::Char(Some('a'))),
        Expr::Value(Value::Int(Some(1))),
    );
    assert_eq!(type_of(&chars, &map).unwrap(), Type::Int);
}

#[test]
fn test_arithmetic_rejects_bool_and_char_pairs() {
    assert_eq!(error_name("int main() { int x; x = true + 1; }"), "TypeMismatch");
    assert_eq!(error_name("int main() { char c; c = 'a' + 'b'; }"), "TypeMismatch");
}

#[test]
fn test_relational_and_boolean_operands() {
    check_source("int main() { bool b; b = 1 < 2.5; b = 'a' == 'b'; b = true != false; }").unwrap();
    check_source("int main() { bool b; b = 1 < 2 && !(3 > 4) || b; }").unwrap();

    assert_eq!(error_name("int main() { bool b; b = 1 < true; }"), "TypeMismatch");
    assert_eq!(error_name("int main() { bool b; b = 1 && true; }"), "TypeMismatch");
    assert_eq!(error_name("int main() { bool b; b = !1; }"), "TypeMismatch");
}

#[test]
fn test_casts() {
    check_source("int main() { int i; float f; char c; f = float(i); i = int(f); i = int(c); c = char(i); }")
        .unwrap();

    assert_eq!(error_name("int main() { char c; float f; c = char(f); }"), "TypeMismatch");
    assert_eq!(error_name("int main() { int i; i = int(i); }"), "TypeMismatch");
}

#[test]
fn test_assignment_widens_only() {
    check_source("int main() { int i; float f; char c; f = i; i = c; }").unwrap();

    assert_eq!(error_name("int main() { int i; float f; i = f; }"), "TypeMismatch");
    assert_eq!(error_name("int main() { int i; char c; c = i; }"), "TypeMismatch");
    assert_eq!(error_name("int main() { float f; char c; f = c; }"), "TypeMismatch");
}

#[test]
fn test_tests_must_be_bool() {
    assert_eq!(error_name("int main() { if (1) ; }"), "TypeMismatch");
    assert_eq!(error_name("int main() { while (1.0) ; }"), "TypeMismatch");
}

#[test]
fn test_call_rules() {
    check_source("float half(float x) { return x / 2.0; } int main() { float f; f = half(3); }").unwrap();

    assert_eq!(
        error_name("int add(int a, int b) { return a + b; } int main() { int r; r = add(1); }"),
        "ArgumentCountMismatch"
    );
    assert_eq!(
        error_name("int id(int a) { return a; } int main() { int r; r = id(1.5); }"),
        "TypeMismatch"
    );
    assert_eq!(
        error_name("void tick() { } int main() { int r; r = tick(); }"),
        "TypeMismatch"
    );
    check_source("int one() { return 1; } void tick() { } int main() { tick(); one(); }").unwrap();
}

#[test]
fn test_return_rules() {
    check_source("float f() { return 1; } int main() { }").unwrap();

    assert_eq!(error_name("int f() { return 1.5; } int main() { }"), "TypeMismatch");
    assert_eq!(error_name("void f() { return 1; } int main() { }"), "TypeMismatch");
}

#[test]
fn test_function_name_is_not_a_variable() {
    assert_eq!(
        error_name("int f() { return 1; } int main() { int x; x = f; }"),
        "TypeMismatch"
    );
}

#[test]
fn test_global_initializers_are_checked() {
    check_source("float f = 1; int main() { }").unwrap();
    assert_eq!(error_name("int i = 1.5; int main() { }"), "TypeMismatch");
}

#[test]
fn test_accepts_typed_operators() {
    let program = parse_source("float f; int n; int main() { }");
    let map = TypeMap::typing(&program.globals);

    let typed = Expr::binary(
        Operator::Typed(Family::Float, GenericOp::Plus),
        Expr::Variable(Variable::new("f")),
        Expr::convert(Conversion::I2F, Expr::Variable(Variable::new("n"))),
    );
    assert_eq!(type_of(&typed, &map).unwrap(), Type::Float);

    let wrong = Expr::binary(
        Operator::Typed(Family::Int, GenericOp::Plus),
        Expr::Variable(Variable::new("f")),
        Expr::Variable(Variable::new("n")),
    );
    assert_eq!(type_of(&wrong, &map).unwrap_err().get_error_name(), "TypeMismatch");
}
