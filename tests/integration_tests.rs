//! Integration tests for end-to-end interpretation.
//!
//! These tests drive the public pipeline from source text through
//! tokenization, parsing, type checking, transformation and evaluation.

use clite::{
    ast::types::Value,
    errors::errors::ErrorImpl,
    interpret, run_pipeline, Output, Stage,
};

const SAMPLE: &str = include_str!("fixtures/sample.cl");
const MIXED: &str = include_str!("fixtures/mixed.cl");

fn int(value: i32) -> Value {
    Value::Int(Some(value))
}

#[test]
fn test_run_sample_program() {
    let store = interpret(SAMPLE, "sample.cl").unwrap();

    assert_eq!(store.get("r"), Some(&int(5)));
    assert_eq!(store.get("i"), Some(&int(5)));
    assert_eq!(store.get("s"), Some(&int(10)));
    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["i", "r", "s"]);
}

#[test]
fn test_run_mixed_mode_program() {
    let store = interpret(MIXED, "mixed.cl").unwrap();

    assert_eq!(store.get("f"), Some(&Value::Float(Some(1.5))));
    assert_eq!(store.get("n"), Some(&int(2)));
    assert_eq!(store.get("c"), Some(&Value::Char(Some('A'))));
    assert_eq!(store.get("out"), Some(&Value::Float(Some(7.0))));
}

#[test]
fn test_pipeline_stops_at_each_stage() {
    let source = SAMPLE.to_string();

    assert!(matches!(
        run_pipeline(source.clone(), "sample.cl", Stage::Lex).unwrap(),
        Output::Tokens(_)
    ));
    match run_pipeline(source.clone(), "sample.cl", Stage::Parse).unwrap() {
        Output::Ast(program) => assert!(program.contains_generic_operator()),
        other => panic!("expected AST, got {:?}", other),
    }
    match run_pipeline(source.clone(), "sample.cl", Stage::Check).unwrap() {
        Output::Types(globals) => assert_eq!(globals.len(), 5),
        other => panic!("expected type map, got {:?}", other),
    }
    match run_pipeline(source, "sample.cl", Stage::Transform).unwrap() {
        Output::Transformed(program) => assert!(!program.contains_generic_operator()),
        other => panic!("expected transformed AST, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_is_positioned() {
    let error = interpret("int main() {\n  x = 1\n}", "bad.cl").unwrap_err();

    assert_eq!(error.get_error_name(), "SyntaxError");
    assert_eq!(error.get_position().0, 21);
    assert_eq!(error.get_position().1.as_str(), "bad.cl");
}

#[test]
fn test_static_errors() {
    let cases = [
        ("int x; int main() { int x; }", "DuplicateDeclaration"),
        ("int main() { y = 1; }", "UndeclaredVariable"),
        ("int main() { int b; b = true + 1; }", "TypeMismatch"),
        ("int f(int a) { return a; } int main() { int r; r = f(1, 2); }", "ArgumentCountMismatch"),
        ("int f() { return 0; }", "MissingMain"),
    ];

    for (source, name) in cases {
        let error = interpret(source, "case.cl").unwrap_err();
        assert_eq!(error.get_error_name(), name, "for {}", source);
        assert!(error.get_position().is_null());
    }
}

#[test]
fn test_runtime_errors() {
    let error = interpret("int x, y; int main() { y = x; }", "case.cl").unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::UndefinedValue { what: "variable x".to_string() });

    let error = interpret("int x; int main() { x = 1 / (x - x + 0); }", "case.cl").unwrap_err();
    assert_eq!(error.get_error_name(), "UndefinedValue");

    let error = interpret("int x; int main() { x = 0; x = 1 / x; }", "case.cl").unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::DivisionByZero);

    let error = interpret("char c; int main() { c = char(-5); }", "case.cl").unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::InvalidConversion { value: -5 });
}

#[test]
fn test_void_function_updates_globals() {
    let store = interpret(
        "int count; void bump(int by) { count = count + by; } int main() { count = 0; bump(2); bump(3); }",
        "void.cl",
    )
    .unwrap();

    assert_eq!(store.get("count"), Some(&int(5)));
}

#[test]
fn test_fibonacci() {
    let source = "
        int result;
        int fib(int n) {
            int a, b, t, i;
            a = 0; b = 1; i = 0;
            while (i < n) { t = a + b; a = b; b = t; i = i + 1; }
            return a;
        }
        int main() { result = fib(10); }
    ";

    let store = interpret(source, "fib.cl").unwrap();
    assert_eq!(store.get("result"), Some(&int(55)));
}
