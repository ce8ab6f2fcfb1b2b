//! Unit tests for the transformer module.

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Program, Variable},
        expressions::{Call, Conversion, Expr, Family, GenericOp, Operator},
        statements::Stmt,
        types::Value,
    },
    lexer::lexer::Lexer,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

use super::transformer::transform;

fn transform_source(source: &str) -> Program {
    let lexer = Lexer::new(source.to_string(), Some("test.cl".to_string()));
    let program = parse(lexer, Rc::new("test.cl".to_string())).unwrap();
    let globals = type_check(&program).unwrap();
    transform(&program, &globals).unwrap()
}

fn main_body(program: &Program) -> Vec<Stmt> {
    program.function("main").unwrap().body.members.clone()
}

fn assigned(stmt: &Stmt) -> &Expr {
    match stmt {
        Stmt::Assignment { source, .. } => source,
        other => panic!("expected assignment, got {:?}", other),
    }
}

fn var(name: &str) -> Expr {
    Expr::Variable(Variable::new(name))
}

fn count_conversions(expr: &Expr) -> usize {
    match expr {
        Expr::Variable(_) | Expr::Value(_) => 0,
        Expr::Binary { left, right, .. } => count_conversions(left) + count_conversions(right),
        Expr::Unary { op, operand } => {
            let own = usize::from(matches!(op, Operator::Convert(_)));
            own + count_conversions(operand)
        }
        Expr::Call(call) => call.args.iter().map(count_conversions).sum(),
    }
}

const SAMPLE: &str = "
    int r; float out; bool done;
    int add(int a, int b) { return a + b; }
    float scale(float x) { return x * 2; }
    int main() {
        int i, n; char c; float f;
        i = 0; n = 2; c = 'a'; f = 1.5;
        while (i < 5) { i = i + 1; }
        if (!(i == 5) || f > n) out = f + n; else out = -f;
        r = add(c, n) - int(f);
        out = scale(n) / float(i);
        done = c < 'z' && true;
    }
";

#[test]
fn test_transform_leaves_no_generic_operators() {
    let program = transform_source(SAMPLE);
    assert!(!program.contains_generic_operator());
}

#[test]
fn test_transformed_program_type_checks_again() {
    let program = transform_source(SAMPLE);
    type_check(&program).unwrap();
}

#[test]
fn test_transform_is_idempotent() {
    let once = transform_source(SAMPLE);
    let globals = type_check(&once).unwrap();
    let twice = transform(&once, &globals).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_mixed_mode_sum_widens_int_operand() {
    let program = transform_source("float f; int n; float out; int main() { out = f + n; }");

    assert_eq!(
        assigned(&main_body(&program)[0]),
        &Expr::binary(
            Operator::Typed(Family::Float, GenericOp::Plus),
            var("f"),
            Expr::convert(Conversion::I2F, var("n")),
        )
    );
}

#[test]
fn test_widening_inserts_exactly_one_conversion() {
    let program = transform_source(
        "int main() { int i, j; float f; char c; f = i; i = c; i = j; f = f + i; i = c + i; i = j + i; }",
    );
    let counts: Vec<usize> = main_body(&program)
        .iter()
        .map(|stmt| count_conversions(assigned(stmt)))
        .collect();

    assert_eq!(counts, vec![1, 1, 0, 1, 1, 0]);
}

#[test]
fn test_relational_and_boolean_opcodes() {
    let program = transform_source("int main() { bool b; char c; b = c < 'z' && !b; }");

    assert_eq!(
        assigned(&main_body(&program)[0]),
        &Expr::binary(
            Operator::Typed(Family::Bool, GenericOp::And),
            Expr::binary(
                Operator::Typed(Family::Char, GenericOp::Lt),
                var("c"),
                Expr::Value(Value::Char(Some('z'))),
            ),
            Expr::unary(Operator::Typed(Family::Bool, GenericOp::Not), var("b")),
        )
    );
}

#[test]
fn test_casts_become_conversions() {
    let program = transform_source(
        "int main() { int i; float f; char c; f = float(i); i = int(f); i = int(c); c = char(i); }",
    );
    let ops: Vec<String> = main_body(&program)
        .iter()
        .map(|stmt| match assigned(stmt) {
            Expr::Unary { op, .. } => op.to_string(),
            other => panic!("expected unary, got {:?}", other),
        })
        .collect();

    assert_eq!(ops, vec!["I2F", "F2I", "C2I", "I2C"]);
}

#[test]
fn test_negation_opcodes() {
    let program = transform_source("int main() { int i; float f; i = -i; f = -f; }");
    let body = main_body(&program);

    assert_eq!(
        assigned(&body[0]),
        &Expr::unary(Operator::Typed(Family::Int, GenericOp::Neg), var("i"))
    );
    assert_eq!(
        assigned(&body[1]),
        &Expr::unary(Operator::Typed(Family::Float, GenericOp::Neg), var("f"))
    );
}

#[test]
fn test_arguments_and_returns_are_coerced() {
    let program = transform_source(
        "float half(float x) { return 1; } int main() { float f; f = half(3); }",
    );

    assert_eq!(
        program.function("half").unwrap().body.members,
        vec![Stmt::Return {
            target: Variable::new("half"),
            result: Expr::convert(Conversion::I2F, Expr::Value(Value::Int(Some(1)))),
        }]
    );
    assert_eq!(
        assigned(&main_body(&program)[0]),
        &Expr::Call(Call {
            name: Variable::new("half"),
            args: vec![Expr::convert(Conversion::I2F, Expr::Value(Value::Int(Some(3))))],
        })
    );
}

#[test]
fn test_global_initializers_are_transformed() {
    let program = transform_source("float f = 2; int main() { }");

    assert_eq!(
        program.init.members,
        vec![Stmt::Assignment {
            target: Variable::new("f"),
            source: Expr::convert(Conversion::I2F, Expr::Value(Value::Int(Some(2)))),
        }]
    );
}

#[test]
fn test_transform_does_not_modify_input() {
    let lexer = Lexer::new("float f; int n; int main() { f = f + n; }".to_string(), None);
    let program = parse(lexer, Rc::new("shell".to_string())).unwrap();
    let before = program.clone();
    let globals = type_check(&program).unwrap();

    transform(&program, &globals).unwrap();
    assert_eq!(program, before);
    assert!(program.contains_generic_operator());
}
