use crate::{
    ast::{
        ast::Variable,
        expressions::{Call, Expr, Operator},
        types::Value,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{TokenKind, TokenSource},
};

use super::{
    lookups::{
        lookup, OperatorTable, ADDITIVE_OPS, CAST_OPS, CONJUNCTION_OPS, DISJUNCTION_OPS,
        EQUALITY_OPS, MULTIPLICATIVE_OPS, RELATIONAL_OPS, UNARY_OPS,
    },
    parser::Parser,
};

type Production<S> = fn(&mut Parser<S>) -> Result<Expr, Error>;

/// Parses `next { op next }` for every `op` in `table`, associating left.
fn parse_left_assoc<S: TokenSource>(
    parser: &mut Parser<S>,
    table: OperatorTable,
    next: Production<S>,
) -> Result<Expr, Error> {
    let mut left = next(parser)?;

    while let Some(op) = lookup(table, parser.current_token_kind()) {
        parser.advance()?;
        let right = next(parser)?;
        left = Expr::binary(Operator::Generic(op), left, right);
    }

    Ok(left)
}

// Expression --> Conjunction { || Conjunction }
pub fn parse_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    parse_left_assoc(parser, DISJUNCTION_OPS, parse_conjunction)
}

// Conjunction --> Equality { && Equality }
pub fn parse_conjunction<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    parse_left_assoc(parser, CONJUNCTION_OPS, parse_equality)
}

// Equality --> Relation { EquOp Relation }
pub fn parse_equality<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    parse_left_assoc(parser, EQUALITY_OPS, parse_relation)
}

// Relation --> Addition { RelOp Addition }
pub fn parse_relation<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    parse_left_assoc(parser, RELATIONAL_OPS, parse_addition)
}

// Addition --> Term { AddOp Term }
pub fn parse_addition<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    parse_left_assoc(parser, ADDITIVE_OPS, parse_term)
}

// Term --> Factor { MulOp Factor }
pub fn parse_term<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    parse_left_assoc(parser, MULTIPLICATIVE_OPS, parse_factor)
}

// Factor --> [ UnaryOp ] Factor | Primary
pub fn parse_factor<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    match lookup(UNARY_OPS, parser.current_token_kind()) {
        Some(op) => {
            parser.advance()?;
            let operand = parse_factor(parser)?;
            Ok(Expr::unary(Operator::Generic(op), operand))
        }
        None => parse_primary_expr(parser),
    }
}

// Primary --> Identifier | Identifier ( Arguments ) | Literal | ( Expression ) | Type ( Expression )
pub fn parse_primary_expr<S: TokenSource>(parser: &mut Parser<S>) -> Result<Expr, Error> {
    let kind = parser.current_token_kind();

    if kind == TokenKind::Identifier {
        let name = Variable::new(parser.advance()?.value);
        if parser.current_token_kind() == TokenKind::OpenParen {
            let args = parse_arguments(parser)?;
            return Ok(Expr::Call(Call { name, args }));
        }
        return Ok(Expr::Variable(name));
    }

    if kind.is_literal() {
        return parse_literal(parser).map(Expr::Value);
    }

    if kind == TokenKind::OpenParen {
        parser.advance()?;
        let expr = parse_expr(parser)?;
        parser.expect(TokenKind::CloseParen)?;
        return Ok(expr);
    }

    if let Some(op) = lookup(CAST_OPS, kind) {
        parser.advance()?;
        parser.expect(TokenKind::OpenParen)?;
        let operand = parse_expr(parser)?;
        parser.expect(TokenKind::CloseParen)?;
        return Ok(Expr::unary(Operator::Generic(op), operand));
    }

    Err(parser.unexpected("Identifier | Literal | ( | int | float | char"))
}

pub fn parse_literal<S: TokenSource>(parser: &mut Parser<S>) -> Result<Value, Error> {
    let position = parser.get_position();
    let token = parser.advance()?;
    let number_error = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            position.clone(),
        )
    };

    match token.kind {
        TokenKind::IntLiteral => {
            let value = token.value.parse::<i32>().map_err(|_| number_error())?;
            Ok(Value::Int(Some(value)))
        }
        TokenKind::FloatLiteral => {
            let value = token.value.parse::<f32>().map_err(|_| number_error())?;
            Ok(Value::Float(Some(value)))
        }
        TokenKind::CharLiteral => Ok(Value::Char(token.value.chars().next())),
        TokenKind::True => Ok(Value::Bool(Some(true))),
        TokenKind::False => Ok(Value::Bool(Some(false))),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("literal"),
                found: token.value.clone(),
            },
            position,
        )),
    }
}

// Arguments --> ( [ Expression { , Expression } ] )
pub fn parse_arguments<S: TokenSource>(parser: &mut Parser<S>) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser)?);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance()?;
            args.push(parse_expr(parser)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(args)
}
