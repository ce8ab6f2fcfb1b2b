use tracing::trace;

use crate::{
    ast::{
        ast::{Declaration, Declarations, Function, Program, Variable, MAIN},
        expressions::Call,
        statements::{Block, Stmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{TokenKind, TokenSource},
};

use super::{
    expr::{parse_arguments, parse_expr},
    lookups::type_of_token,
    parser::Parser,
};

// Program --> { Type DeclList ; | FunctionDef } EOF
pub fn parse_program<S: TokenSource>(parser: &mut Parser<S>) -> Result<Program, Error> {
    let mut globals = vec![];
    let mut init = vec![];
    let mut functions = vec![];

    while parser.current_token_kind() != TokenKind::EOF {
        let ty = parse_return_type(parser)?;

        if parser.current_token_kind() == TokenKind::Main {
            parser.advance()?;
            functions.push(parse_function(parser, ty, Variable::new(MAIN))?);
            continue;
        }

        let name = Variable::new(parser.expect(TokenKind::Identifier)?.value);
        if parser.current_token_kind() == TokenKind::OpenParen {
            functions.push(parse_function(parser, ty, name)?);
        } else if ty == Type::Void {
            return Err(parser.unexpected("( after a void declaration"));
        } else {
            parse_declarators(parser, ty, name, &mut globals, &mut init)?;
        }
    }

    Ok(Program {
        globals,
        init: Block::new(init),
        functions,
    })
}

// Type --> int | bool | float | char
pub fn parse_type<S: TokenSource>(parser: &mut Parser<S>) -> Result<Type, Error> {
    match type_of_token(parser.current_token_kind()) {
        Some(ty) => {
            parser.advance()?;
            Ok(ty)
        }
        None => Err(parser.unexpected("type")),
    }
}

fn parse_return_type<S: TokenSource>(parser: &mut Parser<S>) -> Result<Type, Error> {
    if parser.current_token_kind() == TokenKind::Void {
        parser.advance()?;
        return Ok(Type::Void);
    }

    match type_of_token(parser.current_token_kind()) {
        Some(ty) => {
            parser.advance()?;
            Ok(ty)
        }
        None => Err(parser.unexpected("type or void")),
    }
}

// Declaration --> Type Declarator { , Declarator } ;
fn parse_declaration<S: TokenSource>(
    parser: &mut Parser<S>,
    declarations: &mut Declarations,
    initializers: &mut Vec<Stmt>,
) -> Result<(), Error> {
    let ty = parse_type(parser)?;
    let name = Variable::new(parser.expect(TokenKind::Identifier)?.value);

    parse_declarators(parser, ty, name, declarations, initializers)
}

/// Parses the rest of a declaration list once its type and first name are
/// known. Initializers become assignments, kept in declaration order.
// Declarator --> Identifier [ = Expression ]
fn parse_declarators<S: TokenSource>(
    parser: &mut Parser<S>,
    ty: Type,
    first: Variable,
    declarations: &mut Declarations,
    initializers: &mut Vec<Stmt>,
) -> Result<(), Error> {
    let mut name = first;

    loop {
        if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance()?;
            initializers.push(Stmt::Assignment {
                target: name.clone(),
                source: parse_expr(parser)?,
            });
        }
        declarations.push(Declaration::new(name, ty.clone()));

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance()?;
        name = Variable::new(parser.expect(TokenKind::Identifier)?.value);
    }

    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}

// FunctionDef --> Type Identifier ( Params ) { Declarations Statements }
fn parse_function<S: TokenSource>(
    parser: &mut Parser<S>,
    ty: Type,
    id: Variable,
) -> Result<Function, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut params = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let param_type = parse_type(parser)?;
            let param = Variable::new(parser.expect(TokenKind::Identifier)?.value);
            params.push(Declaration::new(param, param_type));

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance()?;
        }
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::OpenCurly)?;

    parser.enter_function(id.clone());

    let mut locals = vec![];
    let mut members = vec![];
    while parser.current_token_kind().is_type() {
        parse_declaration(parser, &mut locals, &mut members)?;
    }

    while parser.current_token_kind().starts_statement() {
        members.push(parse_stmt(parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    parser.leave_function();
    trace!(function = %id, params = params.len(), locals = locals.len(), "parsed function");

    Ok(Function {
        ty,
        id,
        params,
        locals,
        body: Block::new(members),
    })
}

// Statement --> ; | Block | Assignment | CallStatement | IfStatement | WhileStatement | ReturnStatement
pub fn parse_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance()?;
            Ok(Stmt::Skip)
        }
        TokenKind::OpenCurly => parse_block_stmt(parser),
        TokenKind::Identifier => parse_assignment_or_call(parser),
        TokenKind::If => parse_if_stmt(parser),
        TokenKind::While => parse_while_stmt(parser),
        TokenKind::Return => parse_return_stmt(parser),
        _ => Err(parser.unexpected("statement")),
    }
}

// Block --> { Statements }
pub fn parse_block_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut members = vec![];
    while parser.current_token_kind().starts_statement() {
        members.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(Stmt::Block(Block::new(members)))
}

// Assignment --> Identifier = Expression ;
// CallStatement --> Identifier ( Arguments ) ;
fn parse_assignment_or_call<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let name = Variable::new(parser.expect(TokenKind::Identifier)?.value);

    let stmt = match parser.current_token_kind() {
        TokenKind::Assignment => {
            parser.advance()?;
            Stmt::Assignment {
                target: name,
                source: parse_expr(parser)?,
            }
        }
        TokenKind::OpenParen => Stmt::Call(Call {
            name,
            args: parse_arguments(parser)?,
        }),
        _ => return Err(parser.unexpected("= or (")),
    };

    parser.expect(TokenKind::Semicolon)?;
    Ok(stmt)
}

// IfStatement --> if ( Expression ) Statement [ else Statement ]
pub fn parse_if_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    parser.expect(TokenKind::If)?;
    parser.expect(TokenKind::OpenParen)?;
    let test = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let then_branch = parse_stmt(parser)?;

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance()?;
        parse_stmt(parser)?
    } else {
        Stmt::Skip
    };

    Ok(Stmt::Conditional {
        test,
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    })
}

// WhileStatement --> while ( Expression ) Statement
pub fn parse_while_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    parser.expect(TokenKind::While)?;
    parser.expect(TokenKind::OpenParen)?;
    let test = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(Stmt::Loop {
        test,
        body: Box::new(body),
    })
}

// ReturnStatement --> return Expression ;
pub fn parse_return_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Result<Stmt, Error> {
    let position = parser.get_position();
    parser.expect(TokenKind::Return)?;

    let target = match parser.current_function() {
        Some(function) => function.clone(),
        None => {
            return Err(Error::new(
                ErrorImpl::Internal {
                    message: String::from("return parsed outside of a function body"),
                },
                position,
            ))
        }
    };

    let result = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return { target, result })
}
