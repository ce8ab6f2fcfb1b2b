#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc, time::Instant};

use tracing::info;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl, ErrorTip},
    interpreter::{environment::Store, interpreter::run},
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenStream},
    },
    parser::parser::parse,
    transformer::transformer::transform,
    type_checker::{type_checker::type_check, type_map::TypeMap},
};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod transformer;
pub mod type_checker;

extern crate regex;

const NULL_FILE: &str = "<null>";

/// Byte offset into a named source.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from(NULL_FILE)))
    }

    pub fn is_null(&self) -> bool {
        self.1.as_str() == NULL_FILE
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// How far the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Check,
    Transform,
    Run,
}

/// What the pipeline produced at the stage it stopped.
#[derive(Debug)]
pub enum Output {
    Tokens(Vec<Token>),
    Ast(Program),
    Types(TypeMap),
    Transformed(Program),
    Store(Store),
}

/// Runs `source` through every pass up to and including `stage`.
pub fn run_pipeline(source: String, file: &str, stage: Stage) -> Result<Output, Error> {
    let start = Instant::now();

    let tokens = tokenize(source, Some(String::from(file)))?;
    info!("Tokenized in {:?}", start.elapsed());
    if stage == Stage::Lex {
        return Ok(Output::Tokens(tokens));
    }

    let parse_start = Instant::now();
    let program = parse(TokenStream::new(tokens), Rc::new(String::from(file)))?;
    info!("Parsed in {:?}", parse_start.elapsed());
    if stage == Stage::Parse {
        return Ok(Output::Ast(program));
    }

    let check_start = Instant::now();
    let globals = type_check(&program)?;
    info!("Type checked in {:?}", check_start.elapsed());
    if stage == Stage::Check {
        return Ok(Output::Types(globals));
    }

    let transform_start = Instant::now();
    let transformed = transform(&program, &globals)?;
    info!("Transformed in {:?}", transform_start.elapsed());
    if stage == Stage::Transform {
        return Ok(Output::Transformed(transformed));
    }

    let run_start = Instant::now();
    let store = run(&transformed)?;
    info!("Ran in {:?}", run_start.elapsed());
    info!("Total time: {:?}", start.elapsed());

    Ok(Output::Store(store))
}

/// Lexes, parses, checks, transforms and runs `source`, returning the final
/// global store.
pub fn interpret(source: &str, file: &str) -> Result<Store, Error> {
    match run_pipeline(String::from(source), file, Stage::Run)? {
        Output::Store(store) => Ok(store),
        other => Err(Error::unpositioned(ErrorImpl::Internal {
            message: format!("pipeline stopped early with {:?}", other),
        })),
    }
}

/// Finds the line containing byte `position`.
///
/// Returns the 1-based line number, the line text and the offset within it.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    None
}

/// Formats an error the way the binary prints it.
///
/// ```text
/// Error: SyntaxError (Expected Semicolon, saw `}`)
/// -> test.cl
///   |
/// 1 | int main() { x = 1 }
///   | -------------------^
/// ```
///
/// Errors with no source position get only the first line.
pub fn render_error(error: &Error, source: &str) -> String {
    let mut out = String::new();

    // Writing into a String never fails.
    let _ = match error.get_tip() {
        ErrorTip::None => writeln!(out, "Error: {}", error.get_error_name()),
        tip => writeln!(out, "Error: {} ({})", error.get_error_name(), tip),
    };

    let position = error.get_position();
    if position.is_null() {
        let _ = writeln!(out, "{}", error);
        return out;
    }

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        let _ = writeln!(out, "-> {}", position.1);
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "-> {}", position.1);
    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");

    out
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", render_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}
