//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric and character literals
//! - Operators and punctuation
//! - Comments
//! - Error cases

use super::{
    lexer::{tokenize, Lexer},
    tokens::{TokenKind, TokenSource, TokenStream},
};

#[test]
fn test_tokenize_keywords() {
    let source = "int bool char float void if else while return true false main".to_string();
    let tokens = tokenize(source, Some("test.cl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[1].kind, TokenKind::Bool);
    assert_eq!(tokens[2].kind, TokenKind::Char);
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[4].kind, TokenKind::Void);
    assert_eq!(tokens[5].kind, TokenKind::If);
    assert_eq!(tokens[6].kind, TokenKind::Else);
    assert_eq!(tokens[7].kind, TokenKind::While);
    assert_eq!(tokens[8].kind, TokenKind::Return);
    assert_eq!(tokens[9].kind, TokenKind::True);
    assert_eq!(tokens[10].kind, TokenKind::False);
    assert_eq!(tokens[11].kind, TokenKind::Main);
    assert_eq!(tokens[12].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar_1 _under Mixed integer".to_string();
    let tokens = tokenize(source, Some("test.cl".to_string())).unwrap();

    for (index, name) in ["foo", "bar_1", "_under", "Mixed", "integer"].iter().enumerate() {
        assert_eq!(tokens[index].kind, TokenKind::Identifier);
        assert_eq!(tokens[index].value, *name);
    }
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5".to_string();
    let tokens = tokenize(source, Some("test.cl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_char_literals() {
    let source = r"'a' ' ' '\n' '\''".to_string();
    let tokens = tokenize(source, Some("test.cl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, " ");
    assert_eq!(tokens[2].value, "\n");
    assert_eq!(tokens[3].value, "'");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / == != < > <= >= = && || !".to_string();
    let tokens = tokenize(source, Some("test.cl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Plus);
    assert_eq!(tokens[1].kind, TokenKind::Dash);
    assert_eq!(tokens[2].kind, TokenKind::Star);
    assert_eq!(tokens[3].kind, TokenKind::Slash);
    assert_eq!(tokens[4].kind, TokenKind::Equals);
    assert_eq!(tokens[5].kind, TokenKind::NotEquals);
    assert_eq!(tokens[6].kind, TokenKind::Less);
    assert_eq!(tokens[7].kind, TokenKind::Greater);
    assert_eq!(tokens[8].kind, TokenKind::LessEquals);
    assert_eq!(tokens[9].kind, TokenKind::GreaterEquals);
    assert_eq!(tokens[10].kind, TokenKind::Assignment);
    assert_eq!(tokens[11].kind, TokenKind::And);
    assert_eq!(tokens[12].kind, TokenKind::Or);
    assert_eq!(tokens[13].kind, TokenKind::Not);
    assert_eq!(tokens[14].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } , ;".to_string();
    let tokens = tokenize(source, Some("test.cl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::Comma);
    assert_eq!(tokens[5].kind, TokenKind::Semicolon);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_comments() {
    let source = "int x; // trailing comment\nx = 5;".to_string();
    let tokens = tokenize(source, Some("test.cl".to_string())).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::IntLiteral,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_spans() {
    let source = "int  count;".to_string();
    let tokens = tokenize(source, Some("test.cl".to_string())).unwrap();

    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[1].span.end.0, 10);
    assert_eq!(*tokens[1].span.start.1, "test.cl");
}

#[test]
fn test_tokenize_unrecognized_token() {
    let source = "int x = @;".to_string();
    let result = tokenize(source, Some("test.cl".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_lexer_pulls_lazily_and_repeats_eof() {
    let mut lexer = Lexer::new("x @".to_string(), None);

    // The bad character is only reached on the second pull.
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert!(lexer.next_token().is_err());

    let mut lexer = Lexer::new("y".to_string(), None);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_token_stream_repeats_eof() {
    let tokens = tokenize("a".to_string(), None).unwrap();
    let mut stream = TokenStream::new(tokens);

    assert_eq!(stream.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(stream.next_token().unwrap().kind, TokenKind::EOF);
    assert_eq!(stream.next_token().unwrap().kind, TokenKind::EOF);
}
