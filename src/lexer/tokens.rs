use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{errors::errors::Error, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::Int);
        map.insert("bool", TokenKind::Bool);
        map.insert("char", TokenKind::Char);
        map.insert("float", TokenKind::Float);
        map.insert("void", TokenKind::Void);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("main", TokenKind::Main);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    IntLiteral,
    FloatLiteral,
    CharLiteral,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    Semicolon,
    Comma,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Int,
    Bool,
    Char,
    Float,
    Void,
    If,
    Else,
    While,
    Return,
    True,
    False,
    Main,
}

impl TokenKind {
    /// Whether this kind names one of the four declarable types.
    pub fn is_type(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Bool | TokenKind::Char | TokenKind::Float)
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharLiteral
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Tokens that may begin a statement.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon
                | TokenKind::OpenCurly
                | TokenKind::Identifier
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Return
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[
            TokenKind::Identifier,
            TokenKind::IntLiteral,
            TokenKind::FloatLiteral,
            TokenKind::CharLiteral,
        ]) {
            write!(f, "{} ({})", self.kind, self.value)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.iter().any(|token| *token == self.kind)
    }
}

/// A pull-based supply of tokens.
///
/// The parser holds exactly one token of lookahead and asks for the next one
/// only after consuming it. Once the input is exhausted every further call
/// yields an `EOF` token.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, Error>;
}

/// Replays an already tokenized stream, repeating the final `EOF`.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    last: Option<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens: tokens.into_iter(),
            last: None,
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Result<Token, Error> {
        match self.tokens.next() {
            Some(token) => {
                self.last = Some(token.clone());
                Ok(token)
            }
            None => {
                let span = match &self.last {
                    Some(last) => last.span.clone(),
                    None => Span::null(),
                };
                Ok(Token {
                    kind: TokenKind::EOF,
                    value: String::from("EOF"),
                    span,
                })
            }
        }
    }
}
