use std::{collections::VecDeque, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, TokenSource, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    // Every pattern is anchored so it can only match at the cursor.
    RegexPattern { regex: Regex::new(&format!("^(?:{})", source)).unwrap(), handler }
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("[0-9]+\\.[0-9]+", float_handler),
        pattern("[0-9]+", int_handler),
        pattern("'(\\\\.|[^'\\\\])'", char_handler),
        pattern("\\s+", skip_handler),
        pattern("//[^\\n]*", skip_handler),
        pattern("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern("&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
    ];
}

/// Regex driven tokenizer that produces tokens on demand.
///
/// Handlers queue the tokens they recognise in `pending`; `next_token` keeps
/// running handlers until something is queued or the source is exhausted.
pub struct Lexer {
    pending: VecDeque<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pending: VecDeque::new(),
            source,
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.pending.push_back(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span covering the next `len` bytes from the cursor.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn matched(&self, regex: &Regex) -> Option<String> {
        regex.find(self.remainder()).map(|m| m.as_str().to_string())
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            if self.at_eof() {
                return Ok(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span_of(0)));
            }

            let found = PATTERNS.iter().find(|pattern| pattern.regex.is_match(self.remainder()));
            match found {
                Some(pattern) => (pattern.handler)(self, &pattern.regex),
                None => {
                    let token = self.remainder().chars().next().unwrap_or_default().to_string();
                    return Err(Error::new(
                        ErrorImpl::UnrecognisedToken { token },
                        Position(self.pos as u32, Rc::clone(&self.file)),
                    ));
                }
            }
        }
    }
}

fn int_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(matched) = lexer.matched(regex) else { return };

    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::IntLiteral, matched, span));
}

fn float_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(matched) = lexer.matched(regex) else { return };

    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::FloatLiteral, matched, span));
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    if let Some(matched) = lexer.matched(regex) {
        lexer.advance_n(matched.len());
    }
}

fn char_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(matched) = lexer.matched(regex) else { return };
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());

    // Strip the quotes, then resolve a single escape if present.
    let inner = &matched[1..matched.len() - 1];
    let mut chars = inner.chars();
    let value = match (chars.next(), chars.next()) {
        (Some('\\'), Some(escaped)) => match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            other => other, // \\ and \' are themselves
        },
        (Some(ch), _) => ch,
        (None, _) => '\0',
    };

    lexer.push(MK_TOKEN!(TokenKind::CharLiteral, value.to_string(), span));
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(value) = lexer.matched(regex) else { return };
    let span = lexer.span_of(value.len());
    lexer.advance_n(value.len());

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push(MK_TOKEN!(*kind, value, span));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, value, span));
    }
}

/// Drains a source string into a token vector ending with `EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
