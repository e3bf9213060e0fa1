use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::HashMap, fmt::Display};

use crate::{ast::conditions::Condition, Span, MK_TOKEN};

/// The end-of-input sentinel appended to every token stream.
///
/// It contains spaces, so no lexed word can ever be equal to it.
pub const END_OF_INPUT: &str = "### END OF INPUT ###";

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("PROGRAM", TokenKind::Program);
        map.insert("IS", TokenKind::Is);
        map.insert("BEGIN", TokenKind::Begin);
        map.insert("END", TokenKind::End);
        map.insert("INSTRUCTION", TokenKind::Instruction);
        map.insert("IF", TokenKind::If);
        map.insert("THEN", TokenKind::Then);
        map.insert("ELSE", TokenKind::Else);
        map.insert("WHILE", TokenKind::While);
        map.insert("DO", TokenKind::Do);
        map
    };
    static ref IDENTIFIER_SHAPE: Regex = Regex::new("^[a-zA-Z][a-zA-Z0-9-]*$").unwrap();
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    Condition,
    /// Any spelling that is not a keyword, condition or identifier.
    Error,

    // Reserved
    Program,
    Is,
    Begin,
    End,
    Instruction,
    If,
    Then,
    Else,
    While,
    Do,
}

impl TokenKind {
    /// The source spelling of a keyword kind, `None` for the other kinds.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            TokenKind::Program => Some("PROGRAM"),
            TokenKind::Is => Some("IS"),
            TokenKind::Begin => Some("BEGIN"),
            TokenKind::End => Some("END"),
            TokenKind::Instruction => Some("INSTRUCTION"),
            TokenKind::If => Some("IF"),
            TokenKind::Then => Some("THEN"),
            TokenKind::Else => Some("ELSE"),
            TokenKind::While => Some("WHILE"),
            TokenKind::Do => Some("DO"),
            TokenKind::EOF | TokenKind::Identifier | TokenKind::Condition | TokenKind::Error => {
                None
            }
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.keyword().is_some()
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.keyword() {
            Some(spelling) => write!(f, "{}", spelling),
            None if *self == TokenKind::EOF => write!(f, "{}", END_OF_INPUT),
            None => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    /// Builds a token for `value`, classifying it the way the tokenizer does.
    pub fn classify(value: &str, span: Span) -> Token {
        MK_TOKEN!(classify(value), String::from(value), span)
    }

    /// Builds the end-of-input sentinel.
    pub fn end_of_input(span: Span) -> Token {
        MK_TOKEN!(TokenKind::EOF, String::from(END_OF_INPUT), span)
    }
}

/// Classifies a single spelling.
pub fn classify(value: &str) -> TokenKind {
    if value == END_OF_INPUT {
        TokenKind::EOF
    } else if let Some(kind) = RESERVED_LOOKUP.get(value) {
        *kind
    } else if is_condition(value) {
        TokenKind::Condition
    } else if IDENTIFIER_SHAPE.is_match(value) {
        TokenKind::Identifier
    } else {
        TokenKind::Error
    }
}

pub fn is_keyword(value: &str) -> bool {
    RESERVED_LOOKUP.contains_key(value)
}

pub fn is_condition(value: &str) -> bool {
    Condition::from_token(value).is_some()
}

/// Identifier-shaped and neither a keyword nor a condition spelling.
pub fn is_identifier(value: &str) -> bool {
    classify(value) == TokenKind::Identifier
}
