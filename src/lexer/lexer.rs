use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{Position, Span, MK_TOKEN};

use super::tokens::{Token, TokenKind};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^#[^\\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z0-9-]+").unwrap(), handler: word_handler },
        RegexPattern { regex: Regex::new("^.").unwrap(), handler: error_handler },
    ];
}

pub struct Lexer<'s> {
    tokens: Vec<Token>,
    source: &'s str,
    pos: usize,
    file: Rc<String>,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str, file: Option<String>) -> Lexer<'s> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &'s str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn span(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).map_or(0, |m| m.end());
    lexer.advance_n(matched);
}

fn word_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(value) = regex.find(lexer.remainder()) else {
        return;
    };
    let value = value.as_str();

    lexer.push(Token::classify(value, lexer.span(value.len())));
    lexer.advance_n(value.len());
}

fn error_handler(lexer: &mut Lexer, regex: &Regex) {
    let Some(value) = regex.find(lexer.remainder()) else {
        return;
    };
    let value = value.as_str();

    lexer.push(MK_TOKEN!(TokenKind::Error, String::from(value), lexer.span(value.len())));
    lexer.advance_n(value.len());
}

/// Splits BL source text into tokens and appends the end-of-input sentinel.
///
/// Tokenizing never fails: spellings that are not keywords, conditions or
/// identifiers become `TokenKind::Error` tokens and are rejected by the
/// parser wherever they appear.
pub fn tokenize(source: &str, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let start = lex.pos;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex);
                break;
            }
        }

        assert!(lex.pos > start, "tokenizer made no progress at byte {}", start);
    }

    let eof = lex.span(0);
    lex.push(Token::end_of_input(eof));

    debug!(file = %lex.file, tokens = lex.tokens.len(), "tokenized");
    lex.tokens
}

/// Builds a token stream from already separated words.
///
/// Each word is classified exactly as `tokenize` would classify it, and
/// the sentinel is appended. Positions are word indices.
pub fn tokens_from_words(words: &[&str]) -> Vec<Token> {
    let file = Rc::new(String::from("<words>"));
    let span_at = |index: usize| Span {
        start: Position(index as u32, Rc::clone(&file)),
        end: Position(index as u32 + 1, Rc::clone(&file)),
    };

    let mut tokens: Vec<Token> = words
        .iter()
        .enumerate()
        .map(|(index, word)| Token::classify(word, span_at(index)))
        .collect();
    tokens.push(Token::end_of_input(span_at(words.len())));
    tokens
}
