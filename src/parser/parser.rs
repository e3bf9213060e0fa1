//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry
//! points. The parser is a cursor over an immutable token vector that
//! ends with the end-of-input sentinel: `current_token` peeks at the
//! front of the stream and `advance` consumes it. Consumed tokens are
//! never looked at again and the sentinel itself is never consumed.
//!
//! It maintains a lookup table of statement handlers keyed by the kind of
//! a statement's first token.

use std::collections::HashMap;

use crate::{
    ast::{ast::Program, conditions::Condition, statements::{Block, Statement}},
    errors::errors::{ensure, Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
    program::parse_program,
    stmt::{parse_block as parse_block_stmt, parse_stmt},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The tokens to parse, always terminated by the sentinel
    tokens: Vec<Token>,
    /// Index of the front of the stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
}

impl Parser {
    /// Creates a new Parser instance with its lookup tables registered.
    ///
    /// # Panics
    ///
    /// Panics if `tokens` does not end with exactly one end-of-input
    /// sentinel. That is a defect in whoever built the stream, not bad input.
    pub fn new(tokens: Vec<Token>) -> Self {
        assert!(
            tokens.last().map(|t| t.kind) == Some(TokenKind::EOF),
            "token stream must end with the end-of-input sentinel"
        );
        assert!(
            tokens.iter().filter(|t| t.kind == TokenKind::EOF).count() == 1,
            "token stream must contain exactly one end-of-input sentinel"
        );

        let mut parser = Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the consumed one.
    ///
    /// # Panics
    ///
    /// Panics when the front token is the sentinel; every grammar rule
    /// checks the front token before consuming it, so reaching this is a
    /// parser defect.
    pub fn advance(&mut self) -> &Token {
        assert!(
            self.current_token_kind() != TokenKind::EOF,
            "attempted to consume the end-of-input sentinel"
        );
        self.pos += 1;
        &self.tokens[self.pos - 1]
    }

    /// Builds an error located at the current token.
    pub fn error(&self, error: ErrorImpl) -> Error {
        Error::new(error, self.get_position())
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.error(ErrorImpl::UnexpectedToken {
                    expected: expected_kind.to_string(),
                    token: token.value.clone(),
                })),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Expects an identifier token.
    pub fn expect_identifier(&mut self) -> Result<Token, Error> {
        let error = self.error(ErrorImpl::InvalidIdentifier {
            token: self.current_token().value.clone(),
        });
        self.expect_error(TokenKind::Identifier, Some(error))
    }

    /// Expects a condition token and converts it to its `Condition`.
    pub fn expect_condition(&mut self) -> Result<Condition, Error> {
        let token = self.current_token();
        let condition = Condition::from_token(&token.value)
            .filter(|_| token.kind == TokenKind::Condition)
            .ok_or_else(|| {
                self.error(ErrorImpl::InvalidCondition {
                    token: token.value.clone(),
                })
            })?;
        self.advance();
        Ok(condition)
    }

    /// Expects the token closing `construct`, which must repeat `opening`.
    ///
    /// Keyword-delimited constructs (IF, WHILE) must close with a keyword,
    /// named ones (INSTRUCTION, PROGRAM) with an identifier. In both cases
    /// the spelling must equal the opening one.
    pub fn expect_closing(&mut self, construct: &str, opening: &Token) -> Result<Token, Error> {
        let closing = self.current_token();

        if opening.kind == TokenKind::Identifier {
            ensure(closing.kind == TokenKind::Identifier, || {
                self.error(ErrorImpl::InvalidIdentifier {
                    token: closing.value.clone(),
                })
            })?;
        } else {
            ensure(closing.kind.is_keyword(), || {
                self.error(ErrorImpl::UnexpectedToken {
                    expected: opening.value.clone(),
                    token: closing.value.clone(),
                })
            })?;
        }

        ensure(closing.value == opening.value, || {
            self.error(ErrorImpl::MismatchedDelimiter {
                construct: construct.to_string(),
                opening: opening.value.clone(),
                closing: closing.value.clone(),
            })
        })?;

        Ok(self.advance().clone())
    }

    /// Checks whether the current token ends a block: `ELSE`, `END` or the sentinel.
    pub fn at_block_end(&self) -> bool {
        matches!(
            self.current_token_kind(),
            TokenKind::Else | TokenKind::End | TokenKind::EOF
        )
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// The unconsumed suffix of the stream, always ending with the sentinel.
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.pos..]
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `stmt_fn` - The handler function for this statement type
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses a token stream into a `Program`.
///
/// This is the main entry point for parsing. The whole stream except the
/// trailing sentinel must form one program.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with state after parsing)
/// - Result containing either the Program or the first Error encountered
pub fn parse(tokens: Vec<Token>) -> (Parser, Result<Program, Error>) {
    let mut parser = Parser::new(tokens);
    let program = parse_program(&mut parser);
    (parser, program)
}

/// Parses a single statement from the front of a token stream.
///
/// Tokens after the statement are left in the parser.
pub fn parse_statement(tokens: Vec<Token>) -> (Parser, Result<Statement, Error>) {
    let mut parser = Parser::new(tokens);
    let statement = parse_stmt(&mut parser);
    (parser, statement)
}

/// Parses a block from the front of a token stream.
///
/// The block ends at the first `ELSE`, `END` or sentinel, which is left
/// unconsumed in the parser.
pub fn parse_block(tokens: Vec<Token>) -> (Parser, Result<Block, Error>) {
    let mut parser = Parser::new(tokens);
    let block = parse_block_stmt(&mut parser);
    (parser, block)
}
