use std::mem;

use tracing::trace;

use crate::{
    ast::{
        conditions::Condition,
        statements::{Block, Statement},
    },
    errors::errors::{ensure, Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::parser::Parser;

/// A compound statement whose header has been consumed and whose body is
/// still being parsed.
#[derive(Debug)]
pub enum Construct {
    If {
        opening: Token,
        condition: Condition,
        /// Set once `ELSE` has been seen.
        then_block: Option<Block>,
    },
    While {
        opening: Token,
        condition: Condition,
    },
}

struct Frame {
    construct: Construct,
    /// Statements of the enclosing block parsed before this construct.
    enclosing: Vec<Statement>,
}

/// Open compound statements, innermost last.
///
/// IF and WHILE nest through this stack instead of the call stack, so the
/// nesting depth of the input is bounded by memory only.
#[derive(Default)]
struct Nesting {
    frames: Vec<Frame>,
    /// Statements of the innermost open block.
    statements: Vec<Statement>,
}

impl Nesting {
    fn is_open(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Consumes one statement header, one call or one closing `END`.
    ///
    /// Returns a statement once one is complete outside every open construct.
    fn step(&mut self, parser: &mut Parser) -> Result<Option<Statement>, Error> {
        if self.is_open() && parser.at_block_end() {
            return self.close(parser);
        }

        let kind = parser.current_token_kind();
        trace!(token = %parser.current_token().value, "parsing statement");

        match parser.get_stmt_lookup().get(&kind).copied() {
            Some(handler) => {
                let construct = handler(parser)?;
                self.frames.push(Frame {
                    construct,
                    enclosing: mem::take(&mut self.statements),
                });
                Ok(None)
            }
            None => {
                ensure(kind.is_keyword() || kind == TokenKind::Identifier, || {
                    parser.error(ErrorImpl::InvalidStatement {
                        token: parser.current_token().value.clone(),
                    })
                })?;
                let statement = parse_call_stmt(parser)?;
                Ok(self.complete(statement))
            }
        }
    }

    fn complete(&mut self, statement: Statement) -> Option<Statement> {
        if self.is_open() {
            self.statements.push(statement);
            None
        } else {
            Some(statement)
        }
    }

    /// Ends the innermost block at `ELSE`, `END` or the sentinel.
    fn close(&mut self, parser: &mut Parser) -> Result<Option<Statement>, Error> {
        let Some(frame) = self.frames.pop() else {
            unreachable!("close called with no open construct");
        };
        let block = Block::new(mem::replace(&mut self.statements, frame.enclosing));

        let (statement, opening, construct) = match frame.construct {
            Construct::If {
                opening,
                condition,
                then_block: None,
            } if parser.current_token_kind() == TokenKind::Else => {
                parser.advance();
                self.frames.push(Frame {
                    construct: Construct::If {
                        opening,
                        condition,
                        then_block: Some(block),
                    },
                    enclosing: mem::take(&mut self.statements),
                });
                return Ok(None);
            }
            Construct::If {
                opening,
                condition,
                then_block: None,
            } => (
                Statement::If {
                    condition,
                    then_block: block,
                },
                opening,
                "IF",
            ),
            Construct::If {
                opening,
                condition,
                then_block: Some(then_block),
            } => (
                Statement::IfElse {
                    condition,
                    then_block,
                    else_block: block,
                },
                opening,
                "IF",
            ),
            Construct::While { opening, condition } => (
                Statement::While {
                    condition,
                    body: block,
                },
                opening,
                "WHILE",
            ),
        };

        parser.expect(TokenKind::End)?;
        parser.expect_closing(construct, &opening)?;

        Ok(self.complete(statement))
    }
}

/// Parses one statement starting at the current token.
///
/// `IF` and `WHILE` are dispatched through the statement lookup table;
/// any other keyword or identifier is parsed as a call.
pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let mut nesting = Nesting::default();
    loop {
        if let Some(statement) = nesting.step(parser)? {
            return Ok(statement);
        }
    }
}

/// Parses statements until the current token is `ELSE`, `END` or the
/// sentinel. The terminator is left for the caller.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let mut nesting = Nesting::default();
    let mut statements = Vec::new();
    while nesting.is_open() || !parser.at_block_end() {
        if let Some(statement) = nesting.step(parser)? {
            statements.push(statement);
        }
    }

    Ok(Block::new(statements))
}

/// `IF condition THEN`, opening a block that ends in `[ELSE block] END IF`
pub fn parse_if_header(parser: &mut Parser) -> Result<Construct, Error> {
    let opening = parser.expect(TokenKind::If)?;

    let condition = parser.expect_condition()?;
    parser.expect(TokenKind::Then)?;

    Ok(Construct::If {
        opening,
        condition,
        then_block: None,
    })
}

/// `WHILE condition DO`, opening a block that ends in `END WHILE`
pub fn parse_while_header(parser: &mut Parser) -> Result<Construct, Error> {
    let opening = parser.expect(TokenKind::While)?;

    let condition = parser.expect_condition()?;
    parser.expect(TokenKind::Do)?;

    Ok(Construct::While { opening, condition })
}

/// A call is a single identifier naming the instruction to run.
pub fn parse_call_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let instruction = parser.expect_identifier()?.value;

    Ok(Statement::Call { instruction })
}
