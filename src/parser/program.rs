use indexmap::IndexMap;
use tracing::debug;

use crate::{
    ast::{ast::Program, statements::Block},
    errors::errors::{ensure, Error, ErrorImpl},
    lexer::tokens::{is_keyword, Token, TokenKind},
};

use super::{parser::Parser, stmt::parse_block};

/// `INSTRUCTION name IS block END name`
///
/// Returns the name token together with the instruction body.
pub fn parse_instruction(parser: &mut Parser) -> Result<(Token, Block), Error> {
    parser.expect(TokenKind::Instruction)?;
    let opening = parser.expect_identifier()?;
    parser.expect(TokenKind::Is)?;

    let body = parse_block(parser)?;

    parser.expect(TokenKind::End)?;
    parser.expect_closing("INSTRUCTION", &opening)?;

    Ok((opening, body))
}

/// `PROGRAM name IS instruction* BEGIN block END name`, followed by the
/// end of input.
///
/// The sentinel is checked but not consumed.
pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    parser.expect(TokenKind::Program)?;
    let opening = parser.expect_identifier()?;
    parser.expect(TokenKind::Is)?;

    let mut context: IndexMap<String, Block> = IndexMap::new();

    while parser.current_token_kind() != TokenKind::Begin {
        let (name, body) = parse_instruction(parser)?;

        ensure(!is_keyword(&name.value), || {
            Error::new(
                ErrorImpl::KeywordAsIdentifier {
                    name: name.value.clone(),
                },
                name.span.start.clone(),
            )
        })?;
        ensure(!context.contains_key(&name.value), || {
            Error::new(
                ErrorImpl::DuplicateInstruction {
                    name: name.value.clone(),
                },
                name.span.start.clone(),
            )
        })?;

        debug!(instruction = %name.value, statements = body.len(), "instruction declared");
        context.insert(name.value, body);
    }

    parser.expect(TokenKind::Begin)?;
    let body = parse_block(parser)?;

    parser.expect(TokenKind::End)?;
    parser.expect_closing("PROGRAM", &opening)?;

    ensure(parser.current_token_kind() == TokenKind::EOF, || {
        parser.error(ErrorImpl::UnterminatedProgram {
            token: parser.current_token().value.clone(),
        })
    })?;

    debug!(
        program = %opening.value,
        instructions = context.len(),
        statements = body.len(),
        "program parsed"
    );

    Ok(Program::new(opening.value, context, body))
}
