use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::InvalidIdentifier { .. } => "InvalidIdentifier",
            ErrorImpl::InvalidCondition { .. } => "InvalidCondition",
            ErrorImpl::InvalidStatement { .. } => "InvalidStatement",
            ErrorImpl::MismatchedDelimiter { .. } => "MismatchedDelimiter",
            ErrorImpl::KeywordAsIdentifier { .. } => "KeywordAsIdentifier",
            ErrorImpl::DuplicateInstruction { .. } => "DuplicateInstruction",
            ErrorImpl::UnterminatedProgram { .. } => "UnterminatedProgram",
        }
    }

    pub fn get_tip(&self) -> String {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, token } if is_sentinel(token) => {
                format!(
                    "Expected `{}` but the input ended, is the program truncated?",
                    expected
                )
            }
            ErrorImpl::UnexpectedToken { expected, token } => format!(
                "Expected `{}`, found `{}`",
                expected, token
            ),
            ErrorImpl::InvalidIdentifier { token } => format!(
                "`{}` is not a valid identifier, identifiers start with a letter and may not be keywords or conditions",
                token
            ),
            ErrorImpl::InvalidCondition { token } => format!(
                "`{}` is not a condition, try one of `next-is-empty`, `next-is-wall`, `random`, `true`",
                token
            ),
            ErrorImpl::InvalidStatement { token } => format!(
                "`{}` cannot start a statement, expected `IF`, `WHILE` or an instruction name",
                token
            ),
            ErrorImpl::MismatchedDelimiter {
                construct,
                opening,
                closing,
            } => format!(
                "{} `{}` closed with `END {}`",
                construct, opening, closing
            ),
            ErrorImpl::KeywordAsIdentifier { name } => {
                format!("Keyword `{}` cannot be an instruction name", name)
            }
            ErrorImpl::DuplicateInstruction { name } => {
                format!("Instruction `{}` already declared", name)
            }
            ErrorImpl::UnterminatedProgram { token } => format!(
                "Found `{}` after the closing program name",
                token
            ),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.internal_error, self.position.1, self.position.0
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

fn is_sentinel(token: &str) -> bool {
    token == crate::lexer::tokens::END_OF_INPUT
}

/// Fails with the error built by `error` unless `condition` holds.
///
/// This is the single reporting path for grammar and semantic checks;
/// callers propagate the result with `?` so the first violation aborts
/// the whole parse.
pub fn ensure<F>(condition: bool, error: F) -> Result<(), Error>
where
    F: FnOnce() -> Error,
{
    if condition {
        Ok(())
    } else {
        Err(error())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("invalid token: expected {expected:?}, found {token:?}")]
    UnexpectedToken { expected: String, token: String },
    #[error("invalid identifier: {token:?}")]
    InvalidIdentifier { token: String },
    #[error("invalid condition: {token:?}")]
    InvalidCondition { token: String },
    #[error("invalid token: {token:?} cannot start a statement")]
    InvalidStatement { token: String },
    #[error("two different identifiers used to open and close {construct}: {opening:?} and {closing:?}")]
    MismatchedDelimiter {
        construct: String,
        opening: String,
        closing: String,
    },
    #[error("keyword cannot be an identifier: {name:?}")]
    KeywordAsIdentifier { name: String },
    #[error("duplicate instruction name: {name:?}")]
    DuplicateInstruction { name: String },
    #[error("program does not end correctly: found {token:?}")]
    UnterminatedProgram { token: String },
}
