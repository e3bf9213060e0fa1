//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{ensure, Error, ErrorImpl};
use crate::lexer::tokens::END_OF_INPUT;
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.bl".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::InvalidIdentifier {
            token: "IS".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "InvalidIdentifier");
    assert_eq!(
        error.kind(),
        &ErrorImpl::InvalidIdentifier {
            token: "IS".to_string()
        }
    );
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::InvalidCondition {
            token: "next-is-lava".to_string(),
        },
        at(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.bl");
}

#[test]
fn test_unexpected_token_tip() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "THEN".to_string(),
            token: "DO".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_tip(), "Expected `THEN`, found `DO`");
}

#[test]
fn test_truncated_input_tip_mentions_end_of_input() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "END".to_string(),
            token: END_OF_INPUT.to_string(),
        },
        at(0),
    );

    assert!(error.get_tip().contains("input ended"));
}

#[test]
fn test_mismatched_delimiter_error() {
    let error = Error::new(
        ErrorImpl::MismatchedDelimiter {
            construct: "INSTRUCTION".to_string(),
            opening: "turn-around".to_string(),
            closing: "turnaround".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "MismatchedDelimiter");
    assert_eq!(
        error.get_tip(),
        "INSTRUCTION `turn-around` closed with `END turnaround`"
    );
}

#[test]
fn test_semantic_errors() {
    let duplicate = Error::new(
        ErrorImpl::DuplicateInstruction {
            name: "jump".to_string(),
        },
        at(0),
    );
    assert_eq!(duplicate.get_error_name(), "DuplicateInstruction");
    assert_eq!(
        duplicate.get_tip(),
        "Instruction `jump` already declared"
    );

    let keyword = Error::new(
        ErrorImpl::KeywordAsIdentifier {
            name: "BEGIN".to_string(),
        },
        at(0),
    );
    assert_eq!(keyword.get_error_name(), "KeywordAsIdentifier");
}

#[test]
fn test_error_display() {
    let error = Error::new(
        ErrorImpl::UnterminatedProgram {
            token: "extra".to_string(),
        },
        at(7),
    );

    assert_eq!(
        error.to_string(),
        "program does not end correctly: found \"extra\" at test.bl:7"
    );
}

#[test]
fn test_ensure() {
    assert!(ensure(true, || -> Error { unreachable!() }).is_ok());

    let result = ensure(false, || {
        Error::new(
            ErrorImpl::InvalidStatement {
                token: "THEN".to_string(),
            },
            at(3),
        )
    });
    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidStatement");
    assert!(error.get_tip().contains("cannot start a statement"));
}
