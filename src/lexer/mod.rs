//! Lexical analysis module for the parser.
//!
//! This module contains the tokenizer that converts BL source text into
//! the token stream consumed by the parser. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Classification of words as keywords, conditions or identifiers
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//! - The end-of-input sentinel terminating every stream

pub mod lexer;
pub mod tokens;
