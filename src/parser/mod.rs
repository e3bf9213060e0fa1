//! Parser module for building the BL Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! token stream into a `Program`, a `Statement` or a `Block`. It handles:
//!
//! - Statement parsing (IF, IF/ELSE, WHILE and instruction calls)
//! - Block parsing, mutually recursive with statement parsing
//! - Instruction declarations and the program header and footer
//! - Fail-fast reporting of the first grammar or semantic violation
//!
//! Statements are dispatched on their first token through a lookup table
//! of handlers, the same way for every entry point.

pub mod lookups;
pub mod parser;
pub mod program;
pub mod stmt;
