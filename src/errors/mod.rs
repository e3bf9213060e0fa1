//! Error types and error handling for the parser.
//!
//! This module defines the errors raised while turning a token stream
//! into a BL program. It includes:
//!
//! - Error structures with source position information
//! - One variant per class of grammar or semantic violation
//! - The `ensure` fail-fast helper every parser check routes through
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
