//! Pretty-printer for BL syntax trees.
//!
//! Serializes `Program`, `Block` and `Statement` values back to BL source
//! text through their `Display` implementations. The output tokenizes and
//! parses back to an equal tree.

pub mod printer;
