use std::collections::HashMap;

use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{parser::Parser, stmt::*};

pub type StmtHandler = fn(&mut Parser) -> Result<Construct, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Compound statements
    parser.stmt(TokenKind::If, parse_if_header);
    parser.stmt(TokenKind::While, parse_while_header);
}

// Lookup table inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
