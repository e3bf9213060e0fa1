use indexmap::IndexMap;
use serde::Serialize;

use super::statements::Block;

/// A parsed BL program.
///
/// `context` maps each user-declared instruction name to its body, in
/// declaration order. Equality treats it as a mapping and ignores order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub name: String,
    pub context: IndexMap<String, Block>,
    pub body: Block,
}

impl Program {
    pub fn new(name: impl Into<String>, context: IndexMap<String, Block>, body: Block) -> Self {
        Program {
            name: name.into(),
            context,
            body,
        }
    }

    pub fn instruction(&self, name: &str) -> Option<&Block> {
        self.context.get(name)
    }
}
