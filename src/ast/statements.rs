use std::{mem, slice::Iter};

use serde::Serialize;

use super::conditions::Condition;

/// An ordered, possibly empty, sequence of statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Block {
    pub body: Vec<Statement>,
}

impl Block {
    pub fn new(body: Vec<Statement>) -> Self {
        Block { body }
    }

    pub fn iter(&self) -> Iter<'_, Statement> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Drops nested blocks from a work list, so that dropping a deeply
/// nested tree does not recurse once per level.
impl Drop for Block {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.body);
        while let Some(statement) = pending.pop() {
            match statement {
                Statement::Block(mut block) => pending.append(&mut block.body),
                Statement::If { mut then_block, .. } => pending.append(&mut then_block.body),
                Statement::IfElse {
                    mut then_block,
                    mut else_block,
                    ..
                } => {
                    pending.append(&mut then_block.body);
                    pending.append(&mut else_block.body);
                }
                Statement::While { mut body, .. } => pending.append(&mut body.body),
                Statement::Call { .. } => {}
            }
        }
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Statement;
    type IntoIter = Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.body.iter()
    }
}

/// A single BL statement.
///
/// Every node owns its sub-blocks; the parser builds nodes bottom-up from
/// finished children and never mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Statement {
    Block(Block),
    If {
        condition: Condition,
        then_block: Block,
    },
    IfElse {
        condition: Condition,
        then_block: Block,
        else_block: Block,
    },
    While {
        condition: Condition,
        body: Block,
    },
    Call {
        instruction: String,
    },
}

impl Statement {
    pub fn call(instruction: impl Into<String>) -> Self {
        Statement::Call {
            instruction: instruction.into(),
        }
    }
}
