use std::fmt::{self, Display, Write};

use crate::ast::{
    ast::Program,
    statements::{Block, Statement},
};

const INDENT: &str = "  ";

fn write_indent(out: &mut impl Write, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        out.write_str(INDENT)?;
    }
    Ok(())
}

/// Output still to be written, innermost construct last.
enum Item<'a> {
    Statement(&'a Statement, usize),
    Line(&'static str, usize),
}

fn push_block<'a>(pending: &mut Vec<Item<'a>>, block: &'a Block, indent: usize) {
    pending.extend(block.iter().rev().map(|statement| Item::Statement(statement, indent)));
}

/// Writes statements from a work list rather than recursing per nesting
/// level, so arbitrarily deep trees print without growing the stack.
fn write_items<'a>(out: &mut impl Write, mut pending: Vec<Item<'a>>) -> fmt::Result {
    while let Some(item) = pending.pop() {
        let (statement, indent) = match item {
            Item::Line(text, indent) => {
                write_indent(out, indent)?;
                writeln!(out, "{}", text)?;
                continue;
            }
            Item::Statement(statement, indent) => (statement, indent),
        };

        match statement {
            Statement::Block(block) => push_block(&mut pending, block, indent),
            Statement::If {
                condition,
                then_block,
            } => {
                write_indent(out, indent)?;
                writeln!(out, "IF {} THEN", condition.as_str())?;
                pending.push(Item::Line("END IF", indent));
                push_block(&mut pending, then_block, indent + 1);
            }
            Statement::IfElse {
                condition,
                then_block,
                else_block,
            } => {
                write_indent(out, indent)?;
                writeln!(out, "IF {} THEN", condition.as_str())?;
                pending.push(Item::Line("END IF", indent));
                push_block(&mut pending, else_block, indent + 1);
                pending.push(Item::Line("ELSE", indent));
                push_block(&mut pending, then_block, indent + 1);
            }
            Statement::While { condition, body } => {
                write_indent(out, indent)?;
                writeln!(out, "WHILE {} DO", condition.as_str())?;
                pending.push(Item::Line("END WHILE", indent));
                push_block(&mut pending, body, indent + 1);
            }
            Statement::Call { instruction } => {
                write_indent(out, indent)?;
                writeln!(out, "{}", instruction)?;
            }
        }
    }
    Ok(())
}

pub fn write_block(out: &mut impl Write, block: &Block, indent: usize) -> fmt::Result {
    let mut pending = Vec::new();
    push_block(&mut pending, block, indent);
    write_items(out, pending)
}

pub fn write_statement(out: &mut impl Write, statement: &Statement, indent: usize) -> fmt::Result {
    write_items(out, vec![Item::Statement(statement, indent)])
}

pub fn write_program(out: &mut impl Write, program: &Program) -> fmt::Result {
    writeln!(out, "PROGRAM {} IS", program.name)?;
    writeln!(out)?;

    for (name, body) in &program.context {
        write_indent(out, 1)?;
        writeln!(out, "INSTRUCTION {} IS", name)?;
        write_block(out, body, 2)?;
        write_indent(out, 1)?;
        writeln!(out, "END {}", name)?;
        writeln!(out)?;
    }

    writeln!(out, "BEGIN")?;
    write_block(out, &program.body, 1)?;
    writeln!(out, "END {}", program.name)
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_program(f, self)
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, self, 0)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statement(f, self, 0)
    }
}
