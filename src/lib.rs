#![allow(clippy::module_inception)]

use std::{
    fmt::{self, Display},
    rc::Rc,
};

use crate::errors::errors::Error;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod printer;

extern crate regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing byte offset `position` in `content`.
///
/// Returns the 1-based line number, the line text and the offset of
/// `position` within that line. An offset at or past the end of the
/// content (where the end-of-input sentinel lives) maps to the end of the
/// last line. Returns `None` for empty content.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last = None;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        last = Some((line_number, line.to_string(), line.trim_end().len()));
        start = end;
        line_number += 1;
    }

    last
}

/// A parse error together with the source it was found in, displayed as
/// a compiler-style snippet:
///
/// ```text
/// Error: MismatchedDelimiter (IF `IF` closed with `END WHILE`)
/// -> test.bl
///   |
/// 3 | END WHILE
///   | ----^
/// ```
pub struct Diagnostic<'a> {
    pub error: &'a Error,
    pub source: &'a str,
    pub file: &'a str,
}

impl Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Error: {} ({})",
            self.error.get_error_name(),
            self.error.get_tip()
        )?;
        writeln!(f, "-> {}", self.file)?;

        let Some((line, line_text, line_pos)) =
            get_line_at_position(self.source, self.error.get_position().0)
        else {
            return Ok(());
        };

        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        writeln!(f, "{:>padding$}", "|")?;

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        writeln!(f, "{} | {}", line_string, line_text_removed.trim_end())?;

        let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

        writeln!(f, "{:>padding$} {:->arrows$}", "|", "^")
    }
}

/// Renders `error` as a [`Diagnostic`] snippet.
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    Diagnostic {
        error,
        source,
        file,
    }
    .to_string()
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += c.len_utf8();
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
