//! Forward-only cursor over the lines of a DCM text.

use std::str::Lines;

/// Hands out trimmed lines together with their 1-based line numbers.
///
/// The document reader and the block parsers share one cursor; a block parser
/// advances it until the block's `END` and hands it back positioned on the
/// following line.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Lines<'a>,
    line_number: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_number: 0,
        }
    }

    /// Number of the line most recently returned, 0 before the first.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Next line with surrounding whitespace removed.
    pub fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some((self.line_number, line.trim()))
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}
