//! Source positions
//!
//! A [`Span`] is a half-open byte range into the whole document plus the
//! 1-indexed line and column of both ends. Nodes parsed from inside an
//! interpolation hole carry document offsets too, never hole-relative ones.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    /// Exclusive
    pub end: usize,
    pub start_line: usize,
    pub end_line: usize,
    /// Byte column, 1-indexed
    pub start_column: usize,
    pub end_column: usize,
}

impl Span {
    pub fn new(
        start: usize,
        end: usize,
        start_line: usize,
        end_line: usize,
        start_column: usize,
        end_column: usize,
    ) -> Self {
        Self {
            start,
            end,
            start_line,
            end_line,
            start_column,
            end_column,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, offset: usize) -> bool {
        (self.start..self.end).contains(&offset)
    }

    /// True when the two ranges share at least one byte
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }
}

/// Offset <-> line/column conversion for one document
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// Offset of the first byte of every line
    lines: Vec<usize>,
    len: usize,
}

impl SourceMap {
    pub fn new(source: &str) -> Self {
        let newlines = memchr::memchr_iter(b'\n', source.as_bytes()).map(|nl| nl + 1);
        Self {
            lines: std::iter::once(0).chain(newlines).collect(),
            len: source.len(),
        }
    }

    /// 1-indexed line and byte column of `offset`
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        // Number of lines starting at or before `offset`; always >= 1
        let line = self.lines.partition_point(|&start| start <= offset).max(1);
        (line, offset - self.lines[line - 1] + 1)
    }

    /// Byte offset of a 1-indexed line and column, if the column falls on
    /// that line (its newline counts, one past it does not)
    pub fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        let start = *self.lines.get(line.checked_sub(1)?)?;
        let last = self.lines.get(line).map_or(self.len, |next| next - 1);
        let offset = start + column.checked_sub(1)?;
        (offset <= last).then_some(offset)
    }

    pub fn span(&self, start: usize, end: usize) -> Span {
        let (start_line, start_column) = self.line_col(start);
        let (end_line, end_column) = self.line_col(end);
        Span::new(start, end, start_line, end_line, start_column, end_column)
    }
}
