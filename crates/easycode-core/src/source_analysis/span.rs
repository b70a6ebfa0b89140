// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Every token and AST node carries a [`Span`] indicating its position in the
//! source buffer. Byte offsets are the canonical representation; the
//! [`SourceMap`] converts them to 1-based line/column [`Position`]s for
//! human-facing output (diagnostics, the token table, the AST dump).

use std::ops::Range;

/// A span of source code, represented as a byte offset range.
///
/// # Examples
///
/// ```
/// use easycode_core::source_analysis::Span;
///
/// let span = Span::new(0, 10);
/// assert_eq!(span.start(), 0);
/// assert_eq!(span.end(), 10);
/// assert_eq!(span.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the start byte offset.
    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// Returns the end byte offset (exclusive).
    #[must_use]
    pub const fn end(self) -> u32 {
        self.end
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns true if `other` is fully contained within `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Creates a span that covers both `self` and `other`.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Converts to a `Range<usize>` for indexing into source text.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Range<u32>> for Span {
    fn from(range: Range<u32>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Range<usize>> for Span {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start as u32, range.end as u32)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start as usize, span.len() as usize).into()
    }
}

/// A 1-based line/column position in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (in bytes from the start of the line).
    pub column: u32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed line-start table for offset-to-position conversion.
///
/// Built once per source buffer; `position` is a binary search over the
/// line starts, so converting many spans stays cheap.
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// Byte offset of the first character of each line. `line_starts[0] == 0`.
    line_starts: Vec<u32>,
}

impl SourceMap {
    /// Builds the line-start table for `source`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset as u32 + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-based line/column position.
    ///
    /// Offsets past the end of the buffer resolve to the last line.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "line count is bounded by the u32 offset range"
    )]
    pub fn position(&self, offset: u32) -> Position {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        Position {
            line: line_index as u32 + 1,
            column: offset - self.line_starts[line_index] + 1,
        }
    }

    /// Converts the start of a span to a position.
    #[must_use]
    pub fn position_of(&self, span: Span) -> Position {
        self.position(span.start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_new_and_accessors() {
        let span = Span::new(5, 15);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 15);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
    }

    #[test]
    fn span_empty() {
        let span = Span::new(5, 5);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn span_merge() {
        let a = Span::new(5, 10);
        let b = Span::new(15, 20);
        let merged = a.merge(b);
        assert_eq!(merged.start(), 5);
        assert_eq!(merged.end(), 20);
    }

    #[test]
    fn span_contains() {
        let outer = Span::new(0, 10);
        assert!(outer.contains(Span::new(2, 8)));
        assert!(!outer.contains(Span::new(8, 12)));
    }

    #[test]
    fn span_from_range() {
        let span: Span = (0u32..10u32).into();
        assert_eq!(span.start(), 0);
        assert_eq!(span.end(), 10);

        let span: Span = (0usize..10usize).into();
        assert_eq!(span.as_range(), 0..10);
    }

    #[test]
    fn position_on_first_line() {
        let map = SourceMap::new("show(x);");
        assert_eq!(map.position(0), Position { line: 1, column: 1 });
        assert_eq!(map.position(5), Position { line: 1, column: 6 });
    }

    #[test]
    fn position_after_newlines() {
        let map = SourceMap::new("start\nnumber x;\nend\n");
        // 's' of start
        assert_eq!(map.position(0), Position { line: 1, column: 1 });
        // 'n' of number
        assert_eq!(map.position(6), Position { line: 2, column: 1 });
        // 'x'
        assert_eq!(map.position(13), Position { line: 2, column: 8 });
        // 'e' of end
        assert_eq!(map.position(16), Position { line: 3, column: 1 });
    }

    #[test]
    fn position_at_line_start_boundary() {
        let map = SourceMap::new("a\nb");
        // Offset 2 is exactly the start of line 2.
        assert_eq!(map.position(2), Position { line: 2, column: 1 });
    }

    #[test]
    fn position_display() {
        let pos = Position { line: 3, column: 14 };
        assert_eq!(pos.to_string(), "3:14");
    }
}
