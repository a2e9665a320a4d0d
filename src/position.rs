//! Offset to line/column translation.
//!
//! Regex matches report byte offsets; findings carry 1-based line and
//! column numbers, with columns counted in Unicode scalar values.

use std::ops::Range;

use serde::Serialize;

/// 1-based position in a text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Start and end position of a matched piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Convert a byte offset into a 1-based line/column pair.
///
/// `offset` must lie on a char boundary and not exceed `buffer.len()`.
pub fn position_of(buffer: &str, offset: usize) -> Position {
    debug_assert!(buffer.is_char_boundary(offset), "offset {offset} is not a char boundary");

    let prefix = buffer.get(..offset).unwrap_or(buffer);
    let line = prefix.matches('\n').count() + 1;
    let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = prefix[line_start..].chars().count() + 1;

    Position { line, column }
}

/// Start and end position of a byte range
pub fn span_of(buffer: &str, range: Range<usize>) -> Span {
    Span {
        start: position_of(buffer, range.start),
        end: position_of(buffer, range.end),
    }
}

/// Precomputed line starts for a buffer that is queried many times.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    /// Same result as [`position_of`], in O(log lines + line length)
    pub fn position(&self, offset: usize) -> Position {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = self
            .text
            .get(line_start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(0)
            + 1;

        Position {
            line: line_idx + 1,
            column,
        }
    }

    pub fn span(&self, range: Range<usize>) -> Span {
        Span {
            start: self.position(range.start),
            end: self.position(range.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_position_start_of_second_line() {
        let content = "line1\nline2\nline3";
        assert_eq!(position_of(content, 6), Position { line: 2, column: 1 });
    }

    #[test]
    fn test_position_at_buffer_start_and_end() {
        let content = "abc\nde";
        assert_eq!(position_of(content, 0), Position { line: 1, column: 1 });
        assert_eq!(position_of(content, content.len()), Position { line: 2, column: 3 });
    }

    #[test]
    fn test_position_counts_code_points() {
        // 3 bytes per kana
        let content = "あいうJavascript";
        assert_eq!(position_of(content, 9), Position { line: 1, column: 4 });
    }

    #[test]
    fn test_position_right_after_newline() {
        let content = "一行目\n";
        assert_eq!(position_of(content, content.len()), Position { line: 2, column: 1 });
    }

    #[test]
    fn test_line_index_agrees_with_position_of() {
        let content = "# 見出し\n\nこれはJavascriptの記事です。\r\n最後の行";
        let index = LineIndex::new(content);
        for (offset, _) in content.char_indices().chain(std::iter::once((content.len(), ' '))) {
            assert_eq!(index.position(offset), position_of(content, offset), "offset {offset}");
        }
    }

    #[test]
    fn test_position_round_trips_to_offset() {
        let content = "ab\nあいう\n\nxyz";
        let lines: Vec<&str> = content.split('\n').collect();
        for (offset, _) in content.char_indices() {
            let pos = position_of(content, offset);
            let line_start: usize = lines[..pos.line - 1].iter().map(|l| l.len() + 1).sum();
            let col_bytes: usize = lines[pos.line - 1]
                .chars()
                .take(pos.column - 1)
                .map(char::len_utf8)
                .sum();
            assert_eq!(line_start + col_bytes, offset);
        }
    }

    #[test]
    fn test_span_on_single_line() {
        let content = "xx Github yy";
        let span = span_of(content, 3..9);
        assert_eq!(span.start, Position { line: 1, column: 4 });
        assert_eq!(span.end, Position { line: 1, column: 10 });
    }
}
