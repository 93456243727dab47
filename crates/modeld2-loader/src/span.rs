//! Byte ranges into a snapshot document.

use std::ops::Range;

/// A half-open byte range in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Create an empty span at `offset`.
    pub fn point(offset: usize) -> Self {
        Self::new(offset..offset)
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Converts a 1-based line and column pair into a span of one character.
    ///
    /// Positions past the end of `source` are clamped to its length. A
    /// column of 0, which the JSON parser reports for errors at the start of
    /// a line, maps to the line start.
    pub fn from_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum::<usize>()
            .min(source.len());

        let mut offset = (line_start + column.saturating_sub(1)).min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        let width = source[offset..].chars().next().map_or(0, char::len_utf8);
        Self::new(offset..offset + width)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_span_basics() {
        let span = Span::new(3..8);
        assert_eq!(span.start(), 3);
        assert_eq!(span.end(), 8);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::point(4).is_empty());
    }

    #[test]
    fn test_from_line_column() {
        let source = "{\n  \"apps\": [\n}";
        let span = Span::from_line_column(source, 2, 3);
        assert_eq!(&source[span.start()..span.end()], "\"");

        let span = Span::from_line_column(source, 3, 1);
        assert_eq!(&source[span.start()..span.end()], "}");
    }

    #[test]
    fn test_from_line_column_clamps() {
        let source = "{}";
        let span = Span::from_line_column(source, 10, 10);
        assert_eq!(span, Span::point(2));
    }

    proptest! {
        #[test]
        fn prop_from_line_column_stays_in_bounds(source in "\\PC{0,64}", line in 0usize..8, column in 0usize..80) {
            let span = Span::from_line_column(&source, line, column);
            prop_assert!(span.end() <= source.len());
            prop_assert!(source.is_char_boundary(span.start()));
            prop_assert!(source.is_char_boundary(span.end()));
        }
    }
}
