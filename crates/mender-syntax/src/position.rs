//! Offset to line/column conversion.
//!
//! Offsets are zero-based byte positions. For user-facing messages, we prefer
//! one-based line and column numbers.

use serde::{Deserialize, Serialize};

/// A one-based line and column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCol {
    /// One-based line number.
    pub line: u32,
    /// One-based column number, counted in bytes.
    pub column: u32,
}

/// Precomputed line starts for a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Indexes the line starts of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                text.bytes()
                    .enumerate()
                    .filter(|(_, byte)| *byte == b'\n')
                    .map(|(index, _)| index.saturating_add(1)),
            )
            .collect();
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Converts a byte offset to a one-based line and column. Offsets past
    /// the end clamp to the end of the text.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> LineCol {
        let clamped = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|start| *start <= clamped)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).copied().unwrap_or_default();
        LineCol {
            line: to_one_based(line),
            column: to_one_based(clamped.saturating_sub(line_start)),
        }
    }

    /// Returns the number of lines in the text.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Converts a zero-based index to a one-based display coordinate.
fn to_one_based(index: usize) -> u32 {
    // Line/column numbers will realistically never exceed u32::MAX.
    u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX)
}
