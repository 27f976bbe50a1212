//! Per-row valid column ranges of a rotated working buffer.
//!
//! After the shift, every real pixel is at least 1, so any exact 0 in the
//! rotated canvas is background introduced by the canvas extension. Each row
//! is scanned from both ends for its first and last non-zero sample.

use std::ops::RangeInclusive;

use crate::raster::Raster;

/// Valid column span of one row.
///
/// Either `0 <= first <= last < width` or, for a row without foreground,
/// `first = width` and `last = -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub first: i64,
    pub last: i64,
}

impl RowRange {
    /// Range of a row with no foreground in a raster `width` wide.
    pub fn empty(width: u32) -> Self {
        Self {
            first: i64::from(width),
            last: -1,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.first > self.last
    }

    /// Number of columns in the range, 0 when degenerate.
    pub fn span(&self) -> usize {
        if self.is_degenerate() {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    /// Column indices covered by the range, `None` when degenerate.
    pub fn columns(&self) -> Option<RangeInclusive<usize>> {
        if self.is_degenerate() {
            None
        } else {
            Some(self.first as usize..=self.last as usize)
        }
    }
}

/// One [`RowRange`] per raster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTable {
    rows: Vec<RowRange>,
}

impl RangeTable {
    pub fn get(&self, row: usize) -> Option<RowRange> {
        self.rows.get(row).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RowRange> + '_ {
        self.rows.iter().copied()
    }

    /// Rows without foreground.
    pub fn degenerate_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_degenerate()).count()
    }

    /// Widest row span.
    pub fn max_span(&self) -> usize {
        self.rows.iter().map(RowRange::span).max().unwrap_or(0)
    }
}

/// Locate the first and last non-zero sample of every row.
pub fn detect_row_ranges(image: &Raster<u16>) -> RangeTable {
    let rows = (0..image.height)
        .map(|y| {
            let row = image.row(y);
            match (
                row.iter().position(|&p| p != 0),
                row.iter().rposition(|&p| p != 0),
            ) {
                (Some(first), Some(last)) => RowRange {
                    first: first as i64,
                    last: last as i64,
                },
                _ => RowRange::empty(image.width),
            }
        })
        .collect();

    RangeTable { rows }
}
