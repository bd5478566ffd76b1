//! Segment splitting and trimming
//!
//! The inner box is partitioned into one rectangle per digit cell by
//! column-wise white density; each cell is then trimmed vertically to the
//! largest contiguous data block, discarding partially visible rows from
//! an adjacent wheel position above or below the in-focus digit.

use crate::error::{RecogError, RecogResult};
use meterscan_core::{BinaryThreshold, Box, Patch};

/// Split the inner box into digit-cell rectangles.
///
/// A column is data-bearing when its white-pixel count over the full
/// height exceeds `height / 10`. Walking columns left to right, every
/// transition between non-data and data runs is an edge; a data-bearing
/// first column contributes an implicit edge at 0 and an odd edge count
/// gains an implicit trailing edge at `width`. Consecutive edge pairs
/// become cells spanning the full inner height.
///
/// The cells are returned in left-to-right order, mutually non-overlapping,
/// in absolute image coordinates.
pub fn find_segments(inner: &Patch, threshold: &BinaryThreshold) -> Vec<Box> {
    let w = inner.width();
    let h = inner.height();
    let white_threshold = h / 10;

    let mut edges: Vec<i32> = Vec::new();
    let mut prev = false;
    for x in 0..w {
        let mut white = 0i32;
        for y in 0..h {
            if inner.is_white(threshold, x, y) {
                white += 1;
            }
        }
        let data = white > white_threshold;
        if x == 0 {
            prev = data;
            if prev {
                edges.push(0);
            }
        }
        if data != prev {
            prev = data;
            edges.push(x);
        }
    }
    // A data run touching the right edge misses its closing transition
    if edges.len() % 2 == 1 {
        edges.push(w);
    }

    edges
        .chunks_exact(2)
        .map(|pair| {
            Box::new_unchecked(pair[0], 0, pair[1] - pair[0], h)
                .translate(inner.bounds().x, inner.bounds().y)
        })
        .collect()
}

/// Trim a digit cell to its in-focus data block.
///
/// The transposed splitter: rows are data-bearing when their white count
/// exceeds `round(width / 10)`, and transitions delimit data runs. The
/// first run taller than half the cell height wins; a rolling mechanical
/// counter shows at most one majority-height digit per cell, anything
/// shorter is a partially visible neighbor.
///
/// # Errors
///
/// Returns [`RecogError::UnusableSegment`] when no run satisfies the
/// half-height criterion.
pub fn trim_segment(cell: &Patch, threshold: &BinaryThreshold) -> RecogResult<Box> {
    let w = cell.width();
    let h = cell.height();
    let white_threshold = (w + 5) / 10;

    let mut edges: Vec<i32> = Vec::new();
    let mut prev = false;
    for y in 0..h {
        let mut white = 0i32;
        for x in 0..w {
            if cell.is_white(threshold, x, y) {
                white += 1;
            }
        }
        let data = white > white_threshold;
        if y == 0 {
            prev = data;
            if prev {
                edges.push(0);
            }
        }
        if data != prev {
            prev = data;
            edges.push(y);
        }
    }
    if edges.len() % 2 == 1 {
        edges.push(h);
    }

    for pair in edges.chunks_exact(2) {
        let run_height = pair[1] - pair[0];
        if run_height > h / 2 {
            return Ok(Box::new_unchecked(0, pair[0], w, run_height)
                .translate(cell.bounds().x, cell.bounds().y));
        }
    }

    Err(RecogError::UnusableSegment {
        x: cell.bounds().x,
        width: w,
        height: h,
    })
}
