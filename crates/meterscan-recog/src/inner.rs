//! Inner-box extraction
//!
//! Shrinks a located bounding box inward past the bezel band so that only
//! the digit area remains. Each side is found independently by walking the
//! box midline from that side's edge inward, counting binary flips: the
//! first flip is the bezel edge, the second the digit-area edge.

use meterscan_core::{BinaryThreshold, Box, Patch};

/// Shrink a bounding box to the digit area inside the bezel.
///
/// Left and right boundaries are scanned along the row at `height / 2`,
/// top and bottom along the column at `width / 2`. Every scan starts from
/// an assumed-dark state, so a white box edge flips immediately. A side
/// whose scan exhausts its range with fewer than two flips keeps the box
/// edge, with no inward shrink on that side.
///
/// The result is in absolute image coordinates and never extends outside
/// the input box.
pub fn find_inner_box(patch: &Patch, threshold: &BinaryThreshold) -> Box {
    let w = patch.width();
    let h = patch.height();
    let mid_x = w / 2;
    let mid_y = h / 2;

    // Left boundary
    let mut left = 0;
    let mut edges = 0u32;
    let mut prev = false;
    let mut x = 0;
    while x < w && edges < 2 {
        let current = patch.is_white(threshold, x, mid_y);
        if current != prev {
            prev = current;
            edges += 1;
        }
        x += 1;
    }
    if edges == 2 {
        left = x;
    }

    // Right boundary; the scan starts one past the end, which samples dark
    let mut right = w;
    edges = 0;
    prev = false;
    let mut x = w;
    while x > left && edges < 2 {
        let current = patch.is_white(threshold, x, mid_y);
        if current != prev {
            prev = current;
            edges += 1;
        }
        x -= 1;
    }
    if edges == 2 {
        right = x;
    }

    // Top boundary
    let mut top = 0;
    edges = 0;
    prev = false;
    let mut y = 0;
    while y < h && edges < 2 {
        let current = patch.is_white(threshold, mid_x, y);
        if current != prev {
            prev = current;
            edges += 1;
        }
        y += 1;
    }
    if edges == 2 {
        top = y;
    }

    // Bottom boundary
    let mut bottom = h;
    edges = 0;
    prev = false;
    let mut y = h;
    while y > top && edges < 2 {
        let current = patch.is_white(threshold, mid_x, y);
        if current != prev {
            prev = current;
            edges += 1;
        }
        y -= 1;
    }
    if edges == 2 {
        bottom = y;
    }

    Box::new_unchecked(left, top, (right - left).max(0), (bottom - top).max(0))
        .translate(patch.bounds().x, patch.bounds().y)
}
