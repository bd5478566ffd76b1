//! Bounding-box localization
//!
//! Finds the tight rectangle enclosing the display's digit area inside a
//! coarse search region, using per-row run-length edge detection.

use crate::error::{RecogError, RecogResult};
use meterscan_core::{BinaryThreshold, Box, Patch};

/// Search a patch for the rectangle enclosing the digit area.
///
/// Per row, a run-length counter tracks consecutive black pixels. A white
/// pixel observed after a black run longer than one sixth of the search
/// width registers a candidate edge: the minimum black run suppresses
/// noise from thin scratches and reflections. The second and later edges
/// in a row extend the row's horizontal extent (the start is backdated by
/// the run length); a row contributes to the vertical extent only when it
/// produced at least two edges, which suppresses rows with a single
/// spurious transition.
///
/// The returned box is the minimal rectangle over all contributing rows
/// and columns, in absolute image coordinates.
///
/// # Errors
///
/// Returns [`RecogError::BoundingBoxNotFound`] when no row contributes or
/// when the computed extent degenerates or exceeds the search area: the
/// input has no clean high-contrast digit region under the configured
/// threshold.
pub fn find_bounding_box(search: &Patch, threshold: &BinaryThreshold) -> RecogResult<Box> {
    let w = search.width();
    let h = search.height();
    let min_run = w / 6;

    let mut start_x = i32::MAX;
    let mut start_y = i32::MAX;
    let mut end_x = i32::MIN;
    let mut end_y = i32::MIN;
    let mut found = false;

    for y in 0..h {
        let mut black = 0i32;
        let mut edges = 0u32;
        for x in 0..w {
            if search.is_white(threshold, x, y) {
                if black > min_run {
                    edges += 1;
                    if edges > 1 {
                        if x > end_x {
                            end_x = x;
                        }
                        if start_x > x - black {
                            start_x = x - black;
                        }
                    }
                }
                black = 0;
            } else {
                black += 1;
            }
        }
        if edges > 1 {
            found = true;
            if y > end_y {
                end_y = y;
            }
            if start_y > y {
                start_y = y;
            }
        }
    }

    if !found {
        return Err(RecogError::BoundingBoxNotFound {
            width: 0,
            height: 0,
            search_width: w,
            search_height: h,
        });
    }

    let width = end_x - start_x;
    let height = end_y - start_y;
    if width <= 0 || height <= 0 || width > w || height > h {
        return Err(RecogError::BoundingBoxNotFound {
            width,
            height,
            search_width: w,
            search_height: h,
        });
    }

    Ok(Box::new(start_x, start_y, width, height)?.translate(search.bounds().x, search.bounds().y))
}
