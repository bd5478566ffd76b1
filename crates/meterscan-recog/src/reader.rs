//! One-shot recognition
//!
//! Sequences the pipeline stages into a single `recognize` call and
//! assembles the per-cell classifications into a [`Reading`].

use std::fmt;

use crate::classify::{SegmentClass, classify_segment};
use crate::config::{ScanConfig, ScanMode};
use crate::error::{RecogError, RecogResult};
use crate::inner::find_inner_box;
use crate::locate::find_bounding_box;
use crate::segment::{find_segments, trim_segment};
use meterscan_core::{Box, Patch, Raster};

/// The ordered per-cell classifications of one recognition run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    cells: Vec<SegmentClass>,
}

impl Reading {
    pub(crate) fn new(cells: Vec<SegmentClass>) -> Self {
        Self { cells }
    }

    /// Per-cell classifications, left to right.
    pub fn cells(&self) -> &[SegmentClass] {
        &self.cells
    }

    /// Number of digit cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cells were found
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether every cell was recognized.
    pub fn is_complete(&self) -> bool {
        self.cells
            .iter()
            .all(|c| matches!(c, SegmentClass::Digit(_)))
    }

    /// The digits concatenated left to right as an unsigned integer.
    ///
    /// `None` when no cells were found, when any cell is unrecognized, or
    /// when the concatenation does not fit in `u64`. A numeric value is
    /// never produced from a partial reading.
    pub fn value(&self) -> Option<u64> {
        if self.cells.is_empty() {
            return None;
        }
        let mut value: u64 = 0;
        for cell in &self.cells {
            let SegmentClass::Digit(d) = cell else {
                return None;
            };
            value = value.checked_mul(10)?.checked_add(*d as u64)?;
        }
        Some(value)
    }
}

impl fmt::Display for Reading {
    /// Digits left to right, unrecognized cells shown as `?`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            match cell {
                SegmentClass::Digit(d) => write!(f, "{}", d)?,
                SegmentClass::Unrecognized(_) => write!(f, "?")?,
            }
        }
        Ok(())
    }
}

/// Compute the search box for an image under the configured margins.
pub(crate) fn outer_box(image: &Raster, config: &ScanConfig) -> RecogResult<Box> {
    image
        .bounds()
        .inset(config.margin_x as i32, config.margin_y as i32)
        .map_err(|_| RecogError::ImageTooSmall {
            width: image.width(),
            height: image.height(),
            margin_x: config.margin_x,
            margin_y: config.margin_y,
        })
}

/// Apply the configured policy to the collected cell classifications.
pub(crate) fn assemble_reading(
    cells: Vec<SegmentClass>,
    config: &ScanConfig,
) -> RecogResult<Reading> {
    if config.mode == ScanMode::Strict {
        for (index, cell) in cells.iter().enumerate() {
            if let SegmentClass::Unrecognized(signature) = cell {
                return Err(RecogError::UnrecognizedSignature {
                    signature: *signature,
                    index,
                });
            }
        }
    }
    let reading = Reading::new(cells);
    if config.mode == ScanMode::Strict && !reading.is_empty() && reading.value().is_none() {
        return Err(RecogError::ValueOverflow {
            digits: reading.to_string(),
        });
    }
    Ok(reading)
}

/// Recognize the counter reading shown in an image.
///
/// Runs the full pipeline once: search-box inset, bounding-box search,
/// bezel exclusion, cell splitting, per-cell trimming and classification.
/// Every stage works on its own pixel snapshot captured from the source
/// image, which stays untouched.
///
/// # Errors
///
/// - [`RecogError::ImageTooSmall`]: the margins consume the image
/// - [`RecogError::BoundingBoxNotFound`]: no stable digit region
/// - [`RecogError::DigitCountMismatch`]: cell count differs from
///   `expected_digits` when that is configured
/// - [`RecogError::UnusableSegment`]: a cell has no majority-height block
/// - [`RecogError::UnrecognizedSignature`]: strict mode only; in lenient
///   mode the cell becomes a placeholder and the reading has no value
pub fn recognize(image: &Raster, config: &ScanConfig) -> RecogResult<Reading> {
    let outer = outer_box(image, config)?;
    let search = Patch::capture(image, &outer)?;

    let bounding = find_bounding_box(&search, &config.threshold)?;
    let bounding_patch = Patch::capture(image, &bounding)?;

    let inner = find_inner_box(&bounding_patch, &config.threshold);
    if inner.is_empty() {
        // The bezel scan collapsed the digit area to nothing; the display
        // geometry was not actually found.
        return Err(RecogError::BoundingBoxNotFound {
            width: inner.w,
            height: inner.h,
            search_width: outer.w,
            search_height: outer.h,
        });
    }
    let inner_patch = Patch::capture(image, &inner)?;

    let segments = find_segments(&inner_patch, &config.threshold);
    if let Some(expected) = config.expected_digits
        && segments.len() != expected
    {
        return Err(RecogError::DigitCountMismatch {
            expected,
            actual: segments.len(),
        });
    }

    let mut cells = Vec::with_capacity(segments.len());
    for segment in &segments {
        let cell = Patch::capture(image, segment)?;
        let trimmed = trim_segment(&cell, &config.threshold)?;
        let trimmed_patch = Patch::capture(image, &trimmed)?;
        cells.push(classify_segment(
            &trimmed_patch,
            &config.threshold,
            &config.table,
        ));
    }

    assemble_reading(cells, config)
}
