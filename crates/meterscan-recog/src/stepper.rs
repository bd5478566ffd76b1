//! Staged recognition for diagnostic consumers
//!
//! The same pipeline as [`crate::recognize`], exposed as an explicit state
//! machine that advances one checkpoint per call and reports intermediate
//! geometry through an injected [`OverlaySink`]. Presentation plumbing:
//! interactive tools step through the stages and render what each one
//! found, without the algorithm knowing about any event loop or canvas.

use crate::classify::classify_segment;
use crate::config::ScanConfig;
use crate::error::{RecogError, RecogResult};
use crate::inner::find_inner_box;
use crate::locate::find_bounding_box;
use crate::reader::{Reading, assemble_reading, outer_box};
use crate::segment::{find_segments, trim_segment};
use meterscan_core::{Box, Patch, Raster};

/// Checkpoints of a staged scan, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Nothing computed yet
    Init,
    /// Search margins applied
    OuterBoxSet,
    /// Digit region located
    BoundingBoxFound,
    /// Cells split and trimmed
    SegmentsFound,
    /// Cells classified
    SegmentsParsed,
    /// Terminal checkpoint
    Done,
}

impl ScanState {
    /// Human-readable checkpoint label.
    pub fn label(&self) -> &'static str {
        match self {
            ScanState::Init => "init",
            ScanState::OuterBoxSet => "outer box set",
            ScanState::BoundingBoxFound => "bounding box found",
            ScanState::SegmentsFound => "segments found",
            ScanState::SegmentsParsed => "segments parsed",
            ScanState::Done => "done",
        }
    }
}

/// What a reported rectangle or pixel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageMark {
    /// The margin-inset search box
    Outer,
    /// The located digit region
    Bounding,
    /// The digit area inside the bezel
    Inner,
    /// One digit cell before trimming
    Segment,
    /// One digit cell after trimming
    Trimmed,
}

/// Consumer of diagnostic geometry and binarized cell pixels.
///
/// Implementations draw on whatever surface they own; the pipeline only
/// pushes commands. All coordinates are absolute image coordinates.
pub trait OverlaySink {
    /// A stage produced a rectangle.
    fn draw_box(&mut self, region: &Box, mark: StageMark);

    /// A binarized cell pixel, 0 or 255.
    fn write_pixel(&mut self, x: u32, y: u32, value: u8);
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl OverlaySink for NullSink {
    fn draw_box(&mut self, _region: &Box, _mark: StageMark) {}
    fn write_pixel(&mut self, _x: u32, _y: u32, _value: u8) {}
}

impl StageMark {
    /// Overlay sample value used by [`RasterOverlay`], one distinguishable
    /// gray per stage.
    pub fn overlay_value(&self) -> u8 {
        match self {
            StageMark::Outer => 64,
            StageMark::Bounding => 255,
            StageMark::Inner => 208,
            StageMark::Segment => 160,
            StageMark::Trimmed => 112,
        }
    }
}

/// Sink that renders outlines and binarized cells into a raster copy.
#[derive(Debug)]
pub struct RasterOverlay {
    raster: Raster,
}

impl RasterOverlay {
    /// Start an overlay from a copy of the source image.
    pub fn new(image: &Raster) -> Self {
        Self {
            raster: image.clone(),
        }
    }

    /// The rendered overlay.
    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

impl OverlaySink for RasterOverlay {
    fn draw_box(&mut self, region: &Box, mark: StageMark) {
        self.raster.draw_box(region, 1, mark.overlay_value());
    }

    fn write_pixel(&mut self, x: u32, y: u32, value: u8) {
        // Pixels outside the raster cannot occur for in-image cells;
        // ignore them rather than poison the overlay.
        let _ = self.raster.set(x, y, value);
    }
}

/// Staged recognition session over one image.
///
/// `advance` moves to the next checkpoint and reports stage geometry to
/// the sink; accessors expose everything computed so far. A failed stage
/// finishes the session: the error is returned once and later calls
/// report [`RecogError::SessionFinished`].
#[derive(Debug)]
pub struct Stepper<'a> {
    image: &'a Raster,
    config: &'a ScanConfig,
    state: ScanState,
    outer: Option<Box>,
    bounding: Option<Box>,
    inner: Option<Box>,
    segments: Vec<Box>,
    trimmed: Vec<Box>,
    reading: Option<Reading>,
}

impl<'a> Stepper<'a> {
    /// Create a session at the [`ScanState::Init`] checkpoint.
    pub fn new(image: &'a Raster, config: &'a ScanConfig) -> Self {
        Self {
            image,
            config,
            state: ScanState::Init,
            outer: None,
            bounding: None,
            inner: None,
            segments: Vec::new(),
            trimmed: Vec::new(),
            reading: None,
        }
    }

    /// Current checkpoint.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// The margin-inset search box, once set.
    pub fn outer_box(&self) -> Option<&Box> {
        self.outer.as_ref()
    }

    /// The located digit region, once found.
    pub fn bounding_box(&self) -> Option<&Box> {
        self.bounding.as_ref()
    }

    /// The digit area inside the bezel, once found.
    pub fn inner_box(&self) -> Option<&Box> {
        self.inner.as_ref()
    }

    /// Digit cells before trimming.
    pub fn segments(&self) -> &[Box] {
        &self.segments
    }

    /// Digit cells after trimming.
    pub fn trimmed(&self) -> &[Box] {
        &self.trimmed
    }

    /// The assembled reading, once parsed.
    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    /// Advance one checkpoint.
    ///
    /// # Errors
    ///
    /// Stage errors propagate as from [`crate::recognize`]; afterwards the
    /// session is finished. Advancing past [`ScanState::Done`] reports
    /// [`RecogError::SessionFinished`].
    pub fn advance(&mut self, sink: &mut dyn OverlaySink) -> RecogResult<ScanState> {
        let result = self.step(sink);
        if result.is_err() {
            self.state = ScanState::Done;
        }
        result
    }

    fn step(&mut self, sink: &mut dyn OverlaySink) -> RecogResult<ScanState> {
        match self.state {
            ScanState::Init => {
                let outer = outer_box(self.image, self.config)?;
                sink.draw_box(&outer, StageMark::Outer);
                self.outer = Some(outer);
                self.state = ScanState::OuterBoxSet;
            }
            ScanState::OuterBoxSet => {
                let Some(outer) = self.outer else {
                    return Err(RecogError::InvalidParameter(
                        "stepper advanced out of order".to_string(),
                    ));
                };
                let search = Patch::capture(self.image, &outer)?;
                let bounding = find_bounding_box(&search, &self.config.threshold)?;
                sink.draw_box(&bounding, StageMark::Bounding);
                self.bounding = Some(bounding);
                self.state = ScanState::BoundingBoxFound;
            }
            ScanState::BoundingBoxFound => {
                let (Some(outer), Some(bounding)) = (self.outer, self.bounding) else {
                    return Err(RecogError::InvalidParameter(
                        "stepper advanced out of order".to_string(),
                    ));
                };
                let bounding_patch = Patch::capture(self.image, &bounding)?;
                let inner = find_inner_box(&bounding_patch, &self.config.threshold);
                if inner.is_empty() {
                    return Err(RecogError::BoundingBoxNotFound {
                        width: inner.w,
                        height: inner.h,
                        search_width: outer.w,
                        search_height: outer.h,
                    });
                }
                sink.draw_box(&inner, StageMark::Inner);
                let inner_patch = Patch::capture(self.image, &inner)?;

                let segments = find_segments(&inner_patch, &self.config.threshold);
                if let Some(expected) = self.config.expected_digits
                    && segments.len() != expected
                {
                    return Err(RecogError::DigitCountMismatch {
                        expected,
                        actual: segments.len(),
                    });
                }

                let mut trimmed = Vec::with_capacity(segments.len());
                for segment in &segments {
                    sink.draw_box(segment, StageMark::Segment);
                    let cell = Patch::capture(self.image, segment)?;
                    let trimmed_box = trim_segment(&cell, &self.config.threshold)?;
                    sink.draw_box(&trimmed_box, StageMark::Trimmed);
                    self.emit_binarized(&trimmed_box, sink)?;
                    trimmed.push(trimmed_box);
                }

                self.inner = Some(inner);
                self.segments = segments;
                self.trimmed = trimmed;
                self.state = ScanState::SegmentsFound;
            }
            ScanState::SegmentsFound => {
                let mut cells = Vec::with_capacity(self.trimmed.len());
                for trimmed_box in &self.trimmed {
                    let cell = Patch::capture(self.image, trimmed_box)?;
                    cells.push(classify_segment(
                        &cell,
                        &self.config.threshold,
                        &self.config.table,
                    ));
                }
                self.reading = Some(assemble_reading(cells, self.config)?);
                self.state = ScanState::SegmentsParsed;
            }
            ScanState::SegmentsParsed => {
                self.state = ScanState::Done;
            }
            ScanState::Done => {
                return Err(RecogError::SessionFinished);
            }
        }
        Ok(self.state)
    }

    /// Push the binarized pixels of a trimmed cell through the sink.
    fn emit_binarized(&self, region: &Box, sink: &mut dyn OverlaySink) -> RecogResult<()> {
        let mut patch = Patch::capture(self.image, region)?;
        patch.binarize(&self.config.threshold);
        let bounds = *patch.bounds();
        for y in 0..bounds.h {
            for x in 0..bounds.w {
                if let Some(v) = patch.sample(x, y) {
                    sink.write_pixel((bounds.x + x) as u32, (bounds.y + y) as u32, v);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_labels() {
        assert_eq!(ScanState::Init.label(), "init");
        assert_eq!(ScanState::Done.label(), "done");
    }

    #[test]
    fn test_failed_stage_finishes_session() {
        // Uniform image: the bounding-box stage fails, after which only
        // SessionFinished is reported.
        let image = Raster::new(300, 200, 40).unwrap();
        let config = ScanConfig::default();
        let mut stepper = Stepper::new(&image, &config);
        let mut sink = NullSink;

        assert_eq!(
            stepper.advance(&mut sink).unwrap(),
            ScanState::OuterBoxSet
        );
        assert!(matches!(
            stepper.advance(&mut sink),
            Err(RecogError::BoundingBoxNotFound { .. })
        ));
        assert!(matches!(
            stepper.advance(&mut sink),
            Err(RecogError::SessionFinished)
        ));
    }

    #[test]
    fn test_outer_box_reported() {
        let image = Raster::new(300, 200, 40).unwrap();
        let config = ScanConfig::default();
        let mut stepper = Stepper::new(&image, &config);
        let mut sink = NullSink;

        assert_eq!(stepper.state(), ScanState::Init);
        assert!(stepper.outer_box().is_none());
        stepper.advance(&mut sink).unwrap();
        let outer = stepper.outer_box().unwrap();
        assert_eq!(outer.x, 50);
        assert_eq!(outer.y, 50);
        assert_eq!(outer.w, 200);
        assert_eq!(outer.h, 100);
    }
}
