//! Meterscan - optical reader for segmented counter displays
//!
//! Converts a photographed counter/odometer-style display into a numeric
//! reading: the digit region is located inside the frame, split into
//! digit cells, and each cell's stroke pattern is classified against a
//! fixed geometric-signature table.
//!
//! # Overview
//!
//! - Data structures: rasters, boxes, pixel-snapshot patches
//! - Recognition: bounding-box search, bezel exclusion, cell splitting
//!   and trimming, signature classification
//! - I/O: decoding photograph files, encoding diagnostic overlays
//!
//! # Example
//!
//! ```
//! use meterscan::{Raster, ScanConfig, recognize};
//!
//! // A uniform frame holds no display; the pipeline reports it instead
//! // of fabricating a reading.
//! let image = Raster::new(300, 200, 40).unwrap();
//! assert!(recognize(&image, &ScanConfig::default()).is_err());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use meterscan_core::*;

// Re-export the recognition surface
pub use meterscan_recog::{
    Reading, RecogError, RecogResult, RecognitionTable, ScanConfig, ScanMode, ScanState,
    SegmentClass, Signature, Stepper, recognize,
};

// Re-export domain crates as modules to avoid name conflicts
pub use meterscan_io as io;
pub use meterscan_recog as recog;
