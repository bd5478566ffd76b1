//! meterscan-recog - Counter-display recognition pipeline
//!
//! Turns a photographed counter/odometer-style display into a numeric
//! reading in five stages:
//!
//! 1. **Threshold classification**: fixed luminance cut (core crate)
//! 2. **Bounding-box localization**: run-length edge search ([`locate`])
//! 3. **Inner-box extraction**: bezel exclusion via midline flips
//!    ([`inner`])
//! 4. **Segment splitting and trimming**: density-based cell partition
//!    ([`segment`])
//! 5. **Digit classification**: edge-histogram signatures against a fixed
//!    table ([`classify`])
//!
//! Data flows strictly forward; every stage captures its own pixel
//! snapshot and the source image is never modified.
//!
//! # Quick Start
//!
//! ```
//! use meterscan_core::Raster;
//! use meterscan_recog::{RecogError, ScanConfig, recognize};
//!
//! // A uniform image carries no display; the search reports it.
//! let image = Raster::new(300, 200, 40).unwrap();
//! let config = ScanConfig::default();
//! assert!(matches!(
//!     recognize(&image, &config),
//!     Err(RecogError::BoundingBoxNotFound { .. })
//! ));
//! ```
//!
//! # Modules
//!
//! - [`locate`]: bounding-box search
//! - [`inner`]: bezel exclusion
//! - [`segment`]: cell splitting and trimming
//! - [`classify`]: signatures and the recognition table
//! - [`stepper`]: staged scans with diagnostic overlays

pub mod classify;
mod config;
mod error;
pub mod inner;
pub mod locate;
mod reader;
pub mod segment;
pub mod stepper;

pub use config::{DEFAULT_MARGIN_X, DEFAULT_MARGIN_Y, ScanConfig, ScanMode};
pub use error::{RecogError, RecogResult};
pub use reader::{Reading, recognize};

// Re-export commonly used types
pub use classify::{RecognitionTable, SegmentClass, Signature};
pub use stepper::{NullSink, OverlaySink, RasterOverlay, ScanState, StageMark, Stepper};

// Re-export core for convenience
pub use meterscan_core;
