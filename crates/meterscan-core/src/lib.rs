//! meterscan-core - Data structures for the counter-display reader
//!
//! This crate provides the leaf types every recognition stage builds on:
//!
//! - [`Raster`]: single-channel 8-bit image container
//! - [`Box`]: axis-aligned rectangle in image coordinates
//! - [`Patch`]: a rectangle plus its private pixel snapshot
//! - [`BinaryThreshold`]: fixed-cut white/black classification
//!
//! # Example
//!
//! ```
//! use meterscan_core::{BinaryThreshold, Box, Patch, Raster};
//!
//! let mut img = Raster::new(64, 48, 0).unwrap();
//! img.fill_rect(&Box::new_unchecked(10, 10, 8, 8), 200);
//!
//! let patch = Patch::capture(&img, &Box::new_unchecked(8, 8, 16, 16)).unwrap();
//! let threshold = BinaryThreshold::default();
//! assert!(patch.is_white(&threshold, 4, 4));
//! assert!(!patch.is_white(&threshold, 0, 0));
//! ```

pub mod box_;
mod error;
mod patch;
pub mod raster;
mod threshold;

pub use box_::Box;
pub use error::{Error, Result};
pub use patch::Patch;
pub use raster::Raster;
pub use threshold::{BinaryThreshold, DEFAULT_THRESHOLD};
