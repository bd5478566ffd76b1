//! Scan configuration
//!
//! All tunables of the recognition pipeline in one place. The defaults
//! carry the calibration of the supported display family: luminance cut
//! 120, 50 px search margins on both axes, the six-entry recognition table.

use crate::classify::RecognitionTable;
use meterscan_core::BinaryThreshold;

/// Default horizontal search margin in pixels.
///
/// The outer frame of a photograph tends to carry vignetting and bezel
/// reflections; the search box ignores a fixed band on each side.
pub const DEFAULT_MARGIN_X: u32 = 50;

/// Default vertical search margin in pixels.
pub const DEFAULT_MARGIN_Y: u32 = 50;

/// Policy for digit cells whose signature has no table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Any unrecognized signature aborts the whole reading.
    #[default]
    Strict,
    /// Unrecognized cells become placeholders; the reading carries no
    /// numeric value until every cell is recognized.
    Lenient,
}

/// Options for a recognition run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Binary white/black classifier applied to every sampled pixel
    pub threshold: BinaryThreshold,
    /// Horizontal inset of the search box from the image edges
    pub margin_x: u32,
    /// Vertical inset of the search box from the image edges
    pub margin_y: u32,
    /// When set, a discovered segment count different from this value
    /// aborts the run. `None` accepts whatever the splitter finds.
    pub expected_digits: Option<usize>,
    /// Policy for unrecognized signatures
    pub mode: ScanMode,
    /// Signature-to-digit mapping
    pub table: RecognitionTable,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: BinaryThreshold::default(),
            margin_x: DEFAULT_MARGIN_X,
            margin_y: DEFAULT_MARGIN_Y,
            expected_digits: None,
            mode: ScanMode::default(),
            table: RecognitionTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.threshold.threshold(), 120);
        assert_eq!(config.margin_x, 50);
        assert_eq!(config.margin_y, 50);
        assert_eq!(config.expected_digits, None);
        assert_eq!(config.mode, ScanMode::Strict);
        assert_eq!(config.table.len(), 6);
    }
}
