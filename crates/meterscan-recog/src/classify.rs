//! Digit classification via edge-count signatures
//!
//! A trimmed digit cell is summarized by five representative edge counts,
//! one per vertical fifth of the cell: each pixel row contributes the
//! number of black/white transitions a left-to-right scan line crosses,
//! and a per-section histogram picks the dominant count. The five counts
//! form a signature that a fixed table maps to a digit.

use std::fmt;

use meterscan_core::{BinaryThreshold, Patch};

/// Number of vertical sections a cell is divided into.
pub const SIGNATURE_SECTIONS: usize = 5;

/// Number of histogram buckets per section; transition counts at or above
/// this saturate into the last bucket.
const HISTOGRAM_BUCKETS: usize = 10;

/// Five-section edge-count summary of a digit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_SECTIONS]);

impl Signature {
    /// Create a signature from explicit section counts.
    pub const fn new(counts: [u8; SIGNATURE_SECTIONS]) -> Self {
        Self(counts)
    }

    /// The per-section edge counts, top to bottom.
    pub const fn counts(&self) -> [u8; SIGNATURE_SECTIONS] {
        self.0
    }
}

impl From<[u8; SIGNATURE_SECTIONS]> for Signature {
    fn from(counts: [u8; SIGNATURE_SECTIONS]) -> Self {
        Self(counts)
    }
}

impl fmt::Display for Signature {
    /// Canonical comma-joined form, e.g. `2,4,4,4,2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "{},{},{},{},{}", a, b, c, d, e)
    }
}

/// Fixed mapping from signatures to digit values.
///
/// The default table carries the six signatures calibrated for the
/// supported display family; digits 1, 2, 3 and 5 have no entry there and
/// scan as unrecognized. Completing the table is a calibration task, done
/// by extending the default or building a table from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionTable {
    entries: Vec<(Signature, u8)>,
}

impl RecognitionTable {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace an entry, builder style.
    pub fn with_entry(mut self, counts: [u8; SIGNATURE_SECTIONS], digit: u8) -> Self {
        self.insert(counts.into(), digit);
        self
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, signature: Signature, digit: u8) {
        match self.entries.iter_mut().find(|(s, _)| *s == signature) {
            Some(entry) => entry.1 = digit,
            None => self.entries.push((signature, digit)),
        }
    }

    /// Look up the digit for a signature.
    pub fn lookup(&self, signature: &Signature) -> Option<u8> {
        self.entries
            .iter()
            .find(|(s, _)| s == signature)
            .map(|(_, d)| *d)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RecognitionTable {
    fn default() -> Self {
        Self::empty()
            .with_entry([2, 4, 4, 4, 2], 0)
            .with_entry([2, 2, 4, 2, 2], 4)
            .with_entry([2, 2, 2, 4, 2], 6)
            .with_entry([2, 2, 2, 2, 2], 7)
            .with_entry([2, 4, 2, 4, 2], 8)
            .with_entry([2, 4, 2, 2, 2], 9)
    }
}

/// Classification of one digit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentClass {
    /// The signature matched a table entry.
    Digit(u8),
    /// The signature has no table entry; the cell shows a digit outside
    /// the calibrated set, or a distorted capture.
    Unrecognized(Signature),
}

/// Compute the edge-count signature of a trimmed digit cell.
///
/// The cell height is divided into five sections of `round(height / 5)`
/// rows (at least one); rows past the fifth section fold into it. Each
/// row's transition count starts from an assumed-black left edge and adds
/// one when the row ends white, approximating the number of vertical
/// strokes the scan line crosses. Per section, the transition count with
/// the most rows wins, the lowest count winning ties.
///
/// Deterministic: the same pixels always produce the same signature.
pub fn signature_of(cell: &Patch, threshold: &BinaryThreshold) -> Signature {
    let w = cell.width();
    let h = cell.height();
    let section_size = ((h + 2) / SIGNATURE_SECTIONS as i32).max(1);

    let mut histogram = [[0u32; HISTOGRAM_BUCKETS]; SIGNATURE_SECTIONS];
    for y in 0..h {
        let section = ((y / section_size) as usize).min(SIGNATURE_SECTIONS - 1);
        let mut edges = 0usize;
        let mut prev = false;
        let mut current = false;
        for x in 0..w {
            current = cell.is_white(threshold, x, y);
            if current != prev {
                edges += 1;
                prev = current;
            }
        }
        if current {
            edges += 1;
        }
        histogram[section][edges.min(HISTOGRAM_BUCKETS - 1)] += 1;
    }

    let mut counts = [0u8; SIGNATURE_SECTIONS];
    for (section, buckets) in histogram.iter().enumerate() {
        counts[section] = dominant_bucket(buckets);
    }
    Signature(counts)
}

/// Index of the fullest bucket; the first (lowest) index wins ties.
fn dominant_bucket(buckets: &[u32; HISTOGRAM_BUCKETS]) -> u8 {
    let mut best = 0usize;
    for (i, &count) in buckets.iter().enumerate() {
        if count > buckets[best] {
            best = i;
        }
    }
    best as u8
}

/// Classify a trimmed digit cell against a recognition table.
pub fn classify_segment(
    cell: &Patch,
    threshold: &BinaryThreshold,
    table: &RecognitionTable,
) -> SegmentClass {
    let signature = signature_of(cell, threshold);
    match table.lookup(&signature) {
        Some(digit) => SegmentClass::Digit(digit),
        None => SegmentClass::Unrecognized(signature),
    }
}
