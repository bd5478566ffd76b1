//! Patch - a rectangle plus its private pixel snapshot
//!
//! Every recognition stage works on a `Patch`: the stage's rectangle in
//! image coordinates together with an independent copy of the pixels under
//! it, captured once at construction. Two patches over overlapping image
//! regions never alias memory, so a stage may rewrite its snapshot (for
//! binarized overlays) without disturbing the source image or any other
//! stage.

use crate::box_::Box;
use crate::error::Result;
use crate::raster::Raster;
use crate::threshold::BinaryThreshold;

/// A rectangular view over a source raster with a private snapshot.
///
/// Geometry is immutable after construction; only the snapshot may be
/// rewritten in place.
#[derive(Debug, Clone)]
pub struct Patch {
    bounds: Box,
    pixels: Raster,
}

impl Patch {
    /// Capture the pixels under `bounds` from a source raster.
    ///
    /// The stored bounds are the captured region after clipping to the
    /// source, so local coordinates always address valid snapshot pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if `bounds` does not intersect the source.
    pub fn capture(source: &Raster, bounds: &Box) -> Result<Self> {
        let clipped = bounds
            .clip(source.width() as i32, source.height() as i32)
            .unwrap_or(*bounds);
        let pixels = source.clip_rectangle(bounds)?;
        Ok(Self {
            bounds: clipped,
            pixels,
        })
    }

    /// The patch rectangle in source-image coordinates.
    pub fn bounds(&self) -> &Box {
        &self.bounds
    }

    /// Snapshot width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.w
    }

    /// Snapshot height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.h
    }

    /// Sample the snapshot at patch-local coordinates.
    ///
    /// Returns `None` outside the snapshot, including for negative
    /// coordinates. Scanners rely on this: out-of-range reads classify as
    /// dark.
    pub fn sample(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 {
            return None;
        }
        self.pixels.get(x as u32, y as u32)
    }

    /// Binary classification at patch-local coordinates.
    ///
    /// Out-of-range coordinates are black.
    #[inline]
    pub fn is_white(&self, threshold: &BinaryThreshold, x: i32, y: i32) -> bool {
        self.sample(x, y).is_some_and(|v| threshold.is_white(v))
    }

    /// Rewrite the snapshot to pure black/white under the given threshold.
    ///
    /// Display plumbing for overlay consumers; the source raster and all
    /// other patches are unaffected.
    pub fn binarize(&mut self, threshold: &BinaryThreshold) {
        for y in 0..self.pixels.height() {
            for x in 0..self.pixels.width() {
                let v = self.pixels.get_unchecked(x, y);
                let bw = if threshold.is_white(v) { 255 } else { 0 };
                self.pixels.set_unchecked(x, y, bw);
            }
        }
    }

    /// Read-only access to the snapshot.
    pub fn pixels(&self) -> &Raster {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_raster() -> Raster {
        let mut r = Raster::new(16, 16, 0).unwrap();
        for y in 0..16u32 {
            for x in 0..16u32 {
                r.set_unchecked(x, y, (x * 16 + y) as u8);
            }
        }
        r
    }

    #[test]
    fn test_capture_snapshots_pixels() {
        let src = gradient_raster();
        let p = Patch::capture(&src, &Box::new_unchecked(4, 2, 8, 8)).unwrap();
        assert_eq!(p.width(), 8);
        assert_eq!(p.height(), 8);
        assert_eq!(p.bounds().x, 4);
        // Local (0, 0) is source (4, 2)
        assert_eq!(p.sample(0, 0), src.get(4, 2));
        assert_eq!(p.sample(7, 7), src.get(11, 9));
    }

    #[test]
    fn test_sample_out_of_range_is_none() {
        let src = gradient_raster();
        let p = Patch::capture(&src, &Box::new_unchecked(0, 0, 4, 4)).unwrap();
        assert_eq!(p.sample(-1, 0), None);
        assert_eq!(p.sample(0, -1), None);
        assert_eq!(p.sample(4, 0), None);
        assert_eq!(p.sample(0, 4), None);

        let t = BinaryThreshold::default();
        assert!(!p.is_white(&t, 4, 0));
        assert!(!p.is_white(&t, -1, -1));
    }

    #[test]
    fn test_binarize_is_private_to_the_patch() {
        let mut src = Raster::new(8, 8, 200).unwrap();
        src.set(3, 3, 10).unwrap();

        let mut a = Patch::capture(&src, &Box::new_unchecked(0, 0, 8, 8)).unwrap();
        let b = Patch::capture(&src, &Box::new_unchecked(2, 2, 4, 4)).unwrap();

        a.binarize(&BinaryThreshold::default());
        assert_eq!(a.sample(0, 0), Some(255));
        assert_eq!(a.sample(3, 3), Some(0));

        // Source and the overlapping patch keep the raw samples
        assert_eq!(src.get(0, 0), Some(200));
        assert_eq!(src.get(3, 3), Some(10));
        assert_eq!(b.sample(1, 1), Some(10));
    }

    #[test]
    fn test_binarize_idempotent() {
        let src = gradient_raster();
        let mut p = Patch::capture(&src, &Box::new_unchecked(0, 0, 16, 16)).unwrap();
        let t = BinaryThreshold::default();
        p.binarize(&t);
        let first = p.pixels().clone();
        p.binarize(&t);
        assert_eq!(p.pixels(), &first);
    }
}
