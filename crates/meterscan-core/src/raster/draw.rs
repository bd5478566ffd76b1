//! Drawing operations on rasters
//!
//! Minimal primitives for building synthetic scenes and rendering
//! diagnostic overlays: filled rectangles and box outlines. All drawing is
//! clipped to the raster bounds.

use super::Raster;
use crate::box_::Box;

impl Raster {
    /// Fill a rectangular region with a constant sample value.
    ///
    /// Regions outside the raster are silently clipped away.
    pub fn fill_rect(&mut self, region: &Box, value: u8) {
        let Some(clipped) = region.clip(self.width() as i32, self.height() as i32) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set_unchecked(x as u32, y as u32, value);
            }
        }
    }

    /// Draw the outline of a box with the given border thickness.
    ///
    /// The border grows inward from the box edges. A thickness that meets
    /// or exceeds half the box size degenerates into a filled rectangle.
    pub fn draw_box(&mut self, region: &Box, border: i32, value: u8) {
        if border <= 0 || region.w <= 0 || region.h <= 0 {
            return;
        }
        if 2 * border >= region.w || 2 * border >= region.h {
            self.fill_rect(region, value);
            return;
        }
        // Top and bottom bands
        self.fill_rect(&Box::new_unchecked(region.x, region.y, region.w, border), value);
        self.fill_rect(
            &Box::new_unchecked(region.x, region.bottom() - border, region.w, border),
            value,
        );
        // Left and right bands between the horizontal ones
        let inner_h = region.h - 2 * border;
        self.fill_rect(
            &Box::new_unchecked(region.x, region.y + border, border, inner_h),
            value,
        );
        self.fill_rect(
            &Box::new_unchecked(region.right() - border, region.y + border, border, inner_h),
            value,
        );
    }
}
