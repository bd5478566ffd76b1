//! Synthetic counter-display photographs
//!
//! Builds pixel-exact scenes that satisfy every pipeline stage's
//! preconditions: a dark field with at least 50 px of margin, a light
//! display plate, a dark digit cavity behind its bezel, and digit glyphs
//! rendered as horizontal stroke patterns. Small bezel reliefs on the
//! cavity's left and right edges stand in for the irregular bezel contours
//! of a real photograph; the row-extent search keys off them exactly as it
//! does off real bezel texture.
//!
//! Scene layout (all values in pixels, left to right):
//!
//! ```text
//! field | plate bezel | lead | glyphs | tail | plate bezel | field
//! ```

use crate::error::{TestError, TestResult};
use meterscan_core::{Box, Raster};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Background and cavity sample value (well below the 120 cut).
pub const FIELD: u8 = 20;
/// Display plate sample value (well above the 120 cut).
pub const PLATE: u8 = 230;
/// Glyph stroke sample value.
pub const STROKE: u8 = 240;
/// Margin speckle sample value.
pub const SPECKLE: u8 = 215;

/// Glyph cell width.
pub const CELL_W: i32 = 24;
/// Glyph cell height.
pub const CELL_H: i32 = 60;
/// Gap between adjacent glyph cells.
pub const CELL_GAP: i32 = 8;

const BEZEL: i32 = 6;
const CAVITY_H: i32 = 80;
const IMAGE_H: u32 = 272;
const MAX_GLYPHS: usize = 8;

/// Stroke patterns for the digits the default recognition table covers:
/// per vertical fifth of the cell, the number of scan-line transitions the
/// rendered rows produce.
pub const SEGMENT_FONT: [(u8, [u8; 5]); 6] = [
    (0, [2, 4, 4, 4, 2]),
    (4, [2, 2, 4, 2, 2]),
    (6, [2, 2, 2, 4, 2]),
    (7, [2, 2, 2, 2, 2]),
    (8, [2, 4, 2, 4, 2]),
    (9, [2, 4, 2, 2, 2]),
];

/// Look up the stroke pattern for a digit.
pub fn glyph_for(digit: u8) -> Option<[u8; 5]> {
    SEGMENT_FONT
        .iter()
        .find(|(d, _)| *d == digit)
        .map(|(_, glyph)| *glyph)
}

/// Builder for synthetic counter photographs.
#[derive(Debug, Clone)]
pub struct CounterFixture {
    glyphs: Vec<[u8; 5]>,
    speckles: Option<(u64, usize)>,
}

impl CounterFixture {
    /// Build a fixture showing the given digits.
    ///
    /// # Errors
    ///
    /// Returns [`TestError::UnsupportedDigit`] for digits outside the
    /// stroke font and [`TestError::Fixture`] for zero or more than eight
    /// digits.
    pub fn from_digits(digits: &[u8]) -> TestResult<Self> {
        let glyphs = digits
            .iter()
            .map(|&d| glyph_for(d).ok_or(TestError::UnsupportedDigit { digit: d }))
            .collect::<TestResult<Vec<_>>>()?;
        Self::from_glyphs(&glyphs)
    }

    /// Build a fixture from raw stroke patterns.
    ///
    /// Patterns need not be in the recognition table (off-table scans are
    /// a fixture use case), but each section count must be even and
    /// renderable: 2, 4 or 6.
    ///
    /// # Errors
    ///
    /// Returns [`TestError::Fixture`] for an empty or oversized glyph list
    /// or an unrenderable section count.
    pub fn from_glyphs(glyphs: &[[u8; 5]]) -> TestResult<Self> {
        if glyphs.is_empty() {
            return Err(TestError::Fixture("fixture needs at least one glyph".into()));
        }
        if glyphs.len() > MAX_GLYPHS {
            return Err(TestError::Fixture(format!(
                "fixture supports at most {} glyphs, got {}",
                MAX_GLYPHS,
                glyphs.len()
            )));
        }
        for glyph in glyphs {
            for &count in glyph {
                if !matches!(count, 2 | 4 | 6) {
                    return Err(TestError::Fixture(format!(
                        "section count {} is not renderable",
                        count
                    )));
                }
            }
        }
        Ok(Self {
            glyphs: glyphs.to_vec(),
            speckles: None,
        })
    }

    /// Sprinkle deterministic white speckles into the 50 px margin frame.
    ///
    /// The search inset exists to ignore exactly this kind of edge noise;
    /// the speckles never touch the searched area.
    pub fn with_margin_speckles(mut self, seed: u64, count: usize) -> Self {
        self.speckles = Some((seed, count));
        self
    }

    /// Total width of the rendered glyph band.
    fn glyph_band_width(&self) -> i32 {
        let n = self.glyphs.len() as i32;
        n * CELL_W + (n - 1) * CELL_GAP
    }

    /// Cavity lead-in: the dark run between bezel and first glyph. Sized
    /// so that it always exceeds one sixth of the search width.
    fn lead(&self) -> i32 {
        self.glyph_band_width() / 2 + 60
    }

    /// The dark cavity behind the bezel.
    pub fn cavity(&self) -> Box {
        let lead = self.lead();
        let cavity_w = 2 * lead + 2 * self.glyph_band_width() + 8;
        Box::new_unchecked(50 + lead + BEZEL, 96, cavity_w, CAVITY_H)
    }

    /// The light display plate around the cavity.
    pub fn plate(&self) -> Box {
        let cavity = self.cavity();
        Box::new_unchecked(
            cavity.x - BEZEL,
            cavity.y - BEZEL,
            cavity.w + 2 * BEZEL,
            cavity.h + 2 * BEZEL,
        )
    }

    /// One box per glyph, left to right.
    pub fn cell_boxes(&self) -> Vec<Box> {
        let cavity = self.cavity();
        (0..self.glyphs.len() as i32)
            .map(|i| {
                Box::new_unchecked(
                    cavity.x + self.lead() + i * (CELL_W + CELL_GAP),
                    cavity.y + 10,
                    CELL_W,
                    CELL_H,
                )
            })
            .collect()
    }

    /// Render the scene.
    pub fn render(&self) -> Raster {
        let plate = self.plate();
        let cavity = self.cavity();
        let width = (plate.right() + 20 + 50) as u32;

        let mut image = Raster::new(width, IMAGE_H, FIELD).expect("fixture dimensions");
        image.fill_rect(&plate, PLATE);
        image.fill_rect(&cavity, FIELD);

        // Bezel reliefs: a few cavity rows reach 3 px into the bezel on
        // each side, which drags the row-extent search onto the bezel.
        image.fill_rect(&Box::new_unchecked(cavity.x - 3, cavity.y + 20, 3, 4), FIELD);
        image.fill_rect(&Box::new_unchecked(cavity.right(), cavity.y + 56, 3, 4), FIELD);

        for (cell, glyph) in self.cell_boxes().iter().zip(&self.glyphs) {
            render_glyph(&mut image, cell, glyph);
        }

        if let Some((seed, count)) = self.speckles {
            render_speckles(&mut image, seed, count);
        }

        image
    }
}

/// Render one glyph: five 12-row sections, each showing `count / 2`
/// white runs so that a scan line crosses `count` transitions.
fn render_glyph(image: &mut Raster, cell: &Box, glyph: &[u8; 5]) {
    let section_h = CELL_H / 5;
    for (section, &count) in glyph.iter().enumerate() {
        let y = cell.y + section as i32 * section_h;
        let runs = i32::from(count) / 2;
        if runs <= 1 {
            image.fill_rect(&Box::new_unchecked(cell.x, y, cell.w, section_h), STROKE);
            continue;
        }
        // Runs of 6 px, first at the left edge, last ending at the right
        // edge, spaced evenly.
        let gap = (cell.w - 6 * runs) / (runs - 1);
        for run in 0..runs {
            let x = cell.x + run * (6 + gap);
            image.fill_rect(&Box::new_unchecked(x, y, 6, section_h), STROKE);
        }
    }
}

/// Scatter 2x2 speckles across the four margin bands, fully outside the
/// 50 px search inset.
fn render_speckles(image: &mut Raster, seed: u64, count: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let w = image.width() as i32;
    let h = image.height() as i32;
    for _ in 0..count {
        let (x, y) = match rng.random_range(0..4u32) {
            0 => (rng.random_range(0..w - 2), rng.random_range(0..48)),
            1 => (rng.random_range(0..w - 2), rng.random_range(h - 50..h - 2)),
            2 => (rng.random_range(0..48), rng.random_range(0..h - 2)),
            _ => (rng.random_range(w - 50..w - 2), rng.random_range(0..h - 2)),
        };
        image.fill_rect(&Box::new_unchecked(x, y, 2, 2), SPECKLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_covers_table_digits() {
        for digit in [0u8, 4, 6, 7, 8, 9] {
            assert!(glyph_for(digit).is_some());
        }
        for digit in [1u8, 2, 3, 5] {
            assert!(glyph_for(digit).is_none());
        }
    }

    #[test]
    fn test_from_digits_rejects_unsupported() {
        assert!(matches!(
            CounterFixture::from_digits(&[9, 1]),
            Err(TestError::UnsupportedDigit { digit: 1 })
        ));
        assert!(CounterFixture::from_digits(&[]).is_err());
        assert!(CounterFixture::from_digits(&[0; 9]).is_err());
    }

    #[test]
    fn test_from_glyphs_rejects_odd_counts() {
        assert!(CounterFixture::from_glyphs(&[[2, 3, 2, 2, 2]]).is_err());
        assert!(CounterFixture::from_glyphs(&[[2, 8, 2, 2, 2]]).is_err());
        assert!(CounterFixture::from_glyphs(&[[2, 2, 6, 2, 2]]).is_ok());
    }

    #[test]
    fn test_scene_geometry() {
        let fixture = CounterFixture::from_digits(&[9, 0, 6]).unwrap();
        let image = fixture.render();
        let plate = fixture.plate();
        let cavity = fixture.cavity();

        // 50 px dark margins all around the plate
        assert!(plate.x >= 100);
        assert!((plate.right() as u32) < image.width() - 50);
        assert_eq!(image.get(0, 0), Some(FIELD));

        // Plate is light, cavity dark, strokes lit
        assert_eq!(
            image.get(plate.x as u32, plate.y as u32 + 10),
            Some(PLATE)
        );
        assert_eq!(
            image.get(cavity.x as u32 + 1, cavity.y as u32 + 1),
            Some(FIELD)
        );
        let cells = fixture.cell_boxes();
        assert_eq!(cells.len(), 3);
        assert_eq!(image.get(cells[0].x as u32, cells[0].y as u32), Some(STROKE));

        // Cells sit inside the cavity with room above and below
        for cell in &cells {
            assert!(cavity.contains_box(cell));
            assert!(cell.y > cavity.y);
            assert!(cell.bottom() < cavity.bottom());
        }
    }

    #[test]
    fn test_speckles_stay_in_margin_frame() {
        let fixture = CounterFixture::from_digits(&[7])
            .unwrap()
            .with_margin_speckles(11, 400);
        let clean = CounterFixture::from_digits(&[7]).unwrap().render();
        let noisy = fixture.render();

        assert_ne!(clean, noisy);
        let w = noisy.width();
        let h = noisy.height();
        for y in 50..h - 50 {
            for x in 50..w - 50 {
                assert_eq!(clean.get(x, y), noisy.get(x, y), "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_speckles_are_deterministic() {
        let a = CounterFixture::from_digits(&[8])
            .unwrap()
            .with_margin_speckles(42, 100)
            .render();
        let b = CounterFixture::from_digits(&[8])
            .unwrap()
            .with_margin_speckles(42, 100)
            .render();
        assert_eq!(a, b);
    }
}
