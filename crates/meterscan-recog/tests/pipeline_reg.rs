//! Pipeline regression test - end-to-end recognition
//!
//! Runs the full pipeline over synthetic counter photographs: complete
//! readings, margin noise immunity, digit-count validation, strict and
//! lenient handling of off-table glyphs, and the no-display failure.

use meterscan_core::Raster;
use meterscan_recog::{RecogError, ScanConfig, ScanMode, recognize};
use meterscan_test::RegParams;
use meterscan_test::fixture::{CounterFixture, glyph_for};

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");
    let config = ScanConfig::default();

    // --- Test 1: three-digit reading ---
    let image = CounterFixture::from_digits(&[9, 0, 6]).expect("fixture").render();
    let reading = recognize(&image, &config).expect("three-digit scan");
    rp.compare_values(906.0, reading.value().expect("value") as f64, 0.0);
    rp.compare_str("906", &reading.to_string());
    rp.compare_values(3.0, reading.len() as f64, 0.0);
    rp.check(reading.is_complete(), "three-digit reading complete");

    // --- Test 2: every digit the default table knows ---
    let image = CounterFixture::from_digits(&[0, 4, 6, 7, 8, 9])
        .expect("fixture")
        .render();
    let reading = recognize(&image, &config).expect("six-digit scan");
    rp.compare_str("046789", &reading.to_string());
    rp.compare_values(46789.0, reading.value().expect("value") as f64, 0.0);

    // --- Test 3: single digit ---
    let image = CounterFixture::from_digits(&[8]).expect("fixture").render();
    let reading = recognize(&image, &config).expect("single-digit scan");
    rp.compare_values(8.0, reading.value().expect("value") as f64, 0.0);

    // --- Test 4: determinism ---
    let image = CounterFixture::from_digits(&[4, 7]).expect("fixture").render();
    let first = recognize(&image, &config).expect("first scan");
    let second = recognize(&image, &config).expect("second scan");
    rp.check(first == second, "same image, same reading");

    assert!(rp.cleanup(), "pipeline regression test failed");
}

#[test]
fn margin_noise_reg() {
    let mut rp = RegParams::new("margin_noise");
    let config = ScanConfig::default();

    // Speckles confined to the 50 px margin frame never reach the search
    // box; the reading is identical to the clean scene.
    let fixture = CounterFixture::from_digits(&[9, 0, 6]).expect("fixture");
    let clean = recognize(&fixture.render(), &config).expect("clean scan");
    let noisy_image = fixture.with_margin_speckles(1234, 300).render();
    let noisy = recognize(&noisy_image, &config).expect("noisy scan");

    rp.compare_values(906.0, noisy.value().expect("value") as f64, 0.0);
    rp.check(clean == noisy, "margin speckles change nothing");

    assert!(rp.cleanup(), "margin noise regression test failed");
}

#[test]
fn digit_count_reg() {
    let mut rp = RegParams::new("digit_count");
    let image = CounterFixture::from_digits(&[9, 0, 6]).expect("fixture").render();

    // Matching expectation passes
    let config = ScanConfig {
        expected_digits: Some(3),
        ..ScanConfig::default()
    };
    let reading = recognize(&image, &config).expect("matching digit count");
    rp.compare_values(906.0, reading.value().expect("value") as f64, 0.0);

    // Mismatch aborts with both counts reported
    let config = ScanConfig {
        expected_digits: Some(6),
        ..ScanConfig::default()
    };
    match recognize(&image, &config) {
        Err(RecogError::DigitCountMismatch { expected, actual }) => {
            rp.compare_values(6.0, expected as f64, 0.0);
            rp.compare_values(3.0, actual as f64, 0.0);
        }
        other => {
            rp.check(false, &format!("expected DigitCountMismatch, got {:?}", other));
        }
    }

    assert!(rp.cleanup(), "digit count regression test failed");
}

#[test]
fn off_table_glyph_reg() {
    let mut rp = RegParams::new("off_table_glyph");

    // Third cell renders a stroke pattern the table does not know.
    let glyphs = [
        glyph_for(9).expect("glyph 9"),
        glyph_for(0).expect("glyph 0"),
        [2, 2, 2, 2, 4],
    ];
    let image = CounterFixture::from_glyphs(&glyphs).expect("fixture").render();

    // Strict mode aborts and names the cell
    let config = ScanConfig::default();
    match recognize(&image, &config) {
        Err(RecogError::UnrecognizedSignature { signature, index }) => {
            rp.compare_values(2.0, index as f64, 0.0);
            rp.compare_str("2,2,2,2,4", &signature.to_string());
        }
        other => {
            rp.check(
                false,
                &format!("expected UnrecognizedSignature, got {:?}", other),
            );
        }
    }

    // Lenient mode keeps the recognized cells and flags the reading
    let config = ScanConfig {
        mode: ScanMode::Lenient,
        ..ScanConfig::default()
    };
    let reading = recognize(&image, &config).expect("lenient scan");
    rp.compare_str("90?", &reading.to_string());
    rp.check(reading.value().is_none(), "partial reading has no value");
    rp.check(!reading.is_complete(), "partial reading is not complete");

    assert!(rp.cleanup(), "off-table glyph regression test failed");
}

#[test]
fn no_display_reg() {
    let mut rp = RegParams::new("no_display");
    let config = ScanConfig::default();

    // Uniform dark and uniform light frames both lack a digit region
    for fill in [0u8, 40, 230, 255] {
        let image = Raster::new(400, 300, fill).unwrap();
        let ok = matches!(
            recognize(&image, &config),
            Err(RecogError::BoundingBoxNotFound { .. })
        );
        rp.check(ok, &format!("uniform fill {} has no bounding box", fill));
    }

    assert!(rp.cleanup(), "no display regression test failed");
}
