//! Snapshot regression test - patch independence
//!
//! Verifies the snapshot contract over a realistic scene: every patch
//! owns an independent pixel copy, so binarizing one never leaks into the
//! source image or into overlapping patches.

use meterscan_core::{BinaryThreshold, Box, Patch};
use meterscan_test::RegParams;
use meterscan_test::fixture::CounterFixture;

#[test]
fn snapshot_reg() {
    let mut rp = RegParams::new("snapshot");

    let fixture = CounterFixture::from_digits(&[9, 0, 6]).expect("fixture");
    let image = fixture.render();
    let pristine = image.clone();
    let cavity = fixture.cavity();
    let threshold = BinaryThreshold::default();

    // --- Test 1: capture copies, it does not alias ---
    let whole = Patch::capture(&image, &image.bounds()).expect("whole patch");
    let mut over_cavity = Patch::capture(&image, &cavity).expect("cavity patch");
    let overlapping = Patch::capture(
        &image,
        &Box::new_unchecked(cavity.x - 10, cavity.y - 10, 60, 60),
    )
    .expect("overlapping patch");

    over_cavity.binarize(&threshold);
    rp.check(image == pristine, "source untouched after binarize");

    // The overlapping patch still shows raw samples where the cavity
    // patch now shows 0/255. Local (11, 11) is one pixel inside the
    // cavity's top-left corner.
    let raw = overlapping.sample(11, 11).expect("overlap sample");
    rp.check(raw != 0 && raw != 255, "overlapping patch keeps raw samples");

    // --- Test 2: binarized snapshot is pure black/white ---
    let mut pure = true;
    for y in 0..over_cavity.height() {
        for x in 0..over_cavity.width() {
            let v = over_cavity.sample(x, y).expect("in-range sample");
            if v != 0 && v != 255 {
                pure = false;
            }
        }
    }
    rp.check(pure, "binarized snapshot is two-valued");

    // --- Test 3: classification agrees between independent captures ---
    let again = Patch::capture(&image, &image.bounds()).expect("second whole patch");
    let mut agree = true;
    for y in (0..whole.height()).step_by(7) {
        for x in (0..whole.width()).step_by(7) {
            if whole.is_white(&threshold, x, y) != again.is_white(&threshold, x, y) {
                agree = false;
            }
        }
    }
    rp.check(agree, "independent captures classify identically");

    assert!(rp.cleanup(), "snapshot regression test failed");
}
