//! meterscan-test - Regression test framework for meterscan
//!
//! Provides two pieces shared across the workspace's test suites:
//!
//! - [`RegParams`]: indexed comparisons with a recorded verdict, driven by
//!   the `REGTEST_MODE` environment variable (`compare` is the default,
//!   `display` runs without failing)
//! - [`fixture`]: synthetic counter-display photographs with pixel-exact
//!   geometry for end-to-end scans
//!
//! # Usage
//!
//! ```
//! use meterscan_test::RegParams;
//! use meterscan_test::fixture::CounterFixture;
//!
//! let mut rp = RegParams::new("doc");
//! let image = CounterFixture::from_digits(&[9, 0, 6]).unwrap().render();
//! rp.compare_values(272.0, image.height() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
pub mod fixture;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
