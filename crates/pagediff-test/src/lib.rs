//! pagediff-test - Regression test framework for pagediff
//!
//! This crate provides a small regression test harness in the style of
//! `regutils`, supporting two modes:
//!
//! - **Compare**: Run every check; written artifacts are read back and
//!   verified
//! - **Display**: Write artifacts to the regout directory for visual
//!   inspection
//!
//! It also provides deterministic fixture bitmaps ([`generators`]).
//!
//! # Usage
//!
//! ```ignore
//! use pagediff_test::RegParams;
//!
//! let mut rp = RegParams::new("pixelmatch");
//! rp.compare_values(0.0, diff_pixels as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod generators;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pagediff-test is at crates/pagediff-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Get a path inside the regout directory
pub fn regout_path(name: &str) -> String {
    format!("{}/{}", regout_dir(), name)
}
