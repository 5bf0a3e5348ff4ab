//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use pagediff_core::Bitmap;
use pagediff_io::ImageFormat;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Check every written artifact (default)
    #[default]
    Compare,
    /// Write artifacts for visual inspection without reading them back
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, the current
/// check index, the mode and whether anything failed so far. Failures are
/// collected rather than panicking so that one run reports all of them.
pub struct RegParams {
    /// Name of the test (e.g., "pixelmatch")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "pixelmatch")
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Record a boolean check
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if condition {
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg)
        }
    }

    /// Compare two bitmaps for exact equality
    ///
    /// # Returns
    ///
    /// `true` if the bitmaps have the same size and bytes, `false` otherwise.
    pub fn compare_bitmaps(&mut self, bm1: &Bitmap, bm2: &Bitmap) -> bool {
        self.index += 1;

        if !bm1.sizes_equal(bm2) {
            let msg = format!(
                "Failure in {}_reg: bitmap comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                bm1.dimensions(),
                bm2.dimensions()
            );
            return self.fail(msg);
        }

        let first = bm1
            .data()
            .chunks_exact(4)
            .zip(bm2.data().chunks_exact(4))
            .position(|(a, b)| a != b);

        match first {
            None => true,
            Some(i) => {
                let w = bm1.width() as usize;
                let msg = format!(
                    "Failure in {}_reg: bitmap comparison for index {} - pixel mismatch at ({}, {})",
                    self.test_name,
                    self.index,
                    i % w,
                    i / w
                );
                self.fail(msg)
            }
        }
    }

    /// Compare two binary data arrays
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Write a bitmap to the regout directory and read it back
    ///
    /// In compare mode the file is decoded again and must match `bitmap`
    /// exactly. In display mode it is only written.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub fn write_bitmap_and_check(
        &mut self,
        bitmap: &Bitmap,
        format: ImageFormat,
    ) -> TestResult<String> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );

        pagediff_io::write_image(bitmap, &local_path, format).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        if self.mode == RegTestMode::Compare {
            let reread =
                pagediff_io::read_image(&local_path).map_err(|e| TestError::ImageLoad {
                    path: local_path.clone(),
                    message: e.to_string(),
                })?;
            if reread != *bitmap {
                let msg = format!(
                    "Failure in {}_reg, index {}: {} does not read back identically",
                    self.test_name, self.index, local_path
                );
                self.fail(msg);
            }
        }

        Ok(local_path)
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params_values");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 3);
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_bitmaps_reports_position() {
        let mut rp = RegParams::new("params_bitmaps");
        let a = Bitmap::new_filled(3, 2, [0, 0, 0, 255]).unwrap();
        let mut b = a.to_mut();
        b.set_pixel(1, 1, [1, 0, 0, 255]).unwrap();
        let b: Bitmap = b.into();

        assert!(rp.compare_bitmaps(&a, &a.clone()));
        assert!(!rp.compare_bitmaps(&a, &b));
        assert!(rp.failures()[0].contains("(1, 1)"));
    }

    #[test]
    fn test_compare_bitmaps_size_mismatch() {
        let mut rp = RegParams::new("params_sizes");
        let a = Bitmap::new(3, 2).unwrap();
        let b = Bitmap::new(2, 3).unwrap();
        assert!(!rp.compare_bitmaps(&a, &b));
    }
}
