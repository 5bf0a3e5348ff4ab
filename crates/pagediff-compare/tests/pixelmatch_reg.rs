//! Pixel comparator regression test
//!
//! Checks the comparator properties on synthetic pages: self-comparison,
//! swap symmetry, threshold monotonicity, the alpha distance, anti-aliasing
//! tolerance and the diff bitmap encoding.
//!
//! Run with:
//! ```
//! cargo test -p pagediff-compare --test pixelmatch_reg
//! ```

use pagediff_compare::{
    ComparisonOptions, PixelComparison, Rgb, compare_page_bitmaps, pixel_match,
};
use pagediff_io::{ImageFormat, encode_png, read_image_mem};
use pagediff_test::RegParams;
use pagediff_test::generators::{self, BLACK, WHITE};

const BLUE: [u8; 4] = [0, 0, 255, 255];
const GREEN: Rgb = Rgb::new(0, 255, 0);

#[test]
fn pixelmatch_self_reg() {
    let mut rp = RegParams::new("pixelmatch_self");
    let opts = ComparisonOptions::default();

    for seed in [1, 2, 3] {
        let page = generators::noise(40, 30, seed).unwrap();
        let result = compare_page_bitmaps(&page, &page, &opts).unwrap();
        rp.check(result.is_equal(), "page equals itself");

        // a deep copy takes the full path and must agree with the fast path
        let copy: pagediff_core::Bitmap = page.to_mut().into();
        let out = pixel_match(&page, &copy, &opts).unwrap();
        rp.compare_values(0.0, out.diff_pixels as f64, 0.0);
        rp.compare_values(0.0, out.anti_aliased_pixels as f64, 0.0);
    }

    assert!(rp.cleanup());
}

#[test]
fn pixelmatch_symmetry_reg() {
    let mut rp = RegParams::new("pixelmatch_symmetry");

    // counts are symmetric for arbitrary content
    let a = generators::noise(48, 32, 11).unwrap();
    let b = generators::noise(48, 32, 12).unwrap();
    let opts = ComparisonOptions::default();
    let ab = pixel_match(&a, &b, &opts).unwrap();
    let ba = pixel_match(&b, &a, &opts).unwrap();
    rp.compare_values(ab.diff_pixels as f64, ba.diff_pixels as f64, 0.0);
    rp.compare_values(
        ab.anti_aliased_pixels as f64,
        ba.anti_aliased_pixels as f64,
        0.0,
    );

    // swapping inputs and the two diff colors yields the same diff bitmap
    let base = generators::solid(32, 32, WHITE).unwrap();
    let changed = generators::with_block(&base, 4, 4, 6, 6, BLACK);
    let changed = generators::with_block(&changed, 20, 20, 5, 5, BLUE);
    let forward = ComparisonOptions::default().with_diff_colors(Rgb::RED, GREEN);
    let backward = ComparisonOptions::default().with_diff_colors(GREEN, Rgb::RED);

    let r1 = compare_page_bitmaps(&base, &changed, &forward).unwrap();
    let r2 = compare_page_bitmaps(&changed, &base, &backward).unwrap();
    rp.compare_values(r1.diff_pixels() as f64, r2.diff_pixels() as f64, 0.0);
    match (r1.diff(), r2.diff()) {
        (Some(d1), Some(d2)) => {
            rp.compare_bitmaps(d1, d2);
        }
        _ => {
            rp.check(false, "both directions produce a diff");
        }
    }

    assert!(rp.cleanup());
}

#[test]
fn pixelmatch_threshold_reg() {
    let mut rp = RegParams::new("pixelmatch_threshold");

    let a = generators::noise(40, 40, 5).unwrap();
    let b = generators::noise(40, 40, 6).unwrap();

    let mut previous = u64::MAX;
    for t in [0.0, 0.05, 0.1, 0.2, 0.4, 0.7, 1.0] {
        let opts = ComparisonOptions::default().with_threshold(t);
        let count = pixel_match(&a, &b, &opts).unwrap().diff_pixels;
        eprintln!("  threshold {t}: {count} differing pixels");
        rp.check(count <= previous, "count does not grow with threshold");
        previous = count;
    }
    // nothing can exceed the maximum distance
    rp.compare_values(0.0, previous as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn pixelmatch_alpha_reg() {
    let mut rp = RegParams::new("pixelmatch_alpha");

    // same RGB everywhere, one pixel fully transparent
    let opaque = generators::solid(3, 3, WHITE).unwrap();
    let hole = generators::with_block(&opaque, 1, 1, 1, 1, [255, 255, 255, 0]);

    for threshold in [0.1, 0.999] {
        let opts = ComparisonOptions::default().with_threshold(threshold);
        let result = compare_page_bitmaps(&opaque, &hole, &opts).unwrap();
        rp.compare_values(1.0, result.diff_pixels() as f64, 0.0);
    }

    // the alpha term reaches the maximum distance but never exceeds it
    let opts = ComparisonOptions::default().with_threshold(1.0);
    let result = compare_page_bitmaps(&opaque, &hole, &opts).unwrap();
    rp.check(result.is_equal(), "threshold 1 counts nothing");

    assert!(rp.cleanup());
}

#[test]
fn pixelmatch_antialias_reg() {
    let mut rp = RegParams::new("pixelmatch_antialias");

    let hard = generators::split_vertical(10, 10, 5, BLACK, WHITE).unwrap();
    let smooth = generators::antialiased_edge(10, 10, 5).unwrap();

    // Test 1: the gray column is tolerated by default
    let tolerant = ComparisonOptions::default();
    let out = pixel_match(&hard, &smooth, &tolerant).unwrap();
    rp.compare_values(0.0, out.diff_pixels as f64, 0.0);
    rp.compare_values(10.0, out.anti_aliased_pixels as f64, 0.0);
    rp.compare_strings(&out.diff.pixel(5, 3).unwrap(), &[255, 255, 0, 255]);
    rp.check(
        compare_page_bitmaps(&hard, &smooth, &tolerant)
            .unwrap()
            .is_equal(),
        "anti-aliasing alone is equal",
    );

    // Test 2: counted when anti-aliasing is included
    let strict = ComparisonOptions::default().with_anti_aliasing(true);
    let result = compare_page_bitmaps(&hard, &smooth, &strict).unwrap();
    rp.compare_values(10.0, result.diff_pixels() as f64, 0.0);

    // Test 3: anti-aliasing pixels are not drawn in mask mode
    let mask = ComparisonOptions::default().with_diff_mask(true);
    let out = pixel_match(&hard, &smooth, &mask).unwrap();
    rp.check(
        out.diff.data().iter().all(|&b| b == 0),
        "mask without real differences is empty",
    );

    assert!(rp.cleanup());
}

#[test]
fn pixelmatch_diffimage_reg() {
    let mut rp = RegParams::new("pixelmatch_diffimage");

    let base = generators::noise(24, 24, 9).unwrap();
    let changed = generators::with_block(&base, 8, 8, 4, 4, WHITE);

    let result = compare_page_bitmaps(&base, &changed, &ComparisonOptions::default()).unwrap();
    let PixelComparison::NotEqual { diff, diff_pixels } = result else {
        panic!("expected a difference");
    };
    rp.check(diff_pixels > 0 && diff_pixels <= 16, "only the block differs");
    rp.compare_values(24.0, diff.width() as f64, 0.0);

    // the diff survives a PNG round trip unchanged
    let png = encode_png(&diff).unwrap();
    let decoded = read_image_mem(&png).unwrap();
    rp.compare_bitmaps(&diff, &decoded);
    rp.write_bitmap_and_check(&diff, ImageFormat::Png).unwrap();

    assert!(rp.cleanup());
}
