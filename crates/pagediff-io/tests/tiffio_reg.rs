//! Multipage TIFF regression test
//!
//! Writes raster documents with pages of different sizes and reads them
//! back page by page.
//!
//! Run with:
//! ```
//! cargo test -p pagediff-io --test tiffio_reg
//! ```

use pagediff_io::{
    ImageFormat, page_count_mem, read_image, read_page_mem, read_pages, read_pages_mem, write_pages,
};
use pagediff_test::generators::{self, BLACK, WHITE};
use pagediff_test::{RegParams, regout_path};

#[test]
fn tiffio_reg() {
    let mut rp = RegParams::new("tiffio");

    let page1 = generators::noise(20, 30, 1).unwrap();
    let page2 = generators::split_vertical(30, 20, 10, BLACK, WHITE).unwrap();
    let page3 = generators::antialiased_edge(5, 5, 2).unwrap();

    // Test 1: single page through the generic writer
    rp.write_bitmap_and_check(&page1, ImageFormat::Tiff).unwrap();

    // Test 2: three pages, order and content preserved
    let path = regout_path("tiffio.multi.tif");
    write_pages(&[&page1, &page2, &page3], &path).unwrap();
    let pages = read_pages(&path).unwrap();
    rp.compare_values(3.0, pages.len() as f64, 0.0);
    rp.compare_bitmaps(&page1, &pages[0]);
    rp.compare_bitmaps(&page2, &pages[1]);
    rp.compare_bitmaps(&page3, &pages[2]);

    // Test 3: read_image returns the first page only
    let first = read_image(&path).unwrap();
    rp.compare_bitmaps(&page1, &first);

    // Test 4: a PNG is a one-page document
    let png = pagediff_io::encode_png(&page2).unwrap();
    let png_pages = read_pages_mem(&png).unwrap();
    rp.compare_values(1.0, png_pages.len() as f64, 0.0);

    // Test 5: unknown data is rejected
    rp.check(read_pages_mem(b"%PDF-1.4 fake").is_err(), "PDF bytes rejected");

    // Test 6: single pages on demand
    let data = std::fs::read(&path).unwrap();
    rp.compare_values(3.0, page_count_mem(&data).unwrap() as f64, 0.0);
    rp.compare_bitmaps(&page3, &read_page_mem(&data, 2).unwrap());
    rp.check(read_page_mem(&data, 3).is_err(), "page past the end rejected");
    rp.compare_values(1.0, page_count_mem(&png).unwrap() as f64, 0.0);
    rp.compare_bitmaps(&page2, &read_page_mem(&png, 0).unwrap());
    rp.check(read_page_mem(&png, 1).is_err(), "PNG has one page");

    assert!(rp.cleanup());
}
