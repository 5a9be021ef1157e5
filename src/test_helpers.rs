//! Shared test utilities for the downsize test suite.
//!
//! Synthetic image generators (so no binary fixtures are checked in) and
//! small filesystem helpers for asserting on the output directory.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};
use std::path::Path;

// =========================================================================
// Image fixtures
// =========================================================================

/// Write a smooth gradient JPEG. Compresses well.
pub fn create_gradient_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    write_jpeg(path, &img, 90);
}

/// Write a pseudo-random noise JPEG at quality 100. Compresses badly, so it
/// is large for its dimensions and needs several attempts to shrink.
pub fn create_noise_jpeg(path: &Path, width: u32, height: u32) {
    let mut state: u32 = 0x9E37_79B9;
    let img = RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        };
        image::Rgb([next(), next(), next()])
    });
    write_jpeg(path, &img, 100);
}

/// Write a PNG with a transparent gradient alpha channel.
pub fn create_rgba_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([200, (x % 256) as u8, (y % 256) as u8, (x % 256) as u8])
    });
    img.save(path).unwrap();
}

fn write_jpeg(path: &Path, img: &RgbImage, quality: u8) {
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    JpegEncoder::new_with_quality(writer, quality)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Filesystem helpers
// =========================================================================

/// Write `size` zero bytes to `path`. Enough for size-only checks.
pub fn write_sized_file(path: &Path, size: usize) {
    std::fs::write(path, vec![0u8; size]).unwrap();
}

/// Sorted names of the `.jpeg` files in `dir`. Empty if `dir` is missing.
pub fn jpeg_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".jpeg"))
        .collect();
    names.sort();
    names
}
