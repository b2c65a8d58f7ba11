//! Raster drawing helpers: filled and outlined boxes, contrast, PNG output.

use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};

use crate::error::Result;
use crate::render::geometry::Rect;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Colour used for glyph cells.
pub const INK: Rgb<u8> = Rgb([40, 40, 40]);

/// Fill the pixels covered by `rect` (pixel space).
pub fn fill_rect(image: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    fill_pixels(
        image,
        rect.x0.floor() as i64,
        rect.y0.floor() as i64,
        rect.x1.ceil() as i64,
        rect.y1.ceil() as i64,
        color,
    );
}

/// Draw the outline of `rect` (pixel space), `width` pixels thick and kept
/// inside the rectangle.
pub fn stroke_rect(image: &mut RgbImage, rect: Rect, width: f32, color: Rgb<u8>) {
    let left = rect.x0.floor() as i64;
    let top = rect.y0.floor() as i64;
    let right = rect.x1.ceil() as i64;
    let bottom = rect.y1.ceil() as i64;
    if right <= left || bottom <= top {
        return;
    }
    let w = (width.round() as i64).max(1);

    fill_pixels(image, left, top, right, (top + w).min(bottom), color);
    fill_pixels(image, left, (bottom - w).max(top), right, bottom, color);
    fill_pixels(image, left, top, (left + w).min(right), bottom, color);
    fill_pixels(image, (right - w).max(left), top, right, bottom, color);
}

fn fill_pixels(image: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let (width, height) = (image.width() as i64, image.height() as i64);
    let (x0, x1) = (x0.clamp(0, width), x1.clamp(0, width));
    let (y0, y1) = (y0.clamp(0, height), y1.clamp(0, height));
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Mean luminance (ITU-R 601-2 luma) over the whole image.
pub fn mean_luminance(image: &RgbImage) -> f64 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = image
        .pixels()
        .map(|Rgb([r, g, b])| (*r as u64 * 299 + *g as u64 * 587 + *b as u64 * 114) / 1000)
        .sum();
    sum as f64 / count as f64
}

/// Scale every channel's distance from the mean luminance by `factor`.
///
/// A factor of 1.0 leaves the image unchanged, 0.0 flattens it to uniform
/// grey and larger values increase contrast.
pub fn enhance_contrast(image: &mut RgbImage, factor: f32) {
    let mean = mean_luminance(image).round() as f32;
    for pixel in image.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            let value = mean + factor * (*channel as f32 - mean);
            *channel = value.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Encode `image` as PNG into `writer`.
pub fn write_png<W: Write>(image: &RgbImage, writer: W) -> Result<()> {
    PngEncoder::new(writer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

/// Encode `image` as PNG in memory.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_png(image, &mut bytes)?;
    Ok(bytes)
}
