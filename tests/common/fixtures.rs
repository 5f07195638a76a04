use image::{ImageBuffer, Rgb, RgbImage};
use tempfile::NamedTempFile;

/// Creates a white raster of the given size.
pub fn white_image(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_pixel(width, height, Rgb([255u8, 255u8, 255u8]))
}

/// Fills a rectangle with a solid color.
pub fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, color);
        }
    }
}

/// White 100x100 raster with one solid black rectangle.
pub fn black_square_on_white(x0: u32, y0: u32, w: u32, h: u32) -> RgbImage {
    let mut img = white_image(100, 100);
    fill_rect(&mut img, x0, y0, w, h, Rgb([0, 0, 0]));
    img
}

/// Saves a raster as a temporary PNG file.
/// The file is cleaned up when the returned handle is dropped.
pub fn save_temp_png(img: &RgbImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}
