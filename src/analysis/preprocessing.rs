use image::imageops::{self, FilterType};
use image::RgbImage;

/// Scale the raster so its longest side is at most `max_dimension`,
/// preserving aspect ratio. Never upscales.
pub fn downscale(img: &RgbImage, max_dimension: u32) -> RgbImage {
    let longest = img.width().max(img.height());
    if longest <= max_dimension || longest == 0 {
        return img.clone();
    }
    let scale = max_dimension as f32 / longest as f32;
    let w = ((img.width() as f32 * scale).round() as u32).max(1);
    let h = ((img.height() as f32 * scale).round() as u32).max(1);
    imageops::resize(img, w, h, FilterType::Triangle)
}

/// Box blur with kernel size (2r+1)², per channel, edge-clamped sampling.
/// Reduces sensor noise ahead of thresholding.
pub fn box_blur(img: &RgbImage, radius: u32) -> RgbImage {
    if radius == 0 {
        return img.clone();
    }
    let (w, h) = img.dimensions();
    let r = radius as i64;
    let kernel_size = ((2 * r + 1) * (2 * r + 1)) as f32;

    let mut out = RgbImage::new(w, h);
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let mut sums = [0u32; 3];
            for ky in -r..=r {
                let py = (y + ky).clamp(0, h as i64 - 1) as u32;
                for kx in -r..=r {
                    let px = (x + kx).clamp(0, w as i64 - 1) as u32;
                    let p = img.get_pixel(px, py);
                    sums[0] += p[0] as u32;
                    sums[1] += p[1] as u32;
                    sums[2] += p[2] as u32;
                }
            }
            let pixel = image::Rgb([
                (sums[0] as f32 / kernel_size).round() as u8,
                (sums[1] as f32 / kernel_size).round() as u8,
                (sums[2] as f32 / kernel_size).round() as u8,
            ]);
            out.put_pixel(x as u32, y as u32, pixel);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downscale_caps_longest_side() {
        let img = RgbImage::new(1600, 800);
        let scaled = downscale(&img, 800);
        assert_eq!(scaled.dimensions(), (800, 400));
    }

    #[test]
    fn downscale_never_upscales() {
        let img = RgbImage::new(100, 50);
        let scaled = downscale(&img, 800);
        assert_eq!(scaled.dimensions(), (100, 50));
    }

    #[test]
    fn blur_of_uniform_image_is_identity() {
        let img = RgbImage::from_pixel(10, 10, image::Rgb([120, 40, 7]));
        let blurred = box_blur(&img, 2);
        assert_eq!(blurred.get_pixel(0, 0), &image::Rgb([120, 40, 7]));
        assert_eq!(blurred.get_pixel(5, 5), &image::Rgb([120, 40, 7]));
    }

    #[test]
    fn blur_zero_radius_is_noop() {
        let mut img = RgbImage::new(4, 4);
        img.put_pixel(1, 1, image::Rgb([255, 0, 0]));
        let blurred = box_blur(&img, 0);
        assert_eq!(blurred, img);
    }
}
