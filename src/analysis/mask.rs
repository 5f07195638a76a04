use image::{GrayImage, RgbImage};

use super::color::rgb_to_hsv;
use super::AnalyzerOptions;

/// Per-pixel boolean classification of "blood-candidate", same dimensions
/// as the raster it was built from.
#[derive(Debug, Clone)]
pub struct BloodMask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl BloodMask {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Linear pixel index, row-major.
    pub fn get(&self, idx: usize) -> bool {
        self.data[idx]
    }

    pub fn get_xy(&self, x: u32, y: u32) -> bool {
        self.data[(y * self.width + x) as usize]
    }

    pub fn masked_count(&self) -> usize {
        self.data.iter().filter(|&&m| m).count()
    }

    /// Render the mask as a grayscale image (white = masked), for debug
    /// artifacts.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.get_xy(x, y) {
                image::Luma([255u8])
            } else {
                image::Luma([0u8])
            }
        })
    }
}

/// Classify every pixel as blood-candidate or not. A pixel is a member if
/// it is red-hued with enough saturation and brightness, or near-black
/// (dried clot material desaturates toward gray/black, outside the red
/// hue band).
pub fn build_blood_mask(raster: &RgbImage, opts: &AnalyzerOptions) -> BloodMask {
    let (w, h) = raster.dimensions();
    let mut data = Vec::with_capacity((w * h) as usize);

    for pixel in raster.pixels() {
        let hsv = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);

        let is_red_hue =
            hsv.hue <= opts.hue_tolerance || hsv.hue >= 360.0 - opts.hue_tolerance;
        let sat_ok = hsv.saturation >= opts.saturation_min;
        let val_ok = hsv.value >= opts.value_min_for_blood;

        let is_black = hsv.value <= 0.25 && hsv.saturation <= 0.30;

        data.push((is_red_hue && sat_ok && val_ok) || is_black);
    }

    BloodMask {
        width: w,
        height: h,
        data,
    }
}

/// Mean HSV value over all masked pixels; 0.5 only when the mask is empty
/// (an all-black mask yields its true mean of 0.0).
pub fn avg_blood_value(raster: &RgbImage, mask: &BloodMask) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for (idx, pixel) in raster.pixels().enumerate() {
        if !mask.get(idx) {
            continue;
        }
        sum += rgb_to_hsv(pixel[0], pixel[1], pixel[2]).value;
        count += 1;
    }
    if count == 0 {
        0.5
    } else {
        sum / count as f32
    }
}
