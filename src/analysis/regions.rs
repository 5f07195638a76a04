use image::RgbImage;

use super::color::rgb_to_hsv;
use super::mask::BloodMask;
use crate::models::BoundingBox;

/// A connected component of mask-true pixels with running HSV statistics.
/// Consumed during classification, then discarded.
#[derive(Debug, Clone)]
pub struct Component {
    pub pixel_count: u32,
    pub bbox: BoundingBox,
    pub sum_value: f32,
    pub sum_saturation: f32,
}

impl Component {
    pub fn mean_value(&self) -> f32 {
        self.sum_value / self.pixel_count as f32
    }

    pub fn mean_saturation(&self) -> f32 {
        self.sum_saturation / self.pixel_count as f32
    }
}

/// Group mask pixels into 4-connected components via iterative flood fill.
/// An explicit stack bounds memory deterministically on large regions.
/// Components are emitted in discovery order; classification re-sorts.
pub fn extract_components(mask: &BloodMask, raster: &RgbImage) -> Vec<Component> {
    let w = mask.width() as usize;
    let h = mask.height() as usize;
    let total = w * h;

    let mut visited = vec![false; total];
    let mut components = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..total {
        if !mask.get(start) || visited[start] {
            continue;
        }
        visited[start] = true;
        stack.push(start);

        let mut pixel_count = 0u32;
        let mut min_x = w as u32;
        let mut min_y = h as u32;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut sum_value = 0.0f32;
        let mut sum_saturation = 0.0f32;

        while let Some(cur) = stack.pop() {
            let x = (cur % w) as u32;
            let y = (cur / w) as u32;

            pixel_count += 1;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);

            let p = raster.get_pixel(x, y);
            let hsv = rgb_to_hsv(p[0], p[1], p[2]);
            sum_value += hsv.value;
            sum_saturation += hsv.saturation;

            let mut push = |n: usize| {
                if !visited[n] && mask.get(n) {
                    visited[n] = true;
                    stack.push(n);
                }
            };
            if x > 0 {
                push(cur - 1);
            }
            if (x as usize) + 1 < w {
                push(cur + 1);
            }
            if y > 0 {
                push(cur - w);
            }
            if (y as usize) + 1 < h {
                push(cur + w);
            }
        }

        components.push(Component {
            pixel_count,
            bbox: BoundingBox {
                min_x,
                min_y,
                max_x,
                max_y,
            },
            sum_value,
            sum_saturation,
        });
    }

    components
}
