/// HSV sample derived from one raster pixel. Computed on demand, never
/// stored alongside the raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in degrees, [0, 360).
    pub hue: f32,
    /// Saturation in [0, 1].
    pub saturation: f32,
    /// Value (brightness) in [0, 1].
    pub value: f32,
}

/// Standard max/min/chroma RGB to HSV conversion. Channels are 0-255.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let saturation = if max == 0.0 { 0.0 } else { chroma / max };
    let value = max;

    let mut hue = 0.0;
    if chroma != 0.0 {
        hue = if max == r {
            ((g - b) / chroma).rem_euclid(6.0)
        } else if max == g {
            (b - r) / chroma + 2.0
        } else {
            (r - g) / chroma + 4.0
        } * 60.0;
        if hue < 0.0 {
            hue += 360.0;
        }
    }

    Hsv {
        hue,
        saturation,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn pure_red() {
        let hsv = rgb_to_hsv(255, 0, 0);
        assert!(close(hsv.hue, 0.0));
        assert!(close(hsv.saturation, 1.0));
        assert!(close(hsv.value, 1.0));
    }

    #[test]
    fn black_has_zero_saturation_and_value() {
        let hsv = rgb_to_hsv(0, 0, 0);
        assert!(close(hsv.saturation, 0.0));
        assert!(close(hsv.value, 0.0));
    }

    #[test]
    fn white_has_zero_saturation_full_value() {
        let hsv = rgb_to_hsv(255, 255, 255);
        assert!(close(hsv.saturation, 0.0));
        assert!(close(hsv.value, 1.0));
    }

    #[test]
    fn reddish_hue_wraps_below_360() {
        // Red with a touch of blue lands just under 360 degrees.
        let hsv = rgb_to_hsv(200, 0, 10);
        assert!(hsv.hue > 350.0 && hsv.hue < 360.0);
    }

    #[test]
    fn green_is_120_degrees() {
        let hsv = rgb_to_hsv(0, 255, 0);
        assert!(close(hsv.hue, 120.0));
    }
}
