use image::RgbImage;

use super::mask::BloodMask;
use crate::models::{FlowEstimate, FlowLevel};

/// Channel floor above which a pixel counts as background (near-white pad
/// or paper).
const BACKGROUND_CHANNEL_MIN: u8 = 230;

/// Fraction of non-background pixels classified as blood. Zero when the
/// whole image is background.
pub fn coverage_ratio(raster: &RgbImage, mask: &BloodMask) -> f32 {
    let mut non_bg = 0u64;
    let mut blood = 0u64;
    for (idx, p) in raster.pixels().enumerate() {
        if p[0] > BACKGROUND_CHANNEL_MIN
            && p[1] > BACKGROUND_CHANNEL_MIN
            && p[2] > BACKGROUND_CHANNEL_MIN
        {
            continue;
        }
        non_bg += 1;
        if mask.get(idx) {
            blood += 1;
        }
    }
    if non_bg > 0 {
        blood as f32 / non_bg as f32
    } else {
        0.0
    }
}

/// Weight-based volume estimate. The level thresholds are policy constants:
/// < 5 ml light, < 15 ml moderate, < 250 ml heavy, otherwise critical.
pub fn estimate_flow(weight_grams: f32, coverage: f32, pad_dry_weight_grams: f32) -> FlowEstimate {
    let estimated_ml = (weight_grams - pad_dry_weight_grams).max(0.0);
    let level = if estimated_ml < 5.0 {
        FlowLevel::Light
    } else if estimated_ml < 15.0 {
        FlowLevel::Moderate
    } else if estimated_ml < 250.0 {
        FlowLevel::Heavy
    } else {
        FlowLevel::Critical
    };
    let description = match level {
        FlowLevel::Light => "Light Flow",
        FlowLevel::Moderate => "Moderate Flow",
        FlowLevel::Heavy => "Heavy Flow",
        FlowLevel::Critical => "Critically High Flow",
    };

    FlowEstimate {
        level,
        description: description.to_string(),
        estimated_ml: (estimated_ml * 10.0).round() / 10.0,
        visual_coverage_percent: (coverage * 100.0).round() as u32,
    }
}
