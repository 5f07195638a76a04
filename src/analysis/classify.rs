use super::regions::Component;
use super::{AnalyzerOptions, Calibration};
use crate::models::RegionReport;

/// At most this many regions of each kind survive into the report.
pub const TOP_REGIONS: usize = 3;

/// Classified regions, sorted darkest-first and capped at [`TOP_REGIONS`].
#[derive(Debug, Clone, Default)]
pub struct ClassifiedRegions {
    pub clots: Vec<RegionReport>,
    pub dark_regions: Vec<RegionReport>,
}

fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

fn pixels_to_cm2(pixels: u32, calibration: Option<&Calibration>) -> Option<f32> {
    let scale = calibration?.scale_px_per_cm();
    let cm2 = pixels as f32 / (scale * scale);
    Some((cm2 * 10.0).round() / 10.0)
}

fn confidence(base: f32, slope: f32, cap: f32, darker_than_blood: f32) -> u8 {
    (base + darker_than_blood * slope).round().clamp(0.0, cap) as u8
}

/// Label components as clot, dark region, or discarded. Clots are black
/// regions (low value AND low saturation, grayscale rather than red); dark
/// regions are concentrated darker-red areas (high saturation, noticeably
/// darker than the masked average).
pub fn classify_regions(
    components: &[Component],
    avg_blood_value: f32,
    opts: &AnalyzerOptions,
) -> ClassifiedRegions {
    let mut clots = Vec::new();
    let mut dark_regions = Vec::new();

    for comp in components {
        if comp.pixel_count < opts.min_clot_pixels || comp.pixel_count > opts.max_clot_pixels {
            continue;
        }

        let mean_value = comp.mean_value();
        let mean_saturation = comp.mean_saturation();
        let darker_than_blood = avg_blood_value - mean_value;
        let estimated_cm2 = pixels_to_cm2(comp.pixel_count, opts.calibration.as_ref());

        if mean_value <= opts.value_max_for_clot && mean_saturation <= opts.clot_saturation_max {
            clots.push(RegionReport {
                pixels: comp.pixel_count,
                bbox: comp.bbox.clone(),
                mean_value: round2(mean_value),
                mean_saturation: round2(mean_saturation),
                darker_than_blood: round2(darker_than_blood),
                estimated_cm2,
                confidence: confidence(50.0, 300.0, 98.0, darker_than_blood),
            });
        } else if mean_value > opts.value_max_for_clot
            && mean_value <= opts.value_max_for_dark_region
            && mean_saturation > opts.dark_region_saturation_min
            && darker_than_blood > 0.06
        {
            dark_regions.push(RegionReport {
                pixels: comp.pixel_count,
                bbox: comp.bbox.clone(),
                mean_value: round2(mean_value),
                mean_saturation: round2(mean_saturation),
                darker_than_blood: round2(darker_than_blood),
                estimated_cm2,
                confidence: confidence(40.0, 250.0, 90.0, darker_than_blood),
            });
        }
    }

    // Darkest first; ties keep discovery order.
    clots.sort_by(|a, b| a.mean_value.total_cmp(&b.mean_value));
    dark_regions.sort_by(|a, b| a.mean_value.total_cmp(&b.mean_value));
    clots.truncate(TOP_REGIONS);
    dark_regions.truncate(TOP_REGIONS);

    ClassifiedRegions {
        clots,
        dark_regions,
    }
}
