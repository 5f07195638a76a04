//! Stage-artifact writer for analysis traces. All filesystem I/O happens
//! here, caller-side, after the analysis itself has finished.

use std::path::Path;

use anyhow::Result;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::analysis::AnalysisTrace;
use crate::models::RegionReport;

const CLOT_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const DARK_REGION_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// Ensure the debug output directory exists and is empty.
pub fn prepare_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        let entries = std::fs::read_dir(dir)?;
        if entries.count() > 0 {
            anyhow::bail!("Debug directory is not empty: {}", dir.display());
        }
    } else {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn draw_regions(img: &mut RgbImage, regions: &[RegionReport], color: Rgb<u8>) {
    for region in regions {
        let rect = Rect::at(region.bbox.min_x as i32, region.bbox.min_y as i32)
            .of_size(region.bbox.width(), region.bbox.height());
        draw_hollow_rect_mut(img, rect, color);
    }
}

/// Write numbered stage artifacts from a trace: the input, the preprocessed
/// raster, the blood mask, and the preprocessed raster with classified
/// region boxes drawn hollow (green clots, blue dark regions).
pub fn write_stage_artifacts(trace: &AnalysisTrace, dir: &Path, verbose: bool) -> Result<()> {
    let save = |name: &str| dir.join(name);

    trace
        .input
        .save(save("00_input.png"))
        .map_err(|e| anyhow::anyhow!("Failed to save debug input: {}", e))?;
    trace
        .preprocessed
        .save(save("01_preprocessed.png"))
        .map_err(|e| anyhow::anyhow!("Failed to save debug preprocessed image: {}", e))?;
    trace
        .mask
        .to_gray_image()
        .save(save("02_mask.png"))
        .map_err(|e| anyhow::anyhow!("Failed to save debug mask: {}", e))?;

    let mut overlay = trace.preprocessed.clone();
    draw_regions(&mut overlay, &trace.clots, CLOT_COLOR);
    draw_regions(&mut overlay, &trace.dark_regions, DARK_REGION_COLOR);
    overlay
        .save(save("03_regions.png"))
        .map_err(|e| anyhow::anyhow!("Failed to save debug region overlay: {}", e))?;

    if verbose {
        println!("  Debug: saved 4 stage images to {}/", dir.display());
    }

    Ok(())
}
