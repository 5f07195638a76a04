use clap::Parser;
use std::path::PathBuf;

use padscan::{debug, AnalysisReport, AnalyzerOptions, Calibration, ImageSource, PadAnalyzer};

#[derive(Parser)]
#[command(name = "padscan")]
#[command(about = "Estimate blood loss from a photo of an absorbent pad plus a weight reading")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Pad weight reading in grams
    #[arg(short, long, default_value_t = 0.0)]
    weight_grams: f32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the raw JSON report instead of the summary
    #[arg(long)]
    json: bool,

    /// Save stage images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Physical pad width in cm (calibrates pixel-to-area conversion)
    #[arg(long, requires = "pad_width_px")]
    pad_width_cm: Option<f32>,

    /// Pad width in image pixels (calibrates pixel-to-area conversion)
    #[arg(long, requires = "pad_width_cm")]
    pad_width_px: Option<f32>,

    /// Longest image side after preprocessing
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Box blur radius (0 disables smoothing)
    #[arg(long)]
    blur_radius: Option<u32>,

    /// Dry pad weight in grams, subtracted from the reading
    #[arg(long)]
    pad_dry_weight_grams: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut options = AnalyzerOptions::default();
    if let Some(max_dimension) = args.max_dimension {
        options = options.with_max_dimension(max_dimension);
    }
    if let Some(blur_radius) = args.blur_radius {
        options = options.with_blur_radius(blur_radius);
    }
    if let Some(dry) = args.pad_dry_weight_grams {
        options = options.with_pad_dry_weight_grams(dry);
    }
    if let (Some(cm), Some(px)) = (args.pad_width_cm, args.pad_width_px) {
        let calibration = Calibration::from_pad_width(cm, px)?;
        options = options.with_calibration(calibration);
        if args.verbose {
            println!(
                "Calibrated scale: {:.2} px/cm",
                calibration.scale_px_per_cm()
            );
        }
    }

    if let Some(debug_dir) = &args.debug_out {
        debug::prepare_dir(debug_dir)?;
    }

    if args.verbose {
        println!("Loading image: {:?}", args.image_path);
    }

    let analyzer = PadAnalyzer::with_options(options).with_verbose(args.verbose);
    let source = ImageSource::from(args.image_path.as_path());

    let report = if let Some(debug_dir) = &args.debug_out {
        let raster = padscan::analysis::loader::load_raster(&source)?;
        let (report, trace) = analyzer.analyze_raster_traced(&raster, args.weight_grams);
        debug::write_stage_artifacts(&trace, debug_dir, args.verbose)?;
        report
    } else {
        analyzer.analyze(&source, args.weight_grams)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    println!("\n=== Pad Analysis Results ===");
    println!("Risk level: {:?}", report.risk_level);
    println!(
        "{} (estimated blood loss: {} ml)",
        report.findings.flow.description, report.findings.estimated_blood_loss_ml
    );
    println!(
        "Coverage: {}% of non-background area",
        report.findings.flow.visual_coverage_percent
    );

    println!("Blood clots: {}", report.findings.clot_count);
    for (i, clot) in report.findings.clots.iter().enumerate() {
        print_region(i, clot);
    }
    println!("Dark regions: {}", report.findings.dark_region_count);
    for (i, region) in report.findings.dark_regions.iter().enumerate() {
        print_region(i, region);
    }

    println!("\nRecommendations:");
    for rec in &report.recommendations {
        println!("  - {}", rec);
    }
}

fn print_region(i: usize, region: &padscan::RegionReport) {
    let area = region
        .estimated_cm2
        .map(|a| format!(", area {:.1} cm²", a))
        .unwrap_or_default();
    println!(
        "  {}. {} px at ({}, {}), mean value {:.2}, confidence {}%{}",
        i + 1,
        region.pixels,
        region.bbox.min_x,
        region.bbox.min_y,
        region.mean_value,
        region.confidence,
        area
    );
}
