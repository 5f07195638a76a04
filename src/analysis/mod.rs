pub mod classify;
pub mod color;
pub mod flow;
pub mod loader;
pub mod mask;
pub mod preprocessing;
pub mod regions;
pub mod report;

use image::RgbImage;

pub use loader::ImageSource;
pub use mask::BloodMask;

use crate::error::AnalysisError;
use crate::models::AnalysisReport;

/// Pixel-to-length mapping used to convert pixel areas to cm².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    scale_px_per_cm: f32,
}

impl Calibration {
    pub fn new(scale_px_per_cm: f32) -> Result<Self, AnalysisError> {
        if !scale_px_per_cm.is_finite() || scale_px_per_cm <= 0.0 {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "calibration scale must be positive, got {scale_px_per_cm}"
            )));
        }
        Ok(Self { scale_px_per_cm })
    }

    /// Derive a scale from the known physical width of the pad and its
    /// width in image pixels.
    pub fn from_pad_width(pad_width_cm: f32, image_pad_width_px: f32) -> Result<Self, AnalysisError> {
        if !pad_width_cm.is_finite() || pad_width_cm <= 0.0 {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "pad width must be positive, got {pad_width_cm} cm"
            )));
        }
        if !image_pad_width_px.is_finite() || image_pad_width_px <= 0.0 {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "pad width in pixels must be positive, got {image_pad_width_px}"
            )));
        }
        Self::new(image_pad_width_px / pad_width_cm)
    }

    pub fn scale_px_per_cm(&self) -> f32 {
        self.scale_px_per_cm
    }
}

/// Tunable thresholds for one analysis. An immutable value: calibrating or
/// overriding a threshold constructs a new options value rather than
/// mutating shared state, so interleaved calibrate/analyze calls cannot
/// race.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Longest raster side after preprocessing, in pixels.
    pub max_dimension: u32,
    /// Box blur radius; 0 disables smoothing.
    pub blur_radius: u32,
    /// Degrees around 0°/360° that count as red-hued.
    pub hue_tolerance: f32,
    /// Minimum saturation for a red-hued blood pixel.
    pub saturation_min: f32,
    /// Minimum value for a red-hued blood pixel.
    pub value_min_for_blood: f32,
    /// Maximum mean value for a component to classify as a clot.
    pub value_max_for_clot: f32,
    /// Maximum mean saturation for a clot (black is grayscale, dark red is
    /// not).
    pub clot_saturation_max: f32,
    /// Upper mean-value bound for a dark region.
    pub value_max_for_dark_region: f32,
    /// Minimum mean saturation for a dark region.
    pub dark_region_saturation_min: f32,
    /// Size gate filtering pixel noise and oversized non-lesion blobs.
    pub min_clot_pixels: u32,
    pub max_clot_pixels: u32,
    /// Dry weight subtracted from the reading to estimate fluid volume.
    pub pad_dry_weight_grams: f32,
    pub calibration: Option<Calibration>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_dimension: 800,
            blur_radius: 1,
            hue_tolerance: 20.0,
            saturation_min: 0.25,
            value_min_for_blood: 0.15,
            value_max_for_clot: 0.25,
            clot_saturation_max: 0.30,
            value_max_for_dark_region: 0.55,
            dark_region_saturation_min: 0.30,
            min_clot_pixels: 40,
            max_clot_pixels: 1000,
            pad_dry_weight_grams: 5.0,
            calibration: None,
        }
    }
}

impl AnalyzerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn with_blur_radius(mut self, blur_radius: u32) -> Self {
        self.blur_radius = blur_radius;
        self
    }

    pub fn with_hue_tolerance(mut self, degrees: f32) -> Self {
        self.hue_tolerance = degrees;
        self
    }

    pub fn with_min_clot_pixels(mut self, pixels: u32) -> Self {
        self.min_clot_pixels = pixels;
        self
    }

    pub fn with_max_clot_pixels(mut self, pixels: u32) -> Self {
        self.max_clot_pixels = pixels;
        self
    }

    pub fn with_pad_dry_weight_grams(mut self, grams: f32) -> Self {
        self.pad_dry_weight_grams = grams;
        self
    }

    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = Some(calibration);
        self
    }
}

/// Intermediate stage outputs of one analysis, returned for debug-artifact
/// rendering. All I/O on a trace happens caller-side.
#[derive(Debug, Clone)]
pub struct AnalysisTrace {
    pub input: RgbImage,
    pub preprocessed: RgbImage,
    pub mask: BloodMask,
    pub clots: Vec<crate::models::RegionReport>,
    pub dark_regions: Vec<crate::models::RegionReport>,
}

/// Deterministic pad-image analysis pipeline: decode, preprocess, mask,
/// extract components, classify, estimate coverage and flow, assess risk.
pub struct PadAnalyzer {
    options: AnalyzerOptions,
    verbose: bool,
}

impl PadAnalyzer {
    pub fn new() -> Self {
        Self::with_options(AnalyzerOptions::default())
    }

    pub fn with_options(options: AnalyzerOptions) -> Self {
        Self {
            options,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Run the full pipeline on an image source plus a weight reading.
    pub fn analyze(
        &self,
        source: &ImageSource,
        weight_grams: f32,
    ) -> Result<AnalysisReport, AnalysisError> {
        let raster = loader::load_raster(source)?;
        Ok(self.analyze_raster(&raster, weight_grams))
    }

    /// Run the pipeline on a pre-decoded raster. Infallible: an empty or
    /// background-only image is not an error, it yields a report with zero
    /// coverage and no regions.
    pub fn analyze_raster(&self, raster: &RgbImage, weight_grams: f32) -> AnalysisReport {
        let (report, _) = self.run(raster, weight_grams);
        report
    }

    /// Like [`analyze_raster`](Self::analyze_raster), additionally returning
    /// the intermediate stage outputs for debug rendering.
    pub fn analyze_raster_traced(
        &self,
        raster: &RgbImage,
        weight_grams: f32,
    ) -> (AnalysisReport, AnalysisTrace) {
        let (report, trace) = self.run(raster, weight_grams);
        (report, trace)
    }

    fn run(&self, raster: &RgbImage, weight_grams: f32) -> (AnalysisReport, AnalysisTrace) {
        if self.verbose {
            println!(
                "\nPreprocessing image ({}x{})...",
                raster.width(),
                raster.height()
            );
        }
        let mut preprocessed = preprocessing::downscale(raster, self.options.max_dimension);
        if self.options.blur_radius > 0 {
            if self.verbose {
                println!("Applying box blur (radius {})...", self.options.blur_radius);
            }
            preprocessed = preprocessing::box_blur(&preprocessed, self.options.blur_radius);
        }

        if self.verbose {
            println!("\nBuilding blood mask...");
        }
        let mask = mask::build_blood_mask(&preprocessed, &self.options);
        let avg_blood_value = mask::avg_blood_value(&preprocessed, &mask);

        if self.verbose {
            println!("Masked {} pixels", mask.masked_count());
            println!("\nExtracting connected components...");
        }
        let components = regions::extract_components(&mask, &preprocessed);

        if self.verbose {
            println!("Found {} components", components.len());
            println!("\nClassifying regions...");
        }
        let classified = classify::classify_regions(&components, avg_blood_value, &self.options);

        if self.verbose {
            println!(
                "Retained {} clot(s), {} dark region(s)",
                classified.clots.len(),
                classified.dark_regions.len()
            );
        }

        let coverage = flow::coverage_ratio(&preprocessed, &mask);
        let flow_estimate =
            flow::estimate_flow(weight_grams, coverage, self.options.pad_dry_weight_grams);

        if self.verbose {
            println!(
                "Coverage {:.1}%, estimated {} ml ({:?})",
                coverage * 100.0,
                flow_estimate.estimated_ml,
                flow_estimate.level
            );
        }

        let trace = AnalysisTrace {
            input: raster.clone(),
            preprocessed,
            mask,
            clots: classified.clots.clone(),
            dark_regions: classified.dark_regions.clone(),
        };

        let report = report::assemble_report(
            coverage,
            classified,
            flow_estimate,
            components.len(),
            avg_blood_value,
        );

        (report, trace)
    }
}

impl Default for PadAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
