use serde::{Deserialize, Serialize};

/// Bounding box of a detected region, in preprocessed-image coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// A classified region (clot or dark region) as it appears in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionReport {
    pub pixels: u32,
    pub bbox: BoundingBox,
    /// Mean HSV value over the region, rounded to 2 decimals.
    pub mean_value: f32,
    /// Mean HSV saturation over the region, rounded to 2 decimals.
    pub mean_saturation: f32,
    /// How much darker the region is than the average masked pixel.
    pub darker_than_blood: f32,
    /// Physical area in cm²; None when no calibration was supplied.
    pub estimated_cm2: Option<f32>,
    /// Heuristic confidence, 0-100.
    pub confidence: u8,
}

/// Flow bucket derived from the weight-based volume estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowLevel {
    Light,
    Moderate,
    Heavy,
    Critical,
}

/// Weight-based fluid volume estimate plus visual coverage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEstimate {
    pub level: FlowLevel,
    pub description: String,
    /// Estimated blood loss in millilitres, never negative.
    pub estimated_ml: f32,
    pub visual_coverage_percent: u32,
}

/// Final categorical severity combining flow and clot findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

/// Per-image findings section of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Findings {
    pub blood_detected: bool,
    /// Fraction of non-background pixels classified as blood, in [0, 1].
    pub coverage: f32,
    pub clots: Vec<RegionReport>,
    pub dark_regions: Vec<RegionReport>,
    pub clot_count: usize,
    pub dark_region_count: usize,
    pub flow: FlowEstimate,
    pub estimated_blood_loss_ml: f32,
}

/// Raw diagnostic counters, kept for auditability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDiagnostics {
    pub components_found: usize,
    pub avg_blood_value: f32,
    /// Human-readable findings lines assembled during analysis.
    pub all_findings: Vec<String>,
}

/// Immutable result of one analysis call. The field layout is the wire
/// contract consumed by downstream persistence and UI layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// RFC 3339 UTC timestamp of when the report was assembled.
    pub timestamp: String,
    pub findings: Findings,
    pub recommendations: Vec<String>,
    pub risk_level: RiskLevel,
    pub raw: RawDiagnostics,
}
