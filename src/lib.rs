pub mod analysis;
pub mod debug;
pub mod error;
pub mod models;

pub use analysis::{
    AnalysisTrace, AnalyzerOptions, BloodMask, Calibration, ImageSource, PadAnalyzer,
};
pub use error::AnalysisError;
pub use models::{
    AnalysisReport, BoundingBox, Findings, FlowEstimate, FlowLevel, RawDiagnostics, RegionReport,
    RiskLevel,
};
