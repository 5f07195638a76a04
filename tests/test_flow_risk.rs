mod common;

use common::{black_square_on_white, white_image};
use padscan::{
    AnalysisError, AnalyzerOptions, Calibration, FlowLevel, PadAnalyzer, RiskLevel,
};

fn analyzer_without_blur() -> PadAnalyzer {
    PadAnalyzer::with_options(AnalyzerOptions::default().with_blur_radius(0))
}

#[test]
fn weight_delta_maps_to_heavy_flow() {
    let img = white_image(32, 32);
    let report = analyzer_without_blur().analyze_raster(&img, 105.0);

    assert_eq!(report.findings.estimated_blood_loss_ml, 100.0);
    assert_eq!(report.findings.flow.level, FlowLevel::Heavy);
    assert_eq!(report.findings.flow.description, "Heavy Flow");
}

#[test]
fn weight_below_dry_weight_clamps_to_zero() {
    let img = white_image(32, 32);
    let report = analyzer_without_blur().analyze_raster(&img, 3.0);

    assert_eq!(report.findings.estimated_blood_loss_ml, 0.0);
    assert_eq!(report.findings.flow.level, FlowLevel::Light);
}

#[test]
fn custom_dry_weight_is_honored() {
    let img = white_image(32, 32);
    let analyzer = PadAnalyzer::with_options(
        AnalyzerOptions::default()
            .with_blur_radius(0)
            .with_pad_dry_weight_grams(10.0),
    );
    let report = analyzer.analyze_raster(&img, 25.0);
    assert_eq!(report.findings.estimated_blood_loss_ml, 15.0);
    assert_eq!(report.findings.flow.level, FlowLevel::Heavy);
}

#[test]
fn volume_at_250_is_high_risk_even_without_clots() {
    let img = white_image(32, 32);
    let report = analyzer_without_blur().analyze_raster(&img, 255.0);

    assert_eq!(report.findings.clot_count, 0);
    assert_eq!(report.risk_level, RiskLevel::High);
    assert_eq!(report.findings.flow.level, FlowLevel::Critical);
}

#[test]
fn clot_with_low_volume_is_moderate_risk() {
    let img = black_square_on_white(10, 10, 20, 10);
    let report = analyzer_without_blur().analyze_raster(&img, 55.0);

    assert_eq!(report.findings.clot_count, 1);
    assert_eq!(report.findings.estimated_blood_loss_ml, 50.0);
    assert_eq!(report.risk_level, RiskLevel::Moderate);
}

#[test]
fn low_volume_without_clots_is_low_risk() {
    let img = white_image(32, 32);
    let report = analyzer_without_blur().analyze_raster(&img, 55.0);

    assert_eq!(report.findings.clot_count, 0);
    assert_eq!(report.risk_level, RiskLevel::Low);
}

#[test]
fn no_clot_volume_between_200_and_250_is_moderate_risk() {
    let img = white_image(32, 32);
    let report = analyzer_without_blur().analyze_raster(&img, 225.0);

    assert_eq!(report.risk_level, RiskLevel::Moderate);
}

#[test]
fn calibrated_area_round_trip() {
    // 10x10 = 100 pixels at 10 px/cm: 100 / 10^2 = 1.0 cm².
    let img = black_square_on_white(20, 20, 10, 10);
    let calibration = Calibration::new(10.0).unwrap();
    let analyzer = PadAnalyzer::with_options(
        AnalyzerOptions::default()
            .with_blur_radius(0)
            .with_calibration(calibration),
    );
    let report = analyzer.analyze_raster(&img, 0.0);

    assert_eq!(report.findings.clot_count, 1);
    assert_eq!(report.findings.clots[0].estimated_cm2, Some(1.0));
}

#[test]
fn uncalibrated_area_is_none() {
    let img = black_square_on_white(20, 20, 10, 10);
    let report = analyzer_without_blur().analyze_raster(&img, 0.0);
    assert_eq!(report.findings.clots[0].estimated_cm2, None);
}

#[test]
fn calibration_from_pad_width() {
    let calibration = Calibration::from_pad_width(10.0, 100.0).unwrap();
    assert_eq!(calibration.scale_px_per_cm(), 10.0);
}

#[test]
fn non_positive_calibration_is_rejected() {
    assert!(matches!(
        Calibration::new(0.0),
        Err(AnalysisError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Calibration::new(-2.5),
        Err(AnalysisError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Calibration::from_pad_width(0.0, 100.0),
        Err(AnalysisError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Calibration::from_pad_width(10.0, -1.0),
        Err(AnalysisError::InvalidConfiguration(_))
    ));
}
