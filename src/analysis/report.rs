use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::classify::ClassifiedRegions;
use crate::models::{
    AnalysisReport, Findings, FlowEstimate, FlowLevel, RawDiagnostics, RegionReport, RiskLevel,
};

/// Coverage above this fraction counts as "blood detected".
const BLOOD_DETECTED_COVERAGE: f32 = 0.02;

/// A retained clot at or above this area (cm²) triggers extra findings and
/// recommendations.
const LARGE_CLOT_CM2: f32 = 1.5;

/// Combine flow volume and clot findings into a severity bucket.
pub fn assess_risk(estimated_ml: f32, clot_found: bool) -> RiskLevel {
    if estimated_ml >= 250.0 {
        RiskLevel::High
    } else if clot_found {
        RiskLevel::Moderate
    } else if estimated_ml < 200.0 {
        RiskLevel::Low
    } else {
        RiskLevel::Moderate
    }
}

fn has_large_clot(clots: &[RegionReport]) -> bool {
    clots
        .iter()
        .any(|c| c.estimated_cm2.is_some_and(|a| a >= LARGE_CLOT_CM2))
}

/// Human-readable findings lines, mirroring what the result panel shows.
pub fn build_findings(
    flow: &FlowEstimate,
    coverage: f32,
    clots: &[RegionReport],
    dark_regions: &[RegionReport],
) -> Vec<String> {
    let mut findings = vec![
        format!(
            "{} (Estimated blood loss: {} ml)",
            flow.description, flow.estimated_ml
        ),
        format!(
            "Visual Coverage: {}% of non-background area is blood-colored.",
            (coverage * 100.0).round() as u32
        ),
    ];

    if !clots.is_empty() {
        findings.push(format!(
            "{} blood clot(s) detected (black regions).",
            clots.len()
        ));
    }
    if !dark_regions.is_empty() {
        findings.push(format!(
            "{} dark region(s) detected (concentrated darker red areas).",
            dark_regions.len()
        ));
    }
    if has_large_clot(clots) {
        findings.push("One or more large blood clots (>= 1.5 cm²) detected.".to_string());
    }
    match flow.level {
        FlowLevel::Critical => {
            findings.push("Flow volume is critically high (>250mL).".to_string());
        }
        FlowLevel::Heavy => {
            findings.push("Heavy flow detected (15mL to 249.9mL).".to_string());
        }
        _ => {}
    }

    findings
}

/// Fixed-template recommendations keyed on risk level, flow level, and
/// large-clot presence.
pub fn build_recommendations(
    risk_level: RiskLevel,
    flow: &FlowEstimate,
    clots: &[RegionReport],
) -> Vec<String> {
    let mut rec = Vec::new();

    if risk_level == RiskLevel::High || flow.level == FlowLevel::Critical {
        rec.push(
            "IMMEDIATE CLINICAL ASSESSMENT RECOMMENDED. Estimated blood loss is 250mL or higher."
                .to_string(),
        );
        rec.push(
            "High volume of loss and/or critical flow detected. Monitor vitals closely."
                .to_string(),
        );
    } else if risk_level == RiskLevel::Moderate {
        rec.push(
            "Monitor closely; re-check in 30-60 minutes. Presence of blood clots indicates a potential concern."
                .to_string(),
        );
    } else {
        rec.push(
            "Routine monitoring recommended. Flow volume is low and no blood clots were detected."
                .to_string(),
        );
    }

    if has_large_clot(clots) {
        rec.push(
            "Document large blood clots (>= 1.5 cm²) and consider clinical assessment."
                .to_string(),
        );
    }
    if flow.level == FlowLevel::Heavy {
        rec.push(
            "Heavy flow detected: ensure adequate hydration and monitor for signs of excessive blood loss."
                .to_string(),
        );
    }

    rec
}

/// Bundle everything into the immutable report value. Pure apart from the
/// timestamp field.
pub fn assemble_report(
    coverage: f32,
    regions: ClassifiedRegions,
    flow: FlowEstimate,
    components_found: usize,
    avg_blood_value: f32,
) -> AnalysisReport {
    let estimated_ml = flow.estimated_ml;
    let clot_found = !regions.clots.is_empty();
    let risk_level = assess_risk(estimated_ml, clot_found);

    let all_findings = build_findings(&flow, coverage, &regions.clots, &regions.dark_regions);
    let recommendations = build_recommendations(risk_level, &flow, &regions.clots);

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    AnalysisReport {
        timestamp,
        findings: Findings {
            blood_detected: coverage > BLOOD_DETECTED_COVERAGE,
            coverage,
            clot_count: regions.clots.len(),
            dark_region_count: regions.dark_regions.len(),
            clots: regions.clots,
            dark_regions: regions.dark_regions,
            flow,
            estimated_blood_loss_ml: estimated_ml,
        },
        recommendations,
        risk_level,
        raw: RawDiagnostics {
            components_found,
            avg_blood_value,
            all_findings,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::flow::estimate_flow;
    use crate::models::BoundingBox;

    fn clot_with_area(cm2: Option<f32>) -> RegionReport {
        RegionReport {
            pixels: 100,
            bbox: BoundingBox {
                min_x: 0,
                min_y: 0,
                max_x: 9,
                max_y: 9,
            },
            mean_value: 0.1,
            mean_saturation: 0.1,
            darker_than_blood: 0.4,
            estimated_cm2: cm2,
            confidence: 98,
        }
    }

    #[test]
    fn volume_at_250_is_high_regardless_of_clots() {
        assert_eq!(assess_risk(250.0, false), RiskLevel::High);
        assert_eq!(assess_risk(250.0, true), RiskLevel::High);
    }

    #[test]
    fn clot_raises_low_volume_to_moderate() {
        assert_eq!(assess_risk(50.0, true), RiskLevel::Moderate);
        assert_eq!(assess_risk(50.0, false), RiskLevel::Low);
    }

    #[test]
    fn no_clot_between_200_and_250_is_moderate() {
        assert_eq!(assess_risk(225.0, false), RiskLevel::Moderate);
    }

    #[test]
    fn large_clot_adds_documentation_recommendation() {
        let flow = estimate_flow(55.0, 0.1, 5.0);
        let clots = vec![clot_with_area(Some(2.0))];
        let rec = build_recommendations(RiskLevel::Moderate, &flow, &clots);
        assert!(rec.iter().any(|r| r.contains("Document large blood clots")));
    }

    #[test]
    fn uncalibrated_clot_never_counts_as_large() {
        let flow = estimate_flow(55.0, 0.1, 5.0);
        let clots = vec![clot_with_area(None)];
        let rec = build_recommendations(RiskLevel::Moderate, &flow, &clots);
        assert!(!rec.iter().any(|r| r.contains("Document large blood clots")));
    }
}
