//! Property tests for the composite risk score

use geoaudit_analysis::composite_risk_score;
use geoaudit_core::models::{AnomalySignal, GeometricFinding, GeometryType, RuleViolation};
use proptest::prelude::*;

fn signal(flag_count: usize) -> AnomalySignal {
    AnomalySignal {
        detector_name: "model".to_string(),
        anomaly_feature_ids: (0..flag_count).collect(),
        scores: None,
    }
}

fn findings(count: usize) -> Vec<GeometricFinding> {
    (0..count)
        .map(|feature_id| GeometricFinding {
            feature_id,
            issues: vec![RuleViolation::ExtremelySmallArea],
            geometry_type: GeometryType::Polygon,
        })
        .collect()
}

proptest! {
    /// The score is always inside [0, 1], however large the counts grow
    #[test]
    fn score_is_bounded(
        primary in 0usize..500,
        secondary in 0usize..500,
        geometric in 0usize..500,
    ) {
        let signals = vec![signal(primary), signal(secondary)];
        let score = composite_risk_score(&signals, &findings(geometric));
        prop_assert!((0.0..=1.0).contains(&score));
    }

    /// For a fixed primary count the score is non-decreasing in the total
    /// anomaly count
    #[test]
    fn score_is_monotone_in_anomaly_count(
        primary in 0usize..50,
        secondary in 0usize..200,
        geometric in 0usize..200,
    ) {
        let base = vec![signal(primary), signal(secondary)];
        let more = vec![signal(primary), signal(secondary + 1)];

        let lower = composite_risk_score(&base, &findings(geometric));
        let higher = composite_risk_score(&more, &findings(geometric));
        let with_finding = composite_risk_score(&base, &findings(geometric + 1));

        prop_assert!(higher >= lower);
        prop_assert!(with_finding >= lower);
    }

    /// Zero anomalies anywhere always scores exactly zero
    #[test]
    fn no_anomalies_scores_zero(signals_count in 0usize..5) {
        let signals: Vec<AnomalySignal> = (0..signals_count).map(|_| signal(0)).collect();
        let score = composite_risk_score(&signals, &[]);
        prop_assert_eq!(score, 0.0);
    }
}
