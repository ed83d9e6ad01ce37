//! Composite risk scorer
//!
//! Merges heterogeneous anomaly signals into one bounded number. The
//! arithmetic is deliberately simple and is kept exactly as documented:
//!
//! - `N` = the primary statistical model's flag count (the first signal in
//!   registry order), floored at 1 to guard the division
//! - `A` = every statistical flag across all signals, plus the geometric
//!   finding count
//! - score = `min(1.0, A / N * 2.0)`
//!
//! The `*2` factor biases the score toward the high end whenever any
//! anomaly exists, which makes it a usable coarse triage signal. It is a
//! monotone heuristic, NOT a calibrated probability — downstream consumers
//! must not treat it as one.

use geoaudit_core::models::{AnomalySignal, GeometricFinding};

/// Scale factor emphasizing anomalies in small counts
const EMPHASIS: f64 = 2.0;

pub fn composite_risk_score(
    signals: &[AnomalySignal],
    findings: &[GeometricFinding],
) -> f64 {
    let primary_flags = signals
        .first()
        .map(|signal| signal.anomaly_feature_ids.len())
        .unwrap_or(0);
    let denominator = primary_flags.max(1) as f64;

    let total_anomalies: usize = signals
        .iter()
        .map(|signal| signal.anomaly_feature_ids.len())
        .sum::<usize>()
        + findings.len();

    (total_anomalies as f64 / denominator * EMPHASIS).min(1.0)
}
