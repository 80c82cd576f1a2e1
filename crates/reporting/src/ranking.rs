//! Top-N touchpoint ranking by attributed ROI.

use revpulse_core::types::TouchPoint;
use serde::{Deserialize, Serialize};

use crate::attribution::AttributionReport;

/// Ranking size when the caller does not override it.
pub const DEFAULT_TOP_N: usize = 10;

/// A touchpoint with its computed ROI and cumulative attribution weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedTouchPoint {
    pub touchpoint: TouchPoint,
    pub roi: f64,
    pub attribution: f64,
}

/// The `n` highest-ROI touchpoints, descending; ties keep input order.
/// Touchpoints without a credit entry are excluded rather than zero-filled.
pub fn top_touchpoints(
    touchpoints: &[TouchPoint],
    report: &AttributionReport,
    n: usize,
) -> Vec<RankedTouchPoint> {
    let mut ranked: Vec<RankedTouchPoint> = touchpoints
        .iter()
        .filter_map(|tp| {
            report.credit(&tp.id).map(|credit| RankedTouchPoint {
                touchpoint: tp.clone(),
                roi: credit.roi,
                attribution: credit.attribution_score,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.roi
            .partial_cmp(&a.roi)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}
