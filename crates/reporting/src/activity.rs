//! Activity-type ROI breakdown derived from attribution results.

use std::collections::HashMap;

use revpulse_core::types::{ActivityType, TouchPoint};
use serde::{Deserialize, Serialize};

use crate::attribution::AttributionReport;

/// Aggregated performance of one activity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityBreakdown {
    pub activity_type: ActivityType,
    /// Attributed revenue across the type's credited touchpoints.
    pub revenue: f64,
    pub cost: f64,
    pub count: u64,
    /// `(revenue - cost) / cost`, 0 when no cost was recorded.
    pub roi: f64,
}

/// Roll per-touchpoint credits up by activity type. Touchpoints without a
/// credit entry do not participate.
pub fn aggregate_by_type(
    touchpoints: &[TouchPoint],
    report: &AttributionReport,
) -> HashMap<ActivityType, ActivityBreakdown> {
    let mut by_type: HashMap<ActivityType, ActivityBreakdown> = HashMap::new();

    for tp in touchpoints {
        let credit = match report.credit(&tp.id) {
            Some(credit) => credit,
            None => continue,
        };

        let entry = by_type
            .entry(tp.activity_type)
            .or_insert(ActivityBreakdown {
                activity_type: tp.activity_type,
                revenue: 0.0,
                cost: 0.0,
                count: 0,
                roi: 0.0,
            });
        // ROI was recorded net of cost; add it back to recover the
        // attributed revenue.
        entry.revenue += credit.roi + tp.cost;
        entry.cost += tp.cost;
        entry.count += 1;
    }

    for entry in by_type.values_mut() {
        entry.roi = if entry.cost > 0.0 {
            (entry.revenue - entry.cost) / entry.cost
        } else {
            0.0
        };
    }

    by_type
}

/// Breakdown rows sorted by activity name for stable report rendering.
pub fn sorted_breakdown(
    by_type: &HashMap<ActivityType, ActivityBreakdown>,
) -> Vec<ActivityBreakdown> {
    let mut rows: Vec<_> = by_type.values().cloned().collect();
    rows.sort_by_key(|row| row.activity_type.as_str());
    rows
}
