//! End-to-end analytics pipeline: windowing, attribution, activity
//! breakdowns, ranking, and cohorts composed into a single overview.

use chrono::{DateTime, Utc};
use revpulse_core::types::{Client, RevenueEvent, TouchPoint};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::activity::{self, ActivityBreakdown};
use crate::attribution::{self, AttributionReport};
use crate::cohort::{self, CohortData, DEFAULT_MONTHS_TO_TRACK};
use crate::models::{self, AttributionModelId, ModelDefinition};
use crate::ranking::{self, RankedTouchPoint, DEFAULT_TOP_N};
use crate::window::{self, TimeWindow};

/// Caller-materialized input arrays for one analytics run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub touchpoints: Vec<TouchPoint>,
    #[serde(default)]
    pub revenue_events: Vec<RevenueEvent>,
    #[serde(default)]
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsOptions {
    /// Attribution model key; unknown keys fall back to the default model.
    pub model_key: String,
    pub window: TimeWindow,
    pub top_n: usize,
    pub months_to_track: usize,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            model_key: models::DEFAULT_MODEL.as_str().to_string(),
            window: TimeWindow::Last90Days,
            top_n: DEFAULT_TOP_N,
            months_to_track: DEFAULT_MONTHS_TO_TRACK,
        }
    }
}

/// The composed analytics view the surrounding dashboard renders.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsOverview {
    pub model: ModelDefinition,
    pub window: TimeWindow,
    pub attribution: AttributionReport,
    pub activity_breakdown: Vec<ActivityBreakdown>,
    pub top_touchpoints: Vec<RankedTouchPoint>,
    pub cohorts: Vec<CohortData>,
    pub generated_at: DateTime<Utc>,
}

/// One model's aggregate outcome for the comparison panel.
#[derive(Debug, Clone, Serialize)]
pub struct ModelComparison {
    pub model: ModelDefinition,
    pub attributed_revenue: f64,
    pub credited_touchpoints: usize,
}

/// Run the full pipeline over a snapshot, anchored at `as_of`.
pub fn run_as_of(
    snapshot: &AnalyticsSnapshot,
    options: &AnalyticsOptions,
    as_of: DateTime<Utc>,
) -> AnalyticsOverview {
    let model_id = models::resolve_or_default(&options.model_key);
    let (touchpoints, revenue_events) = window::filter_as_of(
        &snapshot.touchpoints,
        &snapshot.revenue_events,
        options.window,
        as_of,
    );

    let report = attribution::attribute(&touchpoints, &revenue_events, model_id);
    let breakdown = activity::aggregate_by_type(&touchpoints, &report);
    let top = ranking::top_touchpoints(&touchpoints, &report, options.top_n);
    // Cohorts run off the full client list; the time window applies to
    // touchpoints and revenue events only.
    let cohorts = cohort::analyze_cohorts(&snapshot.clients, options.months_to_track);

    info!(
        model = model_id.as_str(),
        window_days = options.window.days(),
        touchpoints = touchpoints.len(),
        revenue_events = revenue_events.len(),
        cohorts = cohorts.len(),
        "Analytics pipeline complete"
    );

    AnalyticsOverview {
        model: models::definition(model_id),
        window: options.window,
        attribution: report,
        activity_breakdown: activity::sorted_breakdown(&breakdown),
        top_touchpoints: top,
        cohorts,
        generated_at: Utc::now(),
    }
}

/// [`run_as_of`] anchored at the current instant.
pub fn run(snapshot: &AnalyticsSnapshot, options: &AnalyticsOptions) -> AnalyticsOverview {
    run_as_of(snapshot, options, Utc::now())
}

/// Attribution outcome of every catalog model over the same window, for
/// side-by-side comparison.
pub fn compare_models_as_of(
    snapshot: &AnalyticsSnapshot,
    window: TimeWindow,
    as_of: DateTime<Utc>,
) -> Vec<ModelComparison> {
    let (touchpoints, revenue_events) = window::filter_as_of(
        &snapshot.touchpoints,
        &snapshot.revenue_events,
        window,
        as_of,
    );

    AttributionModelId::ALL
        .iter()
        .map(|&id| {
            let report = attribution::attribute(&touchpoints, &revenue_events, id);
            let attributed_revenue = report
                .touchpoints
                .values()
                .map(|c| c.attributed_revenue)
                .sum();
            ModelComparison {
                model: models::definition(id),
                attributed_revenue,
                credited_touchpoints: report.touchpoints.len(),
            }
        })
        .collect()
}

/// [`compare_models_as_of`] anchored at the current instant.
pub fn compare_models(snapshot: &AnalyticsSnapshot, window: TimeWindow) -> Vec<ModelComparison> {
    compare_models_as_of(snapshot, window, Utc::now())
}
