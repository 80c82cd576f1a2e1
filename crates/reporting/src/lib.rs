//! Revenue analytics and reporting: attribution models, time-window
//! filtering, activity ROI breakdowns, touchpoint ranking, and acquisition
//! cohort analysis.

pub mod activity;
pub mod attribution;
pub mod cohort;
pub mod models;
pub mod pipeline;
pub mod ranking;
pub mod window;

pub use attribution::{attribute, AttributionReport, TouchPointCredit};
pub use cohort::{analyze_cohorts, CohortData};
pub use models::{AttributionModelId, ModelDefinition};
pub use pipeline::{AnalyticsOverview, AnalyticsSnapshot};
pub use window::TimeWindow;
