//! Acquisition-cohort retention and lifetime-value analysis.

use std::collections::BTreeMap;

use revpulse_core::types::Client;
use serde::{Deserialize, Serialize};

/// Months tracked per cohort when the caller does not override the horizon.
pub const DEFAULT_MONTHS_TO_TRACK: usize = 12;

/// Retention and revenue curves for one acquisition month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortData {
    /// Acquisition month key, `YYYY-MM`.
    pub cohort_month: String,
    pub clients_acquired: u64,
    /// Retained fraction per relative month, index 0 = acquisition month.
    pub retention: Vec<f64>,
    /// Projected cohort revenue per relative month.
    pub revenue: Vec<f64>,
    /// Sum of the cohort members' lifetime values.
    pub cumulative_ltv: f64,
    pub average_engagement_value: f64,
    /// `1 - retention_at(11)`: the 12-month churn figure.
    pub churn_rate: f64,
}

/// Modelled retained fraction `m` months after acquisition.
///
/// A fixed decay curve standing in for observed churn, floored at 10%.
/// Placeholder until per-client activity history is available to measure
/// retention directly.
pub fn retention_at(month: usize) -> f64 {
    (0.95 - 0.05 * month as f64).max(0.1)
}

/// Group clients by acquisition month and derive retention/revenue curves
/// per cohort, ordered ascending by month. Computed fresh on every call;
/// nothing is cached.
pub fn analyze_cohorts(clients: &[Client], months_to_track: usize) -> Vec<CohortData> {
    let mut cohorts: BTreeMap<String, Vec<&Client>> = BTreeMap::new();
    for client in clients {
        let month = client.acquisition_date.format("%Y-%m").to_string();
        cohorts.entry(month).or_default().push(client);
    }

    cohorts
        .into_iter()
        .map(|(cohort_month, members)| {
            let clients_acquired = members.len() as u64;
            let cumulative_ltv: f64 = members.iter().map(|c| c.lifetime_value).sum();
            let average_engagement_value = if clients_acquired > 0 {
                cumulative_ltv / clients_acquired as f64
            } else {
                0.0
            };

            let monthly_value = average_engagement_value / 12.0;
            let retention: Vec<f64> = (0..months_to_track).map(retention_at).collect();
            let revenue: Vec<f64> = retention
                .iter()
                .map(|r| clients_acquired as f64 * r * monthly_value)
                .collect();

            CohortData {
                cohort_month,
                clients_acquired,
                retention,
                revenue,
                cumulative_ltv,
                average_engagement_value,
                churn_rate: 1.0 - retention_at(11),
            }
        })
        .collect()
}
