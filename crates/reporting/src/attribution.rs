//! Multi-touch attribution: splits credit for revenue events across the
//! touchpoints that preceded them and derives per-touchpoint ROI.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use revpulse_core::types::{ActivityType, Outcome, RevenueEvent, TouchPoint};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::{AttributionModelId, TIME_DECAY_RATE};

/// Credit accumulated by one touchpoint across every revenue event that
/// referenced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchPointCredit {
    pub touchpoint_id: Uuid,
    /// Cumulative attribution weight across revenue events.
    pub attribution_score: f64,
    /// Expected-value revenue credited to this touchpoint.
    pub attributed_revenue: f64,
    /// Attributed revenue minus the touchpoint's recorded cost.
    pub roi: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionReport {
    pub model: AttributionModelId,
    /// Credits keyed by touchpoint id. Touchpoints whose engagement/client
    /// pair never matched a revenue event have no entry.
    pub touchpoints: HashMap<Uuid, TouchPointCredit>,
    /// Expected value of every supplied revenue event, matched or not.
    pub total_revenue: f64,
    /// Cost of every supplied touchpoint, credited or not.
    pub total_cost: f64,
    pub computed_at: DateTime<Utc>,
}

impl AttributionReport {
    pub fn credit(&self, touchpoint_id: &Uuid) -> Option<&TouchPointCredit> {
        self.touchpoints.get(touchpoint_id)
    }
}

struct CreditAccumulator {
    cost: f64,
    score: f64,
    revenue: f64,
}

/// Assign each revenue event's credit across its deal's touchpoints under
/// the selected model and accumulate per-touchpoint scores and ROI.
///
/// Inputs are expected to be pre-filtered to the analysis window. Empty
/// inputs yield a zero-valued report, never an error.
pub fn attribute(
    touchpoints: &[TouchPoint],
    revenue_events: &[RevenueEvent],
    model: AttributionModelId,
) -> AttributionReport {
    // Touchpoints and revenue events share no foreign key; they are matched
    // on the (engagement, client) pair.
    let mut groups: HashMap<(Uuid, Uuid), Vec<&TouchPoint>> = HashMap::new();
    for tp in touchpoints {
        groups
            .entry((tp.engagement_id, tp.client_id))
            .or_default()
            .push(tp);
    }
    // Stable sort: equal timestamps keep insertion order, so first/last and
    // position weights are deterministic.
    for group in groups.values_mut() {
        group.sort_by_key(|tp| tp.timestamp);
    }

    let mut credits: HashMap<Uuid, CreditAccumulator> = HashMap::new();

    for event in revenue_events {
        let group = match groups.get(&(event.engagement_id, event.client_id)) {
            Some(group) => group,
            // No touchpoints for this deal: zero attribution, skip.
            None => continue,
        };

        let weights = model_weights(model, group, event);
        let expected = event.expected_value();

        for (tp, weight) in group.iter().zip(weights.iter()) {
            let entry = credits.entry(tp.id).or_insert(CreditAccumulator {
                cost: tp.cost,
                score: 0.0,
                revenue: 0.0,
            });
            entry.score += weight;
            entry.revenue += expected * weight;
        }
    }

    // Totals run over the full supplied sets, independent of matching:
    // an unmatched touchpoint still counts toward total cost.
    let total_revenue: f64 = revenue_events.iter().map(|e| e.expected_value()).sum();
    let total_cost: f64 = touchpoints.iter().map(|t| t.cost).sum();

    debug!(
        model = model.as_str(),
        credited = credits.len(),
        total_revenue,
        total_cost,
        "Attribution computed"
    );

    let touchpoints = credits
        .into_iter()
        .map(|(id, acc)| {
            (
                id,
                TouchPointCredit {
                    touchpoint_id: id,
                    attribution_score: acc.score,
                    attributed_revenue: acc.revenue,
                    roi: acc.revenue - acc.cost,
                },
            )
        })
        .collect();

    AttributionReport {
        model,
        touchpoints,
        total_revenue,
        total_cost,
        computed_at: Utc::now(),
    }
}

/// Weights for one revenue event over its group's touchpoints, in group
/// order. Sums to 1.0 for every model except `data_driven`.
fn model_weights(
    model: AttributionModelId,
    group: &[&TouchPoint],
    event: &RevenueEvent,
) -> Vec<f64> {
    let n = group.len();
    match model {
        AttributionModelId::FirstTouch => single_position_weights(n, 0),
        AttributionModelId::LastTouch => single_position_weights(n, n - 1),
        AttributionModelId::Linear => vec![1.0 / n as f64; n],
        AttributionModelId::PositionBased => position_based_weights(n),
        AttributionModelId::TimeDecay => time_decay_weights(group, event),
        AttributionModelId::DataDriven => data_driven_weights(group),
    }
}

fn single_position_weights(n: usize, index: usize) -> Vec<f64> {
    let mut weights = vec![0.0; n];
    weights[index] = 1.0;
    weights
}

fn position_based_weights(n: usize) -> Vec<f64> {
    match n {
        1 => vec![1.0],
        2 => vec![0.5, 0.5],
        _ => {
            let interior = 0.2 / (n - 2) as f64;
            let mut weights = vec![interior; n];
            weights[0] = 0.4;
            weights[n - 1] = 0.4;
            weights
        }
    }
}

fn time_decay_weights(group: &[&TouchPoint], event: &RevenueEvent) -> Vec<f64> {
    let mut weights: Vec<f64> = group
        .iter()
        .map(|tp| {
            let days = (event.timestamp - tp.timestamp).num_seconds() as f64 / 86_400.0;
            TIME_DECAY_RATE.powf(days / 7.0)
        })
        .collect();

    // Decay weights are positive for any finite age; the guard keeps a
    // degenerate total from poisoning the report.
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in weights.iter_mut() {
            *w /= total;
        }
    }
    weights
}

fn data_driven_weights(group: &[&TouchPoint]) -> Vec<f64> {
    let total_influence: f64 = group.iter().map(|tp| tp.influence_score).sum();

    // Unlike the share-based models, these scores are not renormalized per
    // event: each is an independent signal-weighted score.
    group
        .iter()
        .map(|tp| {
            let base = if total_influence > 0.0 {
                tp.influence_score / total_influence
            } else {
                0.0
            };
            base * outcome_multiplier(tp.outcome) * activity_multiplier(tp.activity_type)
        })
        .collect()
}

fn outcome_multiplier(outcome: Outcome) -> f64 {
    match outcome {
        Outcome::Positive => 1.3,
        Outcome::Neutral => 1.0,
        Outcome::Negative => 0.7,
    }
}

fn activity_multiplier(activity: ActivityType) -> f64 {
    match activity {
        ActivityType::Proposal => 1.4,
        ActivityType::Negotiation => 1.3,
        ActivityType::Demo => 1.2,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use revpulse_core::types::RevenueEventType;

    const EPS: f64 = 1e-9;

    fn ts(day: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::days(day)
    }

    fn make_touchpoint(day: i64, engagement: Uuid, client: Uuid) -> TouchPoint {
        TouchPoint {
            id: Uuid::new_v4(),
            timestamp: ts(day),
            activity_type: ActivityType::Meeting,
            engagement_id: engagement,
            client_id: client,
            cost: 100.0,
            duration_minutes: 60,
            participants: vec!["ae-1".to_string()],
            outcome: Outcome::Neutral,
            lead_score: 50,
            influence_score: 0.5,
            artifacts: Vec::new(),
        }
    }

    fn make_event(
        day: i64,
        engagement: Uuid,
        client: Uuid,
        amount: f64,
        probability: f64,
    ) -> RevenueEvent {
        RevenueEvent {
            id: Uuid::new_v4(),
            engagement_id: engagement,
            client_id: client,
            timestamp: ts(day),
            amount,
            event_type: RevenueEventType::ContractSigned,
            probability,
            stage: "closed_won".to_string(),
        }
    }

    fn deal() -> (Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4())
    }

    // 1. Weight-sum invariants -----------------------------------------------

    #[test]
    fn test_share_models_weights_sum_to_one() {
        let (eng, cli) = deal();
        let touchpoints = vec![
            make_touchpoint(0, eng, cli),
            make_touchpoint(3, eng, cli),
            make_touchpoint(7, eng, cli),
            make_touchpoint(9, eng, cli),
        ];
        let events = vec![make_event(10, eng, cli, 5_000.0, 1.0)];

        for model in [
            AttributionModelId::FirstTouch,
            AttributionModelId::LastTouch,
            AttributionModelId::Linear,
            AttributionModelId::PositionBased,
            AttributionModelId::TimeDecay,
        ] {
            let report = attribute(&touchpoints, &events, model);
            let score_sum: f64 = report
                .touchpoints
                .values()
                .map(|c| c.attribution_score)
                .sum();
            assert!(
                (score_sum - 1.0).abs() < EPS,
                "{:?} weights summed to {}",
                model,
                score_sum
            );
        }
    }

    // 2. First/last touch ----------------------------------------------------

    #[test]
    fn test_first_touch_credits_earliest_regardless_of_input_order() {
        let (eng, cli) = deal();
        let earliest = make_touchpoint(0, eng, cli);
        let middle = make_touchpoint(4, eng, cli);
        let latest = make_touchpoint(8, eng, cli);
        // Deliberately shuffled input order.
        let touchpoints = vec![middle.clone(), latest.clone(), earliest.clone()];
        let events = vec![make_event(10, eng, cli, 2_000.0, 1.0)];

        let report = attribute(&touchpoints, &events, AttributionModelId::FirstTouch);
        let credit = report.credit(&earliest.id).unwrap();
        assert!((credit.attribution_score - 1.0).abs() < EPS);
        assert!((credit.attributed_revenue - 2_000.0).abs() < EPS);
        assert!((report.credit(&middle.id).unwrap().attribution_score).abs() < EPS);
        assert!((report.credit(&latest.id).unwrap().attribution_score).abs() < EPS);
    }

    #[test]
    fn test_last_touch_credits_latest_regardless_of_input_order() {
        let (eng, cli) = deal();
        let earliest = make_touchpoint(0, eng, cli);
        let latest = make_touchpoint(8, eng, cli);
        let touchpoints = vec![latest.clone(), earliest.clone()];
        let events = vec![make_event(10, eng, cli, 2_000.0, 1.0)];

        let report = attribute(&touchpoints, &events, AttributionModelId::LastTouch);
        assert!(
            (report.credit(&latest.id).unwrap().attribution_score - 1.0).abs() < EPS
        );
        assert!((report.credit(&earliest.id).unwrap().attribution_score).abs() < EPS);
    }

    // 3. Linear and position based -------------------------------------------

    #[test]
    fn test_linear_assigns_equal_shares() {
        let (eng, cli) = deal();
        let touchpoints: Vec<_> =
            (0..4).map(|d| make_touchpoint(d, eng, cli)).collect();
        let events = vec![make_event(10, eng, cli, 1_000.0, 1.0)];

        let report = attribute(&touchpoints, &events, AttributionModelId::Linear);
        for tp in &touchpoints {
            let credit = report.credit(&tp.id).unwrap();
            assert!((credit.attribution_score - 0.25).abs() < EPS);
            assert!((credit.attributed_revenue - 250.0).abs() < EPS);
        }
    }

    #[test]
    fn test_position_based_splits() {
        assert_eq!(position_based_weights(1), vec![1.0]);
        assert_eq!(position_based_weights(2), vec![0.5, 0.5]);

        let weights = position_based_weights(5);
        assert!((weights[0] - 0.4).abs() < EPS);
        assert!((weights[4] - 0.4).abs() < EPS);
        for w in &weights[1..4] {
            assert!((w - 0.2 / 3.0).abs() < EPS);
        }
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < EPS);
    }

    // 4. Time decay ----------------------------------------------------------

    #[test]
    fn test_time_decay_favours_recent_touchpoints() {
        let (eng, cli) = deal();
        // Touchpoints 10, 3, and 0 days before the revenue event.
        let far = make_touchpoint(0, eng, cli);
        let mid = make_touchpoint(7, eng, cli);
        let near = make_touchpoint(10, eng, cli);
        let touchpoints = vec![far.clone(), mid.clone(), near.clone()];
        let events = vec![make_event(10, eng, cli, 10_000.0, 0.5)];

        let report = attribute(&touchpoints, &events, AttributionModelId::TimeDecay);
        let w_far = report.credit(&far.id).unwrap().attribution_score;
        let w_mid = report.credit(&mid.id).unwrap().attribution_score;
        let w_near = report.credit(&near.id).unwrap().attribution_score;

        assert!(w_near > w_mid && w_mid > w_far);
        assert!((w_far + w_mid + w_near - 1.0).abs() < EPS);

        // Attributed revenue across the group equals the event's expected value.
        let attributed: f64 = report
            .touchpoints
            .values()
            .map(|c| c.attributed_revenue)
            .sum();
        assert!((attributed - 5_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_time_decay_weekly_ratio() {
        let (eng, cli) = deal();
        // Exactly one week apart: raw weights differ by the decay rate.
        let older = make_touchpoint(0, eng, cli);
        let newer = make_touchpoint(7, eng, cli);
        let event = make_event(7, eng, cli, 1_000.0, 1.0);

        let weights = time_decay_weights(&[&older, &newer], &event);
        assert!((weights[0] / weights[1] - TIME_DECAY_RATE).abs() < EPS);
    }

    // 5. Data driven ---------------------------------------------------------

    #[test]
    fn test_data_driven_applies_multipliers_without_renormalizing() {
        let (eng, cli) = deal();
        let mut strong = make_touchpoint(0, eng, cli);
        strong.influence_score = 0.8;
        strong.outcome = Outcome::Positive;
        strong.activity_type = ActivityType::Proposal;
        let mut weak = make_touchpoint(5, eng, cli);
        weak.influence_score = 0.2;
        weak.outcome = Outcome::Neutral;
        weak.activity_type = ActivityType::Meeting;

        let touchpoints = vec![strong.clone(), weak.clone()];
        let events = vec![make_event(10, eng, cli, 1_000.0, 1.0)];
        let report = attribute(&touchpoints, &events, AttributionModelId::DataDriven);

        let w_strong = report.credit(&strong.id).unwrap().attribution_score;
        let w_weak = report.credit(&weak.id).unwrap().attribution_score;

        // 0.8 share × 1.3 outcome × 1.4 activity, and 0.2 share unscaled.
        assert!((w_strong - 0.8 * 1.3 * 1.4).abs() < EPS);
        assert!((w_weak - 0.2).abs() < EPS);
        // The scores are a signal, not shares: their sum is not 1.
        assert!((w_strong + w_weak - 1.0).abs() > 0.1);
    }

    #[test]
    fn test_data_driven_negative_outcome_discount() {
        let (eng, cli) = deal();
        let mut tp = make_touchpoint(0, eng, cli);
        tp.influence_score = 1.0;
        tp.outcome = Outcome::Negative;
        tp.activity_type = ActivityType::Negotiation;

        let events = vec![make_event(1, eng, cli, 1_000.0, 1.0)];
        let report = attribute(&[tp.clone()], &events, AttributionModelId::DataDriven);
        let credit = report.credit(&tp.id).unwrap();
        assert!((credit.attribution_score - 0.7 * 1.3).abs() < EPS);
    }

    #[test]
    fn test_data_driven_zero_influence_total() {
        let (eng, cli) = deal();
        let mut a = make_touchpoint(0, eng, cli);
        a.influence_score = 0.0;
        let mut b = make_touchpoint(2, eng, cli);
        b.influence_score = 0.0;

        let events = vec![make_event(5, eng, cli, 1_000.0, 1.0)];
        let report = attribute(&[a.clone(), b.clone()], &events, AttributionModelId::DataDriven);

        for credit in report.touchpoints.values() {
            assert!(credit.attribution_score.abs() < EPS);
            assert!(credit.attributed_revenue.abs() < EPS);
            assert!(credit.attribution_score.is_finite());
        }
    }

    // 6. Accumulation and ROI ------------------------------------------------

    #[test]
    fn test_credit_accumulates_across_events() {
        let (eng, cli) = deal();
        let tp = make_touchpoint(0, eng, cli);
        let events = vec![
            make_event(5, eng, cli, 1_000.0, 1.0),
            make_event(20, eng, cli, 3_000.0, 0.5),
        ];

        let report = attribute(&[tp.clone()], &events, AttributionModelId::FirstTouch);
        let credit = report.credit(&tp.id).unwrap();
        assert!((credit.attribution_score - 2.0).abs() < EPS);
        assert!((credit.attributed_revenue - 2_500.0).abs() < EPS);
        // Cost is subtracted once, not per event.
        assert!((credit.roi - 2_400.0).abs() < EPS);
    }

    #[test]
    fn test_expected_value_drives_attribution() {
        let (eng, cli) = deal();
        let tp = make_touchpoint(0, eng, cli);
        let events = vec![make_event(5, eng, cli, 10_000.0, 0.25)];

        let report = attribute(&[tp.clone()], &events, AttributionModelId::Linear);
        let credit = report.credit(&tp.id).unwrap();
        assert!((credit.attributed_revenue - 2_500.0).abs() < EPS);
    }

    // 7. Edge policy ---------------------------------------------------------

    #[test]
    fn test_empty_touchpoints_returns_totals_and_empty_credits() {
        let (eng, cli) = deal();
        let events = vec![
            make_event(1, eng, cli, 10_000.0, 0.5),
            make_event(2, eng, cli, 2_000.0, 1.0),
        ];

        let report = attribute(&[], &events, AttributionModelId::Linear);
        assert!(report.touchpoints.is_empty());
        assert!((report.total_revenue - 7_000.0).abs() < EPS);
        assert!(report.total_cost.abs() < EPS);
    }

    #[test]
    fn test_unmatched_event_contributes_zero_attribution() {
        let (eng_a, cli_a) = deal();
        let (eng_b, cli_b) = deal();
        let tp = make_touchpoint(0, eng_a, cli_a);
        let events = vec![make_event(5, eng_b, cli_b, 4_000.0, 1.0)];

        let report = attribute(&[tp.clone()], &events, AttributionModelId::Linear);
        // The event found no touchpoints, so nothing was credited...
        assert!(report.touchpoints.is_empty());
        // ...but the totals still cover the full inputs.
        assert!((report.total_revenue - 4_000.0).abs() < EPS);
        assert!((report.total_cost - 100.0).abs() < EPS);
    }

    #[test]
    fn test_groups_are_isolated_by_deal() {
        let (eng_a, cli_a) = deal();
        let (eng_b, cli_b) = deal();
        let tp_a = make_touchpoint(0, eng_a, cli_a);
        let tp_b = make_touchpoint(0, eng_b, cli_b);
        let events = vec![make_event(5, eng_a, cli_a, 1_000.0, 1.0)];

        let report = attribute(
            &[tp_a.clone(), tp_b.clone()],
            &events,
            AttributionModelId::Linear,
        );
        assert!((report.credit(&tp_a.id).unwrap().attribution_score - 1.0).abs() < EPS);
        assert!(report.credit(&tp_b.id).is_none());
    }

    #[test]
    fn test_empty_inputs_produce_zero_report() {
        let report = attribute(&[], &[], AttributionModelId::DataDriven);
        assert!(report.touchpoints.is_empty());
        assert!(report.total_revenue.abs() < EPS);
        assert!(report.total_cost.abs() < EPS);
    }
}
