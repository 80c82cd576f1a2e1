use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Touchpoints ────────────────────────────────────────────────────────

/// A single logged sales or marketing interaction with a client.
/// Immutable once received; scores are supplied by the upstream activity
/// log and never derived here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub activity_type: ActivityType,
    pub engagement_id: Uuid,
    pub client_id: Uuid,
    pub cost: f64,
    pub duration_minutes: u32,
    pub participants: Vec<String>,
    pub outcome: Outcome,
    /// Qualification score in `0..=100`.
    pub lead_score: u8,
    /// Externally supplied signal in `0.0..=1.0` approximating this
    /// touchpoint's causal weight on an outcome.
    pub influence_score: f64,
    #[serde(default)]
    pub artifacts: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Meeting,
    Proposal,
    Presentation,
    Workshop,
    FollowUp,
    Negotiation,
    Demo,
    Consultation,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Proposal => "proposal",
            Self::Presentation => "presentation",
            Self::Workshop => "workshop",
            Self::FollowUp => "follow_up",
            Self::Negotiation => "negotiation",
            Self::Demo => "demo",
            Self::Consultation => "consultation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Positive,
    Neutral,
    Negative,
}

// ─── Revenue Events ─────────────────────────────────────────────────────

/// A monetary outcome attributable to prior touchpoints. Matched to
/// touchpoints structurally on the `(engagement_id, client_id)` pair;
/// there is no direct foreign key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueEvent {
    pub id: Uuid,
    pub engagement_id: Uuid,
    pub client_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    pub event_type: RevenueEventType,
    /// Confidence in `0.0..=1.0` that the amount will realize.
    pub probability: f64,
    /// Upstream deal-stage label, e.g. "closed_won".
    pub stage: String,
}

impl RevenueEvent {
    /// `amount × probability`. All ROI math runs on this figure; the raw
    /// amount is never used alone.
    pub fn expected_value(&self) -> f64 {
        self.amount * self.probability
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueEventType {
    ContractSigned,
    MilestonePayment,
    Expansion,
    Renewal,
    Upsell,
}

// ─── Clients ────────────────────────────────────────────────────────────

/// Acquisition-cohort subject. The acquisition date never changes after
/// creation; lifetime value is kept monotonically non-decreasing upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub acquisition_date: DateTime<Utc>,
    pub lifetime_value: f64,
}
