//! Attribution model registry: the static catalog of credit-assignment
//! algorithms and their reported accuracy scores.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Decay applied by the `time_decay` model per week of elapsed time.
/// A fixed parameter of the model, not caller-configurable.
pub const TIME_DECAY_RATE: f64 = 0.7;

/// Model applied when a caller supplies an unknown model key.
pub const DEFAULT_MODEL: AttributionModelId = AttributionModelId::DataDriven;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionModelId {
    FirstTouch,
    LastTouch,
    Linear,
    PositionBased,
    TimeDecay,
    DataDriven,
}

impl AttributionModelId {
    /// Every model id, in catalog order.
    pub const ALL: [AttributionModelId; 6] = [
        AttributionModelId::FirstTouch,
        AttributionModelId::LastTouch,
        AttributionModelId::Linear,
        AttributionModelId::PositionBased,
        AttributionModelId::TimeDecay,
        AttributionModelId::DataDriven,
    ];

    /// Parse a model key. Returns `None` for unknown keys; use
    /// [`resolve_or_default`] where the documented fallback is wanted.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "first_touch" => Some(Self::FirstTouch),
            "last_touch" => Some(Self::LastTouch),
            "linear" => Some(Self::Linear),
            "position_based" => Some(Self::PositionBased),
            "time_decay" => Some(Self::TimeDecay),
            "data_driven" => Some(Self::DataDriven),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstTouch => "first_touch",
            Self::LastTouch => "last_touch",
            Self::Linear => "linear",
            Self::PositionBased => "position_based",
            Self::TimeDecay => "time_decay",
            Self::DataDriven => "data_driven",
        }
    }
}

/// A named attribution algorithm with static parameters. Selected by id,
/// never constructed at runtime.
#[derive(Debug, Clone, Serialize)]
pub struct ModelDefinition {
    pub id: AttributionModelId,
    pub name: &'static str,
    pub description: &'static str,
    /// Reported accuracy score from offline evaluation.
    pub accuracy: f64,
}

/// Catalog entry for one model id.
pub fn definition(id: AttributionModelId) -> ModelDefinition {
    match id {
        AttributionModelId::FirstTouch => ModelDefinition {
            id,
            name: "First Touch",
            description: "All credit to the earliest touchpoint",
            accuracy: 0.72,
        },
        AttributionModelId::LastTouch => ModelDefinition {
            id,
            name: "Last Touch",
            description: "All credit to the final touchpoint before revenue",
            accuracy: 0.78,
        },
        AttributionModelId::Linear => ModelDefinition {
            id,
            name: "Linear",
            description: "Credit split evenly across every touchpoint",
            accuracy: 0.81,
        },
        AttributionModelId::PositionBased => ModelDefinition {
            id,
            name: "Position Based",
            description: "40/20/40 split between first, interior, and last",
            accuracy: 0.85,
        },
        AttributionModelId::TimeDecay => ModelDefinition {
            id,
            name: "Time Decay",
            description: "Exponential weekly decay favouring recent touchpoints",
            accuracy: 0.88,
        },
        AttributionModelId::DataDriven => ModelDefinition {
            id,
            name: "Data Driven",
            description: "Influence-signal weighting with outcome and activity multipliers",
            accuracy: 0.94,
        },
    }
}

/// Resolve a caller-supplied model key, falling back to [`DEFAULT_MODEL`]
/// for unknown keys. The fallback is logged, never raised.
pub fn resolve_or_default(key: &str) -> AttributionModelId {
    match AttributionModelId::parse(key) {
        Some(id) => id,
        None => {
            warn!(
                model = key,
                fallback = DEFAULT_MODEL.as_str(),
                "Unknown attribution model, using default"
            );
            DEFAULT_MODEL
        }
    }
}

/// The full model catalog, in id order.
pub fn catalog() -> [ModelDefinition; 6] {
    AttributionModelId::ALL.map(definition)
}
