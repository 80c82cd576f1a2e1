//! Trailing time-window filtering of touchpoints and revenue events.

use chrono::{DateTime, Duration, Utc};
use revpulse_core::error::RevPulseError;
use revpulse_core::types::{RevenueEvent, TouchPoint};
use serde::{Deserialize, Serialize};

/// Supported trailing analysis windows. Any other day count is a caller
/// error: construction rejects it rather than clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeWindow {
    Last30Days,
    Last90Days,
    Last180Days,
    Last365Days,
}

impl TimeWindow {
    pub fn days(self) -> u32 {
        match self {
            Self::Last30Days => 30,
            Self::Last90Days => 90,
            Self::Last180Days => 180,
            Self::Last365Days => 365,
        }
    }
}

impl TryFrom<u32> for TimeWindow {
    type Error = RevPulseError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            30 => Ok(Self::Last30Days),
            90 => Ok(Self::Last90Days),
            180 => Ok(Self::Last180Days),
            365 => Ok(Self::Last365Days),
            other => Err(RevPulseError::InvalidWindow(other)),
        }
    }
}

impl From<TimeWindow> for u32 {
    fn from(window: TimeWindow) -> u32 {
        window.days()
    }
}

/// Keep only records stamped at or after `as_of` minus the window.
pub fn filter_as_of(
    touchpoints: &[TouchPoint],
    revenue_events: &[RevenueEvent],
    window: TimeWindow,
    as_of: DateTime<Utc>,
) -> (Vec<TouchPoint>, Vec<RevenueEvent>) {
    let cutoff = as_of - Duration::days(window.days() as i64);

    let touchpoints = touchpoints
        .iter()
        .filter(|t| t.timestamp >= cutoff)
        .cloned()
        .collect();
    let revenue_events = revenue_events
        .iter()
        .filter(|e| e.timestamp >= cutoff)
        .cloned()
        .collect();

    (touchpoints, revenue_events)
}

/// [`filter_as_of`] anchored at the current instant.
pub fn filter(
    touchpoints: &[TouchPoint],
    revenue_events: &[RevenueEvent],
    window: TimeWindow,
) -> (Vec<TouchPoint>, Vec<RevenueEvent>) {
    filter_as_of(touchpoints, revenue_events, window, Utc::now())
}
