use crate::models::LteGateway;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A gateway that has not checked in for this long is unhealthy.
pub const CHECKIN_STALENESS_MS: i64 = 5 * 60 * 1000;

/// Healthy iff a checkin is present and younger than [`CHECKIN_STALENESS_MS`] at `now`.
pub fn is_healthy_at(checkin_ms: Option<i64>, now: DateTime<Utc>) -> bool {
    match checkin_ms {
        Some(checkin) => now.timestamp_millis().saturating_sub(checkin) < CHECKIN_STALENESS_MS,
        None => false,
    }
}

pub fn is_healthy(checkin_ms: Option<i64>) -> bool {
    is_healthy_at(checkin_ms, Utc::now())
}

pub fn is_gateway_healthy(gateway: &LteGateway) -> bool {
    is_healthy(gateway.checkin_time())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HealthSummary {
    pub healthy: usize,
    pub unhealthy: usize,
}

impl HealthSummary {
    pub fn total(&self) -> usize {
        self.healthy + self.unhealthy
    }
}

pub fn summarize<'a>(
    gateways: impl IntoIterator<Item = &'a LteGateway>,
    now: DateTime<Utc>,
) -> HealthSummary {
    gateways
        .into_iter()
        .fold(HealthSummary::default(), |mut summary, gateway| {
            if is_healthy_at(gateway.checkin_time(), now) {
                summary.healthy += 1;
            } else {
                summary.unhealthy += 1;
            }
            summary
        })
}
