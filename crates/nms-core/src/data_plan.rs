//! Data plans: per-plan download/upload limits stored in the EPC
//! `sub_profiles` map. Users enter Mbps, the network stores bps.

use crate::models::{NetworkEpcConfigs, SubProfile};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const UNLIMITED_DOWNLOAD_BPS: u64 = 4_000_000_000;
pub const UNLIMITED_UPLOAD_BPS: u64 = 2_000_000_000;

const BPS_PER_MBPS: f64 = 1_000_000.0;

/// Largest accepted entry, 1 Tbps.
pub const MAX_BIT_RATE_MBPS: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Download,
    Upload,
}

impl Direction {
    pub fn unlimited(self) -> u64 {
        match self {
            Direction::Download => UNLIMITED_DOWNLOAD_BPS,
            Direction::Upload => UNLIMITED_UPLOAD_BPS,
        }
    }
}

/// Convert a user-entered Mbps value to bps.
///
/// `None` keeps `prior` (or the unlimited value when there is none), an
/// empty string means unlimited, negative entries clamp to zero.
pub fn normalize_bit_rate(input: Option<&str>, prior: Option<u64>, direction: Direction) -> Result<u64> {
    let Some(input) = input else {
        return Ok(prior.unwrap_or_else(|| direction.unlimited()));
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(direction.unlimited());
    }

    let mbps: f64 = trimmed
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("'{}' is not a bit rate in Mbps", input)))?;
    if !mbps.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "'{}' is not a bit rate in Mbps",
            input
        )));
    }
    if mbps > MAX_BIT_RATE_MBPS {
        return Err(Error::InvalidArgument(format!(
            "'{}' Mbps exceeds the {} Mbps limit",
            input, MAX_BIT_RATE_MBPS
        )));
    }

    Ok((mbps * BPS_PER_MBPS).max(0.0).round() as u64)
}

/// Fields the user touched in a data plan form. `None` means untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPlanEdit {
    #[serde(default)]
    pub download_mbps: Option<String>,

    #[serde(default)]
    pub upload_mbps: Option<String>,
}

/// Return a copy of `epc` with plan `name` created or updated from `edit`.
pub fn apply_data_plan(epc: &NetworkEpcConfigs, name: &str, edit: &DataPlanEdit) -> Result<NetworkEpcConfigs> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("data plan name must not be empty".to_string()));
    }

    let prior = epc.sub_profiles.get(name);
    let profile = SubProfile {
        max_dl_bit_rate: normalize_bit_rate(
            edit.download_mbps.as_deref(),
            prior.map(|p| p.max_dl_bit_rate),
            Direction::Download,
        )?,
        max_ul_bit_rate: normalize_bit_rate(
            edit.upload_mbps.as_deref(),
            prior.map(|p| p.max_ul_bit_rate),
            Direction::Upload,
        )?,
    };

    let mut next = epc.clone();
    next.sub_profiles.insert(name.to_string(), profile);
    Ok(next)
}

pub fn remove_data_plan(epc: &NetworkEpcConfigs, name: &str) -> NetworkEpcConfigs {
    let mut next = epc.clone();
    next.sub_profiles.remove(name);
    next
}

/// Display value for a stored rate: `None` for unlimited, Mbps otherwise.
pub fn display_mbps(bps: u64, direction: Direction) -> Option<f64> {
    if bps == direction.unlimited() {
        None
    } else {
        Some(bps as f64 / BPS_PER_MBPS)
    }
}
