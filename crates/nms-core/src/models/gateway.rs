use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LteGateway {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magmad: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cellular: Option<Value>,

    #[serde(default)]
    pub connected_enodeb_serials: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GatewayStatus>,
}

impl LteGateway {
    /// Last checkin, milliseconds since epoch.
    pub fn checkin_time(&self) -> Option<i64> {
        self.status.as_ref().and_then(|s| s.checkin_time)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GatewayStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<HashMap<String, String>>,
}

/// ===== Tiers =====
/// Upgrade tier: the software version and images a set of gateways runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub images: Vec<TierImage>,

    #[serde(default)]
    pub gateways: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierImage {
    pub name: String,
    pub order: i64,
}

/// ===== Gateway pools =====
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayPool {
    pub gateway_pool_id: String,

    #[serde(default)]
    pub gateway_pool_name: String,

    pub config: GatewayPoolConfigs,

    #[serde(default)]
    pub gateway_ids: Vec<String>,
}

/// Writable part of a gateway pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutableGatewayPool {
    pub gateway_pool_id: String,

    #[serde(default)]
    pub gateway_pool_name: String,

    pub config: GatewayPoolConfigs,
}

impl From<&GatewayPool> for MutableGatewayPool {
    fn from(pool: &GatewayPool) -> Self {
        Self {
            gateway_pool_id: pool.gateway_pool_id.clone(),
            gateway_pool_name: pool.gateway_pool_name.clone(),
            config: pool.config.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GatewayPoolConfigs {
    pub mme_group_id: u32,
}

/// Role of a gateway within a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolRole {
    Primary,
    Secondary,
}

impl PoolRole {
    pub const PRIMARY_CAPACITY: u32 = 255;
    pub const SECONDARY_CAPACITY: u32 = 1;

    pub fn relative_capacity(self) -> u32 {
        match self {
            PoolRole::Primary => Self::PRIMARY_CAPACITY,
            PoolRole::Secondary => Self::SECONDARY_CAPACITY,
        }
    }

    /// Anything below full capacity is treated as a secondary.
    pub fn from_capacity(capacity: u32) -> Self {
        if capacity == Self::PRIMARY_CAPACITY {
            PoolRole::Primary
        } else {
            PoolRole::Secondary
        }
    }
}

/// Membership of one gateway in a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayPoolRecord {
    pub gateway_id: String,
    pub gateway_pool_id: String,
    pub mme_code: u32,
    pub mme_relative_capacity: u32,
}

impl GatewayPoolRecord {
    pub fn new(
        gateway_id: impl Into<String>,
        gateway_pool_id: impl Into<String>,
        mme_code: u32,
        role: PoolRole,
    ) -> Self {
        Self {
            gateway_id: gateway_id.into(),
            gateway_pool_id: gateway_pool_id.into(),
            mme_code,
            mme_relative_capacity: role.relative_capacity(),
        }
    }

    pub fn role(&self) -> PoolRole {
        PoolRole::from_capacity(self.mme_relative_capacity)
    }
}

/// Pool plus the records of its member gateways, as held by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayPoolState {
    pub gateway_pool: GatewayPool,

    #[serde(default)]
    pub gateway_pool_records: Vec<GatewayPoolRecord>,
}
