use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// ===== Base network info =====
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LteNetwork {
    pub id: String,
    pub name: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cellular: Option<NetworkCellularConfigs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<NetworkDnsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_config: Option<NetworkSubscriberConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FegLteNetwork {
    pub id: String,
    pub name: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cellular: Option<NetworkCellularConfigs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<NetworkDnsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub federation: Option<FederatedNetworkConfigs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_config: Option<NetworkSubscriberConfig>,
}

/// Federation gateway network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FegNetwork {
    pub id: String,
    pub name: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<NetworkDnsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub federation: Option<NetworkFederationConfigs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_config: Option<NetworkSubscriberConfig>,
}

/// ===== Cellular =====
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkCellularConfigs {
    pub epc: NetworkEpcConfigs,
    pub ran: NetworkRanConfigs,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkEpcConfigs {
    pub mcc: String,
    pub mnc: String,
    pub tac: u32,
    pub lte_auth_amf: String,
    pub lte_auth_op: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_rule_id: Option<String>,

    #[serde(default)]
    pub network_services: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hss_relay_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gx_gy_relay_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_subscriberdb_enabled: Option<bool>,

    /// Data plans, keyed by plan name.
    #[serde(default)]
    pub sub_profiles: BTreeMap<String, SubProfile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobility: Option<Value>,
}

/// Bit rates of one data plan, in bits per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubProfile {
    pub max_dl_bit_rate: u64,
    pub max_ul_bit_rate: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkRanConfigs {
    pub bandwidth_mhz: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdd_config: Option<TddConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fdd_config: Option<FddConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TddConfig {
    pub earfcndl: u32,
    pub special_subframe_pattern: u32,
    pub subframe_assignment: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FddConfig {
    pub earfcndl: u32,
    pub earfcnul: u32,
}

/// ===== DNS =====
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkDnsConfig {
    #[serde(default)]
    pub enable_caching: bool,

    #[serde(default)]
    pub local_ttl: u32,

    #[serde(default)]
    pub records: Vec<DnsConfigRecord>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DnsConfigRecord {
    pub domain: String,

    #[serde(default)]
    pub a_record: Vec<String>,

    #[serde(default)]
    pub aaaa_record: Vec<String>,

    #[serde(default)]
    pub cname_record: Vec<String>,
}

/// ===== Subscriber config =====
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkSubscriberConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_wide_base_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_wide_rule_names: Option<Vec<String>>,
}

impl NetworkSubscriberConfig {
    pub fn rule_names(&self) -> &[String] {
        self.network_wide_rule_names.as_deref().unwrap_or_default()
    }
}

/// ===== Federation =====

/// Link from a federated LTE network to its federation gateway network.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FederatedNetworkConfigs {
    pub feg_network_id: String,
}

/// Federation gateway protocol settings (gx, gy, s6a, swx, ...). Only the
/// served networks are modelled, the protocol blocks are passed through.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkFederationConfigs {
    #[serde(default)]
    pub served_network_ids: Vec<String>,

    #[serde(flatten)]
    pub protocols: Map<String, Value>,
}
