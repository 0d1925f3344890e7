use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    pub id: String,
    pub priority: u32,

    #[serde(default)]
    pub flow_list: Vec<FlowDescription>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_group: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qos_profile: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RedirectInformation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_service_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_subscribers: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_enrichment_targets: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDescription {
    /// PERMIT or DENY
    pub action: String,

    /// Match criteria, passed through as sent by the orchestrator.
    #[serde(rename = "match")]
    pub flow_match: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RedirectInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyQosProfile {
    pub id: String,
    pub class_id: u32,
    pub max_req_bw_ul: u64,
    pub max_req_bw_dl: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gbr: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arp: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingGroup {
    pub id: u32,

    /// FINITE, INFINITE_UNMETERED or INFINITE_METERED
    pub limit_type: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseNameRecord {
    pub name: String,

    #[serde(default)]
    pub rule_names: Vec<String>,

    #[serde(default)]
    pub assigned_subscribers: Vec<String>,
}
