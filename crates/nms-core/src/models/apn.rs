use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apn {
    pub apn_name: String,
    pub apn_configuration: ApnConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApnConfiguration {
    pub ambr: AggregatedMaximumBitrate,
    pub qos_profile: ApnQosProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedMaximumBitrate {
    pub max_bandwidth_dl: u64,
    pub max_bandwidth_ul: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnQosProfile {
    pub class_id: u32,
    pub preemption_capability: bool,
    pub preemption_vulnerability: bool,
    pub priority_level: u32,
}
