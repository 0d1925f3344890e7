mod apn;
mod gateway;
mod network;
mod policy;

pub use apn::{AggregatedMaximumBitrate, Apn, ApnConfiguration, ApnQosProfile};
pub use gateway::{
    GatewayPool, GatewayPoolConfigs, GatewayPoolRecord, GatewayPoolState, GatewayStatus,
    LteGateway, MutableGatewayPool, PoolRole, Tier, TierImage,
};
pub use network::{
    DnsConfigRecord, FddConfig, FederatedNetworkConfigs, FegLteNetwork, FegNetwork, LteNetwork,
    NetworkCellularConfigs, NetworkDnsConfig, NetworkEpcConfigs, NetworkFederationConfigs,
    NetworkRanConfigs, NetworkSubscriberConfig, SubProfile, TddConfig,
};
pub use policy::{
    BaseNameRecord, FlowDescription, PolicyQosProfile, PolicyRule, RatingGroup,
    RedirectInformation,
};
