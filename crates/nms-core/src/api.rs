//! Remote orchestrator API, as seen by the dispatchers.
//!
//! Each trait covers one family of endpoints. Implementations send one
//! request per call and return the typed response or an [`Error`](crate::Error).

use crate::models::{
    Apn, BaseNameRecord, FederatedNetworkConfigs, FegLteNetwork, FegNetwork, GatewayPool,
    GatewayPoolRecord, LteGateway, LteNetwork, MutableGatewayPool, NetworkDnsConfig,
    NetworkEpcConfigs, NetworkFederationConfigs, NetworkRanConfigs, NetworkSubscriberConfig,
    PolicyQosProfile, PolicyRule, RatingGroup, Tier,
};
use crate::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

#[async_trait]
pub trait LteNetworkApi: Send + Sync {
    async fn get_lte_network(&self, network_id: &str) -> Result<LteNetwork>;
    async fn put_lte_network(&self, network_id: &str, network: &LteNetwork) -> Result<()>;
    async fn put_lte_epc(&self, network_id: &str, config: &NetworkEpcConfigs) -> Result<()>;
    async fn put_lte_ran(&self, network_id: &str, config: &NetworkRanConfigs) -> Result<()>;
    async fn put_lte_dns(&self, network_id: &str, config: &NetworkDnsConfig) -> Result<()>;
    async fn put_lte_subscriber_config(
        &self,
        network_id: &str,
        config: &NetworkSubscriberConfig,
    ) -> Result<()>;
}

/// Federated LTE networks share the cellular endpoints of plain LTE networks.
#[async_trait]
pub trait FegLteNetworkApi: LteNetworkApi {
    async fn get_feg_lte_network(&self, network_id: &str) -> Result<FegLteNetwork>;
    async fn get_feg_lte_subscriber_config(
        &self,
        network_id: &str,
    ) -> Result<NetworkSubscriberConfig>;
    async fn put_feg_lte_network(&self, network_id: &str, network: &FegLteNetwork) -> Result<()>;
    async fn put_feg_lte_federation(
        &self,
        network_id: &str,
        config: &FederatedNetworkConfigs,
    ) -> Result<()>;
    async fn put_feg_lte_dns(&self, network_id: &str, config: &NetworkDnsConfig) -> Result<()>;
    async fn put_feg_lte_subscriber_config(
        &self,
        network_id: &str,
        config: &NetworkSubscriberConfig,
    ) -> Result<()>;
}

#[async_trait]
pub trait FegNetworkApi: Send + Sync {
    async fn get_feg_network(&self, network_id: &str) -> Result<FegNetwork>;
    async fn get_feg_subscriber_config(&self, network_id: &str)
        -> Result<NetworkSubscriberConfig>;
    async fn put_feg_network(&self, network_id: &str, network: &FegNetwork) -> Result<()>;
    async fn put_feg_federation(
        &self,
        network_id: &str,
        config: &NetworkFederationConfigs,
    ) -> Result<()>;
    async fn put_feg_subscriber_config(
        &self,
        network_id: &str,
        config: &NetworkSubscriberConfig,
    ) -> Result<()>;
}

#[async_trait]
pub trait GatewayPoolApi: Send + Sync {
    async fn list_gateway_pools(&self, network_id: &str) -> Result<BTreeMap<String, GatewayPool>>;
    async fn get_gateway_pool(&self, network_id: &str, pool_id: &str) -> Result<GatewayPool>;
    async fn create_gateway_pool(&self, network_id: &str, pool: &MutableGatewayPool) -> Result<()>;
    async fn put_gateway_pool(
        &self,
        network_id: &str,
        pool_id: &str,
        pool: &MutableGatewayPool,
    ) -> Result<()>;
    async fn delete_gateway_pool(&self, network_id: &str, pool_id: &str) -> Result<()>;

    /// Writes the pool config and its member records in one request.
    async fn update_gateway_pool_records(
        &self,
        network_id: &str,
        pool: &MutableGatewayPool,
        records: &[GatewayPoolRecord],
    ) -> Result<()>;
}

/// A keyed collection of single entities managed with plain REST semantics.
pub trait EntityKind: Send + Sync + 'static {
    type Value: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Human readable name, used in logs.
    const NAME: &'static str;

    /// Key the entity is stored under in its collection.
    fn key_of(value: &Self::Value) -> String;
}

/// POST create, PUT replace, DELETE and GET by key.
#[async_trait]
pub trait EntityApi<E: EntityKind>: Send + Sync {
    async fn list(&self, network_id: &str) -> Result<BTreeMap<String, E::Value>>;
    async fn get(&self, network_id: &str, key: &str) -> Result<E::Value>;
    async fn create(&self, network_id: &str, value: &E::Value) -> Result<()>;
    async fn replace(&self, network_id: &str, key: &str, value: &E::Value) -> Result<()>;
    async fn delete(&self, network_id: &str, key: &str) -> Result<()>;
}

pub struct Apns;

impl EntityKind for Apns {
    type Value = Apn;
    const NAME: &'static str = "apn";

    fn key_of(value: &Apn) -> String {
        value.apn_name.clone()
    }
}

pub struct PolicyRules;

impl EntityKind for PolicyRules {
    type Value = PolicyRule;
    const NAME: &'static str = "policy rule";

    fn key_of(value: &PolicyRule) -> String {
        value.id.clone()
    }
}

pub struct QosProfiles;

impl EntityKind for QosProfiles {
    type Value = PolicyQosProfile;
    const NAME: &'static str = "qos profile";

    fn key_of(value: &PolicyQosProfile) -> String {
        value.id.clone()
    }
}

pub struct RatingGroups;

impl EntityKind for RatingGroups {
    type Value = RatingGroup;
    const NAME: &'static str = "rating group";

    fn key_of(value: &RatingGroup) -> String {
        value.id.to_string()
    }
}

pub struct BaseNames;

impl EntityKind for BaseNames {
    type Value = BaseNameRecord;
    const NAME: &'static str = "base name";

    fn key_of(value: &BaseNameRecord) -> String {
        value.name.clone()
    }
}

/// LTE gateways, keyed by gateway id. Reads carry the reported status.
pub struct Gateways;

impl EntityKind for Gateways {
    type Value = LteGateway;
    const NAME: &'static str = "gateway";

    fn key_of(value: &LteGateway) -> String {
        value.id.clone()
    }
}

pub struct Tiers;

impl EntityKind for Tiers {
    type Value = Tier;
    const NAME: &'static str = "tier";

    fn key_of(value: &Tier) -> String {
        value.id.clone()
    }
}

/// Everything the NMS talks to, bundled for callers that hold one client.
pub trait MagmaApi:
    FegLteNetworkApi
    + FegNetworkApi
    + GatewayPoolApi
    + EntityApi<Gateways>
    + EntityApi<Tiers>
    + EntityApi<Apns>
    + EntityApi<PolicyRules>
    + EntityApi<QosProfiles>
    + EntityApi<RatingGroups>
    + EntityApi<BaseNames>
{
}

impl<T> MagmaApi for T where
    T: FegLteNetworkApi
        + FegNetworkApi
        + GatewayPoolApi
        + EntityApi<Gateways>
        + EntityApi<Tiers>
        + EntityApi<Apns>
        + EntityApi<PolicyRules>
        + EntityApi<QosProfiles>
        + EntityApi<RatingGroups>
        + EntityApi<BaseNames>
{
}
