//! In-memory orchestrator used by the unit tests.
//!
//! Every call is logged as `METHOD /path` before anything else happens, and
//! any call registered with [`FakeApi::fail_on`] fails with that status.

use crate::api::{
    Apns, BaseNames, EntityApi, EntityKind, FegLteNetworkApi, FegNetworkApi, GatewayPoolApi,
    Gateways, LteNetworkApi, PolicyRules, QosProfiles, RatingGroups, Tiers,
};
use crate::models::*;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

type Collection<T> = BTreeMap<String, BTreeMap<String, T>>;

#[derive(Default)]
pub struct FakeState {
    lte_networks: BTreeMap<String, LteNetwork>,
    feg_lte_networks: BTreeMap<String, FegLteNetwork>,
    feg_networks: BTreeMap<String, FegNetwork>,
    apns: Collection<Apn>,
    rules: Collection<PolicyRule>,
    qos_profiles: Collection<PolicyQosProfile>,
    rating_groups: Collection<RatingGroup>,
    base_names: Collection<BaseNameRecord>,
    gateways: Collection<LteGateway>,
    tiers: Collection<Tier>,
    pools: Collection<GatewayPool>,
}

impl FakeState {
    fn cellular_mut(&mut self, network_id: &str) -> Option<&mut Option<NetworkCellularConfigs>> {
        if let Some(network) = self.lte_networks.get_mut(network_id) {
            return Some(&mut network.cellular);
        }
        self.feg_lte_networks
            .get_mut(network_id)
            .map(|network| &mut network.cellular)
    }
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, (u16, String)>>,
}

impl FakeApi {
    pub fn with_lte_network(network_id: &str) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().lte_networks.insert(
            network_id.to_string(),
            LteNetwork {
                id: network_id.to_string(),
                name: format!("{} network", network_id),
                description: String::new(),
                cellular: Some(sample_cellular()),
                dns: Some(NetworkDnsConfig::default()),
                subscriber_config: None,
                features: None,
            },
        );
        api
    }

    /// A federated LTE network together with the federation network it links to.
    pub fn with_feg_lte_network(network_id: &str, feg_network_id: &str) -> Self {
        let api = Self::with_feg_network(feg_network_id);
        {
            let mut state = api.state.lock().unwrap();
            state.feg_lte_networks.insert(
                network_id.to_string(),
                FegLteNetwork {
                    id: network_id.to_string(),
                    name: format!("{} network", network_id),
                    description: String::new(),
                    cellular: Some(sample_cellular()),
                    dns: Some(NetworkDnsConfig::default()),
                    federation: Some(FederatedNetworkConfigs {
                        feg_network_id: feg_network_id.to_string(),
                    }),
                    subscriber_config: None,
                },
            );
            if let Some(feg) = state.feg_networks.get_mut(feg_network_id) {
                if let Some(federation) = feg.federation.as_mut() {
                    federation.served_network_ids.push(network_id.to_string());
                }
            }
        }
        api
    }

    pub fn with_feg_network(network_id: &str) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().feg_networks.insert(
            network_id.to_string(),
            FegNetwork {
                id: network_id.to_string(),
                name: format!("{} network", network_id),
                description: String::new(),
                dns: None,
                federation: Some(NetworkFederationConfigs::default()),
                subscriber_config: None,
            },
        );
        api
    }

    pub fn fail_on(&self, call: &str, status: u16, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(call.to_string(), (status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn lte_network(&self, network_id: &str) -> Option<LteNetwork> {
        self.state.lock().unwrap().lte_networks.get(network_id).cloned()
    }

    pub fn set_lte_subscriber_config(&self, network_id: &str, config: NetworkSubscriberConfig) {
        if let Some(network) = self.state.lock().unwrap().lte_networks.get_mut(network_id) {
            network.subscriber_config = Some(config);
        }
    }

    pub fn set_feg_lte_subscriber_config(&self, network_id: &str, config: NetworkSubscriberConfig) {
        if let Some(network) = self
            .state
            .lock()
            .unwrap()
            .feg_lte_networks
            .get_mut(network_id)
        {
            network.subscriber_config = Some(config);
        }
    }

    pub fn insert_apn(&self, network_id: &str, apn: Apn) {
        self.state
            .lock()
            .unwrap()
            .apns
            .entry(network_id.to_string())
            .or_default()
            .insert(apn.apn_name.clone(), apn);
    }

    pub fn insert_rule(&self, network_id: &str, rule: PolicyRule) {
        self.state
            .lock()
            .unwrap()
            .rules
            .entry(network_id.to_string())
            .or_default()
            .insert(rule.id.clone(), rule);
    }

    pub fn insert_gateway(&self, network_id: &str, gateway_id: &str, checkin_time: Option<i64>) {
        let gateway = LteGateway {
            id: gateway_id.to_string(),
            name: gateway_id.to_string(),
            description: String::new(),
            tier: "default".to_string(),
            device: None,
            magmad: None,
            cellular: None,
            connected_enodeb_serials: Vec::new(),
            status: Some(GatewayStatus {
                checkin_time,
                meta: None,
            }),
        };
        self.state
            .lock()
            .unwrap()
            .gateways
            .entry(network_id.to_string())
            .or_default()
            .insert(gateway_id.to_string(), gateway);
    }

    fn record(&self, call: String) -> Result<()> {
        let failure = self.failures.lock().unwrap().get(&call).cloned();
        self.calls.lock().unwrap().push(call);
        match failure {
            Some((status, message)) => Err(Error::Http {
                status,
                message: Some(message),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str, id: &str) -> Error {
    Error::Http {
        status: 404,
        message: Some(format!("{} '{}' not found", what, id)),
    }
}

pub fn sample_epc() -> NetworkEpcConfigs {
    NetworkEpcConfigs {
        mcc: "001".to_string(),
        mnc: "01".to_string(),
        tac: 1,
        lte_auth_amf: "gAA=".to_string(),
        lte_auth_op: "EREREREREREREREREREREQ==".to_string(),
        network_services: vec!["policy_enforcement".to_string()],
        ..Default::default()
    }
}

pub fn sample_ran() -> NetworkRanConfigs {
    NetworkRanConfigs {
        bandwidth_mhz: 20,
        tdd_config: Some(TddConfig {
            earfcndl: 44590,
            special_subframe_pattern: 7,
            subframe_assignment: 2,
        }),
        fdd_config: None,
    }
}

fn sample_cellular() -> NetworkCellularConfigs {
    NetworkCellularConfigs {
        epc: sample_epc(),
        ran: sample_ran(),
    }
}

pub fn sample_apn(name: &str) -> Apn {
    Apn {
        apn_name: name.to_string(),
        apn_configuration: ApnConfiguration {
            ambr: AggregatedMaximumBitrate {
                max_bandwidth_dl: 200_000_000,
                max_bandwidth_ul: 100_000_000,
            },
            qos_profile: ApnQosProfile {
                class_id: 9,
                preemption_capability: false,
                preemption_vulnerability: false,
                priority_level: 15,
            },
        },
    }
}

pub fn sample_rule(id: &str, priority: u32) -> PolicyRule {
    PolicyRule {
        id: id.to_string(),
        priority,
        flow_list: Vec::new(),
        monitoring_key: None,
        rating_group: None,
        qos_profile: None,
        redirect: None,
        tracking_type: None,
        app_name: None,
        app_service_type: None,
        assigned_subscribers: None,
        header_enrichment_targets: None,
    }
}

pub fn sample_tier(id: &str, version: &str) -> Tier {
    Tier {
        id: id.to_string(),
        name: id.to_string(),
        version: version.to_string(),
        images: Vec::new(),
        gateways: Vec::new(),
    }
}

#[async_trait]
impl LteNetworkApi for FakeApi {
    async fn get_lte_network(&self, network_id: &str) -> Result<LteNetwork> {
        self.record(format!("GET /lte/{}", network_id))?;
        self.lte_network(network_id)
            .ok_or_else(|| not_found("network", network_id))
    }

    async fn put_lte_network(&self, network_id: &str, network: &LteNetwork) -> Result<()> {
        self.record(format!("PUT /lte/{}", network_id))?;
        self.state
            .lock()
            .unwrap()
            .lte_networks
            .insert(network_id.to_string(), network.clone());
        Ok(())
    }

    async fn put_lte_epc(&self, network_id: &str, config: &NetworkEpcConfigs) -> Result<()> {
        self.record(format!("PUT /lte/{}/cellular/epc", network_id))?;
        if let Some(cellular) = self.state.lock().unwrap().cellular_mut(network_id) {
            let ran = cellular.take().map(|c| c.ran).unwrap_or_default();
            *cellular = Some(NetworkCellularConfigs {
                epc: config.clone(),
                ran,
            });
        }
        Ok(())
    }

    async fn put_lte_ran(&self, network_id: &str, config: &NetworkRanConfigs) -> Result<()> {
        self.record(format!("PUT /lte/{}/cellular/ran", network_id))?;
        if let Some(cellular) = self.state.lock().unwrap().cellular_mut(network_id) {
            let epc = cellular.take().map(|c| c.epc).unwrap_or_default();
            *cellular = Some(NetworkCellularConfigs {
                epc,
                ran: config.clone(),
            });
        }
        Ok(())
    }

    async fn put_lte_dns(&self, network_id: &str, config: &NetworkDnsConfig) -> Result<()> {
        self.record(format!("PUT /lte/{}/dns", network_id))?;
        if let Some(network) = self.state.lock().unwrap().lte_networks.get_mut(network_id) {
            network.dns = Some(config.clone());
        }
        Ok(())
    }

    async fn put_lte_subscriber_config(
        &self,
        network_id: &str,
        config: &NetworkSubscriberConfig,
    ) -> Result<()> {
        self.record(format!("PUT /lte/{}/subscriber_config", network_id))?;
        self.set_lte_subscriber_config(network_id, config.clone());
        Ok(())
    }
}

#[async_trait]
impl FegLteNetworkApi for FakeApi {
    /// The subscriber config is served by its own endpoint only.
    async fn get_feg_lte_network(&self, network_id: &str) -> Result<FegLteNetwork> {
        self.record(format!("GET /feg_lte/{}", network_id))?;
        let mut network = self
            .state
            .lock()
            .unwrap()
            .feg_lte_networks
            .get(network_id)
            .cloned()
            .ok_or_else(|| not_found("network", network_id))?;
        network.subscriber_config = None;
        Ok(network)
    }

    async fn get_feg_lte_subscriber_config(
        &self,
        network_id: &str,
    ) -> Result<NetworkSubscriberConfig> {
        self.record(format!("GET /feg_lte/{}/subscriber_config", network_id))?;
        let state = self.state.lock().unwrap();
        let network = state
            .feg_lte_networks
            .get(network_id)
            .ok_or_else(|| not_found("network", network_id))?;
        Ok(network.subscriber_config.clone().unwrap_or_default())
    }

    async fn put_feg_lte_network(&self, network_id: &str, network: &FegLteNetwork) -> Result<()> {
        self.record(format!("PUT /feg_lte/{}", network_id))?;
        self.state
            .lock()
            .unwrap()
            .feg_lte_networks
            .insert(network_id.to_string(), network.clone());
        Ok(())
    }

    async fn put_feg_lte_federation(
        &self,
        network_id: &str,
        config: &FederatedNetworkConfigs,
    ) -> Result<()> {
        self.record(format!("PUT /feg_lte/{}/federation", network_id))?;
        if let Some(network) = self
            .state
            .lock()
            .unwrap()
            .feg_lte_networks
            .get_mut(network_id)
        {
            network.federation = Some(config.clone());
        }
        Ok(())
    }

    async fn put_feg_lte_dns(&self, network_id: &str, config: &NetworkDnsConfig) -> Result<()> {
        self.record(format!("PUT /feg_lte/{}/dns", network_id))?;
        if let Some(network) = self
            .state
            .lock()
            .unwrap()
            .feg_lte_networks
            .get_mut(network_id)
        {
            network.dns = Some(config.clone());
        }
        Ok(())
    }

    async fn put_feg_lte_subscriber_config(
        &self,
        network_id: &str,
        config: &NetworkSubscriberConfig,
    ) -> Result<()> {
        self.record(format!("PUT /feg_lte/{}/subscriber_config", network_id))?;
        self.set_feg_lte_subscriber_config(network_id, config.clone());
        Ok(())
    }
}

#[async_trait]
impl FegNetworkApi for FakeApi {
    async fn get_feg_network(&self, network_id: &str) -> Result<FegNetwork> {
        self.record(format!("GET /feg/{}", network_id))?;
        let mut network = self
            .state
            .lock()
            .unwrap()
            .feg_networks
            .get(network_id)
            .cloned()
            .ok_or_else(|| not_found("network", network_id))?;
        network.subscriber_config = None;
        Ok(network)
    }

    async fn get_feg_subscriber_config(
        &self,
        network_id: &str,
    ) -> Result<NetworkSubscriberConfig> {
        self.record(format!("GET /feg/{}/subscriber_config", network_id))?;
        let state = self.state.lock().unwrap();
        let network = state
            .feg_networks
            .get(network_id)
            .ok_or_else(|| not_found("network", network_id))?;
        Ok(network.subscriber_config.clone().unwrap_or_default())
    }

    async fn put_feg_network(&self, network_id: &str, network: &FegNetwork) -> Result<()> {
        self.record(format!("PUT /feg/{}", network_id))?;
        self.state
            .lock()
            .unwrap()
            .feg_networks
            .insert(network_id.to_string(), network.clone());
        Ok(())
    }

    async fn put_feg_federation(
        &self,
        network_id: &str,
        config: &NetworkFederationConfigs,
    ) -> Result<()> {
        self.record(format!("PUT /feg/{}/federation", network_id))?;
        if let Some(network) = self.state.lock().unwrap().feg_networks.get_mut(network_id) {
            network.federation = Some(config.clone());
        }
        Ok(())
    }

    async fn put_feg_subscriber_config(
        &self,
        network_id: &str,
        config: &NetworkSubscriberConfig,
    ) -> Result<()> {
        self.record(format!("PUT /feg/{}/subscriber_config", network_id))?;
        if let Some(network) = self.state.lock().unwrap().feg_networks.get_mut(network_id) {
            network.subscriber_config = Some(config.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl GatewayPoolApi for FakeApi {
    async fn list_gateway_pools(&self, network_id: &str) -> Result<BTreeMap<String, GatewayPool>> {
        self.record(format!("GET /lte/{}/gateway_pools", network_id))?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .pools
            .get(network_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_gateway_pool(&self, network_id: &str, pool_id: &str) -> Result<GatewayPool> {
        self.record(format!("GET /lte/{}/gateway_pools/{}", network_id, pool_id))?;
        self.state
            .lock()
            .unwrap()
            .pools
            .get(network_id)
            .and_then(|pools| pools.get(pool_id))
            .cloned()
            .ok_or_else(|| not_found("gateway pool", pool_id))
    }

    async fn create_gateway_pool(&self, network_id: &str, pool: &MutableGatewayPool) -> Result<()> {
        self.record(format!("POST /lte/{}/gateway_pools", network_id))?;
        self.state
            .lock()
            .unwrap()
            .pools
            .entry(network_id.to_string())
            .or_default()
            .insert(
                pool.gateway_pool_id.clone(),
                GatewayPool {
                    gateway_pool_id: pool.gateway_pool_id.clone(),
                    gateway_pool_name: pool.gateway_pool_name.clone(),
                    config: pool.config.clone(),
                    gateway_ids: Vec::new(),
                },
            );
        Ok(())
    }

    async fn put_gateway_pool(
        &self,
        network_id: &str,
        pool_id: &str,
        pool: &MutableGatewayPool,
    ) -> Result<()> {
        self.record(format!("PUT /lte/{}/gateway_pools/{}", network_id, pool_id))?;
        let mut state = self.state.lock().unwrap();
        let existing = state
            .pools
            .get_mut(network_id)
            .and_then(|pools| pools.get_mut(pool_id))
            .ok_or_else(|| not_found("gateway pool", pool_id))?;
        existing.gateway_pool_name = pool.gateway_pool_name.clone();
        existing.config = pool.config.clone();
        Ok(())
    }

    async fn delete_gateway_pool(&self, network_id: &str, pool_id: &str) -> Result<()> {
        self.record(format!("DELETE /lte/{}/gateway_pools/{}", network_id, pool_id))?;
        if let Some(pools) = self.state.lock().unwrap().pools.get_mut(network_id) {
            pools.remove(pool_id);
        }
        Ok(())
    }

    async fn update_gateway_pool_records(
        &self,
        network_id: &str,
        pool: &MutableGatewayPool,
        records: &[GatewayPoolRecord],
    ) -> Result<()> {
        self.record(format!(
            "PUT /lte/{}/gateway_pools/{}/records",
            network_id, pool.gateway_pool_id
        ))?;
        self.state
            .lock()
            .unwrap()
            .pools
            .entry(network_id.to_string())
            .or_default()
            .insert(
                pool.gateway_pool_id.clone(),
                GatewayPool {
                    gateway_pool_id: pool.gateway_pool_id.clone(),
                    gateway_pool_name: pool.gateway_pool_name.clone(),
                    config: pool.config.clone(),
                    gateway_ids: records.iter().map(|r| r.gateway_id.clone()).collect(),
                },
            );
        Ok(())
    }
}

/// Where each entity kind lives, both in the fake state and on the wire.
pub trait FakeCollection: EntityKind {
    fn collection_path(network_id: &str) -> String;
    fn table(state: &mut FakeState) -> &mut Collection<Self::Value>;
}

impl FakeCollection for Apns {
    fn collection_path(network_id: &str) -> String {
        format!("/lte/{}/apns", network_id)
    }

    fn table(state: &mut FakeState) -> &mut Collection<Apn> {
        &mut state.apns
    }
}

impl FakeCollection for PolicyRules {
    fn collection_path(network_id: &str) -> String {
        format!("/networks/{}/policies/rules", network_id)
    }

    fn table(state: &mut FakeState) -> &mut Collection<PolicyRule> {
        &mut state.rules
    }
}

impl FakeCollection for QosProfiles {
    fn collection_path(network_id: &str) -> String {
        format!("/lte/{}/policy_qos_profiles", network_id)
    }

    fn table(state: &mut FakeState) -> &mut Collection<PolicyQosProfile> {
        &mut state.qos_profiles
    }
}

impl FakeCollection for RatingGroups {
    fn collection_path(network_id: &str) -> String {
        format!("/networks/{}/rating_groups", network_id)
    }

    fn table(state: &mut FakeState) -> &mut Collection<RatingGroup> {
        &mut state.rating_groups
    }
}

impl FakeCollection for BaseNames {
    fn collection_path(network_id: &str) -> String {
        format!("/networks/{}/policies/base_names", network_id)
    }

    fn table(state: &mut FakeState) -> &mut Collection<BaseNameRecord> {
        &mut state.base_names
    }
}

impl FakeCollection for Gateways {
    fn collection_path(network_id: &str) -> String {
        format!("/lte/{}/gateways", network_id)
    }

    fn table(state: &mut FakeState) -> &mut Collection<LteGateway> {
        &mut state.gateways
    }
}

impl FakeCollection for Tiers {
    fn collection_path(network_id: &str) -> String {
        format!("/networks/{}/tiers", network_id)
    }

    fn table(state: &mut FakeState) -> &mut Collection<Tier> {
        &mut state.tiers
    }
}

#[async_trait]
impl<E: FakeCollection> EntityApi<E> for FakeApi {
    async fn list(&self, network_id: &str) -> Result<BTreeMap<String, E::Value>> {
        self.record(format!("GET {}", E::collection_path(network_id)))?;
        let mut state = self.state.lock().unwrap();
        Ok(E::table(&mut state)
            .get(network_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(&self, network_id: &str, key: &str) -> Result<E::Value> {
        self.record(format!("GET {}/{}", E::collection_path(network_id), key))?;
        let mut state = self.state.lock().unwrap();
        E::table(&mut state)
            .get(network_id)
            .and_then(|entities| entities.get(key))
            .cloned()
            .ok_or_else(|| not_found(E::NAME, key))
    }

    async fn create(&self, network_id: &str, value: &E::Value) -> Result<()> {
        self.record(format!("POST {}", E::collection_path(network_id)))?;
        let mut state = self.state.lock().unwrap();
        E::table(&mut state)
            .entry(network_id.to_string())
            .or_default()
            .insert(E::key_of(value), value.clone());
        Ok(())
    }

    async fn replace(&self, network_id: &str, key: &str, value: &E::Value) -> Result<()> {
        self.record(format!("PUT {}/{}", E::collection_path(network_id), key))?;
        let mut state = self.state.lock().unwrap();
        E::table(&mut state)
            .entry(network_id.to_string())
            .or_default()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, network_id: &str, key: &str) -> Result<()> {
        self.record(format!("DELETE {}/{}", E::collection_path(network_id), key))?;
        let mut state = self.state.lock().unwrap();
        if let Some(entities) = E::table(&mut state).get_mut(network_id) {
            entities.remove(key);
        }
        Ok(())
    }
}
