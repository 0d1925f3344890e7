use super::{apply_update, WriteRequest};
use crate::api::LteNetworkApi;
use crate::models::{
    LteNetwork, NetworkDnsConfig, NetworkEpcConfigs, NetworkRanConfigs, NetworkSubscriberConfig,
};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sparse update of an LTE network. `None` sections are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LteNetworkPatch {
    pub network_id: String,

    #[serde(default)]
    pub lte_network: Option<LteNetwork>,

    #[serde(default)]
    pub epc_configs: Option<NetworkEpcConfigs>,

    #[serde(default)]
    pub lte_ran_configs: Option<NetworkRanConfigs>,

    #[serde(default)]
    pub lte_dns_config: Option<NetworkDnsConfig>,

    #[serde(default)]
    pub subscriber_config: Option<NetworkSubscriberConfig>,

    #[serde(default)]
    pub refresh: bool,
}

impl LteNetworkPatch {
    pub fn new(network_id: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            ..Default::default()
        }
    }
}

pub struct LteNetworkDispatcher<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> Clone for LteNetworkDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<A> LteNetworkDispatcher<A>
where
    A: LteNetworkApi + ?Sized + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Build the write requests for every present section of `patch`.
    pub fn write_requests(&self, patch: &LteNetworkPatch) -> Vec<WriteRequest> {
        let mut requests = Vec::new();
        let id = &patch.network_id;

        if let Some(network) = &patch.lte_network {
            let (api, id, network) = (self.api.clone(), id.clone(), network.clone());
            requests.push(WriteRequest::new("network", async move {
                api.put_lte_network(&id, &network).await
            }));
        }
        requests.extend(self.cellular_requests(
            id,
            patch.epc_configs.as_ref(),
            patch.lte_ran_configs.as_ref(),
        ));
        if let Some(dns) = &patch.lte_dns_config {
            let (api, id, dns) = (self.api.clone(), id.clone(), dns.clone());
            requests.push(WriteRequest::new("dns", async move {
                api.put_lte_dns(&id, &dns).await
            }));
        }
        if let Some(config) = &patch.subscriber_config {
            let (api, id, config) = (self.api.clone(), id.clone(), config.clone());
            requests.push(WriteRequest::new("subscriber_config", async move {
                api.put_lte_subscriber_config(&id, &config).await
            }));
        }

        requests
    }

    /// EPC and RAN writes, shared with federated LTE networks.
    pub fn cellular_requests(
        &self,
        network_id: &str,
        epc: Option<&NetworkEpcConfigs>,
        ran: Option<&NetworkRanConfigs>,
    ) -> Vec<WriteRequest> {
        let mut requests = Vec::new();

        if let Some(epc) = epc {
            let (api, id, epc) = (self.api.clone(), network_id.to_string(), epc.clone());
            requests.push(WriteRequest::new("epc", async move {
                api.put_lte_epc(&id, &epc).await
            }));
        }
        if let Some(ran) = ran {
            let (api, id, ran) = (self.api.clone(), network_id.to_string(), ran.clone());
            requests.push(WriteRequest::new("ran", async move {
                api.put_lte_ran(&id, &ran).await
            }));
        }

        requests
    }

    pub async fn update<S>(&self, patch: LteNetworkPatch, set: S) -> Result<()>
    where
        S: FnOnce(LteNetwork),
    {
        let writes = self.write_requests(&patch);
        let api = self.api.clone();
        let id = patch.network_id.clone();

        apply_update(
            &patch.network_id,
            writes,
            patch.refresh,
            || async move { api.get_lte_network(&id).await },
            set,
        )
        .await
    }
}
