use super::{apply_update, read_or_default, LteNetworkDispatcher, WriteRequest};
use crate::api::FegLteNetworkApi;
use crate::models::{
    FederatedNetworkConfigs, FegLteNetwork, NetworkDnsConfig, NetworkEpcConfigs,
    NetworkRanConfigs, NetworkSubscriberConfig,
};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FegLteNetworkPatch {
    pub network_id: String,

    #[serde(default)]
    pub feg_lte_network: Option<FegLteNetwork>,

    #[serde(default)]
    pub epc_configs: Option<NetworkEpcConfigs>,

    #[serde(default)]
    pub lte_ran_configs: Option<NetworkRanConfigs>,

    #[serde(default)]
    pub lte_dns_config: Option<NetworkDnsConfig>,

    #[serde(default)]
    pub federation: Option<FederatedNetworkConfigs>,

    #[serde(default)]
    pub subscriber_config: Option<NetworkSubscriberConfig>,

    #[serde(default)]
    pub refresh: bool,
}

impl FegLteNetworkPatch {
    pub fn new(network_id: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            ..Default::default()
        }
    }
}

/// Federated LTE networks. EPC and RAN go through the LTE dispatcher.
pub struct FegLteNetworkDispatcher<A: ?Sized> {
    api: Arc<A>,
    lte: LteNetworkDispatcher<A>,
}

impl<A> FegLteNetworkDispatcher<A>
where
    A: FegLteNetworkApi + ?Sized + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self {
            lte: LteNetworkDispatcher::new(api.clone()),
            api,
        }
    }

    pub fn write_requests(&self, patch: &FegLteNetworkPatch) -> Vec<WriteRequest> {
        let mut requests = Vec::new();
        let id = &patch.network_id;

        if let Some(network) = &patch.feg_lte_network {
            let (api, id, network) = (self.api.clone(), id.clone(), network.clone());
            requests.push(WriteRequest::new("network", async move {
                api.put_feg_lte_network(&id, &network).await
            }));
        }
        requests.extend(self.lte.cellular_requests(
            id,
            patch.epc_configs.as_ref(),
            patch.lte_ran_configs.as_ref(),
        ));
        if let Some(dns) = &patch.lte_dns_config {
            let (api, id, dns) = (self.api.clone(), id.clone(), dns.clone());
            requests.push(WriteRequest::new("dns", async move {
                api.put_feg_lte_dns(&id, &dns).await
            }));
        }
        if let Some(federation) = &patch.federation {
            let (api, id, federation) = (self.api.clone(), id.clone(), federation.clone());
            requests.push(WriteRequest::new("federation", async move {
                api.put_feg_lte_federation(&id, &federation).await
            }));
        }
        if let Some(config) = &patch.subscriber_config {
            let (api, id, config) = (self.api.clone(), id.clone(), config.clone());
            requests.push(WriteRequest::new("subscriber_config", async move {
                api.put_feg_lte_subscriber_config(&id, &config).await
            }));
        }

        requests
    }

    pub async fn update<S>(&self, patch: FegLteNetworkPatch, set: S) -> Result<()>
    where
        S: FnOnce(FegLteNetwork),
    {
        let writes = self.write_requests(&patch);
        let api = self.api.clone();
        let id = patch.network_id.clone();

        apply_update(
            &patch.network_id,
            writes,
            patch.refresh,
            move || async move { load_feg_lte_network(api.as_ref(), &id).await },
            set,
        )
        .await
    }
}

/// Read a federated LTE network together with its subscriber config.
/// A failed subscriber config read leaves an empty config in its place.
pub async fn load_feg_lte_network<A>(api: &A, network_id: &str) -> Result<FegLteNetwork>
where
    A: FegLteNetworkApi + ?Sized,
{
    let (network, subscriber_config) = tokio::join!(
        api.get_feg_lte_network(network_id),
        read_or_default(
            network_id,
            "subscriber config",
            api.get_feg_lte_subscriber_config(network_id)
        ),
    );

    let mut network = network?;
    network.subscriber_config = Some(subscriber_config);
    Ok(network)
}
