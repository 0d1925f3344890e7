use super::{apply_update, read_or_default, WriteRequest};
use crate::api::FegNetworkApi;
use crate::models::{FegNetwork, NetworkFederationConfigs, NetworkSubscriberConfig};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FegNetworkPatch {
    pub network_id: String,

    #[serde(default)]
    pub feg_network: Option<FegNetwork>,

    #[serde(default)]
    pub federation: Option<NetworkFederationConfigs>,

    #[serde(default)]
    pub subscriber_config: Option<NetworkSubscriberConfig>,

    #[serde(default)]
    pub refresh: bool,
}

impl FegNetworkPatch {
    pub fn new(network_id: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            ..Default::default()
        }
    }
}

pub struct FegNetworkDispatcher<A: ?Sized> {
    api: Arc<A>,
}

impl<A> FegNetworkDispatcher<A>
where
    A: FegNetworkApi + ?Sized + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub fn write_requests(&self, patch: &FegNetworkPatch) -> Vec<WriteRequest> {
        let mut requests = Vec::new();
        let id = &patch.network_id;

        if let Some(network) = &patch.feg_network {
            let (api, id, network) = (self.api.clone(), id.clone(), network.clone());
            requests.push(WriteRequest::new("network", async move {
                api.put_feg_network(&id, &network).await
            }));
        }
        if let Some(federation) = &patch.federation {
            let (api, id, federation) = (self.api.clone(), id.clone(), federation.clone());
            requests.push(WriteRequest::new("federation", async move {
                api.put_feg_federation(&id, &federation).await
            }));
        }
        if let Some(config) = &patch.subscriber_config {
            let (api, id, config) = (self.api.clone(), id.clone(), config.clone());
            requests.push(WriteRequest::new("subscriber_config", async move {
                api.put_feg_subscriber_config(&id, &config).await
            }));
        }

        requests
    }

    pub async fn update<S>(&self, patch: FegNetworkPatch, set: S) -> Result<()>
    where
        S: FnOnce(FegNetwork),
    {
        let writes = self.write_requests(&patch);
        let api = self.api.clone();
        let id = patch.network_id.clone();

        apply_update(
            &patch.network_id,
            writes,
            patch.refresh,
            move || async move { load_feg_network(api.as_ref(), &id).await },
            set,
        )
        .await
    }
}

/// Read a federation network with its subscriber config; a failed
/// subscriber config read leaves an empty config in its place.
pub async fn load_feg_network<A>(api: &A, network_id: &str) -> Result<FegNetwork>
where
    A: FegNetworkApi + ?Sized,
{
    let (network, subscriber_config) = tokio::join!(
        api.get_feg_network(network_id),
        read_or_default(
            network_id,
            "subscriber config",
            api.get_feg_subscriber_config(network_id)
        ),
    );

    let mut network = network?;
    network.subscriber_config = Some(subscriber_config);
    Ok(network)
}
