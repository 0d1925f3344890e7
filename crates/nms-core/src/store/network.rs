use super::Store;
use crate::api::{FegLteNetworkApi, FegNetworkApi};
use crate::dispatch::{
    FegLteNetworkDispatcher, FegLteNetworkPatch, FegNetworkDispatcher, FegNetworkPatch,
    LteNetworkDispatcher, LteNetworkPatch,
};
use crate::models::{
    FederatedNetworkConfigs, FegLteNetwork, FegNetwork, LteNetwork, NetworkDnsConfig,
    NetworkEpcConfigs, NetworkRanConfigs, NetworkSubscriberConfig,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkKind {
    Lte,
    FegLte,
}

/// Current state of an LTE or federated LTE network.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NetworkSnapshot {
    Lte(LteNetwork),
    FegLte(FegLteNetwork),
}

impl NetworkSnapshot {
    pub fn id(&self) -> &str {
        match self {
            NetworkSnapshot::Lte(n) => &n.id,
            NetworkSnapshot::FegLte(n) => &n.id,
        }
    }

    pub fn epc(&self) -> Option<&NetworkEpcConfigs> {
        let cellular = match self {
            NetworkSnapshot::Lte(n) => n.cellular.as_ref(),
            NetworkSnapshot::FegLte(n) => n.cellular.as_ref(),
        };
        cellular.map(|c| &c.epc)
    }

    pub fn subscriber_config(&self) -> Option<&NetworkSubscriberConfig> {
        match self {
            NetworkSnapshot::Lte(n) => n.subscriber_config.as_ref(),
            NetworkSnapshot::FegLte(n) => n.subscriber_config.as_ref(),
        }
    }

    /// Federation network this network is linked to, if any.
    pub fn feg_network_id(&self) -> Option<&str> {
        match self {
            NetworkSnapshot::Lte(_) => None,
            NetworkSnapshot::FegLte(n) => n
                .federation
                .as_ref()
                .map(|f| f.feg_network_id.as_str())
                .filter(|id| !id.is_empty()),
        }
    }
}

/// Section edits for either network kind. Base info goes in the field
/// matching the store's kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkUpdate {
    pub network_id: String,

    #[serde(default)]
    pub lte_network: Option<LteNetwork>,

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
}

impl NetworkUpdate {
    pub fn new(network_id: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            ..Default::default()
        }
    }
}

pub struct LteNetworkStore<A: ?Sized> {
    network_id: String,
    kind: NetworkKind,
    lte: LteNetworkDispatcher<A>,
    feg_lte: FegLteNetworkDispatcher<A>,
    state: Store<NetworkSnapshot>,
}

impl<A> LteNetworkStore<A>
where
    A: FegLteNetworkApi + ?Sized + 'static,
{
    pub fn new(api: Arc<A>, initial: NetworkSnapshot) -> Self {
        let kind = match initial {
            NetworkSnapshot::Lte(_) => NetworkKind::Lte,
            NetworkSnapshot::FegLte(_) => NetworkKind::FegLte,
        };
        Self {
            network_id: initial.id().to_string(),
            kind,
            lte: LteNetworkDispatcher::new(api.clone()),
            feg_lte: FegLteNetworkDispatcher::new(api),
            state: Store::new(initial),
        }
    }

    pub async fn load(api: Arc<A>, network_id: &str, kind: NetworkKind) -> Result<Self> {
        let initial = match kind {
            NetworkKind::Lte => NetworkSnapshot::Lte(api.get_lte_network(network_id).await?),
            NetworkKind::FegLte => NetworkSnapshot::FegLte(
                crate::dispatch::load_feg_lte_network(api.as_ref(), network_id).await?,
            ),
        };
        Ok(Self::new(api, initial))
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    pub fn state(&self) -> &Store<NetworkSnapshot> {
        &self.state
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        self.state.snapshot()
    }

    /// Write the sections of `update`. Canonical state is refreshed only when
    /// the update targets this store's own network.
    pub async fn update_networks(&self, update: NetworkUpdate) -> Result<()> {
        let refresh = update.network_id == self.network_id;
        if !refresh {
            info!(
                "[{}] Updating network '{}' without refresh",
                self.network_id, update.network_id
            );
        }

        match self.kind {
            NetworkKind::Lte => {
                if update.feg_lte_network.is_some() || update.federation.is_some() {
                    return Err(Error::InvalidPatch(
                        "federation sections do not apply to an LTE network".to_string(),
                    ));
                }
                let patch = LteNetworkPatch {
                    network_id: update.network_id,
                    lte_network: update.lte_network,
                    epc_configs: update.epc_configs,
                    lte_ran_configs: update.lte_ran_configs,
                    lte_dns_config: update.lte_dns_config,
                    subscriber_config: update.subscriber_config,
                    refresh,
                };
                self.lte
                    .update(patch, |network| {
                        self.state.replace(NetworkSnapshot::Lte(network))
                    })
                    .await
            }
            NetworkKind::FegLte => {
                if update.lte_network.is_some() {
                    return Err(Error::InvalidPatch(
                        "use feg_lte_network for the base info of a federated LTE network"
                            .to_string(),
                    ));
                }
                let patch = FegLteNetworkPatch {
                    network_id: update.network_id,
                    feg_lte_network: update.feg_lte_network,
                    epc_configs: update.epc_configs,
                    lte_ran_configs: update.lte_ran_configs,
                    lte_dns_config: update.lte_dns_config,
                    federation: update.federation,
                    subscriber_config: update.subscriber_config,
                    refresh,
                };
                self.feg_lte
                    .update(patch, |network| {
                        self.state.replace(NetworkSnapshot::FegLte(network))
                    })
                    .await
            }
        }
    }
}

/// State of one federation gateway network.
pub struct FegNetworkStore<A: ?Sized> {
    network_id: String,
    dispatcher: FegNetworkDispatcher<A>,
    state: Store<FegNetwork>,
}

impl<A> FegNetworkStore<A>
where
    A: FegNetworkApi + ?Sized + 'static,
{
    pub fn new(api: Arc<A>, initial: FegNetwork) -> Self {
        Self {
            network_id: initial.id.clone(),
            dispatcher: FegNetworkDispatcher::new(api),
            state: Store::new(initial),
        }
    }

    pub async fn load(api: Arc<A>, network_id: &str) -> Result<Self> {
        let initial = crate::dispatch::load_feg_network(api.as_ref(), network_id).await?;
        Ok(Self::new(api, initial))
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn snapshot(&self) -> FegNetwork {
        self.state.snapshot()
    }

    pub async fn update(&self, mut patch: FegNetworkPatch) -> Result<()> {
        patch.refresh = patch.network_id == self.network_id;
        self.dispatcher
            .update(patch, |network| self.state.replace(network))
            .await
    }
}
