use crate::HttpClient;
use async_trait::async_trait;
use nms_core::api::{FegLteNetworkApi, FegNetworkApi, LteNetworkApi};
use nms_core::models::{
    FederatedNetworkConfigs, FegLteNetwork, FegNetwork, LteNetwork, NetworkDnsConfig,
    NetworkEpcConfigs, NetworkFederationConfigs, NetworkRanConfigs, NetworkSubscriberConfig,
};
use nms_core::Result;

#[async_trait]
impl LteNetworkApi for HttpClient {
    async fn get_lte_network(&self, network_id: &str) -> Result<LteNetwork> {
        self.get_json(self.url(&["lte", network_id])?).await
    }

    async fn put_lte_network(&self, network_id: &str, network: &LteNetwork) -> Result<()> {
        self.put_json(self.url(&["lte", network_id])?, network).await
    }

    async fn put_lte_epc(&self, network_id: &str, config: &NetworkEpcConfigs) -> Result<()> {
        let url = self.url(&["lte", network_id, "cellular", "epc"])?;
        self.put_json(url, config).await
    }

    async fn put_lte_ran(&self, network_id: &str, config: &NetworkRanConfigs) -> Result<()> {
        let url = self.url(&["lte", network_id, "cellular", "ran"])?;
        self.put_json(url, config).await
    }

    async fn put_lte_dns(&self, network_id: &str, config: &NetworkDnsConfig) -> Result<()> {
        self.put_json(self.url(&["lte", network_id, "dns"])?, config)
            .await
    }

    async fn put_lte_subscriber_config(
        &self,
        network_id: &str,
        config: &NetworkSubscriberConfig,
    ) -> Result<()> {
        let url = self.url(&["lte", network_id, "subscriber_config"])?;
        self.put_json(url, config).await
    }
}

#[async_trait]
impl FegLteNetworkApi for HttpClient {
    async fn get_feg_lte_network(&self, network_id: &str) -> Result<FegLteNetwork> {
        self.get_json(self.url(&["feg_lte", network_id])?).await
    }

    async fn get_feg_lte_subscriber_config(
        &self,
        network_id: &str,
    ) -> Result<NetworkSubscriberConfig> {
        let url = self.url(&["feg_lte", network_id, "subscriber_config"])?;
        self.get_json(url).await
    }

    async fn put_feg_lte_network(&self, network_id: &str, network: &FegLteNetwork) -> Result<()> {
        self.put_json(self.url(&["feg_lte", network_id])?, network)
            .await
    }

    async fn put_feg_lte_federation(
        &self,
        network_id: &str,
        config: &FederatedNetworkConfigs,
    ) -> Result<()> {
        let url = self.url(&["feg_lte", network_id, "federation"])?;
        self.put_json(url, config).await
    }

    async fn put_feg_lte_dns(&self, network_id: &str, config: &NetworkDnsConfig) -> Result<()> {
        let url = self.url(&["feg_lte", network_id, "dns"])?;
        self.put_json(url, config).await
    }

    async fn put_feg_lte_subscriber_config(
        &self,
        network_id: &str,
        config: &NetworkSubscriberConfig,
    ) -> Result<()> {
        let url = self.url(&["feg_lte", network_id, "subscriber_config"])?;
        self.put_json(url, config).await
    }
}

#[async_trait]
impl FegNetworkApi for HttpClient {
    async fn get_feg_network(&self, network_id: &str) -> Result<FegNetwork> {
        self.get_json(self.url(&["feg", network_id])?).await
    }

    async fn get_feg_subscriber_config(
        &self,
        network_id: &str,
    ) -> Result<NetworkSubscriberConfig> {
        let url = self.url(&["feg", network_id, "subscriber_config"])?;
        self.get_json(url).await
    }

    async fn put_feg_network(&self, network_id: &str, network: &FegNetwork) -> Result<()> {
        self.put_json(self.url(&["feg", network_id])?, network).await
    }

    async fn put_feg_federation(
        &self,
        network_id: &str,
        config: &NetworkFederationConfigs,
    ) -> Result<()> {
        let url = self.url(&["feg", network_id, "federation"])?;
        self.put_json(url, config).await
    }

    async fn put_feg_subscriber_config(
        &self,
        network_id: &str,
        config: &NetworkSubscriberConfig,
    ) -> Result<()> {
        let url = self.url(&["feg", network_id, "subscriber_config"])?;
        self.put_json(url, config).await
    }
}
