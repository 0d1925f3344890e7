use crate::HttpClient;
use async_trait::async_trait;
use nms_core::api::GatewayPoolApi;
use nms_core::models::{GatewayPool, GatewayPoolRecord, MutableGatewayPool};
use nms_core::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Body of the combined pool and records write.
#[derive(Serialize)]
struct PoolWithRecords<'a> {
    gateway_pool: &'a MutableGatewayPool,
    gateway_pool_records: &'a [GatewayPoolRecord],
}

#[async_trait]
impl GatewayPoolApi for HttpClient {
    async fn list_gateway_pools(&self, network_id: &str) -> Result<BTreeMap<String, GatewayPool>> {
        self.get_json(self.url(&["lte", network_id, "gateway_pools"])?)
            .await
    }

    async fn get_gateway_pool(&self, network_id: &str, pool_id: &str) -> Result<GatewayPool> {
        let url = self.url(&["lte", network_id, "gateway_pools", pool_id])?;
        self.get_json(url).await
    }

    async fn create_gateway_pool(&self, network_id: &str, pool: &MutableGatewayPool) -> Result<()> {
        let url = self.url(&["lte", network_id, "gateway_pools"])?;
        self.post_json(url, pool).await
    }

    async fn put_gateway_pool(
        &self,
        network_id: &str,
        pool_id: &str,
        pool: &MutableGatewayPool,
    ) -> Result<()> {
        let url = self.url(&["lte", network_id, "gateway_pools", pool_id])?;
        self.put_json(url, pool).await
    }

    async fn delete_gateway_pool(&self, network_id: &str, pool_id: &str) -> Result<()> {
        let url = self.url(&["lte", network_id, "gateway_pools", pool_id])?;
        self.delete(url).await
    }

    async fn update_gateway_pool_records(
        &self,
        network_id: &str,
        pool: &MutableGatewayPool,
        records: &[GatewayPoolRecord],
    ) -> Result<()> {
        let url = self.url(&[
            "lte",
            network_id,
            "gateway_pools",
            pool.gateway_pool_id.as_str(),
            "records",
        ])?;
        let body = PoolWithRecords {
            gateway_pool: pool,
            gateway_pool_records: records,
        };
        self.put_json(url, &body).await
    }
}
