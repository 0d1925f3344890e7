use super::{EntityStore, Store};
use crate::api::{EntityApi, GatewayPoolApi, Gateways};
use crate::dispatch::{set_gateway_pool, update_gateway_pool_records, GatewayPoolRecordsPatch};
use crate::health::{is_healthy_at, summarize, HealthSummary};
use crate::models::{GatewayPoolState, MutableGatewayPool};
use crate::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Gateways of one network with their reported checkins.
pub type GatewayStore<A> = EntityStore<Gateways, A>;

impl<A> EntityStore<Gateways, A>
where
    A: EntityApi<Gateways> + ?Sized,
{
    /// Gateway ids with their health at `now`.
    pub fn health(&self, now: DateTime<Utc>) -> Vec<(String, bool)> {
        self.snapshot()
            .iter()
            .map(|(id, gateway)| (id.clone(), is_healthy_at(gateway.checkin_time(), now)))
            .collect()
    }

    pub fn summary(&self, now: DateTime<Utc>) -> HealthSummary {
        summarize(self.snapshot().values(), now)
    }
}

pub struct GatewayPoolStore<A: ?Sized> {
    network_id: String,
    api: Arc<A>,
    state: Store<BTreeMap<String, GatewayPoolState>>,
}

impl<A> GatewayPoolStore<A>
where
    A: GatewayPoolApi + ?Sized + 'static,
{
    /// Pools start without records; records are filled in by updates.
    pub async fn load(api: Arc<A>, network_id: &str) -> Result<Self> {
        let pools = api
            .list_gateway_pools(network_id)
            .await?
            .into_iter()
            .map(|(id, gateway_pool)| {
                (
                    id,
                    GatewayPoolState {
                        gateway_pool,
                        gateway_pool_records: Vec::new(),
                    },
                )
            })
            .collect();

        Ok(Self {
            network_id: network_id.to_string(),
            api,
            state: Store::new(pools),
        })
    }

    pub fn snapshot(&self) -> BTreeMap<String, GatewayPoolState> {
        self.state.snapshot()
    }

    pub async fn set(&self, key: &str, value: Option<MutableGatewayPool>) -> Result<()> {
        let current = self.state.snapshot();
        set_gateway_pool(
            self.api.as_ref(),
            &self.network_id,
            &current,
            key,
            value,
            |next| self.state.replace(next),
        )
        .await
    }

    pub async fn update_records(&self, patch: GatewayPoolRecordsPatch) -> Result<()> {
        let current = self.state.snapshot();
        update_gateway_pool_records(&self.api, &current, patch, |next| self.state.replace(next))
            .await
    }
}
