use super::{apply_update, ensure_aggregate_id, WriteRequest};
use crate::api::GatewayPoolApi;
use crate::models::{GatewayPoolRecord, GatewayPoolState, MutableGatewayPool};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Pool config plus member records, written together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayPoolRecordsPatch {
    pub network_id: String,
    pub gateway_pool: MutableGatewayPool,

    #[serde(default)]
    pub records: Vec<GatewayPoolRecord>,

    #[serde(default)]
    pub refresh: bool,
}

/// Create, replace or delete a pool's own config. Records already held for
/// the pool are carried over on replace.
pub async fn set_gateway_pool<A, S>(
    api: &A,
    network_id: &str,
    pools: &BTreeMap<String, GatewayPoolState>,
    key: &str,
    value: Option<MutableGatewayPool>,
    set: S,
) -> Result<()>
where
    A: GatewayPoolApi + ?Sized,
    S: FnOnce(BTreeMap<String, GatewayPoolState>),
{
    ensure_aggregate_id(network_id)?;

    let Some(pool) = value else {
        info!("[{}] Deleting gateway pool '{}'", network_id, key);
        api.delete_gateway_pool(network_id, key).await?;
        let mut next = pools.clone();
        next.remove(key);
        set(next);
        return Ok(());
    };

    let records = match pools.get(key) {
        Some(existing) => {
            info!("[{}] Replacing gateway pool '{}'", network_id, key);
            api.put_gateway_pool(network_id, key, &pool).await?;
            existing.gateway_pool_records.clone()
        }
        None => {
            info!("[{}] Creating gateway pool '{}'", network_id, key);
            api.create_gateway_pool(network_id, &pool).await?;
            Vec::new()
        }
    };

    let gateway_pool = api.get_gateway_pool(network_id, key).await?;
    let mut next = pools.clone();
    next.insert(
        key.to_string(),
        GatewayPoolState {
            gateway_pool,
            gateway_pool_records: records,
        },
    );
    set(next);
    Ok(())
}

/// Write a pool and its records with a single combined request, then on
/// refresh read the pool back and store it with the written records.
pub async fn update_gateway_pool_records<A, S>(
    api: &Arc<A>,
    pools: &BTreeMap<String, GatewayPoolState>,
    patch: GatewayPoolRecordsPatch,
    set: S,
) -> Result<()>
where
    A: GatewayPoolApi + ?Sized + 'static,
    S: FnOnce(BTreeMap<String, GatewayPoolState>),
{
    let pool_id = patch.gateway_pool.gateway_pool_id.clone();
    if pool_id.is_empty() {
        return Err(Error::InvalidPatch("gateway pool id must not be empty".to_string()));
    }
    if let Some(stray) = patch
        .records
        .iter()
        .find(|r| r.gateway_pool_id != pool_id)
    {
        return Err(Error::InvalidPatch(format!(
            "record for gateway '{}' targets pool '{}', expected '{}'",
            stray.gateway_id, stray.gateway_pool_id, pool_id
        )));
    }

    let write = {
        let api = api.clone();
        let id = patch.network_id.clone();
        let pool = patch.gateway_pool.clone();
        let records = patch.records.clone();
        WriteRequest::new("gateway_pool_records", async move {
            api.update_gateway_pool_records(&id, &pool, &records).await
        })
    };

    let reader = api.clone();
    let network_id = patch.network_id.clone();
    let read_id = pool_id.clone();
    apply_update(
        &network_id,
        vec![write],
        patch.refresh,
        || async move { reader.get_gateway_pool(&patch.network_id, &read_id).await },
        |gateway_pool| {
            let mut next = pools.clone();
            next.insert(
                pool_id,
                GatewayPoolState {
                    gateway_pool,
                    gateway_pool_records: patch.records,
                },
            );
            set(next);
        },
    )
    .await
}
