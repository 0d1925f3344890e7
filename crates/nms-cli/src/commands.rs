use crate::{
    DataPlanAction, EntityAction, FegNetworkAction, GatewayAction, NetworkAction, PolicyAction,
    PoolAction,
};
use anyhow::{anyhow, Context};
use chrono::Utc;
use nms_client::{EntityRoute, HttpClient};
use nms_core::data_plan::{
    apply_data_plan, display_mbps, remove_data_plan, DataPlanEdit, Direction,
};
use nms_core::api::Gateways;
use nms_core::dispatch::{FegNetworkPatch, GatewayPoolRecordsPatch};
use nms_core::models::PolicyRule;
use nms_core::store::{
    EntityStore, FegNetworkStore, GatewayPoolStore, GatewayStore, LteNetworkStore, NetworkKind,
    NetworkUpdate, PolicyStore,
};
use nms_core::{Notifier, Severity, TracingNotifier};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

type Api = Arc<HttpClient>;

fn read_yaml<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(value)?);
    Ok(())
}

async fn success(message: String) -> anyhow::Result<()> {
    TracingNotifier.notify(Severity::Success, &message).await?;
    Ok(())
}

pub async fn network(api: Api, action: NetworkAction) -> anyhow::Result<()> {
    match action {
        NetworkAction::Show { network_id, kind } => {
            let store = LteNetworkStore::load(api, &network_id, kind.into()).await?;
            print_yaml(&store.snapshot())
        }
        NetworkAction::Update {
            network_id,
            file,
            kind,
        } => {
            let update: NetworkUpdate = read_yaml(&file)?;
            let target = update.network_id.clone();
            let store = LteNetworkStore::load(api, &network_id, kind.into()).await?;

            store.update_networks(update).await?;
            success(format!("Network {} saved", target)).await?;
            if target == network_id {
                print_yaml(&store.snapshot())?;
            }
            Ok(())
        }
    }
}

pub async fn feg_network(api: Api, action: FegNetworkAction) -> anyhow::Result<()> {
    match action {
        FegNetworkAction::Show { network_id } => {
            let store = FegNetworkStore::load(api, &network_id).await?;
            print_yaml(&store.snapshot())
        }
        FegNetworkAction::Update { network_id, file } => {
            let patch: FegNetworkPatch = read_yaml(&file)?;
            let target = patch.network_id.clone();
            let store = FegNetworkStore::load(api, &network_id).await?;

            store.update(patch).await?;
            success(format!("Federation network {} saved", target)).await?;
            if target == network_id {
                print_yaml(&store.snapshot())?;
            }
            Ok(())
        }
    }
}

/// Shared handling for the single-entity collections.
pub async fn entity<E>(api: Api, action: EntityAction) -> anyhow::Result<()>
where
    E: EntityRoute,
{
    match action {
        EntityAction::List { network_id } => {
            let store = EntityStore::<E, HttpClient>::load(api, network_id).await?;
            print_yaml(&store.snapshot())
        }
        EntityAction::Set { network_id, file } => {
            let value: E::Value = read_yaml(&file)?;
            let key = E::key_of(&value);
            let store = EntityStore::<E, HttpClient>::load(api, network_id).await?;

            let change = store.set(&key, Some(value)).await?;
            success(format!("{} '{}' saved ({:?})", E::NAME, key, change)).await?;
            print_yaml(&store.snapshot().get(&key))
        }
        EntityAction::Delete { network_id, key } => {
            let store = EntityStore::<E, HttpClient>::load(api, network_id).await?;
            store.set(&key, None).await?;
            success(format!("{} '{}' deleted", E::NAME, key)).await
        }
    }
}

pub async fn policy(api: Api, action: PolicyAction) -> anyhow::Result<()> {
    match action {
        PolicyAction::List { network_id, kind } => {
            let network = LteNetworkStore::load(api.clone(), &network_id, kind.into()).await?;
            let policies = PolicyStore::load(api, &network).await?;
            print_yaml(&policies.rules())
        }
        PolicyAction::Set {
            network_id,
            file,
            network_wide,
            kind,
        } => {
            let rule: PolicyRule = read_yaml(&file)?;
            let rule_id = rule.id.clone();
            let network = LteNetworkStore::load(api.clone(), &network_id, kind.into()).await?;
            let policies = PolicyStore::load(api, &network).await?;

            policies
                .set_rule(&network, &rule_id, Some(rule), network_wide)
                .await?;
            success(format!("Policy rule '{}' saved", rule_id)).await
        }
        PolicyAction::Delete {
            network_id,
            rule_id,
            kind,
        } => {
            let network = LteNetworkStore::load(api.clone(), &network_id, kind.into()).await?;
            let policies = PolicyStore::load(api, &network).await?;

            policies.set_rule(&network, &rule_id, None, false).await?;
            success(format!("Policy rule '{}' deleted", rule_id)).await
        }
    }
}

pub async fn pool(api: Api, action: PoolAction) -> anyhow::Result<()> {
    match action {
        PoolAction::List { network_id } => {
            let store = GatewayPoolStore::load(api, &network_id).await?;
            print_yaml(&store.snapshot())
        }
        PoolAction::Update { file } => {
            let mut patch: GatewayPoolRecordsPatch = read_yaml(&file)?;
            patch.refresh = true;
            let pool_id = patch.gateway_pool.gateway_pool_id.clone();
            let store = GatewayPoolStore::load(api, &patch.network_id).await?;

            store.update_records(patch).await?;
            success(format!("Gateway pool '{}' saved", pool_id)).await?;
            print_yaml(&store.snapshot().get(&pool_id))
        }
        PoolAction::Delete {
            network_id,
            pool_id,
        } => {
            let store = GatewayPoolStore::load(api, &network_id).await?;
            store.set(&pool_id, None).await?;
            success(format!("Gateway pool '{}' deleted", pool_id)).await
        }
    }
}

pub async fn gateway(api: Api, action: GatewayAction) -> anyhow::Result<()> {
    match action {
        GatewayAction::Health { network_id } => {
            let store = GatewayStore::load(api, &network_id).await?;
            let now = Utc::now();

            for (gateway_id, healthy) in store.health(now) {
                let status = if healthy { "healthy" } else { "unhealthy" };
                println!("{:<32} {}", gateway_id, status);
            }

            let summary = store.summary(now);
            println!("\n{} of {} gateway(s) healthy", summary.healthy, summary.total());
            Ok(())
        }
        GatewayAction::Manage(action) => entity::<Gateways>(api, action).await,
    }
}

fn format_rate(bps: u64, direction: Direction) -> String {
    match display_mbps(bps, direction) {
        Some(mbps) => format!("{} Mbps", mbps),
        None => "unlimited".to_string(),
    }
}

async fn load_network(
    api: Api,
    network_id: &str,
    kind: NetworkKind,
) -> anyhow::Result<LteNetworkStore<HttpClient>> {
    Ok(LteNetworkStore::load(api, network_id, kind).await?)
}

pub async fn data_plan(api: Api, action: DataPlanAction) -> anyhow::Result<()> {
    match action {
        DataPlanAction::List { network_id, kind } => {
            let store = load_network(api, &network_id, kind.into()).await?;
            let snapshot = store.snapshot();
            let epc = snapshot
                .epc()
                .ok_or_else(|| anyhow!("network '{}' has no EPC config", network_id))?;

            for (name, plan) in &epc.sub_profiles {
                println!(
                    "{:<24} download {:<16} upload {}",
                    name,
                    format_rate(plan.max_dl_bit_rate, Direction::Download),
                    format_rate(plan.max_ul_bit_rate, Direction::Upload),
                );
            }
            Ok(())
        }
        DataPlanAction::Set {
            network_id,
            name,
            download,
            upload,
            kind,
        } => {
            let store = load_network(api, &network_id, kind.into()).await?;
            let epc = store
                .snapshot()
                .epc()
                .cloned()
                .ok_or_else(|| anyhow!("network '{}' has no EPC config", network_id))?;

            let edit = DataPlanEdit {
                download_mbps: download,
                upload_mbps: upload,
            };
            let mut update = NetworkUpdate::new(&network_id);
            update.epc_configs = Some(apply_data_plan(&epc, &name, &edit)?);
            info!("[{}] Saving data plan '{}'", network_id, name);
            store.update_networks(update).await?;

            success(format!("Data plan '{}' saved", name)).await
        }
        DataPlanAction::Delete {
            network_id,
            name,
            kind,
        } => {
            let store = load_network(api, &network_id, kind.into()).await?;
            let epc = store
                .snapshot()
                .epc()
                .cloned()
                .ok_or_else(|| anyhow!("network '{}' has no EPC config", network_id))?;
            if !epc.sub_profiles.contains_key(&name) {
                return Err(anyhow!("data plan '{}' not found", name));
            }

            let mut update = NetworkUpdate::new(&network_id);
            update.epc_configs = Some(remove_data_plan(&epc, &name));
            store.update_networks(update).await?;

            success(format!("Data plan '{}' deleted", name)).await
        }
    }
}
