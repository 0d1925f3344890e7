use crate::HttpClient;
use async_trait::async_trait;
use futures::future::try_join_all;
use nms_core::api::{
    Apns, BaseNames, EntityApi, EntityKind, Gateways, PolicyRules, QosProfiles, RatingGroups, Tiers,
};
use nms_core::Result;
use serde_json::Value;
use std::collections::BTreeMap;

/// Where a collection of single entities lives on the orchestrator.
pub trait EntityRoute: EntityKind {
    /// Path segments of the collection.
    fn collection(network_id: &str) -> Vec<&str>;

    /// Query string sent with the list request.
    const LIST_QUERY: Option<&'static str> = None;
}

impl EntityRoute for Apns {
    fn collection(network_id: &str) -> Vec<&str> {
        vec!["lte", network_id, "apns"]
    }
}

impl EntityRoute for PolicyRules {
    fn collection(network_id: &str) -> Vec<&str> {
        vec!["networks", network_id, "policies", "rules"]
    }

    // Full rules keyed by id instead of a bare id list.
    const LIST_QUERY: Option<&'static str> = Some("view=full");
}

impl EntityRoute for QosProfiles {
    fn collection(network_id: &str) -> Vec<&str> {
        vec!["lte", network_id, "policy_qos_profiles"]
    }
}

impl EntityRoute for RatingGroups {
    fn collection(network_id: &str) -> Vec<&str> {
        vec!["networks", network_id, "rating_groups"]
    }
}

impl EntityRoute for BaseNames {
    fn collection(network_id: &str) -> Vec<&str> {
        vec!["networks", network_id, "policies", "base_names"]
    }
}

impl EntityRoute for Gateways {
    fn collection(network_id: &str) -> Vec<&str> {
        vec!["lte", network_id, "gateways"]
    }
}

impl EntityRoute for Tiers {
    fn collection(network_id: &str) -> Vec<&str> {
        vec!["networks", network_id, "tiers"]
    }
}

fn item<'a, E: EntityRoute>(network_id: &'a str, key: &'a str) -> Vec<&'a str> {
    let mut segments = E::collection(network_id);
    segments.push(key);
    segments
}

#[async_trait]
impl<E: EntityRoute> EntityApi<E> for HttpClient {
    /// Collections come back either as a map keyed by entity key, as a list
    /// of entities, or as a bare list of keys that are then fetched one by one.
    async fn list(&self, network_id: &str) -> Result<BTreeMap<String, E::Value>> {
        let mut url = self.url(&E::collection(network_id))?;
        if let Some(query) = E::LIST_QUERY {
            url.set_query(Some(query));
        }

        match self.get_json::<Value>(url).await? {
            Value::Null => Ok(BTreeMap::new()),
            Value::Array(items) if items.iter().all(Value::is_string) => {
                let keys: Vec<String> = items
                    .into_iter()
                    .filter_map(|entry| entry.as_str().map(str::to_string))
                    .collect();
                let values = try_join_all(
                    keys.iter()
                        .map(|key| <Self as EntityApi<E>>::get(self, network_id, key)),
                )
                .await?;
                Ok(keys.into_iter().zip(values).collect())
            }
            Value::Array(items) => items
                .into_iter()
                .map(|entry| -> Result<(String, E::Value)> {
                    let value: E::Value = serde_json::from_value(entry)?;
                    Ok((E::key_of(&value), value))
                })
                .collect(),
            other => Ok(serde_json::from_value(other)?),
        }
    }

    async fn get(&self, network_id: &str, key: &str) -> Result<E::Value> {
        let url = self.url(&item::<E>(network_id, key))?;
        self.get_json(url).await
    }

    async fn create(&self, network_id: &str, value: &E::Value) -> Result<()> {
        let url = self.url(&E::collection(network_id))?;
        self.post_json(url, value).await
    }

    async fn replace(&self, network_id: &str, key: &str, value: &E::Value) -> Result<()> {
        let url = self.url(&item::<E>(network_id, key))?;
        self.put_json(url, value).await
    }

    async fn delete(&self, network_id: &str, key: &str) -> Result<()> {
        let url = self.url(&item::<E>(network_id, key))?;
        HttpClient::delete(self, url).await
    }
}
