use super::Store;
use crate::api::{Apns, BaseNames, EntityApi, EntityKind, QosProfiles, RatingGroups, Tiers};
use crate::dispatch::{set_entity, EntityChange};
use crate::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Keyed collection of one entity kind for one network.
pub struct EntityStore<E: EntityKind, A: ?Sized> {
    network_id: String,
    api: Arc<A>,
    state: Store<BTreeMap<String, E::Value>>,
}

pub type ApnStore<A> = EntityStore<Apns, A>;
pub type QosProfileStore<A> = EntityStore<QosProfiles, A>;
pub type RatingGroupStore<A> = EntityStore<RatingGroups, A>;
pub type BaseNameStore<A> = EntityStore<BaseNames, A>;
pub type TierStore<A> = EntityStore<Tiers, A>;

impl<E, A> EntityStore<E, A>
where
    E: EntityKind,
    A: EntityApi<E> + ?Sized,
{
    pub fn new(
        api: Arc<A>,
        network_id: impl Into<String>,
        initial: BTreeMap<String, E::Value>,
    ) -> Self {
        Self {
            network_id: network_id.into(),
            api,
            state: Store::new(initial),
        }
    }

    pub async fn load(api: Arc<A>, network_id: impl Into<String>) -> Result<Self> {
        let network_id = network_id.into();
        let initial = <A as EntityApi<E>>::list(api.as_ref(), &network_id).await?;
        Ok(Self::new(api, network_id, initial))
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn state(&self) -> &Store<BTreeMap<String, E::Value>> {
        &self.state
    }

    pub fn snapshot(&self) -> BTreeMap<String, E::Value> {
        self.state.snapshot()
    }

    /// `Some` creates or replaces `key`, `None` deletes it.
    pub async fn set(&self, key: &str, value: Option<E::Value>) -> Result<EntityChange> {
        let current = self.state.snapshot();
        set_entity::<E, A, _>(
            self.api.as_ref(),
            &self.network_id,
            &current,
            key,
            value,
            |next| self.state.replace(next),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_apn, sample_tier, FakeApi};

    #[tokio::test]
    async fn test_load_and_set() {
        let api = Arc::new(FakeApi::default());
        api.insert_apn("net1", sample_apn("ims"));

        let store = ApnStore::load(api.clone(), "net1").await.unwrap();
        assert_eq!(store.snapshot().len(), 1);

        let change = store
            .set("internet", Some(sample_apn("internet")))
            .await
            .unwrap();
        assert_eq!(change, EntityChange::Created);
        assert_eq!(
            store.snapshot().keys().cloned().collect::<Vec<_>>(),
            vec!["ims".to_string(), "internet".to_string()]
        );

        let change = store.set("ims", None).await.unwrap();
        assert_eq!(change, EntityChange::Deleted);
        assert!(!store.snapshot().contains_key("ims"));
    }

    #[tokio::test]
    async fn test_tier_upgrade_round_trip() {
        let api = Arc::new(FakeApi::default());
        let store = TierStore::load(api.clone(), "net1").await.unwrap();
        assert!(store.snapshot().is_empty());

        let mut tier = sample_tier("default", "1.8.0");
        store.set("default", Some(tier.clone())).await.unwrap();

        tier.version = "1.9.0".to_string();
        let change = store.set("default", Some(tier)).await.unwrap();
        assert_eq!(change, EntityChange::Replaced);
        assert_eq!(store.snapshot()["default"].version, "1.9.0");

        assert_eq!(
            api.calls(),
            vec![
                "GET /networks/net1/tiers",
                "POST /networks/net1/tiers",
                "GET /networks/net1/tiers/default",
                "PUT /networks/net1/tiers/default",
                "GET /networks/net1/tiers/default",
            ]
        );

        store.set("default", None).await.unwrap();
        assert!(store.snapshot().is_empty());
    }
}
