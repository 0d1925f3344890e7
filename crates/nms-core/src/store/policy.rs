use super::{EntityStore, FegNetworkStore, LteNetworkStore, NetworkUpdate};
use crate::api::{EntityApi, FegLteNetworkApi, FegNetworkApi, PolicyRules};
use crate::dispatch::FegNetworkPatch;
use crate::models::{NetworkSubscriberConfig, PolicyRule};
use crate::Result;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Policy rules of a network. For a federated LTE network the rules are
/// mirrored on the linked federation network.
pub struct PolicyStore<A: ?Sized> {
    rules: EntityStore<PolicyRules, A>,
    federation: Option<FederationMirror<A>>,
}

struct FederationMirror<A: ?Sized> {
    rules: EntityStore<PolicyRules, A>,
    network: FegNetworkStore<A>,
}

impl<A> PolicyStore<A>
where
    A: FegLteNetworkApi + FegNetworkApi + EntityApi<PolicyRules> + ?Sized + 'static,
{
    pub async fn load(api: Arc<A>, network: &LteNetworkStore<A>) -> Result<Self> {
        let rules =
            EntityStore::<PolicyRules, A>::load(api.clone(), network.network_id()).await?;

        let federation = match network.snapshot().feg_network_id() {
            Some(feg_network_id) => {
                let (rules, network) = tokio::try_join!(
                    EntityStore::<PolicyRules, A>::load(api.clone(), feg_network_id),
                    FegNetworkStore::load(api.clone(), feg_network_id),
                )?;
                Some(FederationMirror { rules, network })
            }
            None => None,
        };

        Ok(Self { rules, federation })
    }

    pub fn rules(&self) -> BTreeMap<String, PolicyRule> {
        self.rules.snapshot()
    }

    pub fn federation_rules(&self) -> Option<BTreeMap<String, PolicyRule>> {
        self.federation.as_ref().map(|f| f.rules.snapshot())
    }

    /// Create, replace or delete rule `key`, then keep the network-wide rule
    /// lists in step: a rule saved with `network_wide` is added to them, any
    /// other save or a delete removes it.
    pub async fn set_rule(
        &self,
        network: &LteNetworkStore<A>,
        key: &str,
        value: Option<PolicyRule>,
        network_wide: bool,
    ) -> Result<()> {
        let listed = value.is_some() && network_wide;

        self.rules.set(key, value.clone()).await?;
        if let Some(federation) = &self.federation {
            federation.rules.set(key, value).await?;
        }

        let current = network
            .snapshot()
            .subscriber_config()
            .cloned()
            .unwrap_or_default();
        if let Some(subscriber_config) = toggle_rule_name(&current, key, listed) {
            info!(
                "[{}] Network-wide rule '{}' listed: {}",
                network.network_id(),
                key,
                listed
            );
            let mut update = NetworkUpdate::new(network.network_id());
            update.subscriber_config = Some(subscriber_config);
            network.update_networks(update).await?;
        }

        if let Some(federation) = &self.federation {
            let current = federation
                .network
                .snapshot()
                .subscriber_config
                .unwrap_or_default();
            if let Some(subscriber_config) = toggle_rule_name(&current, key, listed) {
                let mut patch = FegNetworkPatch::new(federation.network.network_id());
                patch.subscriber_config = Some(subscriber_config);
                federation.network.update(patch).await?;
            }
        }

        Ok(())
    }
}

/// New subscriber config with `key` added to or removed from the rule
/// names, or `None` when nothing changes.
fn toggle_rule_name(
    config: &NetworkSubscriberConfig,
    key: &str,
    listed: bool,
) -> Option<NetworkSubscriberConfig> {
    let names = config.rule_names();
    if names.iter().any(|n| n == key) == listed {
        return None;
    }

    let rule_names = if listed {
        names.iter().cloned().chain(Some(key.to_string())).collect()
    } else {
        names.iter().filter(|n| *n != key).cloned().collect()
    };

    Some(NetworkSubscriberConfig {
        network_wide_base_names: config.network_wide_base_names.clone(),
        network_wide_rule_names: Some(rule_names),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NetworkKind;
    use crate::testing::{sample_rule, FakeApi};

    #[test]
    fn test_toggle_rule_name() {
        let config = NetworkSubscriberConfig {
            network_wide_base_names: Some(vec!["base".to_string()]),
            network_wide_rule_names: Some(vec!["a".to_string()]),
        };

        assert_eq!(toggle_rule_name(&config, "a", true), None);
        assert_eq!(toggle_rule_name(&config, "b", false), None);

        let added = toggle_rule_name(&config, "b", true).unwrap();
        assert_eq!(added.rule_names(), ["a".to_string(), "b".to_string()]);
        assert_eq!(added.network_wide_base_names, config.network_wide_base_names);

        let removed = toggle_rule_name(&config, "a", false).unwrap();
        assert!(removed.rule_names().is_empty());
    }

    #[tokio::test]
    async fn test_network_wide_rule_on_federated_network() {
        let api = Arc::new(FakeApi::with_feg_lte_network("test", "test_feg_network"));
        let network = LteNetworkStore::load(api.clone(), "test", NetworkKind::FegLte)
            .await
            .unwrap();
        let policies = PolicyStore::load(api.clone(), &network).await.unwrap();
        api.clear_calls();

        policies
            .set_rule(&network, "test_policy_0", Some(sample_rule("test_policy_0", 1)), true)
            .await
            .unwrap();

        let calls = api.calls();
        for expected in [
            "POST /networks/test/policies/rules",
            "POST /networks/test_feg_network/policies/rules",
            "PUT /feg_lte/test/subscriber_config",
            "PUT /feg/test_feg_network/subscriber_config",
        ] {
            assert!(calls.contains(&expected.to_string()), "missing {}", expected);
        }

        assert_eq!(
            network.snapshot().subscriber_config().unwrap().rule_names(),
            ["test_policy_0".to_string()]
        );
        assert!(policies
            .federation_rules()
            .unwrap()
            .contains_key("test_policy_0"));
    }

    #[tokio::test]
    async fn test_plain_rule_removed_from_network_wide_list() {
        let api = Arc::new(FakeApi::with_lte_network("net1"));
        api.set_lte_subscriber_config(
            "net1",
            NetworkSubscriberConfig {
                network_wide_base_names: None,
                network_wide_rule_names: Some(vec!["rule1".to_string()]),
            },
        );
        api.insert_rule("net1", sample_rule("rule1", 1));
        let network = LteNetworkStore::load(api.clone(), "net1", NetworkKind::Lte)
            .await
            .unwrap();
        let policies = PolicyStore::load(api.clone(), &network).await.unwrap();
        assert!(policies.federation_rules().is_none());

        policies
            .set_rule(&network, "rule1", Some(sample_rule("rule1", 5)), false)
            .await
            .unwrap();

        assert!(network
            .snapshot()
            .subscriber_config()
            .unwrap()
            .rule_names()
            .is_empty());
        assert_eq!(policies.rules()["rule1"].priority, 5);
    }
}
