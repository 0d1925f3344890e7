use super::ensure_aggregate_id;
use crate::api::{EntityApi, EntityKind};
use crate::Result;
use std::collections::BTreeMap;
use tracing::info;

/// Which of the three mutually exclusive paths a call took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityChange {
    Created,
    Replaced,
    Deleted,
}

/// Create, replace or delete one entity and hand the updated collection to `set`.
///
/// - `value` present and `key` unknown: create, then read back and merge.
/// - `value` present and `key` known: replace, then read back and merge.
/// - `value` absent: delete and drop `key` from the collection.
pub async fn set_entity<E, A, S>(
    api: &A,
    network_id: &str,
    existing: &BTreeMap<String, E::Value>,
    key: &str,
    value: Option<E::Value>,
    set: S,
) -> Result<EntityChange>
where
    E: EntityKind,
    A: EntityApi<E> + ?Sized,
    S: FnOnce(BTreeMap<String, E::Value>),
{
    ensure_aggregate_id(network_id)?;

    let Some(value) = value else {
        info!("[{}] Deleting {} '{}'", network_id, E::NAME, key);
        <A as EntityApi<E>>::delete(api, network_id, key).await?;
        let mut next = existing.clone();
        next.remove(key);
        set(next);
        return Ok(EntityChange::Deleted);
    };

    let change = if existing.contains_key(key) {
        info!("[{}] Replacing {} '{}'", network_id, E::NAME, key);
        <A as EntityApi<E>>::replace(api, network_id, key, &value).await?;
        EntityChange::Replaced
    } else {
        info!("[{}] Creating {} '{}'", network_id, E::NAME, key);
        <A as EntityApi<E>>::create(api, network_id, &value).await?;
        EntityChange::Created
    };

    let fresh = <A as EntityApi<E>>::get(api, network_id, key).await?;
    let mut next = existing.clone();
    next.insert(key.to_string(), fresh);
    set(next);

    Ok(change)
}
