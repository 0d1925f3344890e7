//! Network configuration update protocol.
//!
//! A patch is turned into one [`WriteRequest`] per present section. All
//! requests are spawned at once and joined; the first failure fails the
//! update while the remaining requests keep running. Only when every write
//! succeeded and a refresh was requested is canonical state read back and
//! handed to the caller's setter.

mod entity;
mod feg_lte_network;
mod feg_network;
mod gateway_pool;
mod lte_network;

pub use entity::{set_entity, EntityChange};
pub use feg_lte_network::{load_feg_lte_network, FegLteNetworkDispatcher, FegLteNetworkPatch};
pub use feg_network::{load_feg_network, FegNetworkDispatcher, FegNetworkPatch};
pub use gateway_pool::{set_gateway_pool, update_gateway_pool_records, GatewayPoolRecordsPatch};
pub use lte_network::{LteNetworkDispatcher, LteNetworkPatch};

use crate::{Error, Result};
use futures::future::{try_join_all, BoxFuture};
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// One outbound write for one configuration section.
pub struct WriteRequest {
    section: &'static str,
    future: BoxFuture<'static, Result<()>>,
}

impl WriteRequest {
    pub fn new<F>(section: &'static str, future: F) -> Self
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            section,
            future: Box::pin(future),
        }
    }

    pub fn section(&self) -> &'static str {
        self.section
    }
}

impl std::fmt::Debug for WriteRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteRequest")
            .field("section", &self.section)
            .finish_non_exhaustive()
    }
}

/// Spawn every request, then wait for all of them.
///
/// Returns the first error observed. Requests still in flight at that point
/// are detached, not aborted, so their side effects may still land.
pub async fn dispatch_all(aggregate_id: &str, requests: Vec<WriteRequest>) -> Result<()> {
    if requests.is_empty() {
        debug!("[{}] No sections to write", aggregate_id);
        return Ok(());
    }

    let sections: Vec<&'static str> = requests.iter().map(|r| r.section).collect();
    info!(
        "[{}] Writing {} section(s): {}",
        aggregate_id,
        sections.len(),
        sections.join(", ")
    );

    let handles: Vec<(&'static str, JoinHandle<Result<()>>)> = requests
        .into_iter()
        .map(|request| (request.section, tokio::spawn(request.future)))
        .collect();

    let id = aggregate_id.to_string();
    try_join_all(handles.into_iter().map(|(section, handle)| {
        let id = id.clone();
        async move {
            match handle.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => {
                    warn!("[{}] Write of {} failed: {}", id, section, e);
                    Err(e)
                }
                Err(e) => Err(Error::from(e)),
            }
        }
    }))
    .await?;

    Ok(())
}

/// Run the writes, then, if `refresh` is set, read canonical state back and
/// pass it to `set`. The setter is called at most once, and never when a
/// write or the read-back failed.
pub async fn apply_update<T, R, Fut, S>(
    aggregate_id: &str,
    writes: Vec<WriteRequest>,
    refresh: bool,
    read_back: R,
    set: S,
) -> Result<()>
where
    R: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
    S: FnOnce(T),
{
    ensure_aggregate_id(aggregate_id)?;
    dispatch_all(aggregate_id, writes).await?;

    if !refresh {
        return Ok(());
    }

    debug!("[{}] Refreshing canonical state", aggregate_id);
    let state = read_back().await?;
    set(state);
    Ok(())
}

/// Secondary reads degrade to the default value instead of failing the refresh.
pub(crate) async fn read_or_default<T, F>(aggregate_id: &str, what: &str, read: F) -> T
where
    T: Default,
    F: Future<Output = Result<T>>,
{
    match read.await {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "[{}] Failed to read {}, using default: {}",
                aggregate_id, what, e
            );
            T::default()
        }
    }
}

pub(crate) fn ensure_aggregate_id(aggregate_id: &str) -> Result<()> {
    if aggregate_id.trim().is_empty() {
        return Err(Error::InvalidPatch(
            "aggregate id must not be empty".to_string(),
        ));
    }
    Ok(())
}
