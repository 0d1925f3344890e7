//! Caller-owned state holders.
//!
//! A store is created when a view needs the data and dropped with it. It is
//! the single writer of its state: dispatchers only ever hand new state to a
//! store through the setter it passes them. Observers subscribe to changes.

mod entity;
mod gateway;
mod network;
mod policy;

pub use entity::{
    ApnStore, BaseNameStore, EntityStore, QosProfileStore, RatingGroupStore, TierStore,
};
pub use gateway::{GatewayPoolStore, GatewayStore};
pub use network::{FegNetworkStore, LteNetworkStore, NetworkKind, NetworkSnapshot, NetworkUpdate};
pub use policy::PolicyStore;

use tokio::sync::watch;

pub struct Store<T> {
    state: watch::Sender<T>,
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    pub fn snapshot(&self) -> T {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }

    /// Replace the whole state. Never merges.
    pub fn replace(&self, value: T) {
        self.state.send_replace(value);
    }
}
