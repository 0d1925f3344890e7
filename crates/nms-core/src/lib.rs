pub mod api;
pub mod data_plan;
pub mod dispatch;
mod error;
pub mod health;
pub mod models;
pub mod notification;
pub mod store;

#[cfg(test)]
mod testing;

pub use api::MagmaApi;
pub use error::{Error, Result};
pub use notification::{Notifier, Severity, TracingNotifier};
