//! `reqwest` implementation of the orchestrator API traits.

mod client;
mod entities;
mod gateways;
mod networks;

pub use client::HttpClient;
pub use entities::EntityRoute;
