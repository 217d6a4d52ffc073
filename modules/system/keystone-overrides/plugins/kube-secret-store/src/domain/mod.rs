//! Domain layer for the Kubernetes secret store.

pub mod client;
pub mod service;

pub use service::{ConnectError, Service};
