//! Domain layer for the static secret store.

pub mod client;
pub mod service;

pub use service::Service;
