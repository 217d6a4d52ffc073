//! Domain layer for the Keystone overrides resolver.

pub mod error;
pub mod local_client;
pub mod service;

pub use error::DomainError;
pub use local_client::KeystoneOverridesLocalClient;
pub use service::Service;
