//! Keystone Overrides SDK
//!
//! This crate provides the public API for the `keystone_overrides` module:
//!
//! - [`KeystoneOverridesClient`] - Public API trait for consumers
//! - [`ConfigObjectStore`] - Store API trait for backend implementations
//! - [`OverrideMap`] / [`OverrideKey`] - Resolution result model
//! - [`ConfigObject`] - Labeled key-value record read from the store
//! - [`LabelSelector`] - Kubernetes-style label selector
//! - [`CallContext`] - Cancellation and deadline for a single call
//! - [`ResolutionObserver`] - Sink for non-error observations
//! - [`KeystoneOverridesError`] / [`StoreError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use keystone_overrides_sdk::{CallContext, KeystoneOverridesClient};
//!
//! let ctx = CallContext::new(cancel.child_token()).with_timeout(Duration::from_secs(5));
//! let overrides = client.resolve(&ctx, "openstack", "keystone-override").await?;
//!
//! let auth_url = overrides.value_or(OverrideKey::AuthUrl, default_auth_url);
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod call;
pub mod error;
pub mod models;
pub mod observer;
pub mod selector;
pub mod store_api;

// Re-export main types at crate root
pub use api::KeystoneOverridesClient;
pub use call::CallContext;
pub use error::{KeystoneOverridesError, StoreError};
pub use models::{ConfigObject, OverrideKey, OverrideMap};
pub use observer::{ResolutionObserver, TracingObserver};
pub use selector::{LabelSelector, Requirement, SelectorParseError};
pub use store_api::ConfigObjectStore;
