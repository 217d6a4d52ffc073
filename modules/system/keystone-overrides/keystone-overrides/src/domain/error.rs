//! Domain errors for the Keystone overrides resolver.

use keystone_overrides_sdk::{KeystoneOverridesError, StoreError};

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("namespace must not be empty")]
    EmptyNamespace,

    #[error("error getting secrets with label '{label_selector}' in namespace '{namespace}'")]
    StoreQuery {
        namespace: String,
        label_selector: String,
        #[source]
        source: StoreError,
    },

    #[error("multiple secrets found with label '{label_selector}', only one is allowed")]
    AmbiguousConfiguration {
        label_selector: String,
        names: Vec<String>,
    },
}

impl From<DomainError> for KeystoneOverridesError {
    fn from(e: DomainError) -> Self {
        match e {
            e @ DomainError::EmptyNamespace => Self::InvalidRequest(e.to_string()),
            DomainError::StoreQuery {
                namespace,
                label_selector,
                source,
            } => Self::StoreQuery {
                namespace,
                label_selector,
                source,
            },
            DomainError::AmbiguousConfiguration {
                label_selector,
                names,
            } => Self::AmbiguousConfiguration {
                label_selector,
                count: names.len(),
                names,
            },
        }
    }
}
