//! Error types for the Keystone overrides module.

use thiserror::Error;

/// Errors returned by [`crate::KeystoneOverridesClient::resolve`].
#[derive(Debug, Error)]
pub enum KeystoneOverridesError {
    /// Listing config objects failed. The store error is available via
    /// [`std::error::Error::source`].
    #[error("error getting secrets with label '{label_selector}' in namespace '{namespace}'")]
    StoreQuery {
        namespace: String,
        label_selector: String,
        #[source]
        source: StoreError,
    },

    /// More than one config object matched the selector.
    #[error(
        "multiple secrets found with label '{label_selector}', only one is allowed (found {count}: {})",
        .names.join(", ")
    )]
    AmbiguousConfiguration {
        label_selector: String,
        count: usize,
        names: Vec<String>,
    },

    /// The request cannot be served as given.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl KeystoneOverridesError {
    /// Returns the underlying store error for `StoreQuery` failures.
    #[must_use]
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::StoreQuery { source, .. } => Some(source),
            Self::AmbiguousConfiguration { .. } | Self::InvalidRequest(_) => None,
        }
    }
}

/// Errors produced by [`crate::ConfigObjectStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The caller is not allowed to list objects in the namespace.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The backend could not be reached or is overloaded.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The label selector was rejected.
    #[error("invalid label selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The caller cancelled the query before it completed.
    #[error("query cancelled")]
    Cancelled,

    /// The call deadline expired before the query completed.
    #[error("query deadline exceeded")]
    DeadlineExceeded,

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl StoreError {
    /// Wrap an arbitrary backend error.
    #[must_use]
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn store_query_exposes_cause_as_source() {
        let err = KeystoneOverridesError::StoreQuery {
            namespace: "openstack".to_owned(),
            label_selector: "keystone-override".to_owned(),
            source: StoreError::Forbidden("secrets is forbidden".to_owned()),
        };

        let source = err.source().expect("source must be set");
        let store = source
            .downcast_ref::<StoreError>()
            .expect("source must be a StoreError");
        assert!(matches!(store, StoreError::Forbidden(msg) if msg == "secrets is forbidden"));
        assert!(matches!(err.store_error(), Some(StoreError::Forbidden(_))));
    }

    #[test]
    fn ambiguous_message_lists_names() {
        let err = KeystoneOverridesError::AmbiguousConfiguration {
            label_selector: "keystone-override".to_owned(),
            count: 2,
            names: vec!["openstack/a".to_owned(), "openstack/b".to_owned()],
        };

        let msg = err.to_string();
        assert!(msg.contains("only one is allowed"));
        assert!(msg.contains("openstack/a, openstack/b"));
        assert!(err.store_error().is_none());
    }

    #[test]
    fn backend_error_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = StoreError::backend(io);
        assert_eq!(err.to_string(), "store backend error: reset by peer");

        let cause = err.source().expect("backend cause");
        assert!(cause.downcast_ref::<std::io::Error>().is_some());
    }
}
