//! Route building error types.

use thiserror::Error;

/// Errors raised while building routes, urls or hotlinks.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Cross-link target does not register the route descriptor capability.
    #[error("route descriptor is not attached to `{target}`")]
    NotLinkable { target: String },

    /// Error raised by a caller-supplied parameter function.
    // NOTE: transparent so the caller sees its own error, not a wrapper
    #[error(transparent)]
    Params(#[from] anyhow::Error),

    #[error("absolute url requested but no base url is configured")]
    MissingBaseUrl,

    #[error("invalid base url `{0}`")]
    InvalidBaseUrl(String, #[source] url::ParseError),

    #[error("no route descriptor registered for entity `{0}`")]
    UnknownEntity(String),
}

impl LinkError {
    pub fn not_linkable(target: impl Into<String>) -> Self {
        Self::NotLinkable {
            target: target.into(),
        }
    }
}

pub type Result<T, E = LinkError> = std::result::Result<T, E>;
