//! Error type shared by the director parsers, client, and transfer expander.

use thiserror::Error;

/// Everything that can go wrong while resolving a resource through the director.
///
/// Each variant carries the raw text that failed so callers can log it as-is.
#[derive(Debug, Error)]
pub enum DirectorError {
    /// Transport-level failure talking to the director (DNS, connect, TLS, timeout).
    #[error("failed to reach director at {url}")]
    DirectorUnreachable {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// The director answered, but its headers cannot be turned into a namespace.
    #[error("malformed director response: {reason}")]
    DirectorResponseMalformed {
        reason: String,
        #[source]
        source: Option<Box<DirectorError>>,
    },

    /// The `Link` header was absent or empty.
    #[error("director advertised no caches (missing or empty Link header)")]
    NoCachesAdvertised,

    #[error("malformed cache descriptor {segment:?}: {reason}")]
    MalformedCacheDescriptor { segment: String, reason: String },

    /// A `Key=Value` pair in a metadata header has no `=` or an empty key.
    #[error("malformed header attribute {pair:?}: expected Key=Value")]
    MalformedHeaderAttribute { pair: String },

    #[error("invalid cache endpoint {endpoint:?}: {reason}")]
    InvalidCacheEndpoint { endpoint: String, reason: String },
}

impl DirectorError {
    /// Wraps a parser error as a malformed director response, keeping the cause.
    pub(crate) fn malformed(reason: impl Into<String>, source: DirectorError) -> Self {
        DirectorError::DirectorResponseMalformed {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectorError>;
