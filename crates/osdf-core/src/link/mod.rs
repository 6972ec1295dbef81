//! Cache replicas advertised by the director's `Link` header.
//!
//! Each `<endpoint>; pri=N[; rel=...]` segment becomes a [`CacheDescriptor`].
//! Whether a replica needs an authenticated request is not advertised
//! directly; it follows from the port the director hands out.

mod parse;

use serde::Serialize;

pub use parse::parse_link_header;

/// Port the director assigns to caches serving public (unauthenticated) reads.
pub const PUBLIC_CACHE_PORT: u16 = 8000;
/// Port the director assigns to caches serving token-authenticated reads.
pub const AUTH_CACHE_PORT: u16 = 8443;

/// Access mode implied by a cache endpoint's port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "port")]
pub enum CacheAccess {
    /// Port 8000.
    Public,
    /// Port 8443.
    Authenticated,
    /// Any other port, or no port at all.
    Unmapped(Option<u16>),
}

impl CacheAccess {
    fn from_port(port: Option<u16>) -> Self {
        match port {
            Some(PUBLIC_CACHE_PORT) => CacheAccess::Public,
            Some(AUTH_CACHE_PORT) => CacheAccess::Authenticated,
            other => CacheAccess::Unmapped(other),
        }
    }
}

/// One candidate cache replica, as advertised by the director.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheDescriptor {
    endpoint: String,
    priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    rel: Option<String>,
    access: CacheAccess,
}

impl CacheDescriptor {
    pub fn new(endpoint: impl Into<String>, priority: i64) -> Self {
        let endpoint = endpoint.into();
        let access = CacheAccess::from_port(endpoint_port(&endpoint));
        Self {
            endpoint,
            priority,
            rel: None,
            access,
        }
    }

    fn with_rel(mut self, rel: Option<String>) -> Self {
        self.rel = rel;
        self
    }

    /// `host[:port]` or full URL exactly as the director sent it.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Lower is preferred.
    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Relation type from the `rel` token, if the director sent one.
    pub fn rel(&self) -> Option<&str> {
        self.rel.as_deref()
    }

    pub fn access(&self) -> CacheAccess {
        self.access
    }

    /// True only for endpoints on the authenticated port (8443).
    pub fn requires_auth(&self) -> bool {
        self.access == CacheAccess::Authenticated
    }
}

/// Extracts the explicit port from `host:port`, `[v6]:port`, or a full URL.
pub(crate) fn endpoint_port(endpoint: &str) -> Option<u16> {
    let authority = match endpoint.split_once("://") {
        Some((_, rest)) => rest,
        None => endpoint,
    };
    let authority = authority
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(authority);
    let authority = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    let port = match authority.strip_prefix('[') {
        Some(rest) => rest.split_once("]:")?.1,
        None => authority.rsplit_once(':')?.1,
    };
    port.parse().ok()
}
