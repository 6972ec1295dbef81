//! Expansion of a chosen cache into concrete transfer attempts.
//!
//! A cache descriptor only names a host (sometimes with a port or scheme).
//! The transfer executor needs full URLs plus a proxy decision, tried in
//! order until one works. This module enumerates those candidates; it does
//! no I/O and never retries.

use serde::Serialize;
use url::Url;

use crate::error::{DirectorError, Result};
use crate::link::CacheDescriptor;
use crate::proxy::ProxyPolicy;

/// Preferred HTTPS port, tried before the standard authenticated port.
pub const HTTPS_PREFERRED_PORT: u16 = 8444;
pub const HTTPS_FALLBACK_PORT: u16 = 8443;
pub const HTTP_DEFAULT_PORT: u16 = 8000;

/// One URL the transfer executor may try, and whether to route it through
/// the configured forward proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferAttempt {
    pub url: Url,
    pub use_proxy: bool,
}

/// True if an authority (`host:port`, `[v6]:port`) carries an explicit port.
pub fn has_port(authority: &str) -> bool {
    match (authority.rfind(':'), authority.rfind(']')) {
        (Some(colon), Some(bracket)) => colon > bracket,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Produces the ordered transfer attempts for `cache`, most preferred first.
///
/// With `use_https` and no explicit port the cache is tried on 8444, then
/// 8443; an explicit port yields a single attempt. Plaintext defaults to port
/// 8000 and goes through the proxy when `proxy` says so, followed by a direct
/// attempt if the proxy may be bypassed. HTTPS attempts never use the proxy.
pub fn expand_cache(
    cache: &CacheDescriptor,
    use_https: bool,
    proxy: &dyn ProxyPolicy,
) -> Result<Vec<TransferAttempt>> {
    let endpoint = cache.endpoint();
    let (authority, path) = split_endpoint(endpoint)?;

    let mut attempts = Vec::with_capacity(2);
    if use_https {
        if has_port(authority) {
            attempts.push(attempt(endpoint, "https", authority, path, false)?);
        } else {
            for port in [HTTPS_PREFERRED_PORT, HTTPS_FALLBACK_PORT] {
                let with_port = format!("{authority}:{port}");
                attempts.push(attempt(endpoint, "https", &with_port, path, false)?);
            }
        }
    } else {
        let with_port = if has_port(authority) {
            authority.to_string()
        } else {
            format!("{authority}:{HTTP_DEFAULT_PORT}")
        };
        let proxied = proxy.is_proxy_enabled();
        let first = attempt(endpoint, "http", &with_port, path, proxied)?;
        let direct_fallback = proxied && proxy.can_disable_proxy();
        attempts.push(first.clone());
        if direct_fallback {
            attempts.push(TransferAttempt {
                use_proxy: false,
                ..first
            });
        }
    }

    tracing::debug!(
        endpoint,
        use_https,
        attempts = attempts.len(),
        "expanded cache into transfer attempts"
    );
    Ok(attempts)
}

/// Splits an endpoint into `(authority, path)`.
///
/// Anything that does not parse as a URL with a host (no scheme, or a
/// `host:port` that the URL parser reads as `scheme:path`) is a bare
/// authority with an empty path.
fn split_endpoint(endpoint: &str) -> Result<(&str, &str)> {
    if endpoint.is_empty() {
        return Err(invalid(endpoint, "empty endpoint"));
    }
    match Url::parse(endpoint) {
        Ok(parsed) if parsed.host_str().is_some() => {
            let rest = endpoint
                .split_once("://")
                .map_or(endpoint, |(_, rest)| rest);
            let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
            let authority = &rest[..end];
            let authority = authority
                .rsplit_once('@')
                .map_or(authority, |(_, host)| host);
            Ok((authority, &rest[end..]))
        }
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => Ok((endpoint, "")),
        Err(e) => Err(invalid(endpoint, &e.to_string())),
    }
}

fn attempt(
    endpoint: &str,
    scheme: &str,
    authority: &str,
    path: &str,
    use_proxy: bool,
) -> Result<TransferAttempt> {
    let url = Url::parse(&format!("{scheme}://{authority}{path}")).map_err(|e| {
        tracing::error!("failed to parse cache endpoint {:?}: {}", endpoint, e);
        invalid(endpoint, &e.to_string())
    })?;
    Ok(TransferAttempt { url, use_proxy })
}

fn invalid(endpoint: &str, reason: &str) -> DirectorError {
    DirectorError::InvalidCacheEndpoint {
        endpoint: endpoint.to_string(),
        reason: reason.to_string(),
    }
}
