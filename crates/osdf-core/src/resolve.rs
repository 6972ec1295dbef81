//! End-to-end resolution: director query → namespace → ordered attempt plan.

use crate::director::{query_director, DirectorClientOptions, DirectorResponse};
use crate::error::{DirectorError, Result};
use crate::namespace::Namespace;
use crate::proxy::ProxyPolicy;
use crate::transfer::{expand_cache, TransferAttempt};

/// Anything that can answer a director query for a resource path.
///
/// The live implementation is [`DirectorClientOptions`] (one curl GET);
/// tests and replays can hand back canned responses.
pub trait DirectorSource {
    fn query(&self, resource: &str) -> Result<DirectorResponse>;
}

impl DirectorSource for DirectorClientOptions {
    fn query(&self, resource: &str) -> Result<DirectorResponse> {
        query_director(resource, self)
    }
}

/// Queries the director for `resource` and builds its namespace policy.
///
/// Blocking for the live source; call from `spawn_blocking` if used from async code.
pub fn resolve_namespace<S>(resource: &str, source: &S) -> Result<Namespace>
where
    S: DirectorSource + ?Sized,
{
    let response = source.query(resource)?;
    Namespace::from_response(&response)
}

/// Expands the first `max_caches` caches (all of them when 0) into one
/// attempt list, in priority order.
///
/// The HTTPS decision comes from the namespace. A cache whose endpoint cannot
/// be expanded is skipped; if none can, the last expansion error is returned.
pub fn plan_transfers(
    namespace: &Namespace,
    max_caches: usize,
    proxy: &dyn ProxyPolicy,
) -> Result<Vec<TransferAttempt>> {
    let use_https = namespace.requires_https();
    let limit = if max_caches == 0 {
        namespace.caches().len()
    } else {
        max_caches
    };

    let mut attempts = Vec::new();
    let mut last_err = None;
    for cache in namespace.caches().iter().take(limit) {
        match expand_cache(cache, use_https, proxy) {
            Ok(mut expanded) => attempts.append(&mut expanded),
            Err(e) => {
                tracing::warn!("skipping cache {}: {}", cache.endpoint(), e);
                last_err = Some(e);
            }
        }
    }

    match (attempts.is_empty(), last_err) {
        (true, Some(e)) => Err(e),
        (true, None) => Err(DirectorError::NoCachesAdvertised),
        (false, _) => Ok(attempts),
    }
}
