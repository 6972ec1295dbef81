//! Parse a director `Link` header into priority-ordered cache descriptors.

use super::{CacheAccess, CacheDescriptor};
use crate::error::{DirectorError, Result};

/// Parses `<endpoint>; pri=N[; rel=...]` segments separated by commas.
///
/// The result is stable-sorted by ascending priority, so caches with equal
/// priority keep header order. A segment without `pri` gets priority 0.
pub fn parse_link_header(value: &str) -> Result<Vec<CacheDescriptor>> {
    if value.trim().is_empty() {
        return Err(DirectorError::NoCachesAdvertised);
    }

    let mut caches = value
        .split(',')
        .map(parse_segment)
        .collect::<Result<Vec<_>>>()?;

    caches.sort_by_key(CacheDescriptor::priority);
    Ok(caches)
}

fn parse_segment(raw: &str) -> Result<CacheDescriptor> {
    let segment: String = raw.chars().filter(|c| *c != ' ').collect();

    let mut endpoint = None;
    let mut priority = 0i64;
    let mut rel = None;

    for token in segment.split(';') {
        if let Some(inner) = token.strip_prefix('<') {
            let inner = inner
                .strip_suffix('>')
                .ok_or_else(|| malformed(raw, "endpoint is missing its closing '>'"))?;
            if inner.is_empty() {
                return Err(malformed(raw, "empty endpoint"));
            }
            endpoint = Some(inner.to_string());
        } else if token.starts_with("pri") {
            let value = token
                .split_once('=')
                .map(|(_, v)| v)
                .ok_or_else(|| malformed(raw, "pri token has no value"))?;
            priority = value
                .parse()
                .map_err(|_| malformed(raw, &format!("priority {value:?} is not an integer")))?;
        } else if token.starts_with("rel") {
            rel = token
                .split_once('=')
                .map(|(_, v)| v.trim_matches('"').to_string());
        }
    }

    let endpoint = endpoint.ok_or_else(|| malformed(raw, "no <endpoint> token"))?;
    let cache = CacheDescriptor::new(endpoint, priority).with_rel(rel);
    if let CacheAccess::Unmapped(port) = cache.access() {
        tracing::warn!(
            endpoint = cache.endpoint(),
            ?port,
            "cache port maps to neither public (8000) nor authenticated (8443) access"
        );
    }
    Ok(cache)
}

fn malformed(segment: &str, reason: &str) -> DirectorError {
    DirectorError::MalformedCacheDescriptor {
        segment: segment.trim().to_string(),
        reason: reason.to_string(),
    }
}
