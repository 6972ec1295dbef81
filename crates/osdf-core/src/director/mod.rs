//! Director queries.
//!
//! Uses the curl crate (libcurl) to issue a single GET against the director
//! with redirect-following turned off. The director answers with a redirect
//! status whose headers (`Link`, `X-OSDF-Namespace`, `X-OSDF-Authorization`)
//! describe the caches and namespace policy; those headers are what we keep.

mod headers;

use std::str;
use std::time::Duration;

use crate::error::{DirectorError, Result};

pub use headers::ResponseHeaders;

/// Director used when neither config nor the command line names one.
pub const DEFAULT_DIRECTOR_URL: &str = "https://osdf-director.osg-htc.org";

/// Transport settings for a director query.
#[derive(Debug, Clone)]
pub struct DirectorClientOptions {
    pub director_url: String,
    pub connect_timeout: Duration,
    /// Upper bound on the whole request, headers included.
    pub timeout: Duration,
    pub user_agent: String,
    /// Ignore `http_proxy`/`https_proxy` for the director query itself.
    pub bypass_proxy: bool,
}

impl Default for DirectorClientOptions {
    fn default() -> Self {
        Self {
            director_url: DEFAULT_DIRECTOR_URL.to_string(),
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            user_agent: format!("osdf-client/{}", env!("CARGO_PKG_VERSION")),
            bypass_proxy: false,
        }
    }
}

/// What the director sent back: status and headers. The body is discarded.
#[derive(Debug, Clone)]
pub struct DirectorResponse {
    /// The URL that was queried.
    pub url: String,
    pub status: u32,
    pub headers: ResponseHeaders,
}

impl DirectorResponse {
    /// True for the 3xx answers the director normally gives.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// Joins the director base URL and a resource path with exactly one `/`.
pub fn director_resource_url(director_url: &str, resource: &str) -> String {
    format!(
        "{}/{}",
        director_url.trim_end_matches('/'),
        resource.trim_start_matches('/')
    )
}

/// Queries the director for `resource` without following its redirect.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn query_director(resource: &str, opts: &DirectorClientOptions) -> Result<DirectorResponse> {
    let url = director_resource_url(&opts.director_url, resource);
    let unreachable = |source: curl::Error| DirectorError::DirectorUnreachable {
        url: url.clone(),
        source,
    };

    tracing::debug!("querying director at {}", url);

    let mut lines: Vec<String> = Vec::new();
    let mut easy = curl::easy::Easy::new();
    easy.url(&url).map_err(unreachable)?;
    easy.get(true).map_err(unreachable)?;
    easy.follow_location(false).map_err(unreachable)?;
    easy.connect_timeout(opts.connect_timeout).map_err(unreachable)?;
    easy.timeout(opts.timeout).map_err(unreachable)?;
    easy.useragent(&opts.user_agent).map_err(unreachable)?;
    if opts.bypass_proxy {
        easy.noproxy("*").map_err(unreachable)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    lines.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(unreachable)?;
        // Body is not used; drain it so the connection completes cleanly.
        transfer
            .write_function(|data| Ok(data.len()))
            .map_err(unreachable)?;
        transfer.perform().map_err(|e| {
            tracing::error!("failed to get response from director {}: {}", url, e);
            unreachable(e)
        })?;
    }

    let status = easy.response_code().map_err(unreachable)?;
    let headers = headers::parse_header_lines(&lines);
    tracing::debug!(status, headers = headers.len(), "director responded for {}", url);

    let response = DirectorResponse {
        url,
        status,
        headers,
    };
    if !response.is_redirect() {
        tracing::debug!("director answered {} without a redirect", status);
    }
    Ok(response)
}
