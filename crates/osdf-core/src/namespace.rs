//! Namespace policy assembled from a director response.
//!
//! The director describes the namespace a resource lives in through
//! `X-OSDF-Namespace` (path, token and HTTPS requirements) and, for
//! token-protected namespaces, `X-OSDF-Authorization` (issuer). Combined with
//! the `Link` cache list this is everything needed to plan a read.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::director::{DirectorResponse, ResponseHeaders};
use crate::error::{DirectorError, Result};
use crate::header_meta::parse_header_attributes;
use crate::link::{parse_link_header, CacheDescriptor};

pub const NAMESPACE_HEADER: &str = "X-OSDF-Namespace";
pub const AUTHORIZATION_HEADER: &str = "X-OSDF-Authorization";
pub const LINK_HEADER: &str = "Link";

/// A boolean policy attribute and how it was obtained.
///
/// Missing and unparseable values both read as `false`, but stay
/// distinguishable so callers can tell a real `false` from a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "value")]
pub enum HeaderFlag {
    Set(bool),
    Missing,
    Invalid(String),
}

impl HeaderFlag {
    fn from_attr(attrs: &HashMap<String, String>, key: &str) -> Self {
        match attrs.get(key) {
            None => HeaderFlag::Missing,
            Some(raw) => match parse_bool(raw) {
                Some(b) => HeaderFlag::Set(b),
                None => {
                    tracing::warn!(
                        "namespace attribute {}={:?} is not a boolean, defaulting to false",
                        key,
                        raw
                    );
                    HeaderFlag::Invalid(raw.clone())
                }
            },
        }
    }

    pub fn value(&self) -> bool {
        matches!(self, HeaderFlag::Set(true))
    }

    /// True when the value came from the documented `false` default.
    pub fn is_defaulted(&self) -> bool {
        !matches!(self, HeaderFlag::Set(_))
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// How to access a resource: namespace path, read policy, issuer, and caches.
///
/// Only built from director headers; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Namespace {
    path: String,
    use_token_on_read: HeaderFlag,
    read_https: HeaderFlag,
    #[serde(skip_serializing_if = "Option::is_none")]
    issuer: Option<String>,
    /// Ascending priority; never empty.
    caches: Vec<CacheDescriptor>,
}

impl Namespace {
    pub fn from_response(resp: &DirectorResponse) -> Result<Self> {
        Self::from_headers(&resp.headers)
    }

    /// Builds the namespace from director response headers.
    pub fn from_headers(headers: &ResponseHeaders) -> Result<Self> {
        let raw_ns = headers.first(NAMESPACE_HEADER).ok_or_else(|| {
            DirectorError::DirectorResponseMalformed {
                reason: format!("missing {} header", NAMESPACE_HEADER),
                source: None,
            }
        })?;
        let ns_attrs = parse_header_attributes(raw_ns)
            .map_err(|e| DirectorError::malformed(format!("bad {} header", NAMESPACE_HEADER), e))?;

        let issuer = match headers.first(AUTHORIZATION_HEADER) {
            Some(raw_auth) => {
                let mut auth_attrs = parse_header_attributes(raw_auth).map_err(|e| {
                    DirectorError::malformed(format!("bad {} header", AUTHORIZATION_HEADER), e)
                })?;
                auth_attrs.remove("Issuer")
            }
            None => None,
        };

        let caches = parse_link_header(&joined_links(headers)).map_err(|e| {
            tracing::error!("unable to construct ordered cache list: {}", e);
            DirectorError::malformed("unusable Link header", e)
        })?;

        let namespace = Namespace {
            path: ns_attrs.get("Namespace").cloned().unwrap_or_default(),
            use_token_on_read: HeaderFlag::from_attr(&ns_attrs, "UseTokenOnRead"),
            read_https: HeaderFlag::from_attr(&ns_attrs, "ReadHTTPS"),
            issuer,
            caches,
        };
        tracing::debug!("namespace constructed from director: {}", namespace);
        Ok(namespace)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn use_token_on_read(&self) -> &HeaderFlag {
        &self.use_token_on_read
    }

    pub fn read_https(&self) -> &HeaderFlag {
        &self.read_https
    }

    /// Token issuer from `X-OSDF-Authorization`, if the director sent one.
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    pub fn caches(&self) -> &[CacheDescriptor] {
        &self.caches
    }

    /// Reads must use HTTPS when the namespace demands it or when a token is sent.
    pub fn requires_https(&self) -> bool {
        self.read_https.value() || self.use_token_on_read.value()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (token={}, https={}, issuer={}, caches={})",
            self.path,
            self.use_token_on_read.value(),
            self.read_https.value(),
            self.issuer.as_deref().unwrap_or("-"),
            self.caches.len()
        )
    }
}

/// Multiple `Link` lines are equivalent to one comma-joined value.
fn joined_links(headers: &ResponseHeaders) -> String {
    headers.values(LINK_HEADER).collect::<Vec<_>>().join(",")
}
