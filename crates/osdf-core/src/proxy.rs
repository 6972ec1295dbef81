//! Forward-proxy capability queries used when planning plaintext transfers.
//!
//! The expander never looks at process state itself; it asks a
//! [`ProxyPolicy`]. The CLI builds an [`EnvProxyPolicy`], tests use
//! [`StaticProxyPolicy`].

use crate::config::ProxyConfig;

/// Whether transfers should go through a forward proxy, and whether a direct
/// fallback attempt is allowed when they do.
pub trait ProxyPolicy {
    fn is_proxy_enabled(&self) -> bool;
    fn can_disable_proxy(&self) -> bool;
}

/// Fixed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticProxyPolicy {
    pub enabled: bool,
    pub can_disable: bool,
}

impl StaticProxyPolicy {
    pub fn new(enabled: bool, can_disable: bool) -> Self {
        Self {
            enabled,
            can_disable,
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

impl ProxyPolicy for StaticProxyPolicy {
    fn is_proxy_enabled(&self) -> bool {
        self.enabled
    }

    fn can_disable_proxy(&self) -> bool {
        self.can_disable
    }
}

const PROXY_VARS: [&str; 2] = ["http_proxy", "HTTP_PROXY"];
const DISABLE_PROXY_VAR: &str = "OSDF_DISABLE_HTTP_PROXY";
const DISABLE_FALLBACK_VAR: &str = "OSDF_DISABLE_PROXY_FALLBACK";

/// Proxy policy derived from the environment, with config overrides.
///
/// Proxying is on when `http_proxy`/`HTTP_PROXY` is set and non-empty and
/// `OSDF_DISABLE_HTTP_PROXY` is unset. The direct fallback is allowed unless
/// `OSDF_DISABLE_PROXY_FALLBACK` is set. Values from `[proxy]` in the config
/// file win over the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvProxyPolicy {
    enabled: bool,
    can_disable: bool,
}

impl EnvProxyPolicy {
    pub fn from_env(overrides: Option<&ProxyConfig>) -> Self {
        Self::from_lookup(|name| std::env::var(name).ok(), overrides)
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F, overrides: Option<&ProxyConfig>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let proxy_set = PROXY_VARS
            .into_iter()
            .any(|v| lookup(v).is_some_and(|s| !s.trim().is_empty()));
        let env_enabled = proxy_set && lookup(DISABLE_PROXY_VAR).is_none();
        let env_can_disable = lookup(DISABLE_FALLBACK_VAR).is_none();

        let enabled = overrides.and_then(|o| o.enabled).unwrap_or(env_enabled);
        let can_disable = overrides
            .and_then(|o| o.allow_fallback)
            .unwrap_or(env_can_disable);

        tracing::debug!(enabled, can_disable, "proxy policy resolved");
        Self {
            enabled,
            can_disable,
        }
    }
}

impl ProxyPolicy for EnvProxyPolicy {
    fn is_proxy_enabled(&self) -> bool {
        self.enabled
    }

    fn can_disable_proxy(&self) -> bool {
        self.can_disable
    }
}
