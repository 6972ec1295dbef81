//! `osdf plan <resource>` – ordered transfer attempts across the top caches.

use anyhow::{Context, Result};
use osdf_core::config::OsdfConfig;
use osdf_core::proxy::EnvProxyPolicy;
use osdf_core::resolve::plan_transfers;

use super::fetch_namespace;

pub async fn run_plan(
    cfg: &OsdfConfig,
    resource: &str,
    director: Option<&str>,
    max_caches: usize,
    json: bool,
) -> Result<()> {
    let namespace = fetch_namespace(cfg, resource, director).await?;
    let proxy = EnvProxyPolicy::from_env(cfg.proxy.as_ref());
    let attempts = plan_transfers(&namespace, max_caches, &proxy)
        .with_context(|| format!("plan transfers for {resource}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&attempts)?);
        return Ok(());
    }

    println!(
        "{} ({}; {} attempt(s))",
        namespace.path(),
        if namespace.requires_https() {
            "https"
        } else {
            "http"
        },
        attempts.len()
    );
    println!("{:<4} {:<6} {}", "#", "PROXY", "URL");
    for (i, a) in attempts.iter().enumerate() {
        println!(
            "{:<4} {:<6} {}",
            i + 1,
            if a.use_proxy { "yes" } else { "no" },
            a.url
        );
    }
    Ok(())
}
