//! CLI command handlers, one per file.

mod parse_link;
mod plan;
mod resolve;

pub use parse_link::run_parse_link;
pub use plan::run_plan;
pub use resolve::run_resolve;

use anyhow::{Context, Result};
use osdf_core::config::OsdfConfig;
use osdf_core::namespace::Namespace;
use osdf_core::resolve::resolve_namespace;

/// Runs the blocking director query off the async runtime.
async fn fetch_namespace(
    cfg: &OsdfConfig,
    resource: &str,
    director: Option<&str>,
) -> Result<Namespace> {
    let opts = cfg.client_options(director);
    let namespace = tokio::task::spawn_blocking({
        let resource = resource.to_string();
        move || resolve_namespace(&resource, &opts)
    })
    .await
    .context("director query task join")?
    .with_context(|| format!("resolve {resource}"))?;
    Ok(namespace)
}
