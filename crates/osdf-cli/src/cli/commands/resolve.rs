//! `osdf resolve <resource>` – show namespace policy and ordered caches.

use anyhow::Result;
use osdf_core::config::OsdfConfig;
use osdf_core::link::{CacheAccess, CacheDescriptor};
use osdf_core::namespace::{HeaderFlag, Namespace};

use super::fetch_namespace;

pub async fn run_resolve(
    cfg: &OsdfConfig,
    resource: &str,
    director: Option<&str>,
    json: bool,
) -> Result<()> {
    let namespace = fetch_namespace(cfg, resource, director).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&namespace)?);
    } else {
        print_namespace(&namespace);
    }
    Ok(())
}

fn flag(f: &HeaderFlag) -> String {
    match f {
        HeaderFlag::Set(b) => b.to_string(),
        HeaderFlag::Missing => "false (not sent)".to_string(),
        HeaderFlag::Invalid(raw) => format!("false (invalid {raw:?})"),
    }
}

fn print_namespace(ns: &Namespace) {
    println!("Namespace:       {}", ns.path());
    println!("UseTokenOnRead:  {}", flag(ns.use_token_on_read()));
    println!("ReadHTTPS:       {}", flag(ns.read_https()));
    println!("Issuer:          {}", ns.issuer().unwrap_or("-"));
    println!();
    print_caches(ns.caches());
}

pub(super) fn print_caches(caches: &[CacheDescriptor]) {
    println!("{:<5} {:<14} {}", "PRI", "ACCESS", "ENDPOINT");
    for c in caches {
        let access = match c.access() {
            CacheAccess::Public => "public".to_string(),
            CacheAccess::Authenticated => "authenticated".to_string(),
            CacheAccess::Unmapped(Some(port)) => format!("unmapped:{port}"),
            CacheAccess::Unmapped(None) => "unmapped".to_string(),
        };
        println!("{:<5} {:<14} {}", c.priority(), access, c.endpoint());
    }
}
