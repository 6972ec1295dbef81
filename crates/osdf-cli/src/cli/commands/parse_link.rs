//! `osdf parse-link <header>` – offline Link header check.

use anyhow::{Context, Result};
use osdf_core::link::parse_link_header;

use super::resolve::print_caches;

pub fn run_parse_link(header: &str) -> Result<()> {
    let caches = parse_link_header(header).context("parse Link header")?;
    print_caches(&caches);
    Ok(())
}
