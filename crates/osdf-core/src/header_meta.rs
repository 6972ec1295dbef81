//! Decoding of the director's `Key=Value,Key2=Value2` metadata headers
//! (`X-OSDF-Namespace`, `X-OSDF-Authorization`).

use std::collections::HashMap;

use crate::error::{DirectorError, Result};

/// Parses a comma-separated attribute string into a name → value map.
///
/// Spaces are stripped from every pair and each pair is split on its first
/// `=`, so values may themselves contain `=`. An empty input yields an empty map.
pub fn parse_header_attributes(value: &str) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::new();
    if value.is_empty() {
        return Ok(attrs);
    }

    for raw in value.split(',') {
        let pair: String = raw.chars().filter(|c| *c != ' ').collect();
        match pair.split_once('=') {
            Some((name, val)) if !name.is_empty() => {
                attrs.insert(name.to_string(), val.to_string());
            }
            _ => {
                return Err(DirectorError::MalformedHeaderAttribute {
                    pair: raw.trim().to_string(),
                })
            }
        }
    }

    Ok(attrs)
}
