//! Integration test: local director stand-in answering 307 with OSDF headers.
//!
//! Queries it through the curl client, builds the namespace, and plans the
//! transfer attempts end to end.

mod common;

use std::time::Duration;

use common::director_server::{self, DirectorServerOptions};
use osdf_core::director::{query_director, DirectorClientOptions};
use osdf_core::error::DirectorError;
use osdf_core::proxy::StaticProxyPolicy;
use osdf_core::resolve::{plan_transfers, resolve_namespace};

fn director_headers(pairs: &[(&str, &str)]) -> DirectorServerOptions {
    DirectorServerOptions {
        headers: pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect(),
        ..DirectorServerOptions::default()
    }
}

fn client(base_url: &str) -> DirectorClientOptions {
    DirectorClientOptions {
        director_url: base_url.to_string(),
        connect_timeout: Duration::from_secs(2),
        timeout: Duration::from_secs(5),
        bypass_proxy: true,
        ..DirectorClientOptions::default()
    }
}

#[test]
fn redirect_is_captured_not_followed() {
    let server = director_server::start(DirectorServerOptions {
        headers: vec![(
            "Location".to_string(),
            // Points back at the server: a followed redirect would show up as a second request.
            "/redirected".to_string(),
        )],
        ..DirectorServerOptions::default()
    });

    let resp = query_director("/ospool/data/file.txt", &client(&server.base_url)).unwrap();
    assert_eq!(resp.status, 307);
    assert!(resp.is_redirect());
    assert_eq!(resp.headers.first("location"), Some("/redirected"));
    assert_eq!(server.requests(), ["/ospool/data/file.txt"]);
}

#[test]
fn resolve_and_plan_end_to_end() {
    let server = director_server::start(director_headers(&[
        (
            "Link",
            "<cache1.example.org:8443>; rel=\"duplicate\"; pri=1, <cache2.example.org:8000>; pri=0",
        ),
        (
            "X-OSDF-Namespace",
            "Namespace=/ospool/data, UseTokenOnRead=false, ReadHTTPS=false",
        ),
    ]));

    let ns = resolve_namespace("/ospool/data/file.txt", &client(&server.base_url)).unwrap();
    assert_eq!(ns.path(), "/ospool/data");
    assert!(ns.issuer().is_none());
    assert_eq!(ns.caches().len(), 2);
    assert_eq!(ns.caches()[0].endpoint(), "cache2.example.org:8000");
    assert!(!ns.caches()[0].requires_auth());
    assert_eq!(ns.caches()[1].endpoint(), "cache1.example.org:8443");
    assert!(ns.caches()[1].requires_auth());

    let plan = plan_transfers(&ns, 1, &StaticProxyPolicy::new(true, true)).unwrap();
    let got: Vec<(&str, bool)> = plan.iter().map(|a| (a.url.as_str(), a.use_proxy)).collect();
    assert_eq!(
        got,
        [
            ("http://cache2.example.org:8000/", true),
            ("http://cache2.example.org:8000/", false)
        ]
    );
}

#[test]
fn authorization_header_sets_issuer_and_https() {
    let server = director_server::start(director_headers(&[
        ("Link", "<cache.example.org>; pri=0"),
        (
            "X-OSDF-Namespace",
            "Namespace=/protected, UseTokenOnRead=true, ReadHTTPS=true",
        ),
        (
            "X-OSDF-Authorization",
            "Issuer=https://token.example.org/protected",
        ),
    ]));

    let ns = resolve_namespace("/protected/secret.dat", &client(&server.base_url)).unwrap();
    assert_eq!(ns.issuer(), Some("https://token.example.org/protected"));

    let plan = plan_transfers(&ns, 0, &StaticProxyPolicy::new(true, true)).unwrap();
    let got: Vec<&str> = plan.iter().map(|a| a.url.as_str()).collect();
    assert_eq!(
        got,
        [
            "https://cache.example.org:8444/",
            "https://cache.example.org:8443/"
        ]
    );
    assert!(plan.iter().all(|a| !a.use_proxy));
}

#[test]
fn missing_link_header_is_malformed_response() {
    let server = director_server::start(director_headers(&[(
        "X-OSDF-Namespace",
        "Namespace=/ospool/data",
    )]));

    let err = resolve_namespace("/ospool/data/file.txt", &client(&server.base_url)).unwrap_err();
    match err {
        DirectorError::DirectorResponseMalformed {
            source: Some(inner),
            ..
        } => assert!(matches!(*inner, DirectorError::NoCachesAdvertised)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn not_found_without_headers_is_malformed_response() {
    let server = director_server::start(DirectorServerOptions {
        status: "404 Not Found",
        headers: Vec::new(),
    });

    let err = resolve_namespace("/nowhere", &client(&server.base_url)).unwrap_err();
    assert!(matches!(
        err,
        DirectorError::DirectorResponseMalformed { source: None, .. }
    ));
}

#[test]
fn unreachable_director() {
    let url = director_server::closed_url();
    let err = query_director("/ospool/data/file.txt", &client(&url)).unwrap_err();
    match err {
        DirectorError::DirectorUnreachable { url: queried, .. } => {
            assert_eq!(queried, format!("{url}/ospool/data/file.txt"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
