//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_resolve() {
    let cli = parse(&["osdf", "resolve", "/ospool/data/file.txt"]);
    assert!(!cli.verbose);
    match cli.command {
        CliCommand::Resolve {
            resource,
            director,
            json,
        } => {
            assert_eq!(resource, "/ospool/data/file.txt");
            assert!(director.is_none());
            assert!(!json);
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_director_json() {
    let cli = parse(&[
        "osdf",
        "resolve",
        "/foo",
        "--director",
        "https://director.example.org",
        "--json",
        "-v",
    ]);
    assert!(cli.verbose);
    match cli.command {
        CliCommand::Resolve { director, json, .. } => {
            assert_eq!(director.as_deref(), Some("https://director.example.org"));
            assert!(json);
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_plan() {
    match parse(&["osdf", "plan", "/foo/bar"]).command {
        CliCommand::Plan {
            resource, caches, ..
        } => {
            assert_eq!(resource, "/foo/bar");
            assert!(caches.is_none());
        }
        _ => panic!("expected Plan"),
    }
}

#[test]
fn cli_parse_plan_caches() {
    match parse(&["osdf", "plan", "/foo/bar", "--caches", "2"]).command {
        CliCommand::Plan { caches, .. } => assert_eq!(caches, Some(2)),
        _ => panic!("expected Plan with --caches"),
    }
}

#[test]
fn cli_parse_link() {
    match parse(&["osdf", "parse-link", "<cache.example.org:8443>; pri=1"]).command {
        CliCommand::ParseLink { header } => {
            assert_eq!(header, "<cache.example.org:8443>; pri=1")
        }
        _ => panic!("expected ParseLink"),
    }
}

#[test]
fn cli_rejects_missing_resource() {
    assert!(Cli::try_parse_from(["osdf", "resolve"]).is_err());
}
