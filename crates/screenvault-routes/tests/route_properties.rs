//! Whole-site route properties

#![allow(clippy::unwrap_used, clippy::expect_used)]

use screenvault_catalog::{Catalog, InMemorySource};
use screenvault_patterns::PatternLibrary;
use screenvault_routes::{enumerate, enumerate_routes, RouteKind};
use screenvault_types::App;
use std::collections::HashSet;

fn fixture() -> Catalog {
    let apps: Vec<App> = serde_json::from_str(
        r##"[
        {"slug": "metamask", "name": "MetaMask", "category": "Wallet", "detailed": true,
         "chains": ["Ethereum", "Polygon"], "flows": ["Onboarding", "Send"],
         "styles": ["Light"], "accentColor": "#F6851B",
         "screens": [
            {"step": 1, "label": "Get started", "flow": "Onboarding", "image": "/mm/1.png", "tags": ["Wallet Connect Button"]},
            {"step": 2, "label": "Secret Recovery Phrase", "flow": "Onboarding", "image": "/mm/2.png", "tags": ["Seed Phrase"]},
            {"step": 1, "label": "Send to", "flow": "Send", "image": "/mm/3.png", "tags": ["Address Input"]}
         ]},
        {"slug": "phantom", "name": "Phantom", "category": "Wallet",
         "chains": ["Solana"], "flows": ["Onboarding", "Swap"], "accentColor": "#AB9FF2",
         "screens": [
            {"step": 1, "label": "Welcome", "flow": "Onboarding", "image": "/ph/1.png"},
            {"step": 1, "label": "Swap", "flow": "Swap", "image": "/ph/2.png", "tags": ["Token Selector"]}
         ]},
        {"slug": "argent", "name": "Argent", "category": "Wallet", "flows": ["Onboarding"]},
        {"slug": "uniswap", "name": "Uniswap", "category": "Exchange", "flows": ["Swap"],
         "screens": [{"step": 1, "label": "Connect wallet", "flow": "Swap", "image": "/uni/1.png"}]},
        {"slug": "across", "name": "Across", "category": "Bridge", "flows": ["Bridge"]}
    ]"##,
    )
    .unwrap();
    Catalog::load(&InMemorySource::new(apps)).unwrap()
}

#[test]
fn test_routes_are_deterministic() {
    let catalog = fixture();
    let library = PatternLibrary::builtin().unwrap();

    let first = enumerate_routes(&catalog, &library);
    let second = enumerate_routes(&catalog, &library);
    assert_eq!(first, second);
}

#[test]
fn test_routes_have_no_duplicates() {
    let catalog = fixture();
    let library = PatternLibrary::builtin().unwrap();

    let routes = enumerate_routes(&catalog, &library);
    let unique: HashSet<&String> = routes.iter().collect();
    assert_eq!(unique.len(), routes.len());
}

#[test]
fn test_comparison_routes_per_category() {
    let catalog = fixture();
    let routes = enumerate(&catalog, &PatternLibrary::default());

    let comparisons: Vec<&str> = routes
        .iter()
        .filter(|r| r.kind == RouteKind::Comparison)
        .map(|r| r.path.as_str())
        .collect();

    // Three wallets pair up; exchange and bridge have one app each.
    // MetaMask is detailed, so it pairs first.
    assert_eq!(
        comparisons,
        vec![
            "/compare/argent-vs-metamask",
            "/compare/metamask-vs-phantom",
            "/compare/argent-vs-phantom",
        ]
    );
}

#[test]
fn test_route_family_counts() {
    let catalog = fixture();
    let routes = enumerate(&catalog, &PatternLibrary::default());
    let count = |kind: RouteKind| routes.iter().filter(|r| r.kind == kind).count();

    assert_eq!(count(RouteKind::App), 5);
    assert_eq!(count(RouteKind::AppAlternatives), 5);
    assert_eq!(count(RouteKind::Screen), catalog.screen_count());
    assert_eq!(count(RouteKind::Element), 4);
    // wallet: onboarding, swap, send; exchange: swap; bridge: bridge
    assert_eq!(count(RouteKind::CategoryFlow), 5);
}
