//! Loads the catalog shipped in data/

#![allow(clippy::unwrap_used, clippy::expect_used)]

use screenvault_catalog::{Catalog, JsonFileSource};
use screenvault_types::{Category, ElementTag, FlowType};
use std::path::Path;

fn shipped() -> Catalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/catalog.json");
    Catalog::load(&JsonFileSource::new(path)).unwrap()
}

#[test]
fn test_shipped_catalog_loads() {
    let catalog = shipped();
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.screen_count(), 34);
    assert_eq!(
        catalog.categories_present(),
        vec![Category::Wallet, Category::Exchange, Category::DeFi]
    );

    let wallets: Vec<_> = catalog
        .apps_in_category(Category::Wallet)
        .iter()
        .map(|a| a.slug.as_str())
        .collect();
    assert_eq!(wallets, vec!["metamask", "phantom", "rainbow"]);
}

#[test]
fn test_shipped_catalog_screens() {
    let catalog = shipped();

    let connect: Vec<_> = catalog
        .screens_with_tag(ElementTag::WalletConnectButton)
        .into_iter()
        .map(|s| s.app_slug)
        .collect();
    assert_eq!(connect, vec!["uniswap", "aave"]);

    let phantom = catalog.app("phantom").unwrap();
    assert!(phantom.undeclared_flows().is_empty());
    // Screen without an image is still part of the catalog
    let onboarding: Vec<_> = phantom.screens_in_flow(FlowType::Onboarding).collect();
    assert_eq!(onboarding.len(), 3);
    assert!(onboarding[2].image.is_none());
}
