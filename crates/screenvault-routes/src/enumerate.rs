//! Static route enumeration for the content site

use crate::compare::comparison_pairs;
use screenvault_catalog::Catalog;
use screenvault_patterns::PatternLibrary;
use screenvault_types::{slugify, Category, ChainType, ElementTag, FlowType, StyleType};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{info, warn};

/// Family a route belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    App,
    AppScreens,
    AppFlows,
    AppAlternatives,
    Screen,
    Element,
    Comparison,
    Flow,
    Category,
    Chain,
    Style,
    CategoryFlow,
    Section,
    Pattern,
}

/// A statically generated page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub kind: RouteKind,
    pub path: String,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Ordered route list that drops repeated paths
#[derive(Default)]
struct RouteSet {
    routes: Vec<Route>,
    seen: HashSet<String>,
}

impl RouteSet {
    fn push(&mut self, kind: RouteKind, path: String) {
        if self.seen.insert(path.clone()) {
            self.routes.push(Route { kind, path });
        } else {
            warn!("Skipping duplicate route {}", path);
        }
    }
}

/// Every page of the site, in a fixed order
pub fn enumerate(catalog: &Catalog, patterns: &PatternLibrary) -> Vec<Route> {
    let mut set = RouteSet::default();

    for app in catalog.apps() {
        set.push(RouteKind::App, format!("/apps/{}", app.slug));
        set.push(RouteKind::AppScreens, format!("/apps/{}/screens", app.slug));
        set.push(RouteKind::AppFlows, format!("/apps/{}/flows", app.slug));
        set.push(
            RouteKind::AppAlternatives,
            format!("/apps/{}/alternatives", app.slug),
        );
    }

    for app in catalog.apps() {
        for screen in &app.screens {
            set.push(
                RouteKind::Screen,
                format!(
                    "/apps/{}/screens/{}-{}",
                    app.slug,
                    screen.flow.slug(),
                    screen.step
                ),
            );
        }
    }

    let used_tags: HashSet<ElementTag> = catalog
        .apps()
        .iter()
        .flat_map(|a| a.screens.iter())
        .flat_map(|s| s.tags.iter().copied())
        .collect();
    for tag in ElementTag::ALL.iter().filter(|t| used_tags.contains(*t)) {
        set.push(RouteKind::Element, format!("/elements/{}", tag.slug()));
    }

    for pair in comparison_pairs(catalog) {
        set.push(RouteKind::Comparison, format!("/compare/{}", pair.slug()));
    }

    for flow in FlowType::ALL {
        set.push(RouteKind::Flow, format!("/flows/{}", flow.slug()));
    }
    for category in Category::ALL {
        set.push(RouteKind::Category, format!("/categories/{}", category.slug()));
    }
    for chain in ChainType::ALL {
        set.push(RouteKind::Chain, format!("/chains/{}", chain.slug()));
    }
    for style in StyleType::ALL {
        set.push(RouteKind::Style, format!("/styles/{}", style.slug()));
    }

    for &category in Category::ALL {
        let apps = catalog.apps_in_category(category);
        for flow in FlowType::ALL {
            if apps.iter().any(|a| a.flows.contains(flow)) {
                set.push(
                    RouteKind::CategoryFlow,
                    format!("/categories/{}/{}", category.slug(), flow.slug()),
                );
            }
        }
    }

    for section in patterns.sections() {
        set.push(
            RouteKind::Section,
            format!("/patterns/sections/{}", slugify(section)),
        );
    }
    for pattern in patterns.iter() {
        set.push(RouteKind::Pattern, format!("/patterns/{}", pattern.slug()));
    }

    info!("Enumerated {} routes", set.routes.len());
    set.routes
}

/// Every page path of the site, in a fixed order
pub fn enumerate_routes(catalog: &Catalog, patterns: &PatternLibrary) -> Vec<String> {
    enumerate(catalog, patterns)
        .into_iter()
        .map(|r| r.path)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use screenvault_types::{App, Screen};

    fn app(slug: &str, category: Category, flows: Vec<FlowType>, screens: Vec<Screen>) -> App {
        App {
            slug: slug.into(),
            name: slug.into(),
            category,
            chains: Vec::new(),
            flows,
            screens,
            accent_color: String::new(),
            detailed: false,
            styles: Vec::new(),
        }
    }

    fn screen(step: u32, flow: FlowType, tags: Vec<ElementTag>) -> Screen {
        Screen {
            step,
            label: String::new(),
            flow,
            image: None,
            tags,
        }
    }

    #[test]
    fn test_app_and_screen_routes() {
        let catalog = Catalog::from_apps(vec![app(
            "phantom",
            Category::Wallet,
            vec![FlowType::Onboarding],
            vec![
                screen(1, FlowType::Onboarding, vec![]),
                screen(2, FlowType::Onboarding, vec![]),
            ],
        )])
        .unwrap();

        let routes = enumerate_routes(&catalog, &PatternLibrary::default());
        assert_eq!(
            &routes[..6],
            &[
                "/apps/phantom",
                "/apps/phantom/screens",
                "/apps/phantom/flows",
                "/apps/phantom/alternatives",
                "/apps/phantom/screens/onboarding-1",
                "/apps/phantom/screens/onboarding-2",
            ]
        );
    }

    #[test]
    fn test_only_used_tags_get_pages() {
        let catalog = Catalog::from_apps(vec![app(
            "a",
            Category::Wallet,
            vec![FlowType::Receive],
            vec![screen(1, FlowType::Receive, vec![ElementTag::QrCode])],
        )])
        .unwrap();

        let routes = enumerate(&catalog, &PatternLibrary::default());
        let elements: Vec<&str> = routes
            .iter()
            .filter(|r| r.kind == RouteKind::Element)
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(elements, vec!["/elements/qr-code"]);
    }

    #[test]
    fn test_category_flow_requires_matching_app() {
        let catalog = Catalog::from_apps(vec![
            app("a", Category::Wallet, vec![FlowType::Send, FlowType::Swap], vec![]),
            app("b", Category::Exchange, vec![FlowType::Trading], vec![]),
        ])
        .unwrap();

        let routes = enumerate(&catalog, &PatternLibrary::default());
        let cross: Vec<&str> = routes
            .iter()
            .filter(|r| r.kind == RouteKind::CategoryFlow)
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(
            cross,
            vec![
                "/categories/wallet/swap",
                "/categories/wallet/send",
                "/categories/exchange/trading",
            ]
        );
    }

    #[test]
    fn test_taxonomy_routes_cover_every_value() {
        let catalog = Catalog::default();
        let routes = enumerate(&catalog, &PatternLibrary::default());
        let count = |kind: RouteKind| routes.iter().filter(|r| r.kind == kind).count();

        assert_eq!(count(RouteKind::Flow), FlowType::ALL.len());
        assert_eq!(count(RouteKind::Category), Category::ALL.len());
        assert_eq!(count(RouteKind::Chain), ChainType::ALL.len());
        assert_eq!(count(RouteKind::Style), StyleType::ALL.len());
        assert_eq!(count(RouteKind::Comparison), 0);
        assert!(routes.iter().any(|r| r.path == "/chains/bnb-chain"));
    }

    #[test]
    fn test_repeated_screen_step_is_emitted_once() {
        let catalog = Catalog::from_apps(vec![app(
            "a",
            Category::Wallet,
            vec![FlowType::Send],
            vec![
                screen(1, FlowType::Send, vec![]),
                screen(1, FlowType::Send, vec![]),
            ],
        )])
        .unwrap();

        let routes = enumerate(&catalog, &PatternLibrary::default());
        assert_eq!(
            routes.iter().filter(|r| r.kind == RouteKind::Screen).count(),
            1
        );
    }

    #[test]
    fn test_pattern_routes() {
        let catalog = Catalog::default();
        let library = PatternLibrary::builtin().unwrap();
        let routes = enumerate_routes(&catalog, &library);

        assert!(routes.contains(&"/patterns/sections/data-display".to_string()));
        assert!(routes.contains(&"/patterns/wallet-connection".to_string()));
    }
}
