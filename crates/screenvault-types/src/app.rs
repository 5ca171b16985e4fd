use crate::{Category, ChainType, ElementTag, FlowType, StyleType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An app in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub slug: String,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub chains: Vec<ChainType>,
    #[serde(default)]
    pub flows: Vec<FlowType>,
    #[serde(default)]
    pub screens: Vec<Screen>,
    #[serde(default)]
    pub accent_color: String,
    /// Apps with a full teardown sort ahead of the rest on comparison pages
    #[serde(default)]
    pub detailed: bool,
    #[serde(default)]
    pub styles: Vec<StyleType>,
}

impl App {
    /// Flows used by screens but missing from `flows`
    pub fn undeclared_flows(&self) -> Vec<FlowType> {
        let used: BTreeSet<FlowType> = self.screens.iter().map(|s| s.flow).collect();
        used.into_iter()
            .filter(|flow| !self.flows.contains(flow))
            .collect()
    }

    /// Screens of one flow, in catalog order
    pub fn screens_in_flow(&self, flow: FlowType) -> impl Iterator<Item = &Screen> {
        self.screens.iter().filter(move |s| s.flow == flow)
    }
}

/// A single screenshot of an app, embedded in its owning app
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Screen {
    /// Ordinal within the flow, not globally unique
    pub step: u32,
    pub label: String,
    pub flow: FlowType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ElementTag>,
}

/// Structural identity of a screen across the whole catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenKey {
    pub app_slug: String,
    pub flow: FlowType,
    pub step: u32,
}

/// A screen joined with the fields of its owning app
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedScreen {
    pub app_slug: String,
    pub app_name: String,
    pub app_category: Category,
    pub app_chains: Vec<ChainType>,
    pub accent_color: String,
    #[serde(flatten)]
    pub screen: Screen,
}

impl EnrichedScreen {
    pub fn new(app: &App, screen: &Screen) -> Self {
        Self {
            app_slug: app.slug.clone(),
            app_name: app.name.clone(),
            app_category: app.category,
            app_chains: app.chains.clone(),
            accent_color: app.accent_color.clone(),
            screen: screen.clone(),
        }
    }

    pub fn key(&self) -> ScreenKey {
        ScreenKey {
            app_slug: self.app_slug.clone(),
            flow: self.screen.flow,
            step: self.screen.step,
        }
    }

    pub fn has_any_tag(&self, tags: &[ElementTag]) -> bool {
        self.screen.tags.iter().any(|t| tags.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_app() -> App {
        serde_json::from_str(
            r##"{
                "slug": "phantom",
                "name": "Phantom",
                "category": "Wallet",
                "chains": ["Solana", "Ethereum"],
                "flows": ["Onboarding"],
                "accentColor": "#AB9FF2",
                "screens": [
                    {"step": 1, "label": "Welcome", "flow": "Onboarding", "image": "/phantom/1.png"},
                    {"step": 1, "label": "Swap tokens", "flow": "Swap", "tags": ["Token Selector"]}
                ]
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_app_deserialize_defaults() {
        let app = sample_app();
        assert_eq!(app.accent_color, "#AB9FF2");
        assert!(!app.detailed);
        assert!(app.styles.is_empty());
        assert_eq!(app.screens[0].image.as_deref(), Some("/phantom/1.png"));
        assert!(app.screens[0].tags.is_empty());
    }

    #[test]
    fn test_undeclared_flows() {
        let app = sample_app();
        assert_eq!(app.undeclared_flows(), vec![FlowType::Swap]);
    }

    #[test]
    fn test_enriched_screen_key() {
        let app = sample_app();
        let enriched = EnrichedScreen::new(&app, &app.screens[1]);
        assert_eq!(
            enriched.key(),
            ScreenKey {
                app_slug: "phantom".into(),
                flow: FlowType::Swap,
                step: 1,
            }
        );
        assert!(enriched.has_any_tag(&[ElementTag::TokenSelector]));
        assert!(!enriched.has_any_tag(&[ElementTag::QrCode]));
    }
}
