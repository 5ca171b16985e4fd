//! Same-category comparison pairs

use screenvault_catalog::Catalog;
use screenvault_types::{App, Category};
use serde::Serialize;
use std::cmp::Ordering;

/// Two apps of one category compared side by side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonPair {
    pub category: Category,
    /// Lexicographically smaller slug
    pub left: String,
    /// Lexicographically larger slug
    pub right: String,
}

impl ComparisonPair {
    fn new(category: Category, a: &str, b: &str) -> Self {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        Self {
            category,
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// `left-vs-right`
    pub fn slug(&self) -> String {
        format!("{}-vs-{}", self.left, self.right)
    }
}

/// Detailed apps first, then by name
fn comparison_order(a: &&App, b: &&App) -> Ordering {
    b.detailed
        .cmp(&a.detailed)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.slug.cmp(&b.slug))
}

/// Every unordered pair of apps within each category.
///
/// Pairs are emitted per category in taxonomy order, iterating `i < j`
/// over the detailed-then-name order. A category with N apps yields
/// exactly `N * (N - 1) / 2` pairs.
pub fn comparison_pairs(catalog: &Catalog) -> Vec<ComparisonPair> {
    let mut pairs = Vec::new();

    for &category in Category::ALL {
        let mut apps = catalog.apps_in_category(category);
        apps.sort_by(comparison_order);

        for (i, first) in apps.iter().enumerate() {
            for second in &apps[i + 1..] {
                pairs.push(ComparisonPair::new(category, &first.slug, &second.slug));
            }
        }
    }

    pairs
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn app(slug: &str, name: &str, category: Category, detailed: bool) -> App {
        App {
            slug: slug.into(),
            name: name.into(),
            category,
            chains: Vec::new(),
            flows: Vec::new(),
            screens: Vec::new(),
            accent_color: String::new(),
            detailed,
            styles: Vec::new(),
        }
    }

    #[test]
    fn test_three_apps_yield_three_pairs() {
        let catalog = Catalog::from_apps(vec![
            app("c", "C", Category::Wallet, false),
            app("a", "A", Category::Wallet, false),
            app("b", "B", Category::Wallet, false),
        ])
        .unwrap();

        let slugs: Vec<String> = comparison_pairs(&catalog).iter().map(|p| p.slug()).collect();
        assert_eq!(slugs, vec!["a-vs-b", "a-vs-c", "b-vs-c"]);
    }

    #[test]
    fn test_pair_label_ignores_pairing_order() {
        // "zerion" is detailed so it is paired first, but the label stays sorted
        let catalog = Catalog::from_apps(vec![
            app("argent", "Argent", Category::Wallet, false),
            app("zerion", "Zerion", Category::Wallet, true),
        ])
        .unwrap();

        let pairs = comparison_pairs(&catalog);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].slug(), "argent-vs-zerion");
    }

    #[test]
    fn test_detailed_apps_pair_first() {
        let catalog = Catalog::from_apps(vec![
            app("a", "A", Category::Exchange, false),
            app("b", "B", Category::Exchange, false),
            app("z", "Z", Category::Exchange, true),
        ])
        .unwrap();

        let slugs: Vec<String> = comparison_pairs(&catalog).iter().map(|p| p.slug()).collect();
        assert_eq!(slugs, vec!["a-vs-z", "b-vs-z", "a-vs-b"]);
    }

    #[test]
    fn test_small_categories_yield_no_pairs() {
        let catalog = Catalog::from_apps(vec![
            app("a", "A", Category::Wallet, false),
            app("b", "B", Category::Bridge, false),
        ])
        .unwrap();
        assert!(comparison_pairs(&catalog).is_empty());
    }

    #[test]
    fn test_pair_count_formula() {
        let apps = (0..7)
            .map(|i| app(&format!("app{i}"), &format!("App {i}"), Category::DeFi, i % 2 == 0))
            .collect();
        let catalog = Catalog::from_apps(apps).unwrap();

        let pairs = comparison_pairs(&catalog);
        assert_eq!(pairs.len(), 7 * 6 / 2);

        let mut slugs: Vec<String> = pairs.iter().map(|p| p.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), pairs.len());
        assert!(pairs.iter().all(|p| p.left != p.right));
    }
}
