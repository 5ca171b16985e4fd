//! Three-tier pattern matching over enriched screens
//!
//! Tiers run in priority order (tags, then label regexes, then flow
//! types); a later tier only sees screens no earlier tier selected.

use crate::library::CompiledPattern;
use screenvault_types::{EnrichedScreen, ScreenKey};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Which tier selected a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Tag,
    Label,
    Flow,
}

/// Result of matching one pattern
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatch {
    /// Tier 1 hits, then tier 2, then tier 3
    pub screens: Vec<EnrichedScreen>,
    /// Number of distinct apps among `screens`
    pub app_count: usize,
    /// Selected screens per tier: tag, label, flow
    #[serde(skip)]
    pub tier_counts: [usize; 3],
}

impl PatternMatch {
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

/// Match a pattern against every screen.
///
/// Screens are identified by `(app_slug, flow, step)` rather than by
/// image path, so screens without an image never shadow each other.
pub fn match_pattern(pattern: &CompiledPattern, all_screens: &[EnrichedScreen]) -> PatternMatch {
    let definition = pattern.definition();
    let mut selected: HashSet<ScreenKey> = HashSet::new();
    let mut result = PatternMatch::default();

    for (index, tier) in [MatchTier::Tag, MatchTier::Label, MatchTier::Flow]
        .into_iter()
        .enumerate()
    {
        let active = match tier {
            MatchTier::Tag => !definition.tags.is_empty(),
            MatchTier::Label => pattern.has_label_patterns(),
            MatchTier::Flow => !definition.flow_types.is_empty(),
        };
        if !active {
            continue;
        }

        for screen in all_screens {
            let hit = match tier {
                MatchTier::Tag => screen.has_any_tag(&definition.tags),
                MatchTier::Label => pattern.matches_label(&screen.screen.label),
                MatchTier::Flow => definition.flow_types.contains(&screen.screen.flow),
            };
            if hit && selected.insert(screen.key()) {
                result.screens.push(screen.clone());
                result.tier_counts[index] += 1;
            }
        }
    }

    result.app_count = result
        .screens
        .iter()
        .map(|s| s.app_slug.as_str())
        .collect::<HashSet<_>>()
        .len();

    debug!(
        "Pattern '{}': {} screens across {} apps (tag={}, label={}, flow={})",
        pattern.slug(),
        result.screens.len(),
        result.app_count,
        result.tier_counts[0],
        result.tier_counts[1],
        result.tier_counts[2]
    );

    result
}
