//! Screenvault Types - Core types for the screenvault catalog
//!
//! This module defines the data model shared by the catalog, pattern
//! matcher, route enumerator and packager.

mod app;
mod pattern;
mod taxonomy;

pub use app::{App, EnrichedScreen, Screen, ScreenKey};
pub use pattern::{Classification, PatternDefinition};
pub use taxonomy::{Category, ChainType, ElementTag, FlowType, StyleType};

/// Convert a display name into a URL slug.
///
/// Lowercases ASCII alphanumerics and collapses every other run of
/// characters into a single `-`, e.g. `"Modal / Dialog"` -> `"modal-dialog"`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
