//! Screenvault Routes
//!
//! Enumerates every statically generated page of the content site:
//! app pages, screen pages, element-tag pages, same-category comparisons,
//! taxonomy pages and pattern pages. Output is deterministic and free of
//! duplicate paths.

#![deny(unsafe_code, unused_imports, unused_variables)]

pub mod compare;
pub mod enumerate;

pub use compare::{comparison_pairs, ComparisonPair};
pub use enumerate::{enumerate, enumerate_routes, Route, RouteKind};
