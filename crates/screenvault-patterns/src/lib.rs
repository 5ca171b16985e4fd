//! Screenvault Patterns
//!
//! Adoption-rate classification and UX pattern matching.
//!
//! ## Matching
//!
//! A [`PatternDefinition`](screenvault_types::PatternDefinition) selects
//! screens by element tag, by label regex, or by flow type. Definitions are
//! data: the built-in library ships as YAML and custom libraries load with
//! [`PatternLibrary::from_file`].

#![deny(unsafe_code, unused_imports, unused_variables)]

pub mod classify;
pub mod error;
pub mod library;
pub mod matcher;

pub use classify::{classify, COMMON_THRESHOLD, DOMINANT_THRESHOLD};
pub use error::PatternError;
pub use library::{CompiledPattern, PatternLibrary};
pub use matcher::{match_pattern, MatchTier, PatternMatch};
