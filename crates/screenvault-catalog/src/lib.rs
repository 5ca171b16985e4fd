//! Screenvault Catalog
//!
//! Read-only repository over app and screen records. The data source is
//! injected: [`InMemorySource`] for tests and embedding, [`JsonFileSource`]
//! for catalogs shipped as JSON files.

#![deny(unsafe_code, unused_imports, unused_variables)]

pub mod catalog;
pub mod error;
pub mod source;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use source::{CatalogSource, InMemorySource, JsonFileSource};
