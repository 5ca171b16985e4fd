//! Screenvault Skills
//!
//! Packages intelligence JSON files into a markdown skill bundle and
//! validates generated bundles.
//!
//! ## Layout
//!
//! - `SKILL.md`: YAML frontmatter (name, description), overview and file index
//! - `design/`: pattern adoption, colors, typography, components
//! - `flows/`: one file per user flow
//! - `copy/`: one file per copy section
//! - `competitive/`: overview plus one teardown per app
//! - `changelog.md`
//!
//! Only `index.json` is required; each other input adds its section when
//! present and readable.

#![deny(unsafe_code, unused_imports, unused_variables)]

pub mod error;
pub mod intelligence;
pub mod packager;
pub mod render;
pub mod skill;
pub mod validate;

pub use error::{FrontmatterError, PackageError};
pub use packager::{GeneratedFile, PackageReport, Packager};
pub use skill::{Skill, SkillMetadata};
pub use validate::{validate, BundleLimits, IssueKind, ValidationIssue, ValidationReport};
