//! # Site Content
//!
//! The content layer of a marketing website: typed, validated content
//! collections and the pure functions that turn them into the exact view a
//! page template renders.
//!
//! # Architecture: Validate, Resolve, Render
//!
//! ```text
//! 1. Load      src/content/  →  ContentSet     (files → validated records)
//! 2. Resolve   Page          →  ResolvedPage   (one language, one environment)
//! 3. Render    ResolvedPage  →  dist/          (preview HTML)
//! ```
//!
//! Validation happens once, at load time, and is fatal: a record that does
//! not match its schema stops the build with the file and field path. Past
//! that point nothing fails. The resolution utilities recover from missing
//! input with a documented default and report it through an injected
//! [`diagnostics::Warnings`] sink, so a build is never broken by an absent
//! language file or an empty image path.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`schema`] | Record types for pages, sections, languages, templates, and the validator |
//! | [`load`] | Reads one file per record (JSON or TOML) into a [`load::ContentSet`] |
//! | [`resolve`] | Localization merge, environment overrides and filter, language directory, section guard, page resolution |
//! | [`classes`] | Section class bundles and the CSS safelist |
//! | [`images`] | Image reference normalization against the base path |
//! | [`audit`] | Scans component sources for image references that do not exist |
//! | [`render`] | Preview HTML for resolved pages using Maud |
//! | [`config`] | `site.toml` and environment variable loading |
//! | [`diagnostics`] | The warning sink and recoverable input errors |
//! | [`types`] | Resolved view types handed to templates |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Shallow Merges
//!
//! Language and environment overrides replace whole fields. An override
//! that sets `cta` replaces text, link, and style together; one that sets
//! `features` replaces the list. Content authors can predict the result by
//! reading the override alone.
//!
//! ## Strict Schemas, Tolerant Languages
//!
//! Pages, sections, and templates reject unknown fields at every level, so
//! a typo in `backgroundImage` fails the build instead of silently dropping
//! an image. Language records are the exception: their `sections` and
//! `defaults` bags and any extra top-level keys are kept verbatim for
//! templates to read.
//!
//! ## Injected Warnings
//!
//! The utilities never log directly. They take `&dyn Warnings`, which the
//! binary backs with `tracing` and tests back with a recorder, so every
//! fallback is observable in a unit test.

pub mod audit;
pub mod classes;
pub mod config;
pub mod diagnostics;
pub mod images;
pub mod load;
pub mod output;
pub mod render;
pub mod resolve;
pub mod schema;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
