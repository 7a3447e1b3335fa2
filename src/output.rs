//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (page, section, language, template) is its identity:
//! positional index and title or id, with source files shown as indented
//! `Source:` context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Pages
//! 001 Home (3 sections)
//!     Source: pages/home.json
//!     001 hero
//!     002 about
//!
//! Sections
//! 001 about
//!     Source: sections/about.json
//!     Updated: 2024-05-01
//!     development: shown (dark)
//!     staging: shown (light)
//!     production: hidden (dark)
//!
//! Languages
//! 001 en English
//!     001 hero hero
//!     002 cards services
//!
//! Templates
//! 001 landing (2 sections)
//!     Source: templates/landing.json
//! ```
//!
//! ## Check images
//!
//! ```text
//! Found 2 unique image references:
//! ✅ /img/about.jpg
//! ❌ /img/missing.png
//!
//! Found 1 issues:
//! ❌ components/About.astro: /img/missing.png (missing)
//!
//! Available images in public/img:
//!     /img/about.jpg
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Home [en] → home/index.html (3 sections)
//! 002 Home [it] → it/home/index.html (3 sections)
//!
//! Rendered 2 pages to dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::audit::AuditReport;
use crate::load::ContentSet;
use crate::render::RenderedPage;
use crate::resolve::{effective_metadata, effective_styling};
use crate::schema::{Environment, Section, Theme};
use crate::types::LanguageEntry;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + name, with optional count.
///
/// ```text
/// 001 Home (3 sections)
/// 001 about
/// ```
fn entity_header(index: usize, name: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({} sections)", format_index(index), name, n),
        None => format!("{} {}", format_index(index), name),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

/// One line per environment: whether the section is shown there, and its theme.
fn environment_lines(section: &Section) -> Vec<String> {
    Environment::ALL
        .iter()
        .map(|env| {
            let metadata = effective_metadata(section, env.as_str());
            let included = metadata
                .environment
                .as_ref()
                .is_none_or(|allowed| allowed.contains(env));
            let status = if !included {
                "excluded"
            } else if metadata.visible {
                "shown"
            } else {
                "hidden"
            };
            let theme = effective_styling(section, env.as_str())
                .theme
                .unwrap_or(Theme::Dark);
            format!("{}{}: {} ({})", indent(1), env, status, theme.as_str())
        })
        .collect()
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the content inventory and any warnings raised while loading.
pub fn format_check_output(content: &ContentSet, warnings: &[String]) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for (i, page) in content.pages.iter().enumerate() {
        lines.push(entity_header(i + 1, &page.data.title, Some(page.data.sections.len())));
        lines.push(format!("{}Source: {}", indent(1), page.source));
        if let Some(description) = &page.data.description {
            lines.push(format!("{}{}", indent(1), truncate_desc(description.trim(), 60)));
        }
        for (j, key) in page.data.sections.keys().enumerate() {
            lines.push(format!("{}{}", indent(1), entity_header(j + 1, key, None)));
        }
    }

    lines.push(String::new());
    lines.push("Sections".to_string());
    for (i, section) in content.sections.iter().enumerate() {
        lines.push(entity_header(i + 1, &section.data.id, None));
        lines.push(format!("{}Source: {}", indent(1), section.source));
        if let Some(updated) = section.data.metadata.as_ref().and_then(|m| m.last_updated.as_ref()) {
            lines.push(format!("{}Updated: {}", indent(1), updated));
        }
        lines.extend(environment_lines(&section.data));
    }

    lines.push(String::new());
    lines.push("Languages".to_string());
    match &content.languages {
        Some(languages) => {
            for (i, language) in languages.iter().enumerate() {
                lines.push(format!(
                    "{} {} {}",
                    format_index(i + 1),
                    language.code,
                    language.name
                ));
                for placement in language.placements() {
                    lines.push(format!(
                        "{}{} {} {}",
                        indent(1),
                        format_index(placement.order as usize),
                        placement.kind.as_str(),
                        placement.id
                    ));
                }
            }
        }
        None => lines.push(format!("{}(none)", indent(1))),
    }

    lines.push(String::new());
    lines.push("Templates".to_string());
    for (i, template) in content.templates.iter().enumerate() {
        lines.push(entity_header(i + 1, &template.slug, Some(template.data.sections.len())));
        lines.push(format!("{}Source: {}", indent(1), template.source));
    }

    if !warnings.is_empty() {
        lines.push(String::new());
        lines.push(format!("Warnings ({})", warnings.len()));
        for warning in warnings {
            lines.push(format!("{}{}", indent(1), warning));
        }
    }

    lines
}

pub fn print_check_output(content: &ContentSet, warnings: &[String]) {
    print_lines(format_check_output(content, warnings));
}

// ============================================================================
// check-images
// ============================================================================

pub fn format_audit_report(report: &AuditReport, public_dir: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for (file, reason) in &report.unreadable {
        lines.push(format!("❌ Error reading file {file}: {reason}"));
    }

    lines.push(format!(
        "Found {} unique image references:",
        report.references.len()
    ));
    for reference in &report.references {
        let status = if reference.exists { "✅" } else { "❌" };
        lines.push(format!("{status} {}", reference.path));
    }

    lines.push(String::new());
    if report.issues.is_empty() {
        lines.push("All image paths are valid!".to_string());
    } else {
        lines.push(format!("Found {} issues:", report.issues.len()));
        for issue in &report.issues {
            lines.push(format!("❌ {}: {} (missing)", issue.file, issue.image_path));
        }
    }

    if let Some(available) = &report.available {
        lines.push(String::new());
        lines.push(format!("Available images in {public_dir}/img:"));
        for image in available {
            lines.push(format!("{}{}", indent(1), image));
        }
    }

    lines
}

pub fn print_audit_report(report: &AuditReport, public_dir: &str) {
    print_lines(format_audit_report(report, public_dir));
}

// ============================================================================
// languages
// ============================================================================

pub fn format_languages(languages: &[LanguageEntry]) -> Vec<String> {
    languages
        .iter()
        .enumerate()
        .map(|(i, language)| match &language.flag {
            Some(flag) => format!(
                "{} {} {} {}",
                format_index(i + 1),
                language.code,
                flag,
                language.name
            ),
            None => format!("{} {} {}", format_index(i + 1), language.code, language.name),
        })
        .collect()
}

pub fn print_languages(languages: &[LanguageEntry]) {
    print_lines(format_languages(languages));
}

// ============================================================================
// build
// ============================================================================

pub fn format_build_output(rendered: &[RenderedPage], output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = rendered
        .iter()
        .enumerate()
        .map(|(i, page)| {
            format!(
                "{} {} [{}] \u{2192} {} ({} sections)",
                format_index(i + 1),
                page.title,
                page.language,
                page.path.display(),
                page.sections
            )
        })
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "Rendered {} pages to {}",
        rendered.len(),
        output_dir.display()
    ));
    lines
}

pub fn print_build_output(rendered: &[RenderedPage], output_dir: &Path) {
    print_lines(format_build_output(rendered, output_dir));
}

// ============================================================================
// Tests
// ============================================================================
