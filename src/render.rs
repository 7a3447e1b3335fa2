//! Preview HTML rendering.
//!
//! Turns resolved pages into static HTML so the resolved view can be
//! inspected in a browser. One file per page and language:
//!
//! ```text
//! dist/
//! ├── preview.css              # Embedded stylesheet
//! ├── home/
//! │   └── index.html           # Default language at the root
//! └── it/
//!     └── home/
//!         └── index.html       # Other languages under /<code>/
//! ```
//!
//! Each section renders as the skeleton [`crate::classes`] describes, with
//! the class strings taken verbatim from the resolved section. Uses
//! [maud](https://maud.lambda.xyz/) for compile-time HTML templating, so all
//! content text is escaped.

use crate::config::SiteConfig;
use crate::diagnostics::Warnings;
use crate::load::ContentSet;
use crate::resolve::{ResolveOptions, available_languages, resolve_page};
use crate::schema::{Course, FeatureEntry, Features};
use crate::types::{LanguageEntry, ResolvedPage, ResolvedSection};
use maud::{DOCTYPE, Markup, html};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = include_str!("../static/preview.css");
const STYLESHEET: &str = "preview.css";

/// Site-wide values a page render needs.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Path the site is served under.
    pub base: String,
    /// Origin or path stylesheet URLs are prefixed with instead of `base`.
    pub assets_prefix: Option<String>,
    pub default_language: String,
    pub languages: Vec<LanguageEntry>,
    /// Slug of the page being rendered, for language switcher links.
    pub page_slug: String,
}

impl RenderContext {
    fn stylesheet_href(&self) -> String {
        let prefix = self.assets_prefix.as_deref().unwrap_or(&self.base);
        format!("{}/{STYLESHEET}", prefix.trim_end_matches('/'))
    }
}

/// One written page.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub slug: String,
    pub language: String,
    pub title: String,
    pub sections: usize,
    /// Path relative to the output directory.
    pub path: PathBuf,
}

/// Output path of a page relative to the output directory.
pub fn page_path(slug: &str, language: &str, default_language: &str) -> PathBuf {
    let mut path = PathBuf::new();
    if language != default_language {
        path.push(language);
    }
    path.join(slug).join("index.html")
}

/// URL of a page under `base`.
pub fn page_url(base: &str, slug: &str, language: &str, default_language: &str) -> String {
    let base = base.trim_end_matches('/');
    if language == default_language {
        format!("{base}/{slug}/")
    } else {
        format!("{base}/{language}/{slug}/")
    }
}

/// Render every page in every available language into `output_dir`.
pub fn write_site(
    content: &ContentSet,
    config: &SiteConfig,
    output_dir: &Path,
    warnings: &dyn Warnings,
) -> Result<Vec<RenderedPage>, RenderError> {
    let mut languages = available_languages(content.languages.as_deref(), warnings);
    if languages.is_empty() {
        warnings.warn(&format!(
            "No languages defined, rendering `{}` only",
            config.default_language
        ));
        languages.push(LanguageEntry {
            code: config.default_language.clone(),
            name: config.default_language.clone(),
            flag: None,
        });
    }

    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join(STYLESHEET), CSS)?;

    let mut rendered = Vec::new();
    for page in &content.pages {
        for language in &languages {
            let options = ResolveOptions {
                language: language.code.clone(),
                environment: config.environment.clone(),
                base_path: config.base.clone(),
            };
            let resolved = resolve_page(&page.data, &options, warnings);
            let context = RenderContext {
                base: config.base.clone(),
                assets_prefix: config.assets_prefix.clone(),
                default_language: config.default_language.clone(),
                languages: languages.clone(),
                page_slug: page.slug.clone(),
            };

            let path = page_path(&page.slug, &language.code, &config.default_language);
            let target = output_dir.join(&path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, render_page(&resolved, &context).into_string())?;
            tracing::debug!("wrote {}", target.display());

            rendered.push(RenderedPage {
                slug: page.slug.clone(),
                language: language.code.clone(),
                title: resolved.title.clone(),
                sections: resolved.sections.len(),
                path,
            });
        }
    }
    Ok(rendered)
}

// ============================================================================
// HTML Components
// ============================================================================

pub fn render_page(page: &ResolvedPage, context: &RenderContext) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(page.language) data-environment=(page.environment) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.title) }
                @if let Some(description) = &page.description {
                    meta name="description" content=(description);
                }
                link rel="stylesheet" href=(context.stylesheet_href());
            }
            body {
                header.site-header {
                    (language_switcher(&page.language, context))
                }
                main {
                    @for section in &page.sections {
                        (render_section(section))
                    }
                }
            }
        }
    }
}

fn language_switcher(current: &str, context: &RenderContext) -> Markup {
    html! {
        nav.language-switcher {
            ul {
                @for language in &context.languages {
                    li class=[(language.code == current).then_some("current")] {
                        a href=(page_url(&context.base, &context.page_slug, &language.code, &context.default_language))
                            hreflang=(language.code) {
                            @if let Some(flag) = &language.flag {
                                (flag) " "
                            }
                            (language.name)
                        }
                    }
                }
            }
        }
    }
}

fn section_style(section: &ResolvedSection) -> Option<String> {
    let mut rules = Vec::new();
    if let Some(image) = &section.background_image {
        rules.push(format!("background-image: url(\"{}\")", css_string(image)));
    }
    if let Some(height) = &section.min_height {
        rules.push(format!("min-height: {height}"));
    }
    (!rules.is_empty()).then(|| rules.join("; "))
}

/// Escape text for a double-quoted CSS string.
fn css_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_section(section: &ResolvedSection) -> Markup {
    let classes = &section.classes;
    let section_class = match &section.custom_classes {
        Some(custom) => format!("{} {custom}", classes.section),
        None => classes.section.clone(),
    };
    let content = &section.content;

    html! {
        section id=(section.id) class=(section_class)
            data-theme=(classes.theme.as_str())
            data-layout=(classes.layout.as_str())
            data-animation=[section.animation.map(|a| a.as_str())]
            style=[section_style(section)] {
            div class=(classes.background) {}
            div class=(classes.container) {
                div class=(classes.content) {
                    @if let Some(name) = &content.company_name {
                        h2.company-name {
                            (name)
                            @if let Some(highlight) = &content.company_name_highlight {
                                " " span.highlight { (highlight) }
                            }
                        }
                    }
                    @if let Some(title) = &content.title {
                        h2.title { (title) }
                    }
                    @if let Some(subtitle) = &content.subtitle {
                        p.subtitle { (subtitle) }
                    }
                    p.description { (content.description) }
                    @match &content.features {
                        Some(Features::Plain(entries)) => { (feature_list(entries)) }
                        Some(Features::Courses(courses)) => { (course_list(courses)) }
                        None => {}
                    }
                    @if let Some(courses) = &content.courses {
                        (course_list(courses))
                    }
                    @if let Some(items) = &content.items {
                        div.items {
                            @for item in items {
                                div.item {
                                    h3 { (item.title) }
                                    p { (item.description) }
                                    @if let Some(link) = &item.link {
                                        a href=(link) { "Learn more" }
                                    }
                                }
                            }
                        }
                    }
                    @if let Some(cta) = &content.cta {
                        @let style = cta.style.map(|s| s.as_str()).unwrap_or("primary");
                        a class={ "cta cta-" (style) } href=(cta.link) { (cta.text) }
                    } @else if let Some(text) = &content.button_text {
                        button.cta.cta-primary type="button" { (text) }
                    }
                }
            }
        }
    }
}

fn feature_list(entries: &[FeatureEntry]) -> Markup {
    html! {
        ul.features {
            @for entry in entries {
                @match entry {
                    FeatureEntry::Text(text) => {
                        li { (text) }
                    }
                    FeatureEntry::Iconized(feature) => {
                        li data-icon=[feature.icon.as_deref()] { (feature.text) }
                    }
                }
            }
        }
    }
}

fn course_list(courses: &[Course]) -> Markup {
    html! {
        ul.courses {
            @for course in courses {
                li.course {
                    h3 { (course.title) }
                    p { (course.description) }
                    @if let Some(duration) = &course.duration {
                        span.duration { (duration) }
                    }
                    @if let Some(level) = &course.level {
                        " " span.level { (level) }
                    }
                    @if let Some(url) = &course.link_url {
                        a href=(url) { (course.link_text.as_deref().unwrap_or("Details")) }
                    }
                }
            }
        }
    }
}
