//! CSS class strings for section templates, and the utility-class safelist.
//!
//! Section markup is styled with utility classes. Rather than letting
//! templates assemble class names ad hoc, [`build_section_classes`] turns a
//! section's [`Styling`] into a fixed bundle of strings, one per element of
//! the section skeleton:
//!
//! ```text
//! <section class="{section}">                 background image, padding
//!   <div class="{background}"></div>          dimming overlay
//!   <div class="{container}">                 flex row, justification
//!     <div class="{content}">...</div>        text box: opacity, align, width
//!   </div>
//! </section>
//! ```
//!
//! Because class names are built at runtime, the CSS framework cannot see
//! them when it purges unused utilities. [`safelist`] lists everything that
//! must survive the purge.

use crate::schema::{Layout, Styling, Theme};
use serde::Serialize;

pub const DEFAULT_BACKGROUND_OPACITY: &str = "bg-opacity-10";
pub const DEFAULT_CONTENT_BACKGROUND_OPACITY: &str = "bg-opacity-75";
pub const DEFAULT_MAX_WIDTH: &str = "max-w-lg";
pub const DEFAULT_TEXT_ALIGN: &str = "text-right";
pub const DEFAULT_JUSTIFY_CONTENT: &str = "justify-end";

const SECTION_CLASSES: &str = "relative bg-custom-slate py-12 bg-center bg-cover";

/// Class strings for one rendered section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionClasses {
    pub background: String,
    pub container: String,
    pub content: String,
    pub section: String,
    pub theme: Theme,
    pub layout: Layout,
}

/// Build the class bundle for a styling descriptor.
///
/// Unset fields fall back to the `DEFAULT_*` constants, layout `right` and
/// theme `dark`. Deterministic: equal input gives byte-identical output.
pub fn build_section_classes(styling: &Styling) -> SectionClasses {
    let background_opacity = styling
        .background_opacity
        .as_deref()
        .unwrap_or(DEFAULT_BACKGROUND_OPACITY);
    let content_background_opacity = styling
        .content_background_opacity
        .as_deref()
        .unwrap_or(DEFAULT_CONTENT_BACKGROUND_OPACITY);
    let max_width = styling.max_width.as_deref().unwrap_or(DEFAULT_MAX_WIDTH);
    let text_align = styling.text_align.as_deref().unwrap_or(DEFAULT_TEXT_ALIGN);
    let justify_content = styling
        .justify_content
        .as_deref()
        .unwrap_or(DEFAULT_JUSTIFY_CONTENT);

    SectionClasses {
        background: format!("absolute inset-0 bg-black {background_opacity}"),
        container: format!(
            "container mx-auto px-4 flex {justify_content} items-center h-full relative z-10"
        ),
        content: format!(
            "bg-black {content_background_opacity} p-6 rounded-lg {text_align} {max_width}"
        ),
        section: SECTION_CLASSES.to_string(),
        theme: styling.theme.unwrap_or_default(),
        layout: styling.layout.unwrap_or_default(),
    }
}

// ============================================================================
// Safelist
// ============================================================================

const PALETTE: &[&str] = &[
    "blue", "green", "purple", "pink", "indigo", "red", "yellow", "orange", "teal", "cyan",
    "slate", "gray",
];

/// `(prefix, shades)` patterns expanded over [`PALETTE`]: button fills,
/// their hover states, and bullet text colours.
const PALETTE_PATTERNS: &[(&str, &[u16])] = &[
    ("bg", &[500, 600, 700]),
    ("hover:bg", &[500, 600, 700]),
    ("text", &[400, 500, 600]),
];

/// Classes content files reference by name that no pattern covers.
const STATIC_SAFELIST: &[&str] = &[
    // badges
    "bg-green-400",
    "bg-blue-400",
    "bg-red-400",
    "bg-yellow-400",
    // utilities
    "last:mb-0",
    "text-justify",
    "space-y-0",
    "py-2",
    "p-4",
    "mb-2",
    "mb-3",
    "mb-4",
    // divider heights
    "h-2",
    "h-4",
    "h-6",
    "h-8",
    "h-10",
    "h-12",
    "h-16",
    "h-20",
    "h-24",
    "h-32",
    // divider widths
    "w-full",
    "w-1/2",
    "w-1/3",
    "w-1/4",
    "w-2/3",
    "w-3/4",
    // divider borders
    "border-t",
    "border-gray-300",
    "border-gray-400",
    "border-gray-500",
    "border-blue-300",
    "border-blue-400",
];

/// Every class name that must survive CSS purging, without duplicates, in a
/// stable order: palette patterns, grid columns, the static list, then the
/// tokens of the default section bundle.
pub fn safelist() -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    let mut push = |class: String| {
        if !classes.contains(&class) {
            classes.push(class);
        }
    };

    for (prefix, shades) in PALETTE_PATTERNS {
        for colour in PALETTE {
            for shade in *shades {
                push(format!("{prefix}-{colour}-{shade}"));
            }
        }
    }

    for breakpoint in ["", "md:", "xl:"] {
        for cols in 1..=6 {
            push(format!("{breakpoint}grid-cols-{cols}"));
        }
    }

    for class in STATIC_SAFELIST {
        push((*class).to_string());
    }

    let defaults = build_section_classes(&Styling::default());
    for bundle in [
        &defaults.section,
        &defaults.background,
        &defaults.container,
        &defaults.content,
    ] {
        for token in bundle.split_whitespace() {
            push(token.to_string());
        }
    }

    classes
}
