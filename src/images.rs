//! Image reference normalization.
//!
//! Content files reference images three ways:
//!
//! | Reference | Example | Resolved |
//! |-----------|---------|----------|
//! | external | `https://cdn.example.com/a.png` | unchanged |
//! | absolute | `/img/a.png` | base path + reference |
//! | relative | `img/a.png` | base path + `/` + reference |
//!
//! Local references point into the public directory, which is served from
//! the site's base path. A site deployed at the root (`/`) gets no prefix; a
//! site deployed under `/site/` gets `/site/img/a.png`.

use crate::diagnostics::InputError;

/// True for `http://` and `https://` references.
pub fn is_external_image(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Make a local reference absolute by adding a leading `/` if missing.
pub fn resolve_image_path(path: &str) -> Result<String, InputError> {
    if path.is_empty() {
        return Err(InputError::EmptyImagePath);
    }
    if path.starts_with('/') {
        Ok(path.to_string())
    } else {
        Ok(format!("/{path}"))
    }
}

/// Absolute path of a local reference under `base`.
///
/// An empty base is the root. A trailing slash on the base is trimmed
/// before joining.
pub fn resolve_image_path_with_base(path: &str, base: &str) -> Result<String, InputError> {
    let resolved = resolve_image_path(path)?;
    if base.is_empty() || base == "/" {
        return Ok(resolved);
    }
    Ok(format!("{}{resolved}", base.strip_suffix('/').unwrap_or(base)))
}

/// Resolve any image reference for rendering.
pub fn resolve_image(path: &str, base: &str) -> Result<String, InputError> {
    if is_external_image(path) {
        return Ok(path.to_string());
    }
    resolve_image_path_with_base(path, base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_passthrough() {
        assert_eq!(
            resolve_image("http://x.com/a.png", "/site/").unwrap(),
            "http://x.com/a.png"
        );
        assert_eq!(
            resolve_image("https://cdn.example.com/hero.webp", "/").unwrap(),
            "https://cdn.example.com/hero.webp"
        );
    }

    #[test]
    fn relative_gains_leading_slash() {
        assert_eq!(resolve_image_path("img/a.png").unwrap(), "/img/a.png");
        assert_eq!(resolve_image("img/a.png", "/").unwrap(), "/img/a.png");
    }

    #[test]
    fn absolute_unchanged_at_root() {
        assert_eq!(resolve_image_path("/img/a.png").unwrap(), "/img/a.png");
        assert_eq!(resolve_image("/img/a.png", "/").unwrap(), "/img/a.png");
    }

    #[test]
    fn base_path_prefixed() {
        assert_eq!(resolve_image("img/a.png", "/site/").unwrap(), "/site/img/a.png");
        assert_eq!(resolve_image("img/a.png", "/site").unwrap(), "/site/img/a.png");
        assert_eq!(resolve_image("/img/a.png", "/site/").unwrap(), "/site/img/a.png");
    }

    #[test]
    fn empty_base_is_root() {
        assert_eq!(resolve_image("img/a.png", "").unwrap(), "/img/a.png");
    }

    #[test]
    fn only_one_trailing_slash_trimmed() {
        assert_eq!(
            resolve_image_path_with_base("img/a.png", "/site//").unwrap(),
            "/site//img/a.png"
        );
    }

    #[test]
    fn empty_path_is_input_error() {
        assert_eq!(resolve_image("", "/"), Err(InputError::EmptyImagePath));
        assert_eq!(resolve_image_path(""), Err(InputError::EmptyImagePath));
    }

    #[test]
    fn scheme_check_is_prefix_only() {
        assert!(is_external_image("https://x.com/a.png"));
        assert!(!is_external_image("/img/http-banner.png"));
        assert!(!is_external_image("ftp://x.com/a.png"));
    }
}
