//! Page context resolution from the landing-page URL path
//!
//! Landing pages follow the convention `/{region}/{language}/courses/{track}/`.
//! Anything that deviates from it resolves to an empty context, which
//! downstream code treats as "nothing to personalize".

use tracing::debug;

/// Where on the site the visitor landed, derived once from the URL path.
///
/// Immutable after resolution; an all-`None` context means the path did not
/// match the landing-page convention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Two-letter region code, uppercased (e.g. `TN`)
    pub region: Option<String>,
    /// Language code, lowercased (e.g. `fr`)
    pub language: Option<String>,
    /// Course track identifier (e.g. `web-development`)
    pub track: Option<String>,
}

impl PageContext {
    /// Resolve a context from a URL path.
    ///
    /// The path must have at least four non-empty segments with the literal
    /// third segment `courses`. Malformed paths yield an empty context, never
    /// an error.
    pub fn resolve(path: &str) -> Self {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

        if parts.len() >= 4 && parts[2] == "courses" {
            let context = Self {
                region: Some(parts[0].to_uppercase()),
                language: Some(parts[1].to_lowercase()),
                track: Some(parts[3].to_string()),
            };
            debug!(?context, "resolved page context");
            return context;
        }

        debug!(path, "path does not match landing-page convention");
        Self::default()
    }

    /// Resolve a context from a full page URL.
    pub fn from_url(page_url: &str) -> Self {
        match url::Url::parse(page_url) {
            Ok(parsed) => Self::resolve(parsed.path()),
            Err(_) => Self::default(),
        }
    }

    /// Whether the context carries enough information to personalize the
    /// page. Track alone is not enough: the form customization needs both
    /// region and language.
    pub fn is_resolved(&self) -> bool {
        self.region.is_some() && self.language.is_some()
    }
}
