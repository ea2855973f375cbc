//! Core type definitions for listing requests.
//!
//! Content types map one-to-one onto `Planning Center` collections; a
//! `ListingRequest` is the sanitized form of the loosely typed attributes a
//! page embed passes in.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::constants;

/// Characters that survive key sanitization.
#[allow(clippy::expect_used)]
static RE_KEY_STRIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9_\-]").expect("valid regex: RE_KEY_STRIP")
});

/// The kind of `Planning Center` listing to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    /// Services events.
    #[default]
    Events,
    /// Sermon series.
    Sermons,
    /// Small groups.
    Groups,
}

impl ContentType {
    /// Returns all content types in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Events, Self::Sermons, Self::Groups]
    }

    /// Look up a content type by its keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "events" => Some(Self::Events),
            "sermons" => Some(Self::Sermons),
            "groups" => Some(Self::Groups),
            _ => None,
        }
    }

    /// Returns the keyword naming this content type.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Sermons => "sermons",
            Self::Groups => "groups",
        }
    }

    /// API path of the collection backing this content type.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Events => constants::api::EVENTS_PATH,
            Self::Sermons => constants::api::SERMONS_PATH,
            Self::Groups => constants::api::GROUPS_PATH,
        }
    }

    /// Full collection URL under the given API base.
    pub fn endpoint(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Resolve a keyword to its fixed upstream URL on the public API.
pub fn resolve_endpoint(keyword: &str) -> Option<String> {
    ContentType::from_keyword(keyword).map(|t| t.endpoint(constants::api::DEFAULT_BASE_URL))
}

/// A sanitized request for one listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingRequest {
    /// Sanitized content type keyword; may name an unsupported type.
    pub keyword: String,
    /// Number of items to request, at least 1.
    pub limit: u32,
}

impl ListingRequest {
    /// Build a request from raw embed attributes, applying defaults.
    pub fn from_attrs(content_type: Option<&str>, limit: Option<&str>) -> Self {
        let keyword = sanitize_key(content_type.unwrap_or(constants::listing::DEFAULT_TYPE));
        let limit = limit.map_or(constants::listing::DEFAULT_LIMIT, parse_limit);
        Self { keyword, limit }
    }

    /// Build a request for a fixed content type.
    pub fn for_type(content_type: ContentType, limit: u32) -> Self {
        Self {
            keyword: content_type.keyword().to_string(),
            limit: limit.max(1),
        }
    }

    /// The content type this request names, if supported.
    pub fn content_type(&self) -> Option<ContentType> {
        ContentType::from_keyword(&self.keyword)
    }
}

impl Default for ListingRequest {
    fn default() -> Self {
        Self::from_attrs(None, None)
    }
}

/// Lowercase a key and strip everything outside `[a-z0-9_-]`.
pub fn sanitize_key(raw: &str) -> String {
    RE_KEY_STRIP.replace_all(&raw.to_ascii_lowercase(), "").into_owned()
}

/// Parse a page size leniently: leading integer digits only, clamped to at least 1.
pub fn parse_limit(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first().copied() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let value = digits
        .chars()
        .take_while(char::is_ascii_digit)
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(d));

    if negative {
        1
    } else {
        value.max(1)
    }
}
