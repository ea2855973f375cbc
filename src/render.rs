//! HTML rendering of listings.
//!
//! Produces a compact `<ul>` fragment (no whitespace between tags) meant to be
//! dropped into a page as-is. All text and URLs coming from the API are
//! escaped here.

use chrono::{DateTime, FixedOffset};
use std::fmt::Write as _;
use url::Url;

use crate::config::Config;
use crate::constants::html;
use crate::planning_center::ListingItem;
use crate::types::ContentType;

/// Presentation settings for rendered listings.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// `strftime` pattern for event dates.
    pub date_format: String,
    /// Offset event dates are shown in.
    pub utc_offset: FixedOffset,
}

impl RenderOptions {
    /// Take presentation settings from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            date_format: config.date_format.clone(),
            utc_offset: config.utc_offset,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Render items as an HTML list for the given content type.
pub fn render_items(content_type: ContentType, items: &[ListingItem], options: &RenderOptions) -> String {
    if items.is_empty() {
        return html::NO_ITEMS.to_string();
    }

    let mut out = format!(
        r#"<ul class="{} {}-{}">"#,
        html::LIST_CLASS,
        html::LIST_CLASS,
        escape_html(content_type.keyword())
    );

    for item in items {
        let title = escape_html(item.name.as_deref().unwrap_or(html::UNTITLED));

        out.push_str("<li>");
        match item.html_url.as_deref().and_then(sanitize_url) {
            Some(href) => {
                out.push_str(&format!(r#"<a href="{href}">{title}</a>"#));
            }
            None => out.push_str(&title),
        }

        if content_type == ContentType::Events {
            if let Some(date) = item.starts_at.as_deref().and_then(|s| format_date(s, options)) {
                out.push_str(&format!(
                    r#" <span class="{}">({})</span>"#,
                    html::DATE_CLASS,
                    escape_html(&date)
                ));
            }
        }
        out.push_str("</li>");
    }

    out.push_str("</ul>");
    out
}

/// Format an RFC 3339 timestamp for display; `None` when unparseable or empty.
pub fn format_date(timestamp: &str, options: &RenderOptions) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp.trim())
        .map_err(|e| tracing::debug!("Skipping unparseable date {timestamp:?}: {e}"))
        .ok()?;

    let mut formatted = String::new();
    // Invalid patterns surface as a fmt error rather than a panic
    write!(formatted, "{}", parsed.with_timezone(&options.utc_offset).format(&options.date_format))
        .map_err(|_| tracing::warn!("Invalid date format {:?}", options.date_format))
        .ok()?;

    (!formatted.is_empty()).then_some(formatted)
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Validate a link target and escape it for an `href` attribute.
///
/// Only absolute URLs with an allowed scheme pass; anything else yields `None`.
pub fn sanitize_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let url = Url::parse(raw).ok()?;
    if !html::ALLOWED_URL_SCHEMES.contains(&url.scheme()) {
        tracing::debug!("Dropping link with disallowed scheme {:?}", url.scheme());
        return None;
    }

    Some(escape_html(url.as_str()))
}
