//! Command-line arguments.

use clap::Parser;

use crate::types::{parse_limit, ListingRequest};

/// Keyword selecting every content type at once.
pub const ALL_TYPES: &str = "all";

/// Render Planning Center events, sermons or groups as an embeddable HTML fragment.
///
/// Credentials come from `PCO_APP_ID` and `PCO_SECRET` (environment or `.env`).
/// Rendered fragments are cached for an hour in the user cache directory.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Content type to list: events, sermons, groups, or all.
    #[arg(short = 't', long = "type", default_value = "events")]
    pub content_type: String,

    /// Number of items to request; non-numeric values count as 1.
    #[arg(short, long, default_value = "5")]
    pub limit: String,

    /// Drop the cached fragment before rendering.
    #[arg(long)]
    pub refresh: bool,

    /// Skip the on-disk cache for this run.
    #[arg(long)]
    pub no_cache: bool,

    /// Log pipeline details to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Whether every content type was requested.
    pub fn wants_all(&self) -> bool {
        self.content_type.trim().eq_ignore_ascii_case(ALL_TYPES)
    }

    /// Sanitized page size.
    pub fn limit(&self) -> u32 {
        parse_limit(&self.limit)
    }

    /// The single-type request these arguments describe.
    pub fn request(&self) -> ListingRequest {
        ListingRequest::from_attrs(Some(&self.content_type), Some(&self.limit))
    }
}
